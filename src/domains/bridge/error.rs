//! Bridge-specific error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Errors raised while talking to the downloader, the analysis service or
/// the lyrics index.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The external downloader could not be started at all.
    #[error("Failed to spawn {program}: {source}. Is {program} installed?")]
    ToolUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The downloader exited with a non-zero status.
    #[error("{program} failed (code {}): {stderr}", display_code(.code))]
    DownloadFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The downloader reported success but produced no file.
    #[error("{program} exited (code {}) without producing {}: {stderr}", display_code(.code), .path.display())]
    MissingOutput {
        program: String,
        code: Option<i32>,
        path: PathBuf,
        stderr: String,
    },

    /// The upload step returned a non-success status.
    #[error("Upload failed: {0}")]
    UploadFailed(u16),

    /// The predict step returned a non-success status.
    #[error("Analysis failed: {0}")]
    PredictFailed(u16),

    /// The lyrics lookup returned a non-success status other than 404.
    #[error("Lyrics lookup failed: {0}")]
    LyricsLookupFailed(u16),

    /// The lyrics search returned a non-success status.
    #[error("Lyrics search failed: {0}")]
    LyricsSearchFailed(u16),

    /// A remote service answered with a body we cannot use.
    #[error("Invalid response from {service}: {reason}")]
    InvalidResponse { service: String, reason: String },

    /// Transport-level HTTP failure (connection refused, TLS, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local file I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Create an invalid-response error.
    pub fn invalid_response(service: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            service: service.into(),
            reason: reason.into(),
        }
    }
}

// A process killed by a signal has no exit code.
fn display_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "signal".to_string())
}
