//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Failures that end the session, as opposed to a single tool call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The MCP handshake did not complete.
    #[error("Failed to start MCP session: {0}")]
    Init(String),

    /// The session ended abnormally.
    #[error("MCP session error: {0}")]
    Session(String),
}

impl TransportError {
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }
}
