//! External bridge module.
//!
//! Everything that leaves the process goes through here:
//!
//! - `downloader.rs` - yt-dlp subprocess and the temporary audio handle
//! - `analysis/` - upload/predict exchange with the analysis Space
//! - `lyrics.rs` - LRCLIB lookup and the synced-lyrics parser
//! - `error.rs` - bridge error taxonomy
//!
//! Each external system sits behind a trait so tool handlers can be
//! exercised without the network.

pub mod analysis;
pub mod downloader;
mod error;
pub mod lyrics;

#[cfg(test)]
pub mod testing;

use std::sync::Arc;

use crate::core::config::Config;

pub use analysis::{AnalysisResult, AudioAnalyzer, SpaceClient};
pub use downloader::{AudioHandle, AudioSource, YtDlpDownloader};
pub use error::{BridgeError, BridgeResult};
pub use lyrics::{LrclibClient, LyricsIndex, LyricsRecord, parse_synced_lyrics};

/// The set of external collaborators a tool invocation may use.
#[derive(Clone)]
pub struct Bridge {
    pub audio: Arc<dyn AudioSource>,
    pub analyzer: Arc<dyn AudioAnalyzer>,
    pub lyrics: Arc<dyn LyricsIndex>,
}

impl Bridge {
    /// Assemble a bridge from explicit collaborators.
    pub fn new(
        audio: Arc<dyn AudioSource>,
        analyzer: Arc<dyn AudioAnalyzer>,
        lyrics: Arc<dyn LyricsIndex>,
    ) -> Self {
        Self {
            audio,
            analyzer,
            lyrics,
        }
    }

    /// Build the production bridge from configuration.
    ///
    /// The HTTP clients share one connection pool.
    pub fn from_config(config: &Config) -> Result<Self, BridgeError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("{}/{}", config.server.name, config.server.version))
            .build()?;

        Ok(Self::new(
            Arc::new(YtDlpDownloader::new(config.downloader.clone())),
            Arc::new(SpaceClient::new(http.clone(), config.analysis.clone())),
            Arc::new(LrclibClient::new(http, config.lyrics.clone())),
        ))
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge").finish_non_exhaustive()
    }
}
