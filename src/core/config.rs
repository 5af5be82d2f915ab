//! Configuration management for the bridge.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults. The resulting value is
//! passed to the server at construction; nothing reads the environment
//! after startup.

use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Placeholder analysis endpoint used when `HF_SPACE_URL` is not set.
pub const DEFAULT_SPACE_URL: &str = "https://YOUR-USERNAME-audio-analysis-api.hf.space";

/// Public LRCLIB API.
pub const DEFAULT_LYRICS_API_URL: &str = "https://lrclib.net/api";

/// Main configuration structure for the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Which process variant to run.
    pub profile: Profile,

    /// Remote analysis service.
    pub analysis: AnalysisConfig,

    /// Audio downloader subprocess.
    pub downloader: DownloaderConfig,

    /// Lyrics index.
    pub lyrics: LyricsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Process variant.
///
/// `Local` is the minimal downloader/analyzer; `Full` adds spectrograms,
/// lyrics tools and a pinned codec-tool location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Local,
    #[default]
    Full,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Full => "full",
        }
    }

    /// Service name reported when `MCP_SERVER_NAME` is not set.
    pub fn default_service_name(self) -> &'static str {
        match self {
            Self::Local => "music-perception-local",
            Self::Full => "music-perception",
        }
    }

    /// Capabilities advertised by `ping`.
    pub fn capabilities(self) -> &'static [&'static str] {
        match self {
            Self::Local => &["youtube_download", "audio_analysis"],
            Self::Full => &[
                "youtube_download",
                "audio_analysis",
                "spectrogram",
                "lyrics",
                "synced_lyrics",
            ],
        }
    }

    /// Whether the predict call asks the Space for a spectrogram.
    pub fn wants_spectrogram(self) -> bool {
        matches!(self, Self::Full)
    }

    /// Whether lyrics tools are exposed.
    pub fn has_lyrics(self) -> bool {
        matches!(self, Self::Full)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" | "basic" => Ok(Self::Local),
            "full" | "rich" => Ok(Self::Full),
            other => Err(Error::config(format!(
                "Unknown profile '{}'. Use 'local' or 'full'",
                other
            ))),
        }
    }
}

/// Remote analysis service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Base URL of the Space (no trailing path).
    pub space_url: String,

    /// Function index addressed by `/api/predict`.
    pub fn_index: u32,
}

/// Downloader subprocess configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloaderConfig {
    /// yt-dlp executable (name on PATH or absolute path).
    pub ytdlp_path: PathBuf,

    /// Passed as `--ffmpeg-location` when set.
    pub ffmpeg_location: Option<PathBuf>,

    /// Directory receiving downloaded audio.
    pub temp_dir: PathBuf,
}

/// Lyrics index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LyricsConfig {
    /// Base URL of the LRCLIB-compatible API.
    pub api_url: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            space_url: DEFAULT_SPACE_URL.to_string(),
            fn_index: 0,
        }
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: PathBuf::from("yt-dlp"),
            ffmpeg_location: None,
            temp_dir: std::env::temp_dir(),
        }
    }
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_LYRICS_API_URL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for the given process variant.
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            server: ServerConfig {
                name: profile.default_service_name().to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            profile,
            analysis: AnalysisConfig::default(),
            downloader: DownloaderConfig::default(),
            lyrics: LyricsConfig::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `HF_SPACE_URL` selects the analysis service; everything else uses the
    /// `MCP_` prefix, e.g. `MCP_PROFILE`, `MCP_YTDLP_PATH`, `MCP_TEMP_DIR`.
    /// `MCP_LOG_LEVEL` is read by the binary before this runs.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let profile = match std::env::var("MCP_PROFILE") {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                warn!("{}; falling back to '{}'", e, Profile::default());
                Profile::default()
            }),
            Err(_) => Profile::default(),
        };

        let mut config = Self::for_profile(profile);

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(url) = std::env::var("HF_SPACE_URL") {
            config.analysis.space_url = url;
            info!("Analysis Space: {}", config.analysis.space_url);
        } else {
            warn!(
                "HF_SPACE_URL not set - using placeholder {}. \
                 Analysis calls will fail until it points at a deployed Space.",
                DEFAULT_SPACE_URL
            );
        }

        if let Ok(index) = std::env::var("MCP_PREDICT_FN_INDEX") {
            match index.parse() {
                Ok(i) => config.analysis.fn_index = i,
                Err(_) => warn!("Ignoring invalid MCP_PREDICT_FN_INDEX: {}", index),
            }
        }

        if let Ok(path) = std::env::var("MCP_YTDLP_PATH") {
            config.downloader.ytdlp_path = PathBuf::from(path);
        }

        if let Ok(location) = std::env::var("MCP_FFMPEG_LOCATION") {
            if profile == Profile::Full {
                config.downloader.ffmpeg_location = Some(PathBuf::from(location));
            } else {
                warn!("MCP_FFMPEG_LOCATION is only used by the 'full' profile; ignoring");
            }
        }

        if let Ok(dir) = std::env::var("MCP_TEMP_DIR") {
            config.downloader.temp_dir = PathBuf::from(dir);
        }

        if let Ok(url) = std::env::var("MCP_LYRICS_API_URL") {
            config.lyrics.api_url = url;
        }

        config
    }

    /// Check that the service URLs are usable.
    pub fn validate(&self) -> Result<()> {
        validate_http_url("HF_SPACE_URL", &self.analysis.space_url)?;
        if self.profile.has_lyrics() {
            validate_http_url("MCP_LYRICS_API_URL", &self.lyrics.api_url)?;
        }
        Ok(())
    }
}

fn validate_http_url(name: &str, value: &str) -> Result<()> {
    let url = reqwest::Url::parse(value)
        .map_err(|e| Error::config(format!("{} is not a valid URL ({}): {}", name, value, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(Error::config(format!(
            "{} must use http or https, got '{}'",
            name, scheme
        ))),
    }
}
