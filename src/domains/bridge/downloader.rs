//! Audio download via yt-dlp.
//!
//! Each download writes to a freshly generated path under the configured
//! temporary directory. The resulting [`AudioHandle`] owns that file and
//! removes it when dropped, unless the caller takes the path with
//! [`AudioHandle::keep`].

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::error::{BridgeError, BridgeResult};
use crate::core::config::DownloaderConfig;

/// Audio container produced by the downloader.
pub const AUDIO_FORMAT: &str = "mp3";

/// Target bitrate passed to the downloader.
pub const AUDIO_QUALITY: &str = "192K";

/// Largest source the downloader is allowed to fetch.
pub const MAX_FILESIZE: &str = "50M";

/// An ephemeral audio file owned by a single tool invocation.
///
/// Dropping the handle deletes the file. Deletion failures are ignored: the
/// file may never have been created, or the OS temp cleanup may already
/// have reclaimed it.
#[derive(Debug)]
pub struct AudioHandle {
    path: Option<PathBuf>,
}

impl AudioHandle {
    /// Take ownership of `path`; the file is removed when the handle drops.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Path of the owned file.
    pub fn path(&self) -> &Path {
        self.path
            .as_deref()
            .unwrap_or_else(|| Path::new(""))
    }

    /// Release ownership and return the path. The file is left on disk.
    pub fn keep(mut self) -> PathBuf {
        self.path.take().unwrap_or_default()
    }
}

impl Drop for AudioHandle {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            match std::fs::remove_file(&path) {
                Ok(()) => debug!("Removed temporary audio {}", path.display()),
                Err(e) => debug!("Ignoring cleanup failure for {}: {}", path.display(), e),
            }
        }
    }
}

/// Source of local audio files for a remote video URL.
#[async_trait]
pub trait AudioSource: Send + Sync {
    /// Download the audio track behind `url` to a new local file.
    async fn fetch(&self, url: &str) -> BridgeResult<AudioHandle>;
}

/// Downloader backed by the `yt-dlp` command-line tool.
#[derive(Debug, Clone)]
pub struct YtDlpDownloader {
    config: DownloaderConfig,
}

impl YtDlpDownloader {
    pub fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Generate a unique output path for one download.
    pub fn scratch_path(&self) -> PathBuf {
        self.config
            .temp_dir
            .join(format!("ytdl-{}.{}", Uuid::new_v4(), AUDIO_FORMAT))
    }

    /// Arguments passed to the downloader for `url` writing to `output`.
    pub fn build_args(&self, url: &str, output: &Path) -> Vec<String> {
        let mut args = vec![
            "-x".to_string(),
            "--audio-format".to_string(),
            AUDIO_FORMAT.to_string(),
            "--audio-quality".to_string(),
            AUDIO_QUALITY.to_string(),
            "-o".to_string(),
            output.to_string_lossy().into_owned(),
            "--no-playlist".to_string(),
            "--max-filesize".to_string(),
            MAX_FILESIZE.to_string(),
        ];

        if let Some(location) = &self.config.ffmpeg_location {
            args.push("--ffmpeg-location".to_string());
            args.push(location.to_string_lossy().into_owned());
        }

        args.push(url.to_string());
        args
    }
}

#[async_trait]
impl AudioSource for YtDlpDownloader {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> BridgeResult<AudioHandle> {
        let program = self.config.ytdlp_path.to_string_lossy().into_owned();
        let output_path = self.scratch_path();

        // Owned from here on so a failed or cancelled download leaves nothing behind.
        let handle = AudioHandle::new(&output_path);

        info!("Downloading audio to {}", output_path.display());

        let output = Command::new(&self.config.ytdlp_path)
            .args(self.build_args(url, &output_path))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| BridgeError::ToolUnavailable {
                program: program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let code = output.status.code();

        if !output.status.success() {
            warn!("{} exited with {:?}", program, code);
            return Err(BridgeError::DownloadFailed {
                program,
                code,
                stderr,
            });
        }

        if !tokio::fs::try_exists(&output_path).await.unwrap_or(false) {
            warn!("{} exited cleanly but {} is missing", program, output_path.display());
            return Err(BridgeError::MissingOutput {
                program,
                code,
                path: output_path,
                stderr,
            });
        }

        info!("Download complete");
        Ok(handle)
    }
}
