//! Audio tools: download, and download followed by analysis.

mod analyze_youtube;
mod download_audio;

pub use analyze_youtube::{AnalyzeYoutubeParams, AnalyzeYoutubeResult, AnalyzeYoutubeTool};
pub use download_audio::{DownloadAudioParams, DownloadAudioResult, DownloadAudioTool};
