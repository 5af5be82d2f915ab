//! Tool definitions module.
//!
//! Each tool lives in its own file and exposes `NAME`, `DESCRIPTION`,
//! `handle()` and `to_tool()`.

pub mod audio;
pub mod common;
pub mod lyrics;
mod ping;

pub use audio::{AnalyzeYoutubeTool, DownloadAudioTool};
pub use lyrics::{GetLyricsTool, SearchLyricsTool};
pub use ping::{PingParams, PingResult, PingTool};
