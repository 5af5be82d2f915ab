//! Domain logic.
//!
//! - **bridge**: the external systems (yt-dlp, the analysis Space, the
//!   lyrics index) behind traits
//! - **tools**: the MCP tools built on top of the bridge
pub mod bridge;
pub mod tools;
