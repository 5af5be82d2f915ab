//! Music perception bridge.
//!
//! A local MCP server that downloads audio with yt-dlp on the user's own
//! machine, forwards it to a remote analysis Space, and looks up lyrics.
//!
//! # Architecture
//!
//! - **core**: configuration, errors, the MCP handler and the stdio transport
//! - **domains**
//!   - **bridge**: yt-dlp, the analysis Space and the lyrics index, each
//!     behind a trait
//!   - **tools**: the MCP tools, their registry and response envelope
//!
//! # Example
//!
//! ```rust,no_run
//! use music_perception_bridge::core::{Config, McpServer, StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!     StdioTransport::run(McpServer::new(config)?).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Profile, Result};
