//! Process-level infrastructure: configuration, errors, the MCP handler and
//! the stdio transport that carries it.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::{Config, Profile};
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::StdioTransport;
