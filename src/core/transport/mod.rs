//! Transport layer for the bridge.
//!
//! MCP hosts spawn the bridge and speak newline-delimited JSON-RPC on its
//! stdin/stdout; that is the only transport.

mod error;
pub mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
