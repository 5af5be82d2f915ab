//! Error types and handling for the bridge.
//!
//! Tool failures never surface here; they become error envelopes inside the
//! session. This type covers what stops the process: bad configuration, a
//! bridge that cannot be built, or a transport that fails.

use thiserror::Error;

/// A specialized Result type for bridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the bridge.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from an external collaborator.
    #[error("Bridge error: {0}")]
    Bridge(#[from] crate::domains::bridge::BridgeError),

    /// Error from the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::TransportError;

    #[test]
    fn test_layer_prefixes() {
        assert_eq!(
            Error::config("HF_SPACE_URL must use http or https").to_string(),
            "Configuration error: HF_SPACE_URL must use http or https"
        );
        let err: Error = TransportError::init("stdin closed").into();
        assert_eq!(
            err.to_string(),
            "Transport error: Failed to start MCP session: stdin closed"
        );
    }
}
