//! Tool-specific error types.

use thiserror::Error;

use crate::domains::bridge::BridgeError;

/// Errors that can occur during tool operations.
///
/// The display text of each variant is what the caller sees in the error
/// envelope.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not exposed by this server.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// An external collaborator failed.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
