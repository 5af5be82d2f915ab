//! Per-server state shared by every tool invocation.

use std::sync::Arc;

use crate::core::config::Config;
use crate::domains::bridge::Bridge;

/// What a tool handler can reach: the immutable configuration and the
/// external collaborators.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub config: Arc<Config>,
    pub bridge: Bridge,
}

impl ToolContext {
    pub fn new(config: Arc<Config>, bridge: Bridge) -> Self {
        Self { config, bridge }
    }
}
