//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The profile-dependent set of exposed tools
//! - Dispatch of a tool call by name to its handler
//! - Tool metadata for listing

use std::sync::Arc;

use futures::FutureExt;
use rmcp::model::{JsonObject, Tool};
use tracing::{error, warn};

use crate::core::config::{Config, Profile};
use crate::domains::bridge::Bridge;

use super::definitions::{
    AnalyzeYoutubeTool, DownloadAudioTool, GetLyricsTool, PingTool, SearchLyricsTool,
};
use super::{ToolContext, ToolError, ToolResponse};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages the tools exposed by one server instance.
///
/// The profile is fixed at construction; tools outside it are reported as
/// unknown.
pub struct ToolRegistry {
    ctx: ToolContext,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(config: Arc<Config>, bridge: Bridge) -> Self {
        Self {
            ctx: ToolContext::new(config, bridge),
        }
    }

    pub fn config(&self) -> &Config {
        &self.ctx.config
    }

    /// Names of the tools exposed by `profile`, in listing order.
    pub fn names_for(profile: Profile) -> Vec<&'static str> {
        let mut names = vec![AnalyzeYoutubeTool::NAME, DownloadAudioTool::NAME];
        if profile.has_lyrics() {
            names.push(GetLyricsTool::NAME);
            names.push(SearchLyricsTool::NAME);
        }
        names.push(PingTool::NAME);
        names
    }

    /// Get all tool names for this registry's profile.
    pub fn tool_names(&self) -> Vec<&'static str> {
        Self::names_for(self.ctx.config.profile)
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tool_names().contains(&name)
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.tool_names()
            .into_iter()
            .filter_map(|name| match name {
                AnalyzeYoutubeTool::NAME => Some(AnalyzeYoutubeTool::to_tool()),
                DownloadAudioTool::NAME => Some(DownloadAudioTool::to_tool()),
                GetLyricsTool::NAME => Some(GetLyricsTool::to_tool()),
                SearchLyricsTool::NAME => Some(SearchLyricsTool::to_tool()),
                PingTool::NAME => Some(PingTool::to_tool()),
                _ => None,
            })
            .collect()
    }

    /// Dispatch a tool call to the appropriate handler.
    ///
    /// Never fails: every outcome, including unknown names and panics inside
    /// a handler, becomes an envelope.
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> ToolResponse {
        if !self.has_tool(name) {
            warn!("Unknown tool requested: {}", name);
            return ToolError::not_found(name).into();
        }

        let ctx = &self.ctx;
        let dispatch = async move {
            match name {
                AnalyzeYoutubeTool::NAME => AnalyzeYoutubeTool::handle(arguments, ctx).await,
                DownloadAudioTool::NAME => DownloadAudioTool::handle(arguments, ctx).await,
                GetLyricsTool::NAME => GetLyricsTool::handle(arguments, ctx).await,
                SearchLyricsTool::NAME => SearchLyricsTool::handle(arguments, ctx).await,
                PingTool::NAME => PingTool::handle(arguments, &ctx.config),
                _ => ToolError::not_found(name).into(),
            }
        };

        match std::panic::AssertUnwindSafe(dispatch).catch_unwind().await {
            Ok(response) => response,
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!("Tool '{}' panicked: {}", name, reason);
                ToolError::internal(reason).into()
            }
        }
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("profile", &self.ctx.config.profile)
            .field("tools", &self.tool_names())
            .finish()
    }
}
