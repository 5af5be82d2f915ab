//! MCP server handler.
//!
//! Answers the protocol's handshake and the two tool requests. Listing and
//! dispatch are delegated to the [`ToolRegistry`]; this file only adapts
//! them to rmcp's types.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::bridge::Bridge;
use crate::domains::tools::ToolRegistry;

/// The main MCP server handler.
///
/// Cheap to clone; clones share the registry and its collaborators.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Profile-scoped tool set and dispatcher.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a server wired to the real yt-dlp, analysis Space and lyrics
    /// index.
    pub fn new(config: Config) -> Result<Self> {
        let bridge = Bridge::from_config(&config)?;
        Ok(Self::with_bridge(config, bridge))
    }

    /// Create a server around explicit collaborators.
    pub fn with_bridge(config: Config, bridge: Bridge) -> Self {
        let config = Arc::new(config);
        Self {
            registry: Arc::new(ToolRegistry::new(config.clone(), bridge)),
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    fn instructions(&self) -> String {
        let mut text = String::from(
            "Local music perception bridge. analyze_youtube downloads a video's audio on this \
             machine and returns the analysis; download_audio only downloads.",
        );
        if self.config.profile.has_lyrics() {
            text.push_str(" get_lyrics and search_lyrics query the lyrics index.");
        }
        text.push_str(" ping reports liveness.");
        text
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer")
            .field("name", &self.config.server.name)
            .field("registry", &self.registry)
            .finish()
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::default();
        server_info.name = self.config.server.name.clone();
        server_info.version = self.config.server.version.clone();

        ServerInfo {
            instructions: Some(self.instructions()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            ..Default::default()
        }
    }

    #[instrument(skip_all)]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        debug!("Listing tools for profile '{}'", self.config.profile);
        Ok(ListToolsResult::with_all_items(
            self.registry.get_all_tools(),
        ))
    }

    #[instrument(skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("Calling tool");
        let response = self
            .registry
            .call_tool(&request.name, request.arguments)
            .await;
        Ok(response.into_call_tool_result())
    }
}
