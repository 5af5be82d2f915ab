//! Liveness tool.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::config::Config;
use crate::domains::tools::ToolResponse;

/// `ping` takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PingParams {}

/// Static liveness metadata.
#[derive(Debug, Clone, Serialize)]
pub struct PingResult {
    pub status: &'static str,
    pub service: String,
    pub version: String,
    pub profile: &'static str,
    pub capabilities: &'static [&'static str],
    pub hf_space: String,
}

/// Ping tool.
#[derive(Debug, Clone)]
pub struct PingTool;

impl PingTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "ping";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Check if the local MCP is running";

    /// Build the liveness payload. Performs no I/O.
    pub fn execute(config: &Config) -> ToolResponse {
        ToolResponse::success(PingResult {
            status: "alive",
            service: config.server.name.clone(),
            version: config.server.version.clone(),
            profile: config.profile.as_str(),
            capabilities: config.profile.capabilities(),
            hf_space: config.analysis.space_url.clone(),
        })
    }

    /// Arguments are ignored.
    pub fn handle(_arguments: Option<JsonObject>, config: &Config) -> ToolResponse {
        Self::execute(config)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<PingParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
