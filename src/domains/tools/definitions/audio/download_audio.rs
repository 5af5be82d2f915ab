//! Download-only tool.
//!
//! Unlike `analyze_youtube`, the downloaded file is handed to the caller and
//! stays on disk until the OS cleans its temp directory.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{parse_params, validate_source_url};
use crate::domains::tools::{ToolContext, ToolError, ToolResponse};

/// Parameters for the download tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DownloadAudioParams {
    /// YouTube URL to download.
    #[schemars(description = "Full YouTube URL to download (http or https; bare video IDs are rejected)")]
    pub url: String,
}

/// Payload of a successful download.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadAudioResult {
    pub url: String,
    pub local_path: String,
    pub message: &'static str,
}

/// Download tool.
#[derive(Debug, Clone)]
pub struct DownloadAudioTool;

impl DownloadAudioTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "download_audio";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Download audio from YouTube without analysis. Returns local file path. \
         Requires a full http(s) URL, not a bare video ID.";

    const KEPT_MESSAGE: &'static str =
        "Audio downloaded. File will remain until system cleans temp folder.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(url = %params.url))]
    pub async fn execute(
        params: &DownloadAudioParams,
        ctx: &ToolContext,
    ) -> Result<ToolResponse, ToolError> {
        validate_source_url(&params.url)?;

        let local_path = ctx.bridge.audio.fetch(&params.url).await?.keep();
        info!("Audio kept at {}", local_path.display());

        Ok(ToolResponse::success(DownloadAudioResult {
            url: params.url.clone(),
            local_path: local_path.display().to_string(),
            message: Self::KEPT_MESSAGE,
        }))
    }

    /// Parse raw arguments and run the tool, always producing an envelope.
    pub async fn handle(arguments: Option<JsonObject>, ctx: &ToolContext) -> ToolResponse {
        let result = match parse_params::<DownloadAudioParams>(arguments) {
            Ok(params) => Self::execute(&params, ctx).await,
            Err(e) => Err(e),
        };
        result.into()
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DownloadAudioParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
