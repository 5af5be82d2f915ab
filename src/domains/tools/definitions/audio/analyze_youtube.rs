//! Download-and-analyze tool.
//!
//! Downloads a video's audio locally, submits it to the analysis Space and
//! returns the Space's result. The downloaded file never leaves this module.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::domains::bridge::analysis::Spectrogram;
use crate::domains::tools::definitions::common::{parse_params, validate_source_url};
use crate::domains::tools::{ToolContext, ToolError, ToolResponse};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the analyze tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyzeYoutubeParams {
    /// YouTube URL to analyze.
    #[schemars(description = "Full YouTube URL to analyze (http or https; bare video IDs are rejected)")]
    pub url: String,
}

// ============================================================================
// Structured Output
// ============================================================================

/// Payload of a successful analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeYoutubeResult {
    pub source: &'static str,
    pub url: String,
    pub analysis: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectrogram: Option<Spectrogram>,
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Download + analyze tool.
#[derive(Debug, Clone)]
pub struct AnalyzeYoutubeTool;

impl AnalyzeYoutubeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "analyze_youtube";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Download audio from YouTube and analyze it. \
         Runs locally to bypass datacenter IP blocking; the audio is sent to the analysis service \
         and deleted afterwards. Requires a full http(s) URL, not a bare video ID.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(url = %params.url))]
    pub async fn execute(
        params: &AnalyzeYoutubeParams,
        ctx: &ToolContext,
    ) -> Result<ToolResponse, ToolError> {
        validate_source_url(&params.url)?;

        let audio = ctx.bridge.audio.fetch(&params.url).await?;

        // `audio` removes the file when it goes out of scope, on success,
        // on error, and when this future is dropped mid-analysis.
        let analysis = ctx
            .bridge
            .analyzer
            .analyze(audio.path(), ctx.config.profile.wants_spectrogram())
            .await;
        drop(audio);

        let analysis = analysis?;
        info!(
            "Analysis complete (spectrogram: {})",
            analysis.spectrogram.is_some()
        );

        Ok(ToolResponse::success(AnalyzeYoutubeResult {
            source: "youtube",
            url: params.url.clone(),
            analysis: analysis.analysis,
            spectrogram: analysis.spectrogram,
        }))
    }

    /// Parse raw arguments and run the tool, always producing an envelope.
    pub async fn handle(arguments: Option<JsonObject>, ctx: &ToolContext) -> ToolResponse {
        let result = match parse_params::<AnalyzeYoutubeParams>(arguments) {
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
            input_schema: cached_schema_for_type::<AnalyzeYoutubeParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
