//! Exact lyrics lookup by track and artist.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::domains::bridge::LyricsRecord;
use crate::domains::tools::definitions::common::{parse_params, require_non_empty};
use crate::domains::tools::{ToolContext, ToolError, ToolResponse};

/// Parameters for the lyrics lookup tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetLyricsParams {
    /// Track title.
    #[schemars(description = "Track title")]
    pub track_name: String,

    /// Artist name.
    #[schemars(description = "Artist name")]
    pub artist_name: String,
}

/// Payload of a lookup: either the record or a not-found notice.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GetLyricsResult {
    Found {
        found: bool,
        #[serde(flatten)]
        record: LyricsRecord,
    },
    NotFound {
        found: bool,
        message: String,
    },
}

/// Lyrics lookup tool.
#[derive(Debug, Clone)]
pub struct GetLyricsTool;

impl GetLyricsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_lyrics";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get lyrics for a song by track and artist name. \
         Returns time-synced lines (seconds + text) when available, otherwise plain lyrics.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(track = %params.track_name, artist = %params.artist_name))]
    pub async fn execute(
        params: &GetLyricsParams,
        ctx: &ToolContext,
    ) -> Result<ToolResponse, ToolError> {
        require_non_empty("track_name", &params.track_name)?;
        require_non_empty("artist_name", &params.artist_name)?;

        let result = match ctx
            .bridge
            .lyrics
            .fetch_lyrics(&params.track_name, &params.artist_name)
            .await?
        {
            Some(record) => {
                info!("Lyrics found");
                GetLyricsResult::Found {
                    found: true,
                    record,
                }
            }
            None => GetLyricsResult::NotFound {
                found: false,
                message: format!(
                    "No lyrics found for '{}' by '{}'",
                    params.track_name, params.artist_name
                ),
            },
        };

        Ok(ToolResponse::success(result))
    }

    /// Parse raw arguments and run the tool, always producing an envelope.
    pub async fn handle(arguments: Option<JsonObject>, ctx: &ToolContext) -> ToolResponse {
        let result = match parse_params::<GetLyricsParams>(arguments) {
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
            input_schema: cached_schema_for_type::<GetLyricsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
