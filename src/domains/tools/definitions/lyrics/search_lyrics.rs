//! Free-text lyrics search.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::domains::bridge::LyricsRecord;
use crate::domains::bridge::lyrics::Lyrics;
use crate::domains::tools::definitions::common::{parse_params, require_non_empty};
use crate::domains::tools::{ToolContext, ToolError, ToolResponse};

/// Results beyond this are dropped.
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Parameters for the lyrics search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchLyricsParams {
    /// Free-text query (title, artist, or a lyric fragment).
    #[schemars(description = "Search query: song title, artist, or lyric fragment")]
    pub query: String,
}

/// One search hit, without the lyric body.
#[derive(Debug, Clone, Serialize)]
pub struct LyricsHit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub track_name: String,
    pub artist_name: String,
    pub album_name: Option<String>,
    pub duration: Option<f64>,
    pub instrumental: bool,
    pub has_synced_lyrics: bool,
}

impl From<LyricsRecord> for LyricsHit {
    fn from(record: LyricsRecord) -> Self {
        Self {
            has_synced_lyrics: matches!(record.lyrics, Lyrics::Synced(_)),
            id: record.id,
            track_name: record.track_name,
            artist_name: record.artist_name,
            album_name: record.album_name,
            duration: record.duration,
            instrumental: record.instrumental,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SearchLyricsResult {
    Found {
        found: bool,
        query: String,
        count: usize,
        results: Vec<LyricsHit>,
    },
    NotFound {
        found: bool,
        query: String,
        message: String,
    },
}

/// Lyrics search tool.
#[derive(Debug, Clone)]
pub struct SearchLyricsTool;

impl SearchLyricsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_lyrics";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search the lyrics index by free text. \
         Returns up to 10 matching tracks; use get_lyrics to fetch the lyrics of one of them.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(query = %params.query))]
    pub async fn execute(
        params: &SearchLyricsParams,
        ctx: &ToolContext,
    ) -> Result<ToolResponse, ToolError> {
        require_non_empty("query", &params.query)?;

        let records = ctx.bridge.lyrics.search_lyrics(&params.query).await?;
        if records.is_empty() {
            return Ok(ToolResponse::success(SearchLyricsResult::NotFound {
                found: false,
                query: params.query.clone(),
                message: format!("No lyrics found for query: {}", params.query),
            }));
        }

        let results: Vec<LyricsHit> = records
            .into_iter()
            .take(MAX_SEARCH_RESULTS)
            .map(LyricsHit::from)
            .collect();
        info!("Returning {} hit(s)", results.len());

        Ok(ToolResponse::success(SearchLyricsResult::Found {
            found: true,
            query: params.query.clone(),
            count: results.len(),
            results,
        }))
    }

    /// Parse raw arguments and run the tool, always producing an envelope.
    pub async fn handle(arguments: Option<JsonObject>, ctx: &ToolContext) -> ToolResponse {
        let result = match parse_params::<SearchLyricsParams>(arguments) {
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
            input_schema: cached_schema_for_type::<SearchLyricsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
