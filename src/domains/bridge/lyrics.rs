//! Lyrics lookup against an LRCLIB-compatible index.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use super::error::{BridgeError, BridgeResult};
use crate::core::config::LyricsConfig;

/// `[MM:SS.CC] text`
static SYNCED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{2}):(\d{2})\.(\d{2})\]\s*(.*)$").expect("synced line pattern is valid")
});

/// One timestamped lyric line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncedLine {
    /// Offset from the start of the track, in seconds.
    pub time: f64,
    pub text: String,
}

/// Lyrics body: timestamped lines when available, otherwise plain text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", content = "content", rename_all = "lowercase")]
pub enum Lyrics {
    Synced(Vec<SyncedLine>),
    Plain(String),
    None,
}

/// A track's lyrics and the metadata the index returned with them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LyricsRecord {
    pub id: Option<u64>,
    pub track_name: String,
    pub artist_name: String,
    pub album_name: Option<String>,
    /// Track length in seconds.
    pub duration: Option<f64>,
    pub instrumental: bool,
    pub lyrics: Lyrics,
}

/// Raw record as served by the index.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LrclibRecord {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    track_name: String,
    #[serde(default)]
    artist_name: String,
    #[serde(default)]
    album_name: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    instrumental: bool,
    #[serde(default)]
    plain_lyrics: Option<String>,
    #[serde(default)]
    synced_lyrics: Option<String>,
}

impl From<LrclibRecord> for LyricsRecord {
    fn from(raw: LrclibRecord) -> Self {
        let lyrics = match (raw.synced_lyrics.as_deref(), raw.plain_lyrics) {
            (Some(synced), _) if !synced.trim().is_empty() => {
                Lyrics::Synced(parse_synced_lyrics(synced))
            }
            (_, Some(plain)) if !plain.trim().is_empty() => Lyrics::Plain(plain),
            _ => Lyrics::None,
        };

        Self {
            id: raw.id,
            track_name: raw.track_name,
            artist_name: raw.artist_name,
            album_name: raw.album_name,
            duration: raw.duration,
            instrumental: raw.instrumental,
            lyrics,
        }
    }
}

/// Parse `[MM:SS.CC] text` lines into timestamped lyrics.
///
/// Lines that do not match are skipped. Output keeps input order and is
/// neither sorted nor deduplicated.
pub fn parse_synced_lyrics(input: &str) -> Vec<SyncedLine> {
    input
        .lines()
        .filter_map(|line| {
            let caps = SYNCED_LINE.captures(line.trim_end())?;
            let minutes: f64 = caps[1].parse().ok()?;
            let seconds: f64 = caps[2].parse().ok()?;
            let centis: f64 = caps[3].parse().ok()?;
            Some(SyncedLine {
                time: minutes * 60.0 + seconds + centis / 100.0,
                text: caps[4].to_string(),
            })
        })
        .collect()
}

/// Searchable lyrics index.
#[async_trait]
pub trait LyricsIndex: Send + Sync {
    /// Exact lookup by track and artist. `Ok(None)` means not found.
    async fn fetch_lyrics(&self, track: &str, artist: &str) -> BridgeResult<Option<LyricsRecord>>;

    /// Free-text search. An empty list means nothing matched.
    async fn search_lyrics(&self, query: &str) -> BridgeResult<Vec<LyricsRecord>>;
}

/// HTTP client for LRCLIB.
#[derive(Debug, Clone)]
pub struct LrclibClient {
    http: reqwest::Client,
    config: LyricsConfig,
}

impl LrclibClient {
    pub fn new(http: reqwest::Client, config: LyricsConfig) -> Self {
        Self { http, config }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl LyricsIndex for LrclibClient {
    #[instrument(skip(self))]
    async fn fetch_lyrics(&self, track: &str, artist: &str) -> BridgeResult<Option<LyricsRecord>> {
        let response = self
            .http
            .get(self.endpoint("/get"))
            .query(&[("track_name", track), ("artist_name", artist)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            info!("No lyrics found");
            return Ok(None);
        }
        if !status.is_success() {
            error!("Lyrics lookup rejected with status {}", status);
            return Err(BridgeError::LyricsLookupFailed(status.as_u16()));
        }

        let raw: LrclibRecord = response.json().await?;
        Ok(Some(raw.into()))
    }

    #[instrument(skip(self))]
    async fn search_lyrics(&self, query: &str) -> BridgeResult<Vec<LyricsRecord>> {
        let response = self
            .http
            .get(self.endpoint("/search"))
            .query(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Lyrics search rejected with status {}", status);
            return Err(BridgeError::LyricsSearchFailed(status.as_u16()));
        }

        let raw: Vec<LrclibRecord> = response.json().await?;
        debug!("Search returned {} record(s)", raw.len());
        Ok(raw.into_iter().map(LyricsRecord::from).collect())
    }
}
