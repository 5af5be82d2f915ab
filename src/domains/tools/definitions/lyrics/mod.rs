//! Lyrics tools backed by the lyrics index.

mod get_lyrics;
mod search_lyrics;

pub use get_lyrics::{GetLyricsParams, GetLyricsResult, GetLyricsTool};
pub use search_lyrics::{
    LyricsHit, MAX_SEARCH_RESULTS, SearchLyricsParams, SearchLyricsResult, SearchLyricsTool,
};
