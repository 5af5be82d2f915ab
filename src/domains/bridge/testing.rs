//! In-memory stand-ins for the external collaborators, used by tool tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use super::analysis::AnalysisResult;
use super::lyrics::{Lyrics, LyricsRecord, SyncedLine};
use super::{AudioAnalyzer, AudioHandle, AudioSource, Bridge, BridgeError, BridgeResult, LyricsIndex};

/// Writes a small file into `dir` for every fetch and remembers its path.
pub struct FakeAudioSource {
    dir: PathBuf,
    fail: bool,
    pub created: Mutex<Vec<PathBuf>>,
}

impl FakeAudioSource {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            fail: false,
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(dir: &Path) -> Self {
        Self {
            fail: true,
            ..Self::new(dir)
        }
    }

    pub fn created(&self) -> Vec<PathBuf> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioSource for FakeAudioSource {
    async fn fetch(&self, _url: &str) -> BridgeResult<AudioHandle> {
        if self.fail {
            return Err(BridgeError::DownloadFailed {
                program: "yt-dlp".to_string(),
                code: Some(1),
                stderr: "ERROR: Video unavailable".to_string(),
            });
        }
        let path = self
            .dir
            .join(format!("ytdl-{}.mp3", uuid::Uuid::new_v4()));
        std::fs::write(&path, b"ID3fake")?;
        self.created.lock().unwrap().push(path.clone());
        Ok(AudioHandle::new(path))
    }
}

/// Analyzer that either returns a canned result or fails with a status.
pub struct FakeAnalyzer {
    fail_status: Option<u16>,
    pub calls: AtomicUsize,
    pub saw_existing_file: Mutex<Vec<bool>>,
    pub spectrogram_requests: Mutex<Vec<bool>>,
}

impl FakeAnalyzer {
    pub fn ok() -> Self {
        Self {
            fail_status: None,
            calls: AtomicUsize::new(0),
            saw_existing_file: Mutex::new(Vec::new()),
            spectrogram_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::ok()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioAnalyzer for FakeAnalyzer {
    async fn analyze(&self, audio: &Path, with_spectrogram: bool) -> BridgeResult<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.saw_existing_file.lock().unwrap().push(audio.exists());
        self.spectrogram_requests
            .lock()
            .unwrap()
            .push(with_spectrogram);

        if let Some(status) = self.fail_status {
            return Err(BridgeError::UploadFailed(status));
        }
        Ok(AnalysisResult {
            analysis: json!({"tempo": 120.0, "key": "C major"}),
            spectrogram: None,
        })
    }
}

/// Lyrics index with a single known track.
pub struct FakeLyrics {
    pub fail_status: Option<u16>,
    pub calls: AtomicUsize,
}

impl FakeLyrics {
    pub fn new() -> Self {
        Self {
            fail_status: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn known_record() -> LyricsRecord {
        LyricsRecord {
            id: Some(42),
            track_name: "Known Song".to_string(),
            artist_name: "Known Artist".to_string(),
            album_name: Some("Known Album".to_string()),
            duration: Some(225.0),
            instrumental: false,
            lyrics: Lyrics::Synced(vec![SyncedLine {
                time: 225.5,
                text: "hello".to_string(),
            }]),
        }
    }
}

#[async_trait]
impl LyricsIndex for FakeLyrics {
    async fn fetch_lyrics(&self, track: &str, artist: &str) -> BridgeResult<Option<LyricsRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.fail_status {
            return Err(BridgeError::LyricsLookupFailed(status));
        }
        Ok((track == "Known Song" && artist == "Known Artist").then(Self::known_record))
    }

    async fn search_lyrics(&self, query: &str) -> BridgeResult<Vec<LyricsRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.fail_status {
            return Err(BridgeError::LyricsSearchFailed(status));
        }
        if query == "many" {
            return Ok((0..25)
                .map(|i| LyricsRecord {
                    id: Some(i),
                    ..Self::known_record()
                })
                .collect());
        }
        Ok(if query.contains("Known") {
            vec![Self::known_record()]
        } else {
            Vec::new()
        })
    }
}

/// Fakes wired into a [`Bridge`], with handles kept for assertions.
pub struct FakeBridge {
    pub audio: Arc<FakeAudioSource>,
    pub analyzer: Arc<FakeAnalyzer>,
    pub lyrics: Arc<FakeLyrics>,
}

impl FakeBridge {
    pub fn new(audio: FakeAudioSource, analyzer: FakeAnalyzer, lyrics: FakeLyrics) -> Self {
        Self {
            audio: Arc::new(audio),
            analyzer: Arc::new(analyzer),
            lyrics: Arc::new(lyrics),
        }
    }

    pub fn bridge(&self) -> Bridge {
        Bridge::new(
            self.audio.clone(),
            self.analyzer.clone(),
            self.lyrics.clone(),
        )
    }
}
