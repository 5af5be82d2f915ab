//! HTTP client for the remote analysis Space.

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, error, info, instrument};

use super::wire::{
    AnalysisResult, FileRef, PredictRequest, PredictResponse, UPLOAD_FIELD, UPLOAD_FILENAME,
    UPLOAD_MIME, UploadResponse,
};
use crate::core::config::AnalysisConfig;
use crate::domains::bridge::error::{BridgeError, BridgeResult};

const SERVICE: &str = "analysis space";

/// Remote audio analysis.
#[async_trait]
pub trait AudioAnalyzer: Send + Sync {
    /// Analyze the audio stored at `audio`.
    async fn analyze(&self, audio: &Path, with_spectrogram: bool) -> BridgeResult<AnalysisResult>;
}

/// Client for a Gradio Space exposing `/upload` and `/api/predict`.
#[derive(Debug, Clone)]
pub struct SpaceClient {
    http: reqwest::Client,
    config: AnalysisConfig,
}

impl SpaceClient {
    pub fn new(http: reqwest::Client, config: AnalysisConfig) -> Self {
        Self { http, config }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.space_url.trim_end_matches('/'), path)
    }

    /// Upload a local file and return the Space's reference to it.
    #[instrument(skip(self), fields(file = %path.display()))]
    pub async fn upload(&self, path: &Path) -> BridgeResult<FileRef> {
        let bytes = tokio::fs::read(path).await?;
        debug!("Uploading {} bytes", bytes.len());

        let part = Part::bytes(bytes)
            .file_name(UPLOAD_FILENAME)
            .mime_str(UPLOAD_MIME)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(self.endpoint("/upload"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Upload rejected with status {}", status);
            return Err(BridgeError::UploadFailed(status.as_u16()));
        }

        let body: UploadResponse = response.json().await?;
        body.into_first()
            .ok_or_else(|| BridgeError::invalid_response(SERVICE, "upload returned no file reference"))
    }

    /// Run the analyze function on an uploaded file.
    #[instrument(skip(self, request), fields(fn_index = request.fn_index))]
    pub async fn predict(&self, request: &PredictRequest) -> BridgeResult<AnalysisResult> {
        let response = self
            .http
            .post(self.endpoint("/api/predict"))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Predict rejected with status {}", status);
            return Err(BridgeError::PredictFailed(status.as_u16()));
        }

        let body: PredictResponse = response.json().await?;
        Ok(body.into())
    }
}

#[async_trait]
impl AudioAnalyzer for SpaceClient {
    async fn analyze(&self, audio: &Path, with_spectrogram: bool) -> BridgeResult<AnalysisResult> {
        let file = self.upload(audio).await?;
        info!("Uploaded as {}", file.0);

        let request = PredictRequest::analyze(self.config.fn_index, &file, with_spectrogram);
        self.predict(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct Calls {
        upload: Arc<AtomicUsize>,
        predict: Arc<AtomicUsize>,
        last_predict: Arc<std::sync::Mutex<Option<Value>>>,
    }

    async fn spawn_space(upload_status: StatusCode) -> (String, Calls) {
        let calls = Calls::default();

        let app = Router::new()
            .route(
                "/upload",
                post(move |State(calls): State<Calls>, body: axum::body::Bytes| async move {
                    calls.upload.fetch_add(1, Ordering::SeqCst);
                    let text = String::from_utf8_lossy(&body).to_string();
                    assert!(text.contains("name=\"files\""));
                    assert!(text.contains("filename=\"audio.mp3\""));
                    (upload_status, Json(json!(["/tmp/gradio/abc/audio.mp3"])))
                }),
            )
            .route(
                "/api/predict",
                post(|State(calls): State<Calls>, Json(body): Json<Value>| async move {
                    calls.predict.fetch_add(1, Ordering::SeqCst);
                    *calls.last_predict.lock().unwrap() = Some(body);
                    Json(json!({"data": [{"tempo": 128.0}, "aGVsbG8="]}))
                }),
            )
            .with_state(calls.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), calls)
    }

    fn client_for(url: String) -> SpaceClient {
        SpaceClient::new(
            reqwest::Client::new(),
            AnalysisConfig {
                space_url: url,
                fn_index: 0,
            },
        )
    }

    fn audio_file(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("clip.mp3");
        std::fs::write(&path, b"ID3fake-audio").unwrap();
        path
    }

    #[tokio::test]
    async fn test_analyze_uploads_then_predicts() {
        let (url, calls) = spawn_space(StatusCode::OK).await;
        let dir = TempDir::new().unwrap();
        let client = client_for(format!("{}/", url));

        let result = client.analyze(&audio_file(&dir), true).await.unwrap();
        assert_eq!(result.analysis, json!({"tempo": 128.0}));
        assert!(result.spectrogram.is_some());

        assert_eq!(calls.upload.load(Ordering::SeqCst), 1);
        assert_eq!(calls.predict.load(Ordering::SeqCst), 1);
        assert_eq!(
            calls.last_predict.lock().unwrap().clone().unwrap(),
            json!({"fn_index": 0, "data": ["/tmp/gradio/abc/audio.mp3", null, true]})
        );
    }

    #[tokio::test]
    async fn test_upload_failure_skips_predict() {
        let (url, calls) = spawn_space(StatusCode::SERVICE_UNAVAILABLE).await;
        let dir = TempDir::new().unwrap();
        let client = client_for(url);

        let err = client.analyze(&audio_file(&dir), false).await.unwrap_err();
        assert!(matches!(err, BridgeError::UploadFailed(503)));
        assert!(err.to_string().contains("503"));
        assert_eq!(calls.predict.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_predict_failure_carries_status() {
        let app = Router::new()
            .route("/upload", post(|| async { Json(json!(["/tmp/f.mp3"])) }))
            .route(
                "/api/predict",
                post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let dir = TempDir::new().unwrap();
        let client = client_for(format!("http://{}", addr));
        let err = client.analyze(&audio_file(&dir), false).await.unwrap_err();
        assert_eq!(err.to_string(), "Analysis failed: 500");
    }

    #[tokio::test]
    async fn test_empty_upload_response_is_invalid() {
        let app = Router::new().route("/upload", post(|| async { Json(json!([])) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let dir = TempDir::new().unwrap();
        let client = client_for(format!("http://{}", addr));
        let err = client.upload(&audio_file(&dir)).await.unwrap_err();
        assert!(matches!(err, BridgeError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_missing_local_file_is_io_error() {
        let client = client_for("http://127.0.0.1:9".to_string());
        let err = client
            .upload(Path::new("/definitely/not/here.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Io(_)));
    }
}
