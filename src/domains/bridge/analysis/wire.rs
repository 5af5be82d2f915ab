//! Wire formats of the analysis Space.
//!
//! The Space is a Gradio app. Uploads return a JSON array of server-side
//! file references, and predictions take a positional `data` array keyed by
//! a numeric function index. Nothing outside this module should know about
//! either shape.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Multipart field name expected by `/upload`.
pub const UPLOAD_FIELD: &str = "files";

/// Filename reported for uploaded audio.
pub const UPLOAD_FILENAME: &str = "audio.mp3";

/// Content type reported for uploaded audio.
pub const UPLOAD_MIME: &str = "audio/mpeg";

/// Server-side reference to an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileRef(pub String);

/// Body returned by `/upload`.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct UploadResponse(pub Vec<FileRef>);

impl UploadResponse {
    /// The first reference is the canonical one.
    pub fn into_first(self) -> Option<FileRef> {
        self.0.into_iter().next()
    }
}

/// Body sent to `/api/predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictRequest {
    pub fn_index: u32,
    pub data: Vec<Value>,
}

impl PredictRequest {
    /// Build the positional argument list for the analyze function:
    /// `[file, youtube_url, want_spectrogram?]`. The URL slot is always null
    /// because the audio was downloaded locally.
    pub fn analyze(fn_index: u32, file: &FileRef, with_spectrogram: bool) -> Self {
        let mut data = vec![Value::String(file.0.clone()), Value::Null];
        if with_spectrogram {
            data.push(Value::Bool(true));
        }
        Self { fn_index, data }
    }
}

/// Body returned by `/api/predict`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub data: Option<Vec<Value>>,

    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

/// Spectrogram image returned alongside the analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spectrogram {
    pub mime_type: String,
    /// Base64-encoded image bytes (no data-URL prefix).
    pub data: String,
}

impl Spectrogram {
    /// Parse a raw base64 string or a `data:<mime>;base64,<payload>` URL.
    ///
    /// Returns `None` if the payload does not decode as base64.
    pub fn parse(raw: &str) -> Option<Self> {
        let (mime_type, payload) = match raw.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest.split_once(',')?;
                let mime = header.strip_suffix(";base64").unwrap_or(header);
                (mime.to_string(), payload)
            }
            None => ("image/png".to_string(), raw),
        };

        let payload = payload.trim();
        if payload.is_empty() || STANDARD.decode(payload).is_err() {
            return None;
        }

        Some(Self {
            mime_type,
            data: payload.to_string(),
        })
    }
}

/// Analysis output after unwrapping the `data` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub analysis: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectrogram: Option<Spectrogram>,
}

impl From<PredictResponse> for AnalysisResult {
    fn from(response: PredictResponse) -> Self {
        match response.data {
            Some(data) if !data.is_empty() => {
                let mut items = data.into_iter();
                let analysis = items.next().unwrap_or(Value::Null);
                let spectrogram = match items.next() {
                    Some(Value::String(raw)) => {
                        let parsed = Spectrogram::parse(&raw);
                        if parsed.is_none() {
                            warn!("Discarding spectrogram payload that is not valid base64");
                        }
                        parsed
                    }
                    _ => None,
                };
                Self {
                    analysis,
                    spectrogram,
                }
            }
            // No usable `data`: hand back the whole body.
            data => {
                let mut body = response.rest;
                if let Some(data) = data {
                    body.insert("data".to_string(), Value::Array(data));
                }
                Self {
                    analysis: Value::Object(body),
                    spectrogram: None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upload_response_first_reference() {
        let body: UploadResponse =
            serde_json::from_value(json!(["/tmp/gradio/abc/audio.mp3", "/tmp/other"])).unwrap();
        assert_eq!(
            body.into_first(),
            Some(FileRef("/tmp/gradio/abc/audio.mp3".to_string()))
        );
    }

    #[test]
    fn test_upload_response_empty() {
        let body: UploadResponse = serde_json::from_value(json!([])).unwrap();
        assert_eq!(body.into_first(), None);
    }

    #[test]
    fn test_predict_request_shapes() {
        let file = FileRef("/tmp/gradio/x.mp3".to_string());

        let basic = PredictRequest::analyze(0, &file, false);
        assert_eq!(
            serde_json::to_value(&basic).unwrap(),
            json!({"fn_index": 0, "data": ["/tmp/gradio/x.mp3", null]})
        );

        let rich = PredictRequest::analyze(2, &file, true);
        assert_eq!(
            serde_json::to_value(&rich).unwrap(),
            json!({"fn_index": 2, "data": ["/tmp/gradio/x.mp3", null, true]})
        );
    }

    #[test]
    fn test_analysis_from_data_array() {
        let response: PredictResponse = serde_json::from_value(json!({
            "data": [{"tempo": 120.0, "key": "A minor"}, "aGVsbG8="],
            "duration": 1.2
        }))
        .unwrap();

        let result = AnalysisResult::from(response);
        assert_eq!(result.analysis["tempo"], 120.0);
        let spectrogram = result.spectrogram.unwrap();
        assert_eq!(spectrogram.mime_type, "image/png");
        assert_eq!(spectrogram.data, "aGVsbG8=");
    }

    #[test]
    fn test_analysis_without_data_returns_whole_body() {
        let response: PredictResponse =
            serde_json::from_value(json!({"tempo": 98, "error": null})).unwrap();

        let result = AnalysisResult::from(response);
        assert_eq!(result.analysis, json!({"tempo": 98, "error": null}));
        assert!(result.spectrogram.is_none());
    }

    #[test]
    fn test_analysis_with_empty_data_returns_whole_body() {
        let response: PredictResponse =
            serde_json::from_value(json!({"data": [], "is_generating": false})).unwrap();

        let result = AnalysisResult::from(response);
        assert_eq!(result.analysis["is_generating"], false);
        assert_eq!(result.analysis["data"], json!([]));
    }

    #[test]
    fn test_spectrogram_data_url() {
        let spectrogram = Spectrogram::parse("data:image/jpeg;base64,aGVsbG8=").unwrap();
        assert_eq!(spectrogram.mime_type, "image/jpeg");
        assert_eq!(spectrogram.data, "aGVsbG8=");
    }

    #[test]
    fn test_spectrogram_rejects_garbage() {
        assert!(Spectrogram::parse("not base64 !!").is_none());
        assert!(Spectrogram::parse("").is_none());
        assert!(Spectrogram::parse("data:image/png;base64").is_none());
    }

    #[test]
    fn test_null_second_element_is_no_spectrogram() {
        let response: PredictResponse =
            serde_json::from_value(json!({"data": [{"bpm": 80}, null]})).unwrap();
        let result = AnalysisResult::from(response);
        assert!(result.spectrogram.is_none());
        assert_eq!(result.analysis, json!({"bpm": 80}));
    }
}
