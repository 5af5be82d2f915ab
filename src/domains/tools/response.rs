//! Uniform response envelope for tool calls.
//!
//! Every tool call, successful or not, produces exactly one envelope that is
//! serialized into a single text content block:
//!
//! - success: `{"success": true, ...payload fields}`
//! - failure: `{"error": true, "message": "..."}`

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use super::ToolError;

/// Envelope returned by every tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResponse {
    Success(Map<String, Value>),
    Error { message: String },
}

impl ToolResponse {
    /// Wrap a payload. Object payloads are merged into the envelope; any
    /// other value is placed under `data`.
    pub fn success(payload: impl Serialize) -> Self {
        let mut body = match serde_json::to_value(payload) {
            Ok(Value::Object(map)) => map,
            Ok(Value::Null) => Map::new(),
            Ok(other) => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
            Err(e) => return Self::error(format!("Failed to serialize result: {}", e)),
        };
        body.insert("success".to_string(), Value::Bool(true));
        Self::Success(body)
    }

    /// Build an error envelope.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// JSON form of the envelope.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Success(body) => Value::Object(body.clone()),
            Self::Error { message } => serde_json::json!({
                "error": true,
                "message": message,
            }),
        }
    }

    /// Serialize into the MCP result: one text block holding the envelope.
    pub fn into_call_tool_result(self) -> CallToolResult {
        let text = serde_json::to_string_pretty(&self.to_value())
            .unwrap_or_else(|e| format!(r#"{{"error": true, "message": "{}"}}"#, e));
        if self.is_error() {
            CallToolResult::error(vec![Content::text(text)])
        } else {
            CallToolResult::success(vec![Content::text(text)])
        }
    }
}

impl From<ToolError> for ToolResponse {
    fn from(err: ToolError) -> Self {
        warn!("{}", err);
        Self::error(err.to_string())
    }
}

impl From<Result<ToolResponse, ToolError>> for ToolResponse {
    fn from(result: Result<ToolResponse, ToolError>) -> Self {
        result.unwrap_or_else(Self::from)
    }
}
