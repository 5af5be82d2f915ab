//! Common utilities shared across tool definitions.

use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;

use crate::domains::tools::ToolError;

/// Deserialize call arguments into a tool's parameter struct.
///
/// A missing argument object is treated as `{}` so that parameterless tools
/// accept both forms.
pub fn parse_params<P: DeserializeOwned>(arguments: Option<JsonObject>) -> Result<P, ToolError> {
    let object = serde_json::Value::Object(arguments.unwrap_or_default());
    serde_json::from_value(object).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Reject anything that is not an absolute http(s) URL.
///
/// The value is handed to a subprocess as a positional argument, so a
/// leading `-` would otherwise be read as an option.
pub fn validate_source_url(url: &str) -> Result<(), ToolError> {
    let parsed = reqwest::Url::parse(url.trim())
        .map_err(|e| ToolError::invalid_arguments(format!("Invalid URL '{}': {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ToolError::invalid_arguments(format!(
            "Unsupported URL scheme '{}' (expected http or https)",
            scheme
        ))),
    }
}

/// Reject blank text arguments.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::invalid_arguments(format!(
            "'{}' must not be empty",
            field
        )));
    }
    Ok(())
}
