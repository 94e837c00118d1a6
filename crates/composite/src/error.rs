//! Error types for composite field resolution.
//!
//! Resolution itself never fails: every error below is either recovered
//! into an empty value (see [`crate::json::Decoded`]) or reported by a
//! fallible helper such as [`crate::json::from_json_str`].

use thiserror::Error;

/// Errors produced while decoding or validating composite field data.
#[derive(Error, Debug)]
pub enum CompositeError {
    /// JSON serialization or deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored value had a shape the call site cannot use.
    #[error("field '{field}': expected {expected}, found {found}")]
    UnexpectedShape {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CompositeError {
    pub(crate) fn unexpected_shape(
        field: &str,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        CompositeError::UnexpectedShape {
            field: field.to_string(),
            expected,
            found: json_kind(found),
        }
    }
}

/// Name of a JSON value's kind, as used in diagnostics.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Result type alias for composite field operations
pub type Result<T> = std::result::Result<T, CompositeError>;
