//! Value shapes shared by the resolvers and helpers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flat mapping of form keys to values, as submitted by a form.
///
/// The entry keyed by the bare field name holds the stored value and may
/// have any JSON shape.
pub type FlatData = serde_json::Map<String, Value>;

/// One structured composite value: subfield name to value.
pub type ValueDict = serde_json::Map<String, Value>;

/// Descriptor of one subfield of a composite field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subfield {
    #[serde(default)]
    pub field_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Value>,
}

impl Subfield {
    /// Creates a descriptor with only a field name.
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            ..Default::default()
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Whether a value counts as present.
///
/// `null`, `false`, zero, the empty string, the empty array and the empty
/// object are absent; everything else is present.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Whether every value of a row is the empty string.
pub fn is_blank_row(row: &ValueDict) -> bool {
    row.values().all(|v| v.as_str() == Some(""))
}
