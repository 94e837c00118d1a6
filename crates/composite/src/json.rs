//! JSON text encoding of composite values.
//!
//! Storage that only accepts scalar text keeps composite values as JSON.
//! The plain wrappers here propagate errors; [`decode_mapping`] and
//! [`decode_list`] never fail and instead report a [`Decoded::Recovered`]
//! outcome after logging a warning.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{CompositeError, Result, json_kind};
use crate::value::ValueDict;

/// Deserialize a value from a JSON string.
pub fn from_json_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    Ok(serde_json::from_str(s)?)
}

/// Serialize a value to a JSON string.
pub fn to_json_string<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_string(value)?)
}

/// Serialize a value to a pretty-printed JSON string.
pub fn to_json_string_pretty<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_string_pretty(value)?)
}

/// Encode a scalar composite value for storage.
pub fn serialize_scalar(value: &ValueDict) -> Result<String> {
    to_json_string(value)
}

/// Encode a repeating composite value for storage.
pub fn serialize_repeating(rows: &[ValueDict]) -> Result<String> {
    to_json_string(rows)
}

/// Outcome of a defensive decode.
#[derive(Debug)]
pub enum Decoded<T> {
    /// The raw value decoded cleanly.
    Parsed(T),
    /// Decoding failed; `fallback` is the empty value to use instead.
    Recovered { fallback: T, error: CompositeError },
}

impl<T> Decoded<T> {
    fn recover(field: &str, raw: &Value, fallback: T, error: CompositeError) -> Self {
        warn!(
            field = %field,
            raw = %raw,
            error = %error,
            "Composite field value could not be parsed"
        );
        Decoded::Recovered { fallback, error }
    }

    /// The decoded value, or the fallback.
    pub fn into_value(self) -> T {
        match self {
            Decoded::Parsed(value) => value,
            Decoded::Recovered { fallback, .. } => fallback,
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, Decoded::Recovered { .. })
    }

    pub fn error(&self) -> Option<&CompositeError> {
        match self {
            Decoded::Parsed(_) => None,
            Decoded::Recovered { error, .. } => Some(error),
        }
    }
}

/// Decode a stored scalar value that is not already a mapping.
///
/// Only a string holding a JSON object decodes; anything else recovers to
/// an empty mapping.
pub fn decode_mapping(field: &str, raw: &Value) -> Decoded<ValueDict> {
    let result = match raw {
        Value::String(text) => from_json_str::<ValueDict>(text),
        other => Err(CompositeError::unexpected_shape(field, "JSON text", other)),
    };
    match result {
        Ok(dict) => Decoded::Parsed(dict),
        Err(error) => Decoded::recover(field, raw, ValueDict::new(), error),
    }
}

/// Decode a stored repeating value into a list of mappings.
///
/// Arrays are used directly and strings are parsed as JSON. A single
/// mapping is the legacy shape and becomes a one-element list. Anything
/// else recovers to an empty list.
pub fn decode_list(field: &str, raw: &Value) -> Decoded<Vec<ValueDict>> {
    let result = match raw {
        Value::String(text) => {
            from_json_str::<Value>(text).and_then(|parsed| normalize_list(field, parsed))
        }
        Value::Array(_) | Value::Object(_) => normalize_list(field, raw.clone()),
        other => Err(CompositeError::unexpected_shape(field, "JSON text", other)),
    };
    match result {
        Ok(rows) => Decoded::Parsed(rows),
        Err(error) => Decoded::recover(field, raw, Vec::new(), error),
    }
}

fn normalize_list(field: &str, value: Value) -> Result<Vec<ValueDict>> {
    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(row) => Some(row),
                other => {
                    warn!(
                        field = %field,
                        kind = json_kind(&other),
                        "Dropping non-mapping entry from composite list"
                    );
                    None
                }
            })
            .collect()),
        Value::Object(row) => Ok(vec![row]),
        other => Err(CompositeError::unexpected_shape(
            field,
            "array or object",
            &other,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dict(value: Value) -> ValueDict {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_decode_mapping_text() {
        let decoded = decode_mapping("address", &json!(r#"{"city": "Bonn"}"#));
        assert!(!decoded.is_recovered());
        assert_eq!(decoded.into_value(), dict(json!({"city": "Bonn"})));
    }

    #[test]
    fn test_decode_mapping_invalid_text() {
        let decoded = decode_mapping("address", &json!("not valid structured text"));
        assert!(decoded.is_recovered());
        assert!(matches!(decoded.error(), Some(CompositeError::Json(_))));
        assert!(decoded.into_value().is_empty());
    }

    #[test]
    fn test_decode_mapping_rejects_non_object_json() {
        let decoded = decode_mapping("address", &json!("[1, 2]"));
        assert!(decoded.is_recovered());
        assert!(decoded.into_value().is_empty());
    }

    #[test]
    fn test_decode_mapping_rejects_non_text() {
        let decoded = decode_mapping("address", &json!(42));
        assert!(matches!(
            decoded.error(),
            Some(CompositeError::UnexpectedShape { found: "number", .. })
        ));
    }

    #[test]
    fn test_decode_list_text() {
        let decoded = decode_list("contact", &json!(r#"[{"name": "A"}, {"name": "B"}]"#));
        assert_eq!(
            decoded.into_value(),
            vec![dict(json!({"name": "A"})), dict(json!({"name": "B"}))]
        );
    }

    #[test]
    fn test_decode_list_legacy_mapping_text() {
        let decoded = decode_list("contact", &json!(r#"{"name": "A"}"#));
        assert!(!decoded.is_recovered());
        assert_eq!(decoded.into_value(), vec![dict(json!({"name": "A"}))]);
    }

    #[test]
    fn test_decode_list_drops_non_mappings() {
        let decoded = decode_list("contact", &json!([{"name": "A"}, "stray", 3]));
        assert_eq!(decoded.into_value(), vec![dict(json!({"name": "A"}))]);
    }

    #[test]
    fn test_decode_list_invalid() {
        for raw in [json!("{broken"), json!("\"text\""), json!(true)] {
            let decoded = decode_list("contact", &raw);
            assert!(decoded.is_recovered(), "{raw} should not decode");
            assert!(decoded.into_value().is_empty());
        }
    }

    #[test]
    fn test_serialize_scalar_roundtrip() {
        let value = dict(json!({"city": "Bonn", "zip": "53111"}));
        let text = serialize_scalar(&value).unwrap();
        assert_eq!(decode_mapping("address", &Value::String(text)).into_value(), value);
    }
}
