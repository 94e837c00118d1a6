//! Resolution of single (non-repeating) composite fields.

use serde_json::Value;
use tracing::debug;

use crate::config::CompositeConfig;
use crate::json::decode_mapping;
use crate::key::{CompositeKey, matching_keys};
use crate::value::{FlatData, ValueDict, is_truthy};

/// Resolves the value of a scalar composite field.
///
/// Submitted subfield keys (`<field><sep><subfield>`) take precedence over
/// the stored value in `data[field]`, so that input which failed validation
/// survives a re-render. Empty submitted values are skipped. The stored
/// value is returned as-is when it is already a mapping and decoded as JSON
/// text otherwise. Every failure yields an empty mapping.
pub fn resolve_scalar(field: &str, data: &FlatData, config: &CompositeConfig) -> ValueDict {
    let submitted = build_from_submission(field, data, &config.separator);
    if !submitted.is_empty() {
        debug!(field = %field, subfields = submitted.len(), "Resolved composite field from submission");
        return submitted;
    }

    match data.get(field) {
        Some(stored) if is_truthy(stored) => match stored {
            Value::Object(dict) => dict.clone(),
            raw => decode_mapping(field, raw).into_value(),
        },
        _ => ValueDict::new(),
    }
}

fn build_from_submission(field: &str, data: &FlatData, separator: &str) -> ValueDict {
    let mut dict = ValueDict::new();
    for key in matching_keys(field, separator, data) {
        let Some(value) = data.get(key).filter(|v| is_truthy(v)) else {
            continue;
        };
        if let Some(parsed) = CompositeKey::parse_scalar(field, separator, key) {
            dict.insert(parsed.subfield.to_string(), value.clone());
        }
    }
    dict
}
