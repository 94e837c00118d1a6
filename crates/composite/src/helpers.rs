//! Lookups and small formatting helpers used by form and display templates.

use std::collections::BTreeMap;

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::json::decode_mapping;
use crate::value::{Subfield, ValueDict, is_truthy};

/// Token replaced by the current year in [`default_value`].
pub const CURRENT_YEAR_TOKEN: &str = "composite_current_year";

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[a-zA-Z0-9]+$").expect("valid email regex"));

/// Maps each subfield name to its label, falling back to the name.
pub fn label_dict(subfields: &[Subfield]) -> BTreeMap<String, String> {
    subfields
        .iter()
        .map(|s| {
            let label = s.label.clone().unwrap_or_else(|| s.field_name.clone());
            (s.field_name.clone(), label)
        })
        .collect()
}

/// Maps each subfield name to its choices (empty when none are defined).
pub fn choices_dict(subfields: &[Subfield]) -> BTreeMap<String, Vec<Value>> {
    subfields
        .iter()
        .map(|s| (s.field_name.clone(), s.choices.clone()))
        .collect()
}

/// Non-empty subfield names, in order.
pub fn name_list(subfields: &[Subfield]) -> Vec<String> {
    subfields
        .iter()
        .filter(|s| !s.field_name.is_empty())
        .map(|s| s.field_name.clone())
        .collect()
}

pub fn is_list(value: &Value) -> bool {
    value.is_array()
}

/// Joins a non-empty list with `separator`; other values are rendered as text.
pub fn join_list(value: &Value, separator: &str) -> String {
    match value {
        Value::Array(items) if is_truthy(value) => items
            .iter()
            .map(display_text)
            .collect::<Vec<_>>()
            .join(separator),
        other => display_text(other),
    }
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Returns a mapping as-is, or decodes JSON text into one.
///
/// Anything that does not decode yields an empty mapping.
pub fn as_dict(value: &Value) -> ValueDict {
    match value {
        Value::Object(dict) => dict.clone(),
        other => decode_mapping("", other).into_value(),
    }
}

/// Whether `value` looks like an e-mail address.
pub fn is_mail(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Substitutes the default-value token for its current value.
pub fn default_value(text: &str) -> String {
    if text == CURRENT_YEAR_TOKEN {
        chrono::Local::now().year().to_string()
    } else {
        text.to_string()
    }
}
