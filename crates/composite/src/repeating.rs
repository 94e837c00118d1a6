//! Resolution of repeating composite fields.
//!
//! A repeating field holds an ordered list of mappings, one per form row.
//! Submitted keys carry the row index: `contact-1-name`, `contact-2-name`.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::CompositeConfig;
use crate::json::decode_list;
use crate::key::{CompositeKey, matching_keys};
use crate::value::{FlatData, Subfield, ValueDict, is_blank_row, is_truthy};

/// Options for [`resolve_repeating`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatingOptions {
    /// Requested number of blank rows when there is no data at all.
    pub min_blanks: usize,
    /// Keep rows whose values are all empty strings.
    pub include_empty: bool,
}

impl Default for RepeatingOptions {
    fn default() -> Self {
        Self {
            min_blanks: 1,
            include_empty: true,
        }
    }
}

impl RepeatingOptions {
    /// Number of blank rows synthesized for a field without data.
    ///
    /// Existing rendered forms depend on this exact count: one more than
    /// requested, and never fewer than two.
    pub fn blank_row_count(&self) -> usize {
        self.min_blanks.saturating_add(1).max(2)
    }
}

/// Resolves the value of a repeating composite field.
///
/// Precedence:
/// 1. rows rebuilt from submitted `<field><sep><index><sep><subfield>` keys,
///    ordered by numeric index;
/// 2. the stored value in `data[field]` (a list, a legacy single mapping, or
///    JSON text of either);
/// 3. blank rows built from `subfields`, see
///    [`RepeatingOptions::blank_row_count`].
///
/// With `include_empty` unset, all-blank rows are then removed, which may
/// leave the list empty.
pub fn resolve_repeating(
    field: &str,
    subfields: &[Subfield],
    data: &FlatData,
    options: RepeatingOptions,
    config: &CompositeConfig,
) -> Vec<ValueDict> {
    let mut rows = build_from_submission(field, data, &config.separator);

    if rows.is_empty() {
        rows = match data.get(field) {
            Some(stored) if is_truthy(stored) => decode_list(field, stored).into_value(),
            _ => Vec::new(),
        };
    } else {
        debug!(field = %field, rows = rows.len(), "Resolved repeating field from submission");
    }

    if rows.is_empty() {
        let count = options.blank_row_count();
        debug!(field = %field, rows = count, "Synthesizing blank rows");
        rows = (0..count).map(|_| blank_row(subfields)).collect();
    }

    if !options.include_empty {
        rows.retain(|row| !is_blank_row(row));
    }

    rows
}

fn build_from_submission(field: &str, data: &FlatData, separator: &str) -> Vec<ValueDict> {
    let mut groups: BTreeMap<i64, ValueDict> = BTreeMap::new();
    for key in matching_keys(field, separator, data) {
        let Some(value) = data.get(key).filter(|v| is_truthy(v)) else {
            continue;
        };
        if let Some(parsed) = CompositeKey::parse_repeating(field, separator, key)
            && let Some(index) = parsed.index
        {
            groups
                .entry(index)
                .or_default()
                .insert(parsed.subfield.to_string(), value.clone());
        }
    }
    groups.into_values().collect()
}

fn blank_row(subfields: &[Subfield]) -> ValueDict {
    subfields
        .iter()
        .map(|subfield| (subfield.field_name.clone(), serde_json::Value::String(String::new())))
        .collect()
}
