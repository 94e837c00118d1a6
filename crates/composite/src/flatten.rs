//! Flattening structured values back into form keys.
//!
//! The inverse of resolution: produces the inputs a form renders for a
//! composite value. Repeating rows are numbered from 1, like a template loop
//! index.

use crate::config::CompositeConfig;
use crate::key::CompositeKey;
use crate::value::{FlatData, ValueDict};

/// Flattens a scalar composite value into `<field><sep><subfield>` keys.
pub fn flatten_scalar(field: &str, value: &ValueDict, config: &CompositeConfig) -> FlatData {
    value
        .iter()
        .map(|(subfield, v)| {
            let key = CompositeKey::scalar(field, subfield).to_key(&config.separator);
            (key, v.clone())
        })
        .collect()
}

/// Flattens repeating rows into `<field><sep><n><sep><subfield>` keys.
pub fn flatten_repeating(field: &str, rows: &[ValueDict], config: &CompositeConfig) -> FlatData {
    let mut flat = FlatData::new();
    for (index, row) in (1..).zip(rows) {
        for (subfield, v) in row {
            let key = CompositeKey::repeating(field, index, subfield).to_key(&config.separator);
            flat.insert(key, v.clone());
        }
    }
    flat
}
