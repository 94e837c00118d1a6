//! Flattened form keys.
//!
//! A composite field is submitted as several scalar inputs whose names join
//! the field name, an optional row index and a subfield name with the
//! configured separator:
//!
//! | Shape | Key |
//! |-------|-----|
//! | scalar | `address-city` |
//! | repeating | `contact-2-email` |
//!
//! [`CompositeKey`] is the typed form of such a key. Strings are only split
//! or joined at the boundary, in [`CompositeKey::parse_scalar`],
//! [`CompositeKey::parse_repeating`] and [`CompositeKey::to_key`].

use crate::value::FlatData;

/// A flattened form key decomposed into its path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeKey<'a> {
    pub field: &'a str,
    pub index: Option<i64>,
    pub subfield: &'a str,
}

impl<'a> CompositeKey<'a> {
    pub fn scalar(field: &'a str, subfield: &'a str) -> Self {
        Self {
            field,
            index: None,
            subfield,
        }
    }

    pub fn repeating(field: &'a str, index: i64, subfield: &'a str) -> Self {
        Self {
            field,
            index: Some(index),
            subfield,
        }
    }

    /// Parses `<field><sep><subfield>`.
    ///
    /// Everything after the first separator following the field name is the
    /// subfield, separators included. Returns `None` for keys of other
    /// fields and for keys with nothing after the separator.
    pub fn parse_scalar(field: &'a str, separator: &str, key: &'a str) -> Option<Self> {
        let rest = strip_field_prefix(field, separator, key)?;
        Some(Self::scalar(field, rest))
    }

    /// Parses `<field><sep><index><sep><subfield>`.
    ///
    /// Returns `None` when the key belongs to another field, when no second
    /// separator follows, when the index is not an integer or when the
    /// subfield name is empty.
    pub fn parse_repeating(field: &'a str, separator: &str, key: &'a str) -> Option<Self> {
        let rest = strip_field_prefix(field, separator, key)?;
        let (index, subfield) = rest.split_once(separator)?;
        let index = index.trim().parse::<i64>().ok()?;
        if subfield.is_empty() {
            return None;
        }
        Some(Self::repeating(field, index, subfield))
    }

    /// Joins the segments back into a form key.
    pub fn to_key(&self, separator: &str) -> String {
        match self.index {
            Some(index) => format!(
                "{}{sep}{}{sep}{}",
                self.field,
                index,
                self.subfield,
                sep = separator
            ),
            None => format!("{}{}{}", self.field, separator, self.subfield),
        }
    }
}

fn strip_field_prefix<'k>(field: &str, separator: &str, key: &'k str) -> Option<&'k str> {
    if separator.is_empty() {
        return None;
    }
    let rest = key.strip_prefix(field)?.strip_prefix(separator)?;
    if rest.is_empty() || rest.starts_with('\n') {
        return None;
    }
    Some(rest)
}

/// Keys of `data` that belong to `field`, sorted by the full key string.
///
/// The sort fixes iteration order before any regrouping; when two keys
/// decompose to the same path, the one sorting last wins.
pub fn matching_keys<'d>(field: &str, separator: &str, data: &'d FlatData) -> Vec<&'d str> {
    let mut keys: Vec<&str> = data
        .keys()
        .map(String::as_str)
        .filter(|key| strip_field_prefix(field, separator, key).is_some())
        .collect();
    keys.sort_unstable();
    keys
}
