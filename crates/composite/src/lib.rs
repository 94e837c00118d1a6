//! # Composite Fields
//!
//! Resolution of composite form fields: one logical field (an address, a
//! list of contacts) that a form flattens into several scalar inputs and
//! that storage keeps as one structured value.
//!
//! A composite value exists in three representations:
//!
//! | Representation | Example |
//! |----------------|---------|
//! | flat form keys | `{"contact-1-name": "A", "contact-2-name": "B"}` |
//! | structured value | `[{"name": "A"}, {"name": "B"}]` |
//! | JSON text | `"[{\"name\":\"A\"},{\"name\":\"B\"}]"` |
//!
//! [`resolve_scalar`] and [`resolve_repeating`] turn submitted form keys or
//! a stored value into the structured value. Freshly submitted keys always
//! win over the stored value. Resolution never fails: malformed keys are
//! ignored and stored text that does not parse is logged and replaced by an
//! empty value.
//!
//! ## Example
//!
//! ```rust
//! use composite_fields::{CompositeConfig, RepeatingOptions, Subfield, resolve_repeating};
//! use serde_json::json;
//!
//! let data = json!({"contact-2-name": "B", "contact-1-name": "A"});
//! let rows = resolve_repeating(
//!     "contact",
//!     &[Subfield::new("name")],
//!     data.as_object().unwrap(),
//!     RepeatingOptions::default(),
//!     &CompositeConfig::default(),
//! );
//! assert_eq!(rows[0]["name"], "A");
//! assert_eq!(rows[1]["name"], "B");
//! ```

pub mod config;
pub mod error;
pub mod flatten;
pub mod helpers;
pub mod json;
pub mod key;
pub mod repeating;
pub mod scalar;
pub mod value;

pub use config::{CompositeConfig, DEFAULT_SEPARATOR};
pub use error::{CompositeError, Result};
pub use flatten::{flatten_repeating, flatten_scalar};
pub use json::{Decoded, decode_list, decode_mapping, serialize_repeating, serialize_scalar};
pub use key::CompositeKey;
pub use repeating::{RepeatingOptions, resolve_repeating};
pub use scalar::resolve_scalar;
pub use value::{FlatData, Subfield, ValueDict};
