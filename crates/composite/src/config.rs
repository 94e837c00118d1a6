//! Configuration for composite field resolution.
//!
//! The only setting is the separator joining a field name with its index
//! and subfield name in flattened form keys.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `COMPOSITE_SEPARATOR` | - | Separator used in flattened form keys |
//!
//! # Example
//!
//! ```rust
//! use composite_fields::CompositeConfig;
//!
//! // Create from environment
//! let config = CompositeConfig::from_env();
//!
//! // Or create programmatically
//! let config = CompositeConfig::with_separator("__");
//! assert_eq!(config.separator, "__");
//! ```

use clap::Parser;

use crate::error::{CompositeError, Result};

/// Default separator for flattened form keys.
pub const DEFAULT_SEPARATOR: &str = "-";

/// Composite field configuration.
///
/// Passed explicitly into every resolver call. Can be flattened into a
/// command-line parser or read from the environment with
/// [`CompositeConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct CompositeConfig {
    /// Separator joining field name, index and subfield name in form keys.
    #[arg(long, env = "COMPOSITE_SEPARATOR", default_value = DEFAULT_SEPARATOR)]
    pub separator: String,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl CompositeConfig {
    /// Creates a configuration from environment variables only.
    ///
    /// Process arguments are ignored; any parse problem yields the default.
    pub fn from_env() -> Self {
        Self::try_parse_from([env!("CARGO_PKG_NAME")]).unwrap_or_default()
    }

    /// Creates a configuration with the given separator.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.separator.is_empty() {
            errors.push("Separator cannot be empty".to_string());
        }

        if self.separator.chars().any(char::is_whitespace) {
            errors.push("Separator cannot contain whitespace".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Returns the configuration if it is valid, joining all problems into
    /// one [`CompositeError::Config`] otherwise.
    pub fn validated(self) -> Result<Self> {
        match self.validate() {
            Ok(()) => Ok(self),
            Err(errors) => Err(CompositeError::Config(errors.join("; "))),
        }
    }
}
