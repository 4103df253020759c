//! Generation limits.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_FIELD_COUNT, DEFAULT_MAX_NESTING_LEVEL};
use crate::error::SchemaError;

/// Bounds on a single schema generation.
///
/// Missing keys fall back to the defaults, so an empty TOML document is a
/// valid configuration:
///
/// ```toml
/// max_nesting_level = 5
/// max_field_count = 50
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaLimits {
    /// Depth below the root at which objects and arrays collapse into a
    /// single JSON text field.
    pub max_nesting_level: usize,
    /// Maximum number of fields in one schema, root excluded.
    pub max_field_count: usize,
}

impl Default for SchemaLimits {
    fn default() -> Self {
        Self {
            max_nesting_level: DEFAULT_MAX_NESTING_LEVEL,
            max_field_count: DEFAULT_MAX_FIELD_COUNT,
        }
    }
}

impl SchemaLimits {
    pub fn from_toml_str(input: &str) -> Result<Self, SchemaError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
