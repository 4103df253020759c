//! Dotted property paths into widget configuration.
//!
//! Widget properties are addressed the way the builder's property pane
//! addresses them: `schema.__root_schema__.children.age.label`, with
//! bracket steps for array indices (`items[0].sku`) and for keys that
//! cannot appear after a dot (`children["first.name"]`).
//!
//! # Example
//!
//! ```
//! use form_schema_path::{format_property_path, get, parse_property_path};
//!
//! let path = parse_property_path("schema.__root_schema__.children.age.label").unwrap();
//! assert_eq!(path.len(), 5);
//! assert_eq!(format_property_path(&path), "schema.__root_schema__.children.age.label");
//!
//! let doc = serde_json::json!({"orders": [{"sku": "A1"}]});
//! let sku = get(&doc, &parse_property_path("orders[0].sku").unwrap());
//! assert_eq!(sku, Some(&serde_json::json!("A1")));
//! ```

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

pub mod get;
pub mod types;

pub use get::{get, set};
pub use types::{Path, PathStep};

/// Maximum number of steps in a property path.
const MAX_PATH_LENGTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("empty step in property path")]
    EmptyStep,
    #[error("unclosed bracket in property path")]
    UnclosedBracket,
    #[error("invalid array index: {0}")]
    InvalidIndex(String),
    #[error("unexpected character '{0}' after bracket step")]
    UnexpectedChar(char),
    #[error("property path too long")]
    PathTooLong,
    #[error("cannot descend into a scalar at step {0}")]
    NotContainer(String),
}

/// Parse a property path string into its steps.
///
/// The empty string is the root path.
///
/// # Errors
///
/// Empty steps (`a..b`, `.a`, `a.`), unclosed or malformed brackets and
/// paths longer than 256 steps are rejected.
///
/// # Example
///
/// ```
/// use form_schema_path::parse_property_path;
///
/// assert_eq!(parse_property_path("a.b").unwrap(), vec!["a", "b"]);
/// assert_eq!(parse_property_path("a[0].b").unwrap(), vec!["a", "0", "b"]);
/// assert_eq!(parse_property_path("a[\"x.y\"]").unwrap(), vec!["a", "x.y"]);
/// assert!(parse_property_path("a..b").is_err());
/// ```
pub fn parse_property_path(path: &str) -> Result<Path, PathError> {
    let mut steps = Vec::new();
    if path.is_empty() {
        return Ok(steps);
    }

    let mut current = String::new();
    let mut after_bracket = false;
    let mut chars = path.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if current.is_empty() && !after_bracket {
                    return Err(PathError::EmptyStep);
                }
                if !current.is_empty() {
                    steps.push(std::mem::take(&mut current));
                }
                if chars.peek().is_none() {
                    return Err(PathError::EmptyStep);
                }
                after_bracket = false;
            }
            '[' => {
                if !current.is_empty() {
                    steps.push(std::mem::take(&mut current));
                }
                steps.push(parse_bracket(&mut chars)?);
                after_bracket = true;
            }
            _ => {
                if after_bracket {
                    return Err(PathError::UnexpectedChar(ch));
                }
                current.push(ch);
            }
        }
    }
    if !current.is_empty() {
        steps.push(current);
    }
    if steps.len() > MAX_PATH_LENGTH {
        return Err(PathError::PathTooLong);
    }
    Ok(steps)
}

fn parse_bracket(chars: &mut Peekable<Chars<'_>>) -> Result<PathStep, PathError> {
    let quote = match chars.peek() {
        Some(&q) if q == '"' || q == '\'' => {
            chars.next();
            Some(q)
        }
        _ => None,
    };

    let mut step = String::new();
    loop {
        let ch = chars.next().ok_or(PathError::UnclosedBracket)?;
        match quote {
            Some(q) if ch == q => {
                return match chars.next() {
                    Some(']') => Ok(step),
                    _ => Err(PathError::UnclosedBracket),
                };
            }
            None if ch == ']' => {
                return if is_valid_index(&step) {
                    Ok(step)
                } else {
                    Err(PathError::InvalidIndex(step))
                };
            }
            _ => step.push(ch),
        }
    }
}

/// Format path steps back into a property path string.
///
/// Steps that contain `.`, brackets or quotes, and empty steps, use the
/// quoted bracket form; everything else is joined with dots.
///
/// # Example
///
/// ```
/// use form_schema_path::format_property_path;
///
/// let path = vec!["children".to_string(), "first.name".to_string()];
/// assert_eq!(format_property_path(&path), "children[\"first.name\"]");
/// assert_eq!(format_property_path(&[]), "");
/// ```
pub fn format_property_path(path: &[String]) -> String {
    let mut out = String::new();
    for step in path {
        if needs_brackets(step) {
            out.push_str("[\"");
            out.push_str(step);
            out.push_str("\"]");
        } else {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(step);
        }
    }
    out
}

fn needs_brackets(step: &str) -> bool {
    step.is_empty() || step.contains(['.', '[', ']', '"', '\''])
}

/// Check if a string is a non-negative integer without leading zeros.
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(u8::is_ascii_digit)
}
