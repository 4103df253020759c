//! form-schema-util - small helpers shared by the form-schema crates.
//!
//! - [`json_equal`]: structural equality over `serde_json::Value` trees.
//! - [`strings`]: lodash-style word splitting and start-casing for labels.

pub mod json_equal;
pub mod strings;

pub use json_equal::{deep_equal, deep_equal_opt};
pub use strings::{is_js_identifier, start_case, words};
