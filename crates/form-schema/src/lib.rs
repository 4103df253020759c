//! Field schema generation for JSON-driven form widgets.
//!
//! A form widget renders one field per key of its sample data. This crate
//! infers those fields, regenerates them when the sample changes while
//! keeping what the user customized, and refuses to produce schemas past a
//! configured field limit.
//!
//! # Example
//!
//! ```
//! use form_schema::{compute_schema, ComputeSchemaArgs, ComputedSchemaStatus, FieldType};
//! use serde_json::json;
//!
//! let data = json!({"name": "John", "age": 24});
//! let first = compute_schema(ComputeSchemaArgs {
//!     curr_source_data: &data,
//!     prev_source_data: None,
//!     prev_schema: None,
//!     current_dynamic_property_path_list: &[],
//!     widget_name: "Form1",
//!     field_theme_stylesheets: None,
//! });
//! assert_eq!(first.status, ComputedSchemaStatus::Updated);
//!
//! let root = &first.schema["__root_schema__"];
//! assert_eq!(root.children["age"].field_type, FieldType::NumberInput);
//!
//! // Feeding the result back with the same sample is a no-op.
//! let second = compute_schema(ComputeSchemaArgs {
//!     curr_source_data: &data,
//!     prev_source_data: Some(&root.source_data),
//!     prev_schema: Some(&first.schema),
//!     current_dynamic_property_path_list: &first.dynamic_property_path_list,
//!     widget_name: "Form1",
//!     field_theme_stylesheets: None,
//! });
//! assert_eq!(second.status, ComputedSchemaStatus::Unchanged);
//! ```

pub mod compute;
pub mod config;
pub mod constants;
pub mod dynamic_paths;
pub mod error;
pub mod field_type;
mod hooks;
pub mod infer;
mod merge;
pub mod properties;
pub mod sanitize;
pub mod schema;
pub mod stylesheet;
pub mod synth;
pub mod validation;
pub mod widget;

pub use compute::{
    compute_schema, ComputeSchemaArgs, ComputedSchema, ComputedSchemaStatus, SchemaEngine,
};
pub use config::SchemaLimits;
pub use dynamic_paths::{compute_dynamic_property_path_list, DynamicPath};
pub use error::SchemaError;
pub use field_type::{FieldType, UnknownFieldType};
pub use infer::{infer_field_type, infer_field_type_at};
pub use properties::{FieldPropertyRegistry, HiddenRule, PropertyControl, PropertyDef, UpdateHook};
pub use sanitize::sanitize_key;
pub use schema::{Schema, SchemaItem};
pub use stylesheet::FieldThemeStylesheets;
pub use synth::{Budget, LimitExceeded, Synthesizer};
pub use validation::ValidationResponse;
pub use widget::{apply_updates, on_generate_form_click, PropertyUpdate, WidgetProperties};
