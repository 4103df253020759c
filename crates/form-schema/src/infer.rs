//! Sample value → field type.

use serde_json::Value;

use crate::config::SchemaLimits;
use crate::field_type::FieldType;

/// Classify a single sample value.
///
/// `null` carries no shape information and becomes a text input.
///
/// # Example
///
/// ```
/// use form_schema::{infer_field_type, FieldType};
/// use serde_json::json;
///
/// assert_eq!(infer_field_type(&json!(24)), FieldType::NumberInput);
/// assert_eq!(infer_field_type(&json!({"a": 1})), FieldType::Object);
/// assert_eq!(infer_field_type(&json!(null)), FieldType::TextInput);
/// ```
pub fn infer_field_type(value: &Value) -> FieldType {
    match value {
        Value::Null | Value::String(_) => FieldType::TextInput,
        Value::Bool(_) => FieldType::Switch,
        Value::Number(_) => FieldType::NumberInput,
        Value::Array(_) => FieldType::Array,
        Value::Object(_) => FieldType::Object,
    }
}

/// Classify a value sitting `depth` levels below the root. Containers at
/// or past the nesting limit collapse into one JSON text field.
pub fn infer_field_type_at(value: &Value, depth: usize, limits: &SchemaLimits) -> FieldType {
    let inferred = infer_field_type(value);
    if inferred.is_container() && depth >= limits.max_nesting_level {
        FieldType::MultilineTextInput
    } else {
        inferred
    }
}
