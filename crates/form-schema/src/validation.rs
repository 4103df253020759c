//! Property value validators.
//!
//! Each validator returns a [`ValidationResponse`] carrying the value the
//! editor should store (`parsed`) alongside the verdict. Only malformed
//! paths into the widget are errors.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

use form_schema_path::{get, parse_property_path};

use crate::constants::is_reserved_accessor;
use crate::error::SchemaError;
use crate::field_type::FieldType;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub is_valid: bool,
    pub parsed: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

impl ValidationResponse {
    pub fn valid(parsed: Value) -> Self {
        Self {
            is_valid: true,
            parsed,
            messages: Vec::new(),
        }
    }

    pub fn invalid(parsed: Value, message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            parsed,
            messages: vec![message.into()],
        }
    }
}

/// Validate a new accessor for the schema item that owns `property_path`
/// (`schema.__root_schema__.children.age.accessor`).
///
/// The accessor must be non-empty, unused by the item's siblings and not
/// reserved. `_id` is allowed only on the field generated from an `_id` key.
pub fn validate_accessor(
    widget: &Value,
    property_path: &str,
    value: &str,
) -> Result<ValidationResponse, SchemaError> {
    let steps =
        parse_property_path(property_path).map_err(|e| SchemaError::path(property_path, e))?;
    if steps.len() < 2 {
        return Err(SchemaError::MissingSchemaItem(property_path.to_string()));
    }
    let identifier = &steps[steps.len() - 2];
    let siblings = get(widget, &steps[..steps.len() - 2])
        .and_then(Value::as_object)
        .ok_or_else(|| SchemaError::MissingSchemaItem(property_path.to_string()))?;
    let current = siblings
        .get(identifier)
        .ok_or_else(|| SchemaError::MissingSchemaItem(property_path.to_string()))?;
    let original_identifier = current
        .get("originalIdentifier")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if value.is_empty() {
        return Ok(ValidationResponse::invalid(
            Value::from(value),
            "Property Name cannot be empty",
        ));
    }

    let in_use = siblings
        .iter()
        .filter(|(id, _)| *id != identifier)
        .filter_map(|(_, item)| item.get("accessor").and_then(Value::as_str))
        .any(|accessor| accessor == value);
    if in_use {
        return Ok(ValidationResponse::invalid(
            Value::from(""),
            "Property name already in use.",
        ));
    }

    if is_reserved_accessor(value, original_identifier) {
        return Ok(ValidationResponse::invalid(
            Value::from(""),
            "This is a restricted Property Name",
        ));
    }

    Ok(ValidationResponse::valid(Value::from(value)))
}

/// Validate the widget's sample data. Strings are parsed as JSON; objects,
/// arrays and other scalars are already parsed and pass as they are.
pub fn validate_source_data(value: &Value) -> ValidationResponse {
    match value {
        Value::String(s) if s.is_empty() => {
            ValidationResponse::invalid(Value::Object(Map::new()), "Source data cannot be empty.")
        }
        Value::Null => ValidationResponse::valid(Value::Object(Map::new())),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => ValidationResponse::valid(parsed),
            Err(e) => ValidationResponse::invalid(Value::Object(Map::new()), e.to_string()),
        },
        other => ValidationResponse::valid(other.clone()),
    }
}

/// Validate a field's default value against its type.
///
/// Number and currency inputs take numbers or numeric strings; blank
/// strings clear the value. Other inputs take strings; scalars are
/// stringified but flagged, objects are rejected with their JSON text.
pub fn validate_default_value(field_type: FieldType, value: &Value) -> ValidationResponse {
    if value.is_null() {
        return ValidationResponse::valid(Value::Null);
    }

    if matches!(field_type, FieldType::NumberInput | FieldType::CurrencyInput) {
        return match value {
            Value::String(s) if s.trim().is_empty() => ValidationResponse::valid(Value::Null),
            Value::Number(_) => ValidationResponse::valid(value.clone()),
            other => match to_finite_number(other) {
                Some(n) => ValidationResponse::valid(number_value(n)),
                None => ValidationResponse::invalid(Value::Null, "This value must be a number"),
            },
        };
    }

    match value {
        Value::String(_) => ValidationResponse::valid(value.clone()),
        Value::Object(_) | Value::Array(_) => ValidationResponse::invalid(
            Value::from(serde_json::to_string_pretty(value).unwrap_or_default()),
            "This value must be string",
        ),
        other => ValidationResponse {
            is_valid: false,
            parsed: Value::from(other.to_string()),
            messages: Vec::new(),
        },
    }
}

/// Validate a number input's minimum against its current maximum.
pub fn validate_min_num(value: &Value, max: Option<f64>) -> ValidationResponse {
    validate_bound(value, |min| {
        max.filter(|max| min >= *max)
            .map(|_| "This value must be lesser than max value")
    })
}

/// Validate a number input's maximum against its current minimum.
pub fn validate_max_num(value: &Value, min: Option<f64>) -> ValidationResponse {
    validate_bound(value, |max| {
        min.filter(|min| max <= *min)
            .map(|_| "This value must be greater than min value")
    })
}

fn validate_bound(value: &Value, conflict: impl Fn(f64) -> Option<&'static str>) -> ValidationResponse {
    if value.is_null() || value.as_str() == Some("") {
        return ValidationResponse::valid(Value::Null);
    }
    let Some(n) = to_finite_number(value) else {
        return ValidationResponse::invalid(Value::Null, "This value must be number");
    };
    match conflict(n) {
        Some(message) => ValidationResponse::invalid(Value::Null, message),
        None => ValidationResponse::valid(number_value(n)),
    }
}

pub fn validate_text(value: &Value) -> ValidationResponse {
    match value {
        Value::String(_) => ValidationResponse::valid(value.clone()),
        Value::Null => ValidationResponse::valid(Value::from("")),
        Value::Bool(_) | Value::Number(_) => ValidationResponse::valid(Value::from(value.to_string())),
        _ => ValidationResponse::invalid(
            Value::from(""),
            "This value does not evaluate to type string",
        ),
    }
}

/// Text that does not start with `<`, `|` or `{`.
pub fn validate_color_text(value: &Value) -> ValidationResponse {
    let response = validate_text(value);
    if !response.is_valid {
        return response;
    }
    let markup_like = response
        .parsed
        .as_str()
        .map_or(true, |text| text.is_empty() || text.starts_with(['<', '|', '{']));
    if markup_like {
        ValidationResponse::invalid(Value::from(""), "Value does not match the color format")
    } else {
        response
    }
}

pub fn validate_boolean(value: &Value, default: bool) -> ValidationResponse {
    match value {
        Value::Bool(_) => ValidationResponse::valid(value.clone()),
        Value::Null => ValidationResponse::valid(Value::Bool(default)),
        Value::String(s) if s == "true" || s == "false" => {
            ValidationResponse::valid(Value::Bool(s == "true"))
        }
        _ => ValidationResponse::invalid(
            Value::Bool(default),
            "This value does not evaluate to type boolean",
        ),
    }
}

pub fn validate_number(value: &Value) -> ValidationResponse {
    match value {
        Value::Number(_) | Value::Null => ValidationResponse::valid(value.clone()),
        Value::String(s) if s.trim().is_empty() => ValidationResponse::valid(Value::Null),
        Value::String(_) => match to_finite_number(value) {
            Some(n) => ValidationResponse::valid(number_value(n)),
            None => ValidationResponse::invalid(
                Value::Null,
                "This value does not evaluate to type number",
            ),
        },
        _ => ValidationResponse::invalid(Value::Null, "This value does not evaluate to type number"),
    }
}

pub fn validate_regex(value: &Value) -> ValidationResponse {
    let response = validate_text(value);
    if !response.is_valid {
        return response;
    }
    let compiles = response
        .parsed
        .as_str()
        .map_or(true, |pattern| regex::Regex::new(pattern).is_ok());
    if compiles {
        response
    } else {
        ValidationResponse::invalid(Value::from(""), "Value does not match type: regex")
    }
}

pub fn validate_field_type(value: &Value) -> ValidationResponse {
    match value.as_str().map(str::parse::<FieldType>) {
        Some(Ok(_)) => ValidationResponse::valid(value.clone()),
        Some(Err(e)) => ValidationResponse::invalid(Value::from(FieldType::TextInput.as_str()), e.to_string()),
        None => ValidationResponse::invalid(
            Value::from(FieldType::TextInput.as_str()),
            "This value does not evaluate to type string",
        ),
    }
}

/// Select options: an array (or its JSON text) of `{label, value}` objects
/// with string members and unique values.
pub fn validate_options(value: &Value) -> ValidationResponse {
    let parsed = match value {
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => parsed,
            Err(e) => return ValidationResponse::invalid(Value::Array(Vec::new()), e.to_string()),
        },
        other => other.clone(),
    };
    let Some(options) = parsed.as_array() else {
        return ValidationResponse::invalid(
            Value::Array(Vec::new()),
            "This value does not evaluate to type Array<{ label: string, value: string }>",
        );
    };

    let mut seen = HashSet::new();
    for (idx, option) in options.iter().enumerate() {
        let Some(option) = option.as_object() else {
            return ValidationResponse::invalid(
                Value::Array(Vec::new()),
                format!("Invalid entry at index: {idx}. This value does not evaluate to type object"),
            );
        };
        for key in ["label", "value"] {
            if !option.get(key).is_some_and(Value::is_string) {
                return ValidationResponse::invalid(
                    Value::Array(Vec::new()),
                    format!("Invalid entry at index: {idx}. Missing required key: {key}"),
                );
            }
        }
        let value = option.get("value").and_then(Value::as_str).unwrap_or_default();
        if !seen.insert(value) {
            return ValidationResponse::invalid(
                Value::Array(Vec::new()),
                "Duplicate values found for the following properties, in the array entries, that must be unique -- value.",
            );
        }
    }
    ValidationResponse::valid(parsed.clone())
}

/// JavaScript-style numeric coercion that only accepts finite results.
fn to_finite_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().ok()?
            }
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}
