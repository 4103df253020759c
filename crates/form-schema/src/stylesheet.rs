//! Theme defaults applied to generated fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field_type::FieldType;

/// The widget's `childStylesheet`: per field type, the property values a
/// theme gives new fields, e.g.
/// `{"TEXT_INPUT": {"borderRadius": "{{appsmith.theme.borderRadius.appBorderRadius}}"}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldThemeStylesheets(pub Map<String, Value>);

impl FieldThemeStylesheets {
    pub fn for_field(&self, field_type: FieldType) -> Option<&Map<String, Value>> {
        self.0
            .get(field_type.stylesheet_key())
            .and_then(Value::as_object)
    }

    pub fn value(&self, field_type: FieldType, property: &str) -> Option<&Value> {
        self.for_field(field_type)?.get(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_by_field_type() {
        let sheets: FieldThemeStylesheets = serde_json::from_value(json!({
            "TEXT_INPUT": {"boxShadow": "none"},
            "SWITCH": "not a map"
        }))
        .unwrap();
        assert_eq!(sheets.value(FieldType::TextInput, "boxShadow"), Some(&json!("none")));
        assert!(sheets.value(FieldType::TextInput, "accentColor").is_none());
        assert!(sheets.for_field(FieldType::Switch).is_none());
        assert!(sheets.for_field(FieldType::Object).is_none());
    }
}
