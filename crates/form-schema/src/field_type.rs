//! Field type tags and the groups the property tables refer to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The control a schema item renders as.
///
/// Serialized with the builder's display names (`"Text Input"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "Array")]
    Array,
    #[serde(rename = "Checkbox")]
    Checkbox,
    #[serde(rename = "Currency Input")]
    CurrencyInput,
    #[serde(rename = "Datepicker")]
    Datepicker,
    #[serde(rename = "Email Input")]
    EmailInput,
    #[serde(rename = "Multiselect")]
    Multiselect,
    #[serde(rename = "Multiline Text Input")]
    MultilineTextInput,
    #[serde(rename = "Number Input")]
    NumberInput,
    #[serde(rename = "Object")]
    Object,
    #[serde(rename = "Password Input")]
    PasswordInput,
    #[serde(rename = "Phone Number Input")]
    PhoneNumberInput,
    #[serde(rename = "Radio Group")]
    RadioGroup,
    #[serde(rename = "Select")]
    Select,
    #[serde(rename = "Switch")]
    Switch,
    #[serde(rename = "Text Input")]
    TextInput,
}

impl FieldType {
    pub const ALL: [FieldType; 15] = [
        FieldType::Array,
        FieldType::Checkbox,
        FieldType::CurrencyInput,
        FieldType::Datepicker,
        FieldType::EmailInput,
        FieldType::Multiselect,
        FieldType::MultilineTextInput,
        FieldType::NumberInput,
        FieldType::Object,
        FieldType::PasswordInput,
        FieldType::PhoneNumberInput,
        FieldType::RadioGroup,
        FieldType::Select,
        FieldType::Switch,
        FieldType::TextInput,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Array => "Array",
            FieldType::Checkbox => "Checkbox",
            FieldType::CurrencyInput => "Currency Input",
            FieldType::Datepicker => "Datepicker",
            FieldType::EmailInput => "Email Input",
            FieldType::Multiselect => "Multiselect",
            FieldType::MultilineTextInput => "Multiline Text Input",
            FieldType::NumberInput => "Number Input",
            FieldType::Object => "Object",
            FieldType::PasswordInput => "Password Input",
            FieldType::PhoneNumberInput => "Phone Number Input",
            FieldType::RadioGroup => "Radio Group",
            FieldType::Select => "Select",
            FieldType::Switch => "Switch",
            FieldType::TextInput => "Text Input",
        }
    }

    /// Key of this type in a theme's per-field stylesheet map.
    pub fn stylesheet_key(self) -> &'static str {
        match self {
            FieldType::Array => "ARRAY",
            FieldType::Checkbox => "CHECKBOX",
            FieldType::CurrencyInput => "CURRENCY_INPUT",
            FieldType::Datepicker => "DATEPICKER",
            FieldType::EmailInput => "EMAIL_INPUT",
            FieldType::Multiselect => "MULTISELECT",
            FieldType::MultilineTextInput => "MULTILINE_TEXT_INPUT",
            FieldType::NumberInput => "NUMBER_INPUT",
            FieldType::Object => "OBJECT",
            FieldType::PasswordInput => "PASSWORD_INPUT",
            FieldType::PhoneNumberInput => "PHONE_NUMBER_INPUT",
            FieldType::RadioGroup => "RADIO_GROUP",
            FieldType::Select => "SELECT",
            FieldType::Switch => "SWITCH",
            FieldType::TextInput => "TEXT_INPUT",
        }
    }

    /// Object and array fields hold children; everything else is a leaf.
    pub fn is_container(self) -> bool {
        matches!(self, FieldType::Object | FieldType::Array)
    }

    pub fn is_input(self) -> bool {
        INPUT_TYPES.contains(&self)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field type: {0}")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|ft| ft.as_str() == s)
            .ok_or_else(|| UnknownFieldType(s.to_string()))
    }
}

/// Free-text inputs; these carry placeholder, regex and text-change events.
pub const INPUT_TYPES: &[FieldType] = &[
    FieldType::CurrencyInput,
    FieldType::EmailInput,
    FieldType::MultilineTextInput,
    FieldType::NumberInput,
    FieldType::PasswordInput,
    FieldType::PhoneNumberInput,
    FieldType::TextInput,
];

pub const FIELD_EXPECTING_OPTIONS: &[FieldType] = &[
    FieldType::Multiselect,
    FieldType::RadioGroup,
    FieldType::Select,
];

pub const FIELD_SUPPORTING_FOCUS_EVENTS: &[FieldType] = &[
    FieldType::Checkbox,
    FieldType::CurrencyInput,
    FieldType::Datepicker,
    FieldType::EmailInput,
    FieldType::MultilineTextInput,
    FieldType::NumberInput,
    FieldType::PasswordInput,
    FieldType::PhoneNumberInput,
    FieldType::Switch,
    FieldType::TextInput,
];

pub const FIELDS_WITH_ACCENT_COLOR: &[FieldType] = &[
    FieldType::Checkbox,
    FieldType::CurrencyInput,
    FieldType::Datepicker,
    FieldType::EmailInput,
    FieldType::MultilineTextInput,
    FieldType::Multiselect,
    FieldType::NumberInput,
    FieldType::PasswordInput,
    FieldType::PhoneNumberInput,
    FieldType::RadioGroup,
    FieldType::Select,
    FieldType::Switch,
    FieldType::TextInput,
];

// Object and array style their own border radius.
pub const FIELDS_WITHOUT_BORDER_RADIUS: &[FieldType] = &[
    FieldType::Array,
    FieldType::Object,
    FieldType::RadioGroup,
    FieldType::Switch,
];

pub const FIELDS_WITHOUT_BOX_SHADOW: &[FieldType] = &[
    FieldType::Array,
    FieldType::Object,
    FieldType::Checkbox,
    FieldType::RadioGroup,
    FieldType::Switch,
];

pub const FIELDS_WITH_ICON: &[FieldType] = &[
    FieldType::TextInput,
    FieldType::EmailInput,
    FieldType::PasswordInput,
    FieldType::NumberInput,
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serde_uses_display_names() {
        assert_eq!(
            serde_json::to_value(FieldType::PhoneNumberInput).unwrap(),
            json!("Phone Number Input")
        );
        let ft: FieldType = serde_json::from_value(json!("Multiline Text Input")).unwrap();
        assert_eq!(ft, FieldType::MultilineTextInput);
    }

    #[test]
    fn test_from_str_matches_display() {
        for ft in FieldType::ALL {
            assert_eq!(ft.to_string().parse::<FieldType>(), Ok(ft));
        }
        assert!("Rich Text".parse::<FieldType>().is_err());
    }
}
