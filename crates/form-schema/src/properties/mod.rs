//! Per-field property tables.
//!
//! Every property a schema item can carry is described by a [`PropertyDef`]:
//! which control edits it, how its value is validated and when it is hidden.
//! Hidden rules are plain data evaluated against the schema item that owns
//! the property, so the same table answers "is this shown in the pane?" and
//! "does this survive a field type change?".

mod common;
mod input;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use form_schema_path::{get, parse_property_path};

use crate::error::SchemaError;
use crate::field_type::FieldType;
use crate::schema::SchemaItem;
use crate::validation::{self, ValidationResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertySection {
    Data,
    General,
    Label,
    Validation,
    Events,
    LabelStyles,
    Icon,
    BorderShadow,
    Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlOption {
    pub label: &'static str,
    pub value: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_text: Option<&'static str>,
}

impl ControlOption {
    pub const fn new(label: &'static str, value: &'static str) -> Self {
        Self {
            label,
            value,
            sub_text: None,
        }
    }

    pub const fn with_sub_text(label: &'static str, value: &'static str) -> Self {
        Self {
            label,
            value,
            sub_text: Some(value),
        }
    }
}

/// The editor control a property is edited with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyControl {
    /// Drop-down over every [`FieldType`].
    FieldTypeSelect,
    DropDown {
        options: &'static [ControlOption],
    },
    CurrencySelect,
    DialCodeSelect,
    InputText {
        placeholder: Option<&'static str>,
    },
    /// Text control that may reference the current field's data.
    ComputeValue {
        placeholder: Option<&'static str>,
    },
    Switch,
    ColorPicker,
    ButtonTabs {
        options: &'static [ControlOption],
    },
    IconSelect,
    IconTabs {
        options: &'static [ControlOption],
    },
    ActionSelector,
    BorderRadiusOptions,
    BoxShadowOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationKind {
    /// Event handlers and pure selects are not validated.
    None,
    Text,
    /// Text that must not start like markup or a binding.
    ColorText,
    Boolean {
        default: bool,
    },
    Number,
    Regex,
    FieldType,
    Options,
    Accessor,
    DefaultValue,
    MinNum,
    MaxNum,
}

/// Follow-up writes an edit to a property triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdateHook {
    /// Rebuild the item for the chosen field type.
    RegenerateForFieldType,
    /// Copy the value down to every descendant.
    PropagateDisabled,
}

/// When a property is hidden for a schema item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HiddenRule {
    Never,
    FieldTypeNotIn(&'static [FieldType]),
    FieldTypeIn(&'static [FieldType]),
    /// Hidden on array item templates.
    ArrayItem,
    /// Hidden on array item templates that are objects.
    ArrayItemIsObject,
    /// Hidden while the item has no `iconName`.
    IconNameMissing,
    AnyOf(&'static [HiddenRule]),
}

impl HiddenRule {
    pub fn is_hidden(&self, item: &SchemaItem) -> bool {
        match self {
            HiddenRule::Never => false,
            HiddenRule::FieldTypeNotIn(types) => !types.contains(&item.field_type),
            HiddenRule::FieldTypeIn(types) => types.contains(&item.field_type),
            HiddenRule::ArrayItem => item.is_array_item(),
            HiddenRule::ArrayItemIsObject => {
                item.is_array_item() && item.field_type == FieldType::Object
            }
            HiddenRule::IconNameMissing => item
                .prop("iconName")
                .and_then(Value::as_str)
                .map_or(true, str::is_empty),
            HiddenRule::AnyOf(rules) => rules.iter().any(|rule| rule.is_hidden(item)),
        }
    }

    /// False when the rule hides the property for every item of
    /// `field_type`. Rules that look at anything but the field type do not
    /// restrict it.
    pub fn applies_to(&self, field_type: FieldType) -> bool {
        match self {
            HiddenRule::FieldTypeNotIn(types) => types.contains(&field_type),
            HiddenRule::FieldTypeIn(types) => !types.contains(&field_type),
            HiddenRule::AnyOf(rules) => rules.iter().all(|rule| rule.applies_to(field_type)),
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
    pub name: &'static str,
    pub label: &'static str,
    pub section: PropertySection,
    pub control: PropertyControl,
    pub validation: ValidationKind,
    pub hidden: HiddenRule,
    pub is_js_convertible: bool,
    pub is_bind_property: bool,
    pub is_trigger_property: bool,
    /// Default comes from the theme stylesheet of the field type.
    pub is_themed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_hook: Option<UpdateHook>,
}

impl PropertyDef {
    pub const fn new(
        name: &'static str,
        label: &'static str,
        section: PropertySection,
        control: PropertyControl,
    ) -> Self {
        Self {
            name,
            label,
            section,
            control,
            validation: ValidationKind::None,
            hidden: HiddenRule::Never,
            is_js_convertible: false,
            is_bind_property: true,
            is_trigger_property: false,
            is_themed: false,
            update_hook: None,
        }
    }

    pub const fn validate(mut self, validation: ValidationKind) -> Self {
        self.validation = validation;
        self
    }

    pub const fn hidden(mut self, hidden: HiddenRule) -> Self {
        self.hidden = hidden;
        self
    }

    pub const fn js_convertible(mut self) -> Self {
        self.is_js_convertible = true;
        self
    }

    pub const fn not_bindable(mut self) -> Self {
        self.is_bind_property = false;
        self
    }

    pub const fn trigger(mut self) -> Self {
        self.is_trigger_property = true;
        self
    }

    pub const fn themed(mut self) -> Self {
        self.is_themed = true;
        self
    }

    pub const fn on_update(mut self, hook: UpdateHook) -> Self {
        self.update_hook = Some(hook);
        self
    }
}

/// Lookup over the common and input property tables.
///
/// Built once by the caller and passed to the engine; there is no global
/// instance.
#[derive(Debug, Clone)]
pub struct FieldPropertyRegistry {
    defs: IndexMap<&'static str, PropertyDef>,
}

impl Default for FieldPropertyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldPropertyRegistry {
    pub fn new() -> Self {
        let mut defs = IndexMap::new();
        for def in common::PROPERTIES.iter().chain(input::PROPERTIES) {
            defs.entry(def.name).or_insert(*def);
        }
        Self { defs }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyDef> {
        self.defs.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyDef> {
        self.defs.values()
    }

    /// Whether a customized `name` may be kept on a field that changes to
    /// `field_type`. Properties missing from the tables are kept.
    pub fn carries_over(&self, name: &str, field_type: FieldType) -> bool {
        self.get(name)
            .map_or(true, |def| def.hidden.applies_to(field_type))
    }

    /// Properties shown in the pane for `item`, in table order.
    pub fn visible_properties(&self, item: &SchemaItem) -> Vec<&PropertyDef> {
        self.iter().filter(|def| !def.hidden.is_hidden(item)).collect()
    }

    /// Properties that can appear on some item of `field_type`.
    pub fn properties_for(&self, field_type: FieldType) -> Vec<&PropertyDef> {
        self.iter()
            .filter(|def| def.hidden.applies_to(field_type))
            .collect()
    }

    /// Whether the property at `property_path` (e.g.
    /// `schema.__root_schema__.children.age.minNum`) is hidden for the item
    /// that owns it.
    pub fn is_hidden(&self, widget: &Value, property_path: &str) -> Result<bool, SchemaError> {
        let (item, name) = owning_item(widget, property_path)?;
        Ok(self
            .get(&name)
            .is_some_and(|def| def.hidden.is_hidden(&item)))
    }

    /// Validate `value` as the new value of the property at `property_path`.
    pub fn validate(
        &self,
        widget: &Value,
        property_path: &str,
        value: &Value,
    ) -> Result<ValidationResponse, SchemaError> {
        let (item, name) = owning_item(widget, property_path)?;
        let Some(def) = self.get(&name) else {
            return Ok(ValidationResponse::valid(value.clone()));
        };
        let response = match def.validation {
            ValidationKind::None => ValidationResponse::valid(value.clone()),
            ValidationKind::Text => validation::validate_text(value),
            ValidationKind::ColorText => validation::validate_color_text(value),
            ValidationKind::Boolean { default } => validation::validate_boolean(value, default),
            ValidationKind::Number => validation::validate_number(value),
            ValidationKind::Regex => validation::validate_regex(value),
            ValidationKind::FieldType => validation::validate_field_type(value),
            ValidationKind::Options => validation::validate_options(value),
            ValidationKind::Accessor => {
                let accessor = match value {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                validation::validate_accessor(widget, property_path, &accessor)?
            }
            ValidationKind::DefaultValue => {
                validation::validate_default_value(item.field_type, value)
            }
            ValidationKind::MinNum => {
                validation::validate_min_num(value, item.prop("maxNum").and_then(Value::as_f64))
            }
            ValidationKind::MaxNum => {
                validation::validate_max_num(value, item.prop("minNum").and_then(Value::as_f64))
            }
        };
        Ok(response)
    }
}

/// The schema item a property path points into, and the property name.
fn owning_item(widget: &Value, property_path: &str) -> Result<(SchemaItem, String), SchemaError> {
    let steps =
        parse_property_path(property_path).map_err(|e| SchemaError::path(property_path, e))?;
    let Some((name, parent)) = steps.split_last() else {
        return Err(SchemaError::MissingSchemaItem(property_path.to_string()));
    };
    let raw = get(widget, parent)
        .ok_or_else(|| SchemaError::MissingSchemaItem(property_path.to_string()))?;
    let item = SchemaItem::deserialize(raw)?;
    Ok((item, name.clone()))
}
