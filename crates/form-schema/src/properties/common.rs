//! Properties shared by every field type.

use super::{
    ControlOption, HiddenRule, PropertyControl, PropertyDef, PropertySection, UpdateHook,
    ValidationKind,
};
use crate::field_type::{
    FieldType, FIELDS_WITHOUT_BORDER_RADIUS, FIELDS_WITHOUT_BOX_SHADOW, FIELDS_WITH_ACCENT_COLOR,
    FIELD_EXPECTING_OPTIONS, FIELD_SUPPORTING_FOCUS_EVENTS,
};

const CONTAINERS: &[FieldType] = &[FieldType::Object, FieldType::Array];

const LABEL_TEXT_SIZES: &[ControlOption] = &[
    ControlOption::with_sub_text("S", "0.875rem"),
    ControlOption::with_sub_text("M", "1rem"),
    ControlOption::with_sub_text("L", "1.25rem"),
    ControlOption::with_sub_text("XL", "1.875rem"),
    ControlOption::with_sub_text("XXL", "3rem"),
    ControlOption::with_sub_text("3XL", "3.75rem"),
];

const LABEL_STYLES: &[ControlOption] = &[
    ControlOption::new("BOLD_FONT", "BOLD"),
    ControlOption::new("ITALICS_FONT", "ITALIC"),
];

pub(super) const PROPERTIES: &[PropertyDef] = &[
    PropertyDef::new(
        "fieldType",
        "Field Type",
        PropertySection::Data,
        PropertyControl::FieldTypeSelect,
    )
    .validate(ValidationKind::FieldType)
    .not_bindable()
    .on_update(UpdateHook::RegenerateForFieldType),
    PropertyDef::new(
        "accessor",
        "Property Name",
        PropertySection::Data,
        PropertyControl::InputText {
            placeholder: Some("name"),
        },
    )
    .validate(ValidationKind::Accessor)
    .hidden(HiddenRule::ArrayItem),
    PropertyDef::new(
        "options",
        "Options",
        PropertySection::Data,
        PropertyControl::InputText {
            placeholder: Some(r#"[{ "label": "Option1", "value": "Option2" }]"#),
        },
    )
    .validate(ValidationKind::Options)
    .hidden(HiddenRule::FieldTypeNotIn(FIELD_EXPECTING_OPTIONS)),
    PropertyDef::new(
        "tooltip",
        "Tooltip",
        PropertySection::General,
        PropertyControl::ComputeValue {
            placeholder: Some("Passwords must be at least 6 chars"),
        },
    )
    .validate(ValidationKind::Text)
    .hidden(HiddenRule::ArrayItemIsObject),
    PropertyDef::new(
        "label",
        "Text",
        PropertySection::Label,
        PropertyControl::InputText {
            placeholder: Some("Name:"),
        },
    )
    .validate(ValidationKind::Text)
    .hidden(HiddenRule::ArrayItemIsObject),
    PropertyDef::new(
        "isRequired",
        "Required",
        PropertySection::Validation,
        PropertyControl::Switch,
    )
    .validate(ValidationKind::Boolean { default: false })
    .hidden(HiddenRule::FieldTypeIn(CONTAINERS))
    .js_convertible(),
    PropertyDef::new(
        "isVisible",
        "Visible",
        PropertySection::General,
        PropertyControl::Switch,
    )
    .validate(ValidationKind::Boolean { default: true })
    .hidden(HiddenRule::ArrayItem)
    .js_convertible(),
    PropertyDef::new(
        "isDisabled",
        "Disabled",
        PropertySection::General,
        PropertyControl::Switch,
    )
    .validate(ValidationKind::Boolean { default: false })
    .js_convertible()
    .on_update(UpdateHook::PropagateDisabled),
    PropertyDef::new(
        "onFocus",
        "onFocus",
        PropertySection::Events,
        PropertyControl::ActionSelector,
    )
    .hidden(HiddenRule::FieldTypeNotIn(FIELD_SUPPORTING_FOCUS_EVENTS))
    .js_convertible()
    .trigger(),
    PropertyDef::new(
        "onBlur",
        "onBlur",
        PropertySection::Events,
        PropertyControl::ActionSelector,
    )
    .hidden(HiddenRule::FieldTypeNotIn(FIELD_SUPPORTING_FOCUS_EVENTS))
    .js_convertible()
    .trigger(),
    PropertyDef::new(
        "labelTextColor",
        "Font Color",
        PropertySection::LabelStyles,
        PropertyControl::ColorPicker,
    )
    .validate(ValidationKind::ColorText)
    .js_convertible(),
    PropertyDef::new(
        "labelTextSize",
        "Font Size",
        PropertySection::LabelStyles,
        PropertyControl::DropDown {
            options: LABEL_TEXT_SIZES,
        },
    )
    .validate(ValidationKind::Text)
    .js_convertible(),
    PropertyDef::new(
        "labelStyle",
        "Emphasis",
        PropertySection::LabelStyles,
        PropertyControl::ButtonTabs {
            options: LABEL_STYLES,
        },
    )
    .validate(ValidationKind::Text)
    .js_convertible(),
    PropertyDef::new(
        "borderRadius",
        "Border Radius",
        PropertySection::BorderShadow,
        PropertyControl::BorderRadiusOptions,
    )
    .validate(ValidationKind::Text)
    .hidden(HiddenRule::FieldTypeIn(FIELDS_WITHOUT_BORDER_RADIUS))
    .js_convertible()
    .themed(),
    PropertyDef::new(
        "boxShadow",
        "Box Shadow",
        PropertySection::BorderShadow,
        PropertyControl::BoxShadowOptions,
    )
    .validate(ValidationKind::Text)
    .hidden(HiddenRule::FieldTypeIn(FIELDS_WITHOUT_BOX_SHADOW))
    .js_convertible()
    .themed(),
    PropertyDef::new(
        "accentColor",
        "Accent Color",
        PropertySection::Color,
        PropertyControl::ColorPicker,
    )
    .validate(ValidationKind::Text)
    .hidden(HiddenRule::FieldTypeNotIn(FIELDS_WITH_ACCENT_COLOR))
    .js_convertible()
    .themed(),
];
