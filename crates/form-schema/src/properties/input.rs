//! Properties of the free-text input fields.

use super::{
    ControlOption, HiddenRule, PropertyControl, PropertyDef, PropertySection, ValidationKind,
};
use crate::field_type::{FieldType, FIELDS_WITH_ICON, INPUT_TYPES};

const CURRENCY_INPUT: &[FieldType] = &[FieldType::CurrencyInput];
const PHONE_NUMBER_INPUT: &[FieldType] = &[FieldType::PhoneNumberInput];
const TEXT_INPUT: &[FieldType] = &[FieldType::TextInput];
const NUMBER_INPUT: &[FieldType] = &[FieldType::NumberInput];

const CURRENCY_DECIMALS: &[ControlOption] = &[
    ControlOption::new("0", "0"),
    ControlOption::new("1", "1"),
    ControlOption::new("2", "2"),
];

const ICON_ALIGNMENTS: &[ControlOption] = &[
    ControlOption::new("VERTICAL_LEFT", "left"),
    ControlOption::new("VERTICAL_RIGHT", "right"),
];

const ICON_ALIGN_HIDDEN: &[HiddenRule] = &[
    HiddenRule::FieldTypeNotIn(FIELDS_WITH_ICON),
    HiddenRule::IconNameMissing,
];

pub(super) const PROPERTIES: &[PropertyDef] = &[
    PropertyDef::new(
        "defaultValue",
        "Default Value",
        PropertySection::Data,
        PropertyControl::ComputeValue {
            placeholder: Some("John Wick"),
        },
    )
    .validate(ValidationKind::DefaultValue)
    .hidden(HiddenRule::FieldTypeNotIn(INPUT_TYPES)),
    PropertyDef::new(
        "allowCurrencyChange",
        "Allow Currency Change",
        PropertySection::Data,
        PropertyControl::Switch,
    )
    .validate(ValidationKind::Boolean { default: false })
    .hidden(HiddenRule::FieldTypeNotIn(CURRENCY_INPUT)),
    PropertyDef::new(
        "currencyCountryCode",
        "Currency",
        PropertySection::Data,
        PropertyControl::CurrencySelect,
    )
    .hidden(HiddenRule::FieldTypeNotIn(CURRENCY_INPUT))
    .not_bindable(),
    PropertyDef::new(
        "decimalsInCurrency",
        "Decimals",
        PropertySection::Data,
        PropertyControl::DropDown {
            options: CURRENCY_DECIMALS,
        },
    )
    .hidden(HiddenRule::FieldTypeNotIn(CURRENCY_INPUT))
    .not_bindable(),
    PropertyDef::new(
        "allowDialCodeChange",
        "Allow Country Code Change",
        PropertySection::Data,
        PropertyControl::Switch,
    )
    .validate(ValidationKind::Boolean { default: false })
    .hidden(HiddenRule::FieldTypeNotIn(PHONE_NUMBER_INPUT)),
    PropertyDef::new(
        "dialCode",
        "Default Country Code",
        PropertySection::Data,
        PropertyControl::DialCodeSelect,
    )
    .hidden(HiddenRule::FieldTypeNotIn(PHONE_NUMBER_INPUT))
    .not_bindable(),
    PropertyDef::new(
        "placeholderText",
        "Placeholder",
        PropertySection::General,
        PropertyControl::ComputeValue {
            placeholder: Some("Enter value"),
        },
    )
    .validate(ValidationKind::Text)
    .hidden(HiddenRule::FieldTypeNotIn(INPUT_TYPES)),
    PropertyDef::new(
        "maxChars",
        "Max Chars",
        PropertySection::Validation,
        PropertyControl::ComputeValue {
            placeholder: Some("255"),
        },
    )
    .validate(ValidationKind::Number)
    .hidden(HiddenRule::FieldTypeNotIn(TEXT_INPUT)),
    PropertyDef::new(
        "minNum",
        "Min",
        PropertySection::Validation,
        PropertyControl::InputText {
            placeholder: Some("1"),
        },
    )
    .validate(ValidationKind::MinNum)
    .hidden(HiddenRule::FieldTypeNotIn(NUMBER_INPUT)),
    PropertyDef::new(
        "maxNum",
        "Max",
        PropertySection::Validation,
        PropertyControl::InputText {
            placeholder: Some("100"),
        },
    )
    .validate(ValidationKind::MaxNum)
    .hidden(HiddenRule::FieldTypeNotIn(NUMBER_INPUT)),
    PropertyDef::new(
        "regex",
        "Regex",
        PropertySection::Validation,
        PropertyControl::ComputeValue {
            placeholder: Some("^\\w+@[a-zA-Z_]+?\\.[a-zA-Z]{2,3}$"),
        },
    )
    .validate(ValidationKind::Regex)
    .hidden(HiddenRule::FieldTypeNotIn(INPUT_TYPES)),
    PropertyDef::new(
        "validation",
        "Valid",
        PropertySection::Validation,
        PropertyControl::ComputeValue {
            placeholder: Some("{{ Input1.isValid }}"),
        },
    )
    .validate(ValidationKind::Boolean { default: true })
    .hidden(HiddenRule::FieldTypeNotIn(INPUT_TYPES)),
    PropertyDef::new(
        "errorMessage",
        "Error Message",
        PropertySection::Validation,
        PropertyControl::ComputeValue {
            placeholder: Some("Not a valid email!"),
        },
    )
    .validate(ValidationKind::Text)
    .hidden(HiddenRule::FieldTypeNotIn(INPUT_TYPES)),
    PropertyDef::new(
        "isSpellCheck",
        "Spellcheck",
        PropertySection::Validation,
        PropertyControl::Switch,
    )
    .validate(ValidationKind::Boolean { default: false })
    .hidden(HiddenRule::FieldTypeNotIn(TEXT_INPUT))
    .js_convertible(),
    PropertyDef::new(
        "iconName",
        "Icon",
        PropertySection::Icon,
        PropertyControl::IconSelect,
    )
    .validate(ValidationKind::Text)
    .hidden(HiddenRule::FieldTypeNotIn(FIELDS_WITH_ICON))
    .js_convertible(),
    PropertyDef::new(
        "iconAlign",
        "Icon Alignment",
        PropertySection::Icon,
        PropertyControl::IconTabs {
            options: ICON_ALIGNMENTS,
        },
    )
    .validate(ValidationKind::Text)
    .hidden(HiddenRule::AnyOf(ICON_ALIGN_HIDDEN))
    .not_bindable(),
    PropertyDef::new(
        "onTextChanged",
        "onTextChanged",
        PropertySection::Events,
        PropertyControl::ActionSelector,
    )
    .hidden(HiddenRule::FieldTypeNotIn(INPUT_TYPES))
    .js_convertible()
    .trigger(),
    PropertyDef::new(
        "onEnterKeyPress",
        "onEnterKeyPress",
        PropertySection::Events,
        PropertyControl::ActionSelector,
    )
    .hidden(HiddenRule::FieldTypeNotIn(INPUT_TYPES))
    .js_convertible()
    .trigger(),
];
