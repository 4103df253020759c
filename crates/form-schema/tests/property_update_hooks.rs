use form_schema::{
    apply_updates, FieldType, PropertyUpdate, SchemaEngine, SchemaItem, WidgetProperties,
};
use serde_json::{json, Value};

fn generated(source_data: Value, child_stylesheet: Value) -> Value {
    let mut raw = json!({
        "widgetName": "Form1",
        "autoGenerateForm": false,
        "fieldLimitExceeded": false,
        "dynamicPropertyPathList": [{"key": "sourceData"}],
        "childStylesheet": child_stylesheet,
        "__evaluation__": {"evaluatedValues": {"sourceData": source_data}}
    });
    let props = WidgetProperties::from_value(raw.clone()).expect("widget must deserialize");
    let updates = SchemaEngine::default()
        .on_generate_form_click(&props)
        .expect("click must succeed");
    apply_updates(&mut raw, &updates).expect("updates must apply");
    raw
}

/// Write `value` at `path` the way the property pane does: the edit first,
/// then whatever its hook asks for.
fn edit(raw: &mut Value, path: &str, value: Value) -> Vec<PropertyUpdate> {
    let props = WidgetProperties::from_value(raw.clone()).expect("widget must deserialize");
    let hooked = SchemaEngine::default()
        .on_property_update(&props, path, &value)
        .expect("hook must succeed");
    let mut updates = vec![PropertyUpdate::new(path, value)];
    updates.extend(hooked.iter().cloned());
    apply_updates(raw, &updates).expect("updates must apply");
    hooked
}

fn field(raw: &Value, identifier: &str) -> SchemaItem {
    serde_json::from_value(raw["schema"]["__root_schema__"]["children"][identifier].clone())
        .expect("field must deserialize")
}

fn path_keys(raw: &Value) -> Vec<String> {
    raw["dynamicPropertyPathList"]
        .as_array()
        .expect("path list must be an array")
        .iter()
        .filter_map(|entry| entry["key"].as_str().map(String::from))
        .collect()
}

#[test]
fn test_field_type_change_regenerates_field() {
    let mut raw = generated(json!({"name": "John", "zip": "12345"}), json!({}));
    raw["schema"]["__root_schema__"]["children"]["zip"]["label"] = json!("Postal code");
    raw["schema"]["__root_schema__"]["children"]["zip"]["maxChars"] = json!(5);

    let hooked = edit(
        &mut raw,
        "schema.__root_schema__.children.zip.fieldType",
        json!("Number Input"),
    );
    let paths: Vec<&str> = hooked.iter().map(|u| u.property_path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["schema.__root_schema__.children.zip", "dynamicPropertyPathList"]
    );

    let zip = field(&raw, "zip");
    assert_eq!(zip.field_type, FieldType::NumberInput);
    assert_eq!(zip.label, "Postal code");
    assert_eq!(zip.position, 1);
    assert!(zip.prop("maxChars").is_none());
    assert_eq!(
        zip.prop("defaultValue"),
        Some(&json!(
            "{{((sourceData, formData, fieldState) => (sourceData.zip))(Form1.sourceData, Form1.formData, Form1.fieldState)}}"
        ))
    );

    let keys = path_keys(&raw);
    let zip_default = "schema.__root_schema__.children.zip.defaultValue";
    assert_eq!(keys.iter().filter(|k| k.as_str() == zip_default).count(), 1);
    assert_eq!(keys[0], "sourceData");
}

#[test]
fn test_object_to_text_drops_children_and_their_paths() {
    let mut raw = generated(json!({"address": {"city": "Paris"}}), json!({}));
    let city_default = "schema.__root_schema__.children.address.children.city.defaultValue";
    assert!(path_keys(&raw).iter().any(|k| k == city_default));

    edit(
        &mut raw,
        "schema.__root_schema__.children.address.fieldType",
        json!("Text Input"),
    );
    let address = field(&raw, "address");
    assert_eq!(address.field_type, FieldType::TextInput);
    assert!(address.children.is_empty());
    let binding = address
        .prop("defaultValue")
        .and_then(Value::as_str)
        .expect("binding must be set");
    assert!(binding.contains("JSON.stringify(sourceData.address, null, 2)"));
    assert!(!path_keys(&raw).iter().any(|k| k == city_default));
}

#[test]
fn test_disabled_object_disables_children() {
    let mut raw = generated(json!({"address": {"city": "Paris", "zip": "75001"}}), json!({}));
    edit(
        &mut raw,
        "schema.__root_schema__.children.address.isDisabled",
        json!(true),
    );
    let address = field(&raw, "address");
    assert_eq!(address.prop("isDisabled"), Some(&json!(true)));
    for child in address.children.values() {
        assert_eq!(child.prop("isDisabled"), Some(&json!(true)));
    }
}

#[test]
fn test_theme_values_on_generated_fields() {
    let raw = generated(
        json!({"name": "John", "tags": ["a"]}),
        json!({
            "TEXT_INPUT": {
                "accentColor": "{{appsmith.theme.colors.primaryColor}}",
                "borderRadius": "{{appsmith.theme.borderRadius.appBorderRadius}}"
            },
            "ARRAY": {"cellBorderRadius": "{{appsmith.theme.borderRadius.appBorderRadius}}"}
        }),
    );
    let name = field(&raw, "name");
    assert_eq!(
        name.prop("accentColor"),
        Some(&json!("{{appsmith.theme.colors.primaryColor}}"))
    );
    let tags = field(&raw, "tags");
    assert!(tags.prop("accentColor").is_none());
    assert!(tags.prop("cellBorderRadius").is_some());
    assert!(tags.children["__array_item__"].prop("borderRadius").is_some());
    assert!(path_keys(&raw)
        .iter()
        .any(|k| k == "schema.__root_schema__.children.name.accentColor"));
}

#[test]
fn test_theme_values_follow_field_type_unless_customized() {
    let sheets = json!({
        "TEXT_INPUT": {"accentColor": "text", "boxShadow": "none"},
        "NUMBER_INPUT": {"accentColor": "number", "boxShadow": "none"}
    });
    let mut raw = generated(json!({"a": "1", "b": "2"}), sheets);
    raw["schema"]["__root_schema__"]["children"]["b"]["accentColor"] = json!("red");

    for id in ["a", "b"] {
        edit(
            &mut raw,
            &format!("schema.__root_schema__.children.{id}.fieldType"),
            json!("Number Input"),
        );
    }
    assert_eq!(field(&raw, "a").prop("accentColor"), Some(&json!("number")));
    assert_eq!(field(&raw, "b").prop("accentColor"), Some(&json!("red")));
    assert_eq!(field(&raw, "b").prop("boxShadow"), Some(&json!("none")));
}
