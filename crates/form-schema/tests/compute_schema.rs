use form_schema::{
    compute_schema, ComputeSchemaArgs, ComputedSchema, ComputedSchemaStatus, DynamicPath,
    FieldType, Schema, SchemaItem,
};
use serde_json::{json, Map, Value};

const ROOT: &str = "__root_schema__";
const ARRAY_ITEM: &str = "__array_item__";

fn first_run(data: &Value) -> ComputedSchema {
    compute_schema(ComputeSchemaArgs {
        curr_source_data: data,
        prev_source_data: None,
        prev_schema: None,
        current_dynamic_property_path_list: &[],
        widget_name: "Form1",
        field_theme_stylesheets: None,
    })
}

fn rerun(prev: &ComputedSchema, data: &Value) -> ComputedSchema {
    compute_schema(ComputeSchemaArgs {
        curr_source_data: data,
        prev_source_data: Some(&prev.schema[ROOT].source_data),
        prev_schema: Some(&prev.schema),
        current_dynamic_property_path_list: &prev.dynamic_property_path_list,
        widget_name: "Form1",
        field_theme_stylesheets: None,
    })
}

fn child<'a>(schema: &'a Schema, id: &str) -> &'a SchemaItem {
    &schema[ROOT].children[id]
}

#[test]
fn test_second_run_with_same_sample_is_unchanged() {
    let data = json!({"name": "John", "address": {"city": "Oslo"}, "tags": ["a"]});
    let first = first_run(&data);
    assert_eq!(first.status, ComputedSchemaStatus::Updated);

    let second = rerun(&first, &data);
    assert_eq!(second.status, ComputedSchemaStatus::Unchanged);
    assert_eq!(second.schema, first.schema);
    assert_eq!(second.dynamic_property_path_list, first.dynamic_property_path_list);
}

#[test]
fn test_unchanged_ignores_key_order() {
    let first = first_run(&json!({"a": 1, "b": 2}));
    let second = rerun(&first, &json!({"b": 2, "a": 1.0}));
    assert_eq!(second.status, ComputedSchemaStatus::Unchanged);
}

#[test]
fn test_limit_exceeded_returns_prev_schema() {
    let prev = first_run(&json!({"only": 1}));
    let mut wide = Map::new();
    for i in 0..51 {
        wide.insert(format!("field{i}"), json!(i));
    }
    let wide = Value::Object(wide);
    let out = rerun(&prev, &wide);
    assert_eq!(out.status, ComputedSchemaStatus::LimitExceeded);
    assert_eq!(out.schema, prev.schema);
    assert_eq!(out.dynamic_property_path_list, prev.dynamic_property_path_list);
}

#[test]
fn test_exactly_at_limit_is_accepted() {
    let mut wide = Map::new();
    for i in 0..50 {
        wide.insert(format!("field{i}"), json!(i));
    }
    let out = first_run(&Value::Object(wide));
    assert_eq!(out.status, ComputedSchemaStatus::Updated);
    assert_eq!(out.schema[ROOT].children.len(), 50);
}

#[test]
fn test_array_templates_count_against_limit() {
    // 25 arrays of scalars: 25 fields plus 25 item templates.
    let mut data = Map::new();
    for i in 0..25 {
        data.insert(format!("list{i}"), json!([i]));
    }
    assert_eq!(first_run(&Value::Object(data.clone())).status, ComputedSchemaStatus::Updated);
    data.insert("one_more".into(), json!(1));
    assert_eq!(first_run(&Value::Object(data)).status, ComputedSchemaStatus::LimitExceeded);
}

#[test]
fn test_custom_label_survives_sibling_addition() {
    let mut first = first_run(&json!({"name": "John", "age": 24}));
    first
        .schema
        .get_mut(ROOT)
        .and_then(|root| root.children.get_mut("age"))
        .expect("age field must exist")
        .label = "Age (years)".into();

    let out = rerun(&first, &json!({"name": "John", "age": 24, "email": "j@x.io"}));
    assert_eq!(out.status, ComputedSchemaStatus::Updated);
    assert_eq!(child(&out.schema, "age").label, "Age (years)");
    assert_eq!(child(&out.schema, "email").label, "Email");
}

#[test]
fn test_type_change_drops_type_specific_props() {
    let mut first = first_run(&json!({"age": 24}));
    let age = first
        .schema
        .get_mut(ROOT)
        .and_then(|root| root.children.get_mut("age"))
        .expect("age field must exist");
    age.set_prop("minNum", 0);
    age.set_prop("isVisible", false);
    age.label = "Years".into();

    let out = rerun(&first, &json!({"age": "twenty four"}));
    let age = child(&out.schema, "age");
    assert_eq!(age.field_type, FieldType::TextInput);
    assert!(age.prop("minNum").is_none());
    assert_eq!(age.prop("isVisible"), Some(&json!(false)));
    assert_eq!(age.label, "Years");
    assert_eq!(age.source_data, json!("twenty four"));
}

#[test]
fn test_array_template_from_first_element_only() {
    let out = first_run(&json!({"items": [{"sku": "A1", "qty": 2}, {"sku": "B2"}]}));
    let items = child(&out.schema, "items");
    assert_eq!(items.field_type, FieldType::Array);
    assert_eq!(items.children.len(), 1);

    let template = &items.children[ARRAY_ITEM];
    assert_eq!(template.field_type, FieldType::Object);
    let keys: Vec<&str> = template.children.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["sku", "qty"]);
    assert_eq!(template.children["qty"].field_type, FieldType::NumberInput);
}

#[test]
fn test_array_template_remerged_from_new_first_element() {
    let first = first_run(&json!({"items": [{"sku": "A1"}]}));
    let out = rerun(&first, &json!({"items": [{"id": 7}, {"sku": "B2"}]}));
    let template = &child(&out.schema, "items").children[ARRAY_ITEM];
    let keys: Vec<&str> = template.children.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["id"]);
}

#[test]
fn test_end_to_end_name_and_age() {
    let out = first_run(&json!({"name": "John", "age": 24}));
    assert_eq!(out.status, ComputedSchemaStatus::Updated);

    let root = &out.schema[ROOT];
    assert_eq!(root.children.len(), 2);
    assert_eq!(child(&out.schema, "name").accessor, "name");
    assert_eq!(child(&out.schema, "name").field_type, FieldType::TextInput);
    assert_eq!(child(&out.schema, "age").accessor, "age");
    assert_eq!(child(&out.schema, "age").field_type, FieldType::NumberInput);

    assert_eq!(
        out.dynamic_property_path_list,
        vec![
            DynamicPath::new("schema.__root_schema__.children.name.defaultValue"),
            DynamicPath::new("schema.__root_schema__.children.age.defaultValue"),
        ]
    );
}

#[test]
fn test_key_order_follows_new_sample() {
    let first = first_run(&json!({"a": 1, "b": 2, "c": 3}));
    let out = rerun(&first, &json!({"c": 3, "a": 1, "b": 5}));
    let keys: Vec<&str> = out.schema[ROOT].children.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["c", "a", "b"]);
    let positions: Vec<i64> = out.schema[ROOT].children.values().map(|c| c.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);
}

#[test]
fn test_removed_field_drops_its_paths() {
    let first = first_run(&json!({"name": "John", "age": 24}));
    let out = rerun(&first, &json!({"name": "John"}));
    assert!(!out.schema[ROOT].children.contains_key("age"));
    assert!(out
        .dynamic_property_path_list
        .iter()
        .all(|p| !p.key.contains(".age.")));
}

#[test]
fn test_top_level_array_sample() {
    let out = first_run(&json!([{"id": 1}]));
    let root = &out.schema[ROOT];
    assert_eq!(root.field_type, FieldType::Array);
    assert_eq!(root.children[ARRAY_ITEM].children["id"].field_type, FieldType::NumberInput);
}
