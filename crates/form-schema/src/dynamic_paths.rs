//! The widget's list of property paths evaluated as bindings.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use form_schema_path::{format_property_path, parse_property_path};

use crate::constants::SCHEMA_PROPERTY;
use crate::schema::{Schema, SchemaItem};

/// One entry of `dynamicPropertyPathList`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DynamicPath {
    pub key: String,
}

impl DynamicPath {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Whether a property value is a binding the host must evaluate.
pub fn is_dynamic_value(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.contains("{{"))
}

/// Keep the entries of `current` that still point at something, then add
/// every binding property found in `schema`. First occurrence wins.
///
/// Entries outside `schema` belong to the widget and are always kept.
pub fn compute_dynamic_property_path_list(
    schema: &Schema,
    current: &[DynamicPath],
) -> Vec<DynamicPath> {
    let mut keys: IndexSet<String> = IndexSet::new();
    for path in current {
        if resolves(schema, &path.key) {
            keys.insert(path.key.clone());
        }
    }
    for (identifier, item) in schema {
        let mut steps = vec![SCHEMA_PROPERTY.to_string(), identifier.clone()];
        collect_bindings(item, &mut steps, &mut keys);
    }
    keys.into_iter().map(DynamicPath::new).collect()
}

/// Swap the entries at or under the item at `item_steps` for the bindings
/// of its replacement `item`. Other entries keep their order.
pub fn rebind_item_paths(
    current: &[DynamicPath],
    item_steps: &[String],
    item: &SchemaItem,
) -> Vec<DynamicPath> {
    let prefix = format_property_path(item_steps);
    let mut keys: IndexSet<String> = current
        .iter()
        .filter(|path| !is_at_or_under(&path.key, &prefix))
        .map(|path| path.key.clone())
        .collect();
    let mut steps = item_steps.to_vec();
    collect_bindings(item, &mut steps, &mut keys);
    keys.into_iter().map(DynamicPath::new).collect()
}

fn is_at_or_under(key: &str, prefix: &str) -> bool {
    key.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['.', '[']))
}

fn collect_bindings(item: &SchemaItem, steps: &mut Vec<String>, out: &mut IndexSet<String>) {
    for (name, value) in &item.props {
        if is_dynamic_value(value) {
            steps.push(name.clone());
            out.insert(format_property_path(steps));
            steps.pop();
        }
    }
    for (identifier, child) in &item.children {
        steps.push("children".to_string());
        steps.push(identifier.clone());
        collect_bindings(child, steps, out);
        steps.truncate(steps.len() - 2);
    }
}

/// Whether `key` is a widget-level path, or a schema path whose item exists
/// and still carries the property.
fn resolves(schema: &Schema, key: &str) -> bool {
    let Ok(steps) = parse_property_path(key) else {
        return false;
    };
    match steps.split_first() {
        Some((head, rest)) if head == SCHEMA_PROPERTY => schema_property_exists(schema, rest),
        Some(_) => true,
        None => false,
    }
}

fn schema_property_exists(schema: &Schema, steps: &[String]) -> bool {
    let Some((identifier, mut rest)) = steps.split_first() else {
        return false;
    };
    let Some(mut item) = schema.get(identifier) else {
        return false;
    };
    while let [children, id, tail @ ..] = rest {
        if children != "children" {
            break;
        }
        match item.children.get(id) {
            Some(child) => {
                item = child;
                rest = tail;
            }
            None => return false,
        }
    }
    match rest.first() {
        Some(name) => item.has_property(name),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ROOT_SCHEMA_KEY;
    use crate::field_type::FieldType;

    fn schema() -> Schema {
        let mut age = SchemaItem::new("age", "age", "age", FieldType::NumberInput);
        age.set_prop("defaultValue", "{{sourceData.age}}");
        age.set_prop("minNum", 0);
        let mut root = SchemaItem::new(ROOT_SCHEMA_KEY, ROOT_SCHEMA_KEY, ROOT_SCHEMA_KEY, FieldType::Object);
        root.children.insert("age".into(), age);
        let mut schema = Schema::new();
        schema.insert(ROOT_SCHEMA_KEY.into(), root);
        schema
    }

    #[test]
    fn test_collects_bindings() {
        let list = compute_dynamic_property_path_list(&schema(), &[]);
        assert_eq!(
            list,
            vec![DynamicPath::new("schema.__root_schema__.children.age.defaultValue")]
        );
    }

    #[test]
    fn test_keeps_valid_and_widget_entries() {
        let current = vec![
            DynamicPath::new("sourceData"),
            DynamicPath::new("schema.__root_schema__.children.age.minNum"),
            DynamicPath::new("schema.__root_schema__.children.name.defaultValue"),
            DynamicPath::new("schema.__root_schema__.children.age.maxNum"),
            DynamicPath::new("schema.__root_schema__.children.age.defaultValue"),
        ];
        let list = compute_dynamic_property_path_list(&schema(), &current);
        let keys: Vec<&str> = list.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "sourceData",
                "schema.__root_schema__.children.age.minNum",
                "schema.__root_schema__.children.age.defaultValue",
            ]
        );
    }

    #[test]
    fn test_children_property_itself() {
        assert!(resolves(&schema(), "schema.__root_schema__.children"));
        assert!(!resolves(&schema(), "schema.__root_schema__.children.zip"));
        assert!(!resolves(&schema(), "schema.a..b"));
    }

    #[test]
    fn test_rebind_replaces_item_entries_only() {
        let current = vec![
            DynamicPath::new("sourceData"),
            DynamicPath::new("schema.__root_schema__.children.age.minNum"),
            DynamicPath::new("schema.__root_schema__.children.ageGroup.defaultValue"),
        ];
        let mut age = SchemaItem::new("age", "age", "age", FieldType::TextInput);
        age.set_prop("defaultValue", "{{sourceData.age}}");
        let steps: Vec<String> = ["schema", ROOT_SCHEMA_KEY, "children", "age"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let list = rebind_item_paths(&current, &steps, &age);
        let keys: Vec<&str> = list.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "sourceData",
                "schema.__root_schema__.children.ageGroup.defaultValue",
                "schema.__root_schema__.children.age.defaultValue",
            ]
        );
    }
}
