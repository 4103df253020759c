//! The persisted field tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{ARRAY_ITEM_KEY, ROOT_SCHEMA_KEY, SCHEMA_PROPERTY};
use crate::field_type::FieldType;

/// Ordered map of identifier to schema item. A widget's `schema` property is
/// a `Schema` holding the single [`ROOT_SCHEMA_KEY`] entry.
pub type Schema = IndexMap<String, SchemaItem>;

/// One field of a generated form.
///
/// Identity and structure are typed; every other property (visibility,
/// validation, styles, default value bindings, ...) lives in `props` and is
/// flattened into the same JSON object when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaItem {
    pub identifier: String,
    pub original_identifier: String,
    pub accessor: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub source_data: Value,
    #[serde(default)]
    pub is_custom_field: bool,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub children: Schema,
    #[serde(flatten)]
    pub props: Map<String, Value>,
}

impl SchemaItem {
    pub fn new(
        identifier: impl Into<String>,
        original_identifier: impl Into<String>,
        accessor: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            original_identifier: original_identifier.into(),
            accessor: accessor.into(),
            field_type,
            source_data: Value::Null,
            is_custom_field: false,
            position: 0,
            label: String::new(),
            children: Schema::new(),
            props: Map::new(),
        }
    }

    pub fn is_array_item(&self) -> bool {
        self.identifier == ARRAY_ITEM_KEY
    }

    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    pub fn set_prop(&mut self, name: &str, value: impl Into<Value>) {
        self.props.insert(name.to_string(), value.into());
    }

    /// Whether `name` is a property this item carries, typed or not.
    pub fn has_property(&self, name: &str) -> bool {
        match name {
            "identifier" | "originalIdentifier" | "accessor" | "fieldType" | "sourceData"
            | "isCustomField" | "position" | "label" | "children" => true,
            _ => self.props.contains_key(name),
        }
    }

    /// Number of items in this subtree, this item included.
    pub fn count(&self) -> usize {
        1 + self.children.values().map(SchemaItem::count).sum::<usize>()
    }
}

pub fn root(schema: &Schema) -> Option<&SchemaItem> {
    schema.get(ROOT_SCHEMA_KEY)
}

/// Follow `identifiers` down from `schema`, descending through `children`.
pub fn item_at<'a>(schema: &'a Schema, identifiers: &[&str]) -> Option<&'a SchemaItem> {
    let (first, rest) = identifiers.split_first()?;
    let mut item = schema.get(*first)?;
    for id in rest {
        item = item.children.get(*id)?;
    }
    Some(item)
}

/// The identifiers along an item path such as
/// `schema.__root_schema__.children.address.children.city`, or `None` when
/// `steps` does not address a schema item.
pub fn item_identifiers(steps: &[String]) -> Option<Vec<&str>> {
    let (head, rest) = steps.split_first()?;
    if head != SCHEMA_PROPERTY {
        return None;
    }
    let (root, mut rest) = rest.split_first()?;
    let mut identifiers = vec![root.as_str()];
    while let [children, identifier, tail @ ..] = rest {
        if children != "children" {
            return None;
        }
        identifiers.push(identifier.as_str());
        rest = tail;
    }
    rest.is_empty().then_some(identifiers)
}
