//! Follow-up writes for property edits that reshape the schema.

use serde_json::Value;
use tracing::{debug, warn};

use form_schema_path::{format_property_path, parse_property_path};

use crate::compute::SchemaEngine;
use crate::dynamic_paths::rebind_item_paths;
use crate::error::SchemaError;
use crate::field_type::FieldType;
use crate::merge::Customizations;
use crate::properties::UpdateHook;
use crate::schema::{self, Schema, SchemaItem};
use crate::synth::{Budget, FieldSite, LimitExceeded, Synthesizer};
use crate::widget::{PropertyUpdate, WidgetProperties};

impl SchemaEngine {
    /// The writes that go with setting `property_path` to `value` on
    /// `widget`, besides that write itself.
    ///
    /// Only schema item properties with an update hook produce any; a
    /// value the hook cannot use produces none.
    pub fn on_property_update(
        &self,
        widget: &WidgetProperties,
        property_path: &str,
        value: &Value,
    ) -> Result<Vec<PropertyUpdate>, SchemaError> {
        let steps =
            parse_property_path(property_path).map_err(|e| SchemaError::path(property_path, e))?;
        let Some((name, item_steps)) = steps.split_last() else {
            return Ok(Vec::new());
        };
        let Some(hook) = self.registry().get(name).and_then(|def| def.update_hook) else {
            return Ok(Vec::new());
        };
        let Some(identifiers) = schema::item_identifiers(item_steps) else {
            return Ok(Vec::new());
        };
        let missing = || SchemaError::MissingSchemaItem(property_path.to_string());
        let schema = widget.schema.as_ref().ok_or_else(missing)?;
        let item = schema::item_at(schema, &identifiers).ok_or_else(missing)?;

        match hook {
            UpdateHook::RegenerateForFieldType => {
                let Some(field_type) = value.as_str().and_then(|s| s.parse::<FieldType>().ok())
                else {
                    debug!(path = property_path, "not a field type, nothing to regenerate");
                    return Ok(Vec::new());
                };
                let depth = identifiers.len() - 1;
                if depth == 0 || field_type == item.field_type {
                    return Ok(Vec::new());
                }
                let target = ItemTarget {
                    steps: item_steps,
                    identifiers: &identifiers,
                    item,
                };
                self.regenerate_for_field_type(widget, schema, target, field_type)
            }
            UpdateHook::PropagateDisabled => Ok(value
                .as_bool()
                .map(|disabled| propagate_disabled(item, item_steps, disabled))
                .unwrap_or_default()),
        }
    }

    /// Rebuild a field as `field_type` from the data it was generated from,
    /// keeping what the user customized that still applies.
    fn regenerate_for_field_type(
        &self,
        widget: &WidgetProperties,
        schema: &Schema,
        target: ItemTarget<'_>,
        field_type: FieldType,
    ) -> Result<Vec<PropertyUpdate>, SchemaError> {
        let prev = target.item;
        let source_path = source_path(schema, target.identifiers);
        let stylesheets = widget.child_stylesheet.as_ref();

        // Everything but the replaced subtree stays.
        let kept = schema.values().map(SchemaItem::count).sum::<usize>()
            - schema.len()
            - prev.count()
            + 1;
        let mut budget = Budget::new(self.limits().max_field_count);
        let site = FieldSite::new(
            prev.original_identifier.clone(),
            prev.identifier.clone(),
            target.identifiers.len() - 1,
            prev.position,
            source_path.clone(),
        );
        let fresh = budget.charge(kept).and_then(|()| {
            Synthesizer::new(self.limits(), &widget.widget_name, &mut budget)
                .with_stylesheets(stylesheets)
                .synthesize_as(site, &prev.source_data, field_type)
        });
        let fresh = match fresh {
            Ok(fresh) => fresh,
            Err(LimitExceeded { max }) => {
                warn!(
                    widget = %widget.widget_name,
                    identifier = %prev.identifier,
                    max_field_count = max,
                    "field limit exceeded, keeping field type"
                );
                return Ok(vec![PropertyUpdate::new("fieldLimitExceeded", true)]);
            }
        };

        let item = Customizations::new(self.registry(), &widget.widget_name, stylesheets)
            .carry_over(prev, fresh, source_path.as_deref());
        let paths = rebind_item_paths(&widget.dynamic_property_path_list, target.steps, &item);
        debug!(
            widget = %widget.widget_name,
            identifier = %item.identifier,
            from = %prev.field_type,
            to = %field_type,
            "regenerated field"
        );
        Ok(vec![
            PropertyUpdate::new(format_property_path(target.steps), serde_json::to_value(&item)?),
            PropertyUpdate::new("dynamicPropertyPathList", serde_json::to_value(&paths)?),
        ])
    }
}

/// A located schema item and the path it was addressed by.
struct ItemTarget<'a> {
    steps: &'a [String],
    identifiers: &'a [&'a str],
    item: &'a SchemaItem,
}

/// Source keys from the sample root down to the item, `None` below an array
/// item template.
fn source_path(schema: &Schema, identifiers: &[&str]) -> Option<Vec<String>> {
    let (root, rest) = identifiers.split_first()?;
    let mut item = schema.get(*root)?;
    let mut path = Vec::with_capacity(rest.len());
    for identifier in rest {
        item = item.children.get(*identifier)?;
        if item.is_array_item() {
            return None;
        }
        path.push(item.original_identifier.clone());
    }
    Some(path)
}

/// `isDisabled` writes for every descendant of `item`, parents first.
fn propagate_disabled(
    item: &SchemaItem,
    item_steps: &[String],
    disabled: bool,
) -> Vec<PropertyUpdate> {
    fn walk(
        item: &SchemaItem,
        steps: &mut Vec<String>,
        disabled: bool,
        out: &mut Vec<PropertyUpdate>,
    ) {
        for (identifier, child) in &item.children {
            steps.push("children".to_string());
            steps.push(identifier.clone());
            steps.push("isDisabled".to_string());
            out.push(PropertyUpdate::new(format_property_path(steps), disabled));
            steps.pop();
            walk(child, steps, disabled, out);
            steps.truncate(steps.len() - 2);
        }
    }

    let mut updates = Vec::new();
    walk(item, &mut item_steps.to_vec(), disabled, &mut updates);
    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::ComputeSchemaArgs;
    use serde_json::json;

    fn widget(data: Value) -> WidgetProperties {
        let engine = SchemaEngine::default();
        let computed = engine.compute(ComputeSchemaArgs {
            curr_source_data: &data,
            prev_source_data: None,
            prev_schema: None,
            current_dynamic_property_path_list: &[],
            widget_name: "Form1",
            field_theme_stylesheets: None,
        });
        WidgetProperties {
            widget_name: "Form1".into(),
            schema: Some(computed.schema),
            dynamic_property_path_list: computed.dynamic_property_path_list,
            ..WidgetProperties::default()
        }
    }

    #[test]
    fn test_properties_without_hook_produce_nothing() {
        let widget = widget(json!({"name": "x"}));
        let updates = SchemaEngine::default()
            .on_property_update(&widget, "schema.__root_schema__.children.name.label", &json!("N"))
            .unwrap();
        assert!(updates.is_empty());
    }

    #[test]
    fn test_missing_item_is_an_error() {
        let widget = widget(json!({"name": "x"}));
        let err = SchemaEngine::default()
            .on_property_update(
                &widget,
                "schema.__root_schema__.children.zip.fieldType",
                &json!("Number Input"),
            )
            .unwrap_err();
        assert!(matches!(err, SchemaError::MissingSchemaItem(_)));
    }

    #[test]
    fn test_unknown_or_same_field_type_is_ignored() {
        let widget = widget(json!({"name": "x"}));
        let engine = SchemaEngine::default();
        let path = "schema.__root_schema__.children.name.fieldType";
        assert!(engine.on_property_update(&widget, path, &json!("Slider")).unwrap().is_empty());
        assert!(engine
            .on_property_update(&widget, path, &json!("Text Input"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_regeneration_counts_against_limit() {
        let widget = widget(json!({"a": "x", "b": "y"}));
        let engine = SchemaEngine::new(
            crate::SchemaLimits {
                max_field_count: 3,
                ..crate::SchemaLimits::default()
            },
            crate::FieldPropertyRegistry::new(),
        );
        // Array adds its item template: a, b and the template make three.
        let updates = engine
            .on_property_update(&widget, "schema.__root_schema__.children.a.fieldType", &json!("Array"))
            .unwrap();
        assert_eq!(updates.len(), 2);

        let updates = engine
            .on_property_update(&widget, "schema.__root_schema__.children.a.fieldType", &json!("Object"))
            .unwrap();
        assert_eq!(updates.len(), 2);

        let widget = self::widget(json!({"a": "x", "b": "y", "c": "z"}));
        let updates = engine
            .on_property_update(&widget, "schema.__root_schema__.children.a.fieldType", &json!("Array"))
            .unwrap();
        assert_eq!(updates, vec![PropertyUpdate::new("fieldLimitExceeded", true)]);
    }

    #[test]
    fn test_disabled_reaches_every_descendant() {
        let widget = widget(json!({"address": {"city": "x", "tags": ["a"]}}));
        let updates = SchemaEngine::default()
            .on_property_update(
                &widget,
                "schema.__root_schema__.children.address.isDisabled",
                &json!(true),
            )
            .unwrap();
        let paths: Vec<&str> = updates.iter().map(|u| u.property_path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "schema.__root_schema__.children.address.children.city.isDisabled",
                "schema.__root_schema__.children.address.children.tags.isDisabled",
                "schema.__root_schema__.children.address.children.tags.children.__array_item__.isDisabled",
            ]
        );
        assert!(updates.iter().all(|u| u.property_value == json!(true)));

        let ignored = SchemaEngine::default()
            .on_property_update(
                &widget,
                "schema.__root_schema__.children.address.isDisabled",
                &json!("{{Input1.isValid}}"),
            )
            .unwrap();
        assert!(ignored.is_empty());
    }
}
