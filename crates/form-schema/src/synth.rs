//! Sample data → fresh schema tree.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::trace;

use form_schema_util::{is_js_identifier, start_case};

use crate::config::SchemaLimits;
use crate::constants::{ARRAY_ITEM_KEY, ROOT_SCHEMA_KEY};
use crate::field_type::FieldType;
use crate::infer::infer_field_type_at;
use crate::sanitize::sanitize_key;
use crate::schema::{Schema, SchemaItem};
use crate::stylesheet::FieldThemeStylesheets;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("schema would exceed the limit of {max} fields")]
pub struct LimitExceeded {
    pub max: usize,
}

/// Running count of generated fields against the configured maximum.
#[derive(Debug, Clone)]
pub struct Budget {
    used: usize,
    max: usize,
}

impl Budget {
    pub fn new(max: usize) -> Self {
        Self { used: 0, max }
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn charge(&mut self, n: usize) -> Result<(), LimitExceeded> {
        self.used += n;
        if self.used > self.max {
            Err(LimitExceeded { max: self.max })
        } else {
            Ok(())
        }
    }
}

/// Where a field sits in the tree being generated.
pub(crate) struct FieldSite {
    original_identifier: String,
    identifier: String,
    depth: usize,
    position: i64,
    /// Keys from the sample root down to this field; `None` inside an
    /// array item template, whose fields have no fixed source location.
    source_path: Option<Vec<String>>,
}

impl FieldSite {
    fn root() -> Self {
        Self {
            original_identifier: ROOT_SCHEMA_KEY.to_string(),
            identifier: ROOT_SCHEMA_KEY.to_string(),
            depth: 0,
            position: 0,
            source_path: Some(Vec::new()),
        }
    }

    pub(crate) fn new(
        original_identifier: String,
        identifier: String,
        depth: usize,
        position: i64,
        source_path: Option<Vec<String>>,
    ) -> Self {
        Self {
            original_identifier,
            identifier,
            depth,
            position,
            source_path,
        }
    }

    fn is_root(&self) -> bool {
        self.depth == 0
    }
}

/// Builds schema items from sample data, charging every non-root field
/// against a shared [`Budget`].
pub struct Synthesizer<'a> {
    limits: &'a SchemaLimits,
    widget_name: &'a str,
    stylesheets: Option<&'a FieldThemeStylesheets>,
    budget: &'a mut Budget,
}

impl<'a> Synthesizer<'a> {
    pub fn new(limits: &'a SchemaLimits, widget_name: &'a str, budget: &'a mut Budget) -> Self {
        Self {
            limits,
            widget_name,
            stylesheets: None,
            budget,
        }
    }

    /// Give new fields the theme's per-type property values.
    pub fn with_stylesheets(mut self, stylesheets: Option<&'a FieldThemeStylesheets>) -> Self {
        self.stylesheets = stylesheets;
        self
    }

    /// Synthesize the root item for a whole sample.
    ///
    /// Aborts as soon as the field budget runs out; no partial tree escapes.
    pub fn synthesize(&mut self, sample: &Value) -> Result<SchemaItem, LimitExceeded> {
        self.build(FieldSite::root(), sample, None)
    }

    /// Synthesize one field at `site` as `field_type`, whatever its data
    /// would infer to. Only the field's descendants are charged.
    pub(crate) fn synthesize_as(
        &mut self,
        site: FieldSite,
        data: &Value,
        field_type: FieldType,
    ) -> Result<SchemaItem, LimitExceeded> {
        self.build(site, data, Some(field_type))
    }

    fn build(
        &mut self,
        site: FieldSite,
        data: &Value,
        field_type: Option<FieldType>,
    ) -> Result<SchemaItem, LimitExceeded> {
        let field_type =
            field_type.unwrap_or_else(|| infer_field_type_at(data, site.depth, self.limits));
        let mut item = SchemaItem::new(
            site.identifier.clone(),
            site.original_identifier.clone(),
            site.identifier.clone(),
            field_type,
        );
        item.source_data = data.clone();
        item.position = site.position;
        item.label = default_label(&site);
        self.apply_default_props(&mut item, &site, data);

        item.children = match (field_type, data) {
            (FieldType::Object, Value::Object(map)) => self.object_children(&site, map)?,
            (FieldType::Array, data) => {
                self.array_children(&site, data.as_array().and_then(|arr| arr.first()))?
            }
            _ => Schema::new(),
        };

        trace!(
            identifier = %item.identifier,
            field_type = %item.field_type,
            depth = site.depth,
            "synthesized field"
        );
        Ok(item)
    }

    fn object_children(
        &mut self,
        parent: &FieldSite,
        map: &Map<String, Value>,
    ) -> Result<Schema, LimitExceeded> {
        let mut children = Schema::with_capacity(map.len());
        for (position, (key, value)) in map.iter().enumerate() {
            self.budget.charge(1)?;
            let identifier = sanitize_key(key, |candidate| children.contains_key(candidate));
            let site = FieldSite {
                original_identifier: key.clone(),
                identifier: identifier.clone(),
                depth: parent.depth + 1,
                position: position as i64,
                source_path: parent.source_path.as_ref().map(|path| {
                    let mut path = path.clone();
                    path.push(key.clone());
                    path
                }),
            };
            let child = self.build(site, value, None)?;
            children.insert(identifier, child);
        }
        Ok(children)
    }

    /// The item template is inferred from the first element only; an empty
    /// array gets a text placeholder.
    fn array_children(
        &mut self,
        parent: &FieldSite,
        first: Option<&Value>,
    ) -> Result<Schema, LimitExceeded> {
        self.budget.charge(1)?;
        let site = FieldSite {
            original_identifier: ARRAY_ITEM_KEY.to_string(),
            identifier: ARRAY_ITEM_KEY.to_string(),
            depth: parent.depth + 1,
            position: 0,
            source_path: None,
        };
        let template = self.build(site, first.unwrap_or(&Value::Null), None)?;
        let mut children = Schema::with_capacity(1);
        children.insert(ARRAY_ITEM_KEY.to_string(), template);
        Ok(children)
    }

    fn apply_default_props(&self, item: &mut SchemaItem, site: &FieldSite, data: &Value) {
        item.set_prop("isVisible", true);
        item.set_prop("isDisabled", false);
        if let Some(theme) = self.stylesheets.and_then(|s| s.for_field(item.field_type)) {
            for (name, value) in theme {
                item.props.insert(name.clone(), value.clone());
            }
        }
        if site.is_root() {
            return;
        }
        if !item.field_type.is_container() {
            item.set_prop("isRequired", false);
        }
        if item.field_type.is_input() {
            item.set_prop("placeholderText", format!("Enter {}", item.label));
        }
        if let Some(path) = &site.source_path {
            let as_json_text = data.is_object() || data.is_array();
            let collapsed = as_json_text && !item.field_type.is_container();
            item.set_prop(
                "defaultValue",
                default_value_binding(self.widget_name, path, collapsed),
            );
        }
    }
}

fn default_label(site: &FieldSite) -> String {
    if site.is_root() {
        String::new()
    } else if site.identifier == ARRAY_ITEM_KEY {
        "Array Item".to_string()
    } else {
        start_case(&site.original_identifier)
    }
}

/// The binding that reads a field's initial value out of the widget's
/// source data, e.g.
/// `{{((sourceData, formData, fieldState) => (sourceData.user.name))(Form1.sourceData, Form1.formData, Form1.fieldState)}}`.
pub fn default_value_binding(widget_name: &str, path: &[String], as_json_text: bool) -> String {
    let mut expr = String::from("sourceData");
    for key in path {
        if is_js_identifier(key) {
            expr.push('.');
            expr.push_str(key);
        } else {
            expr.push('[');
            expr.push_str(&Value::from(key.as_str()).to_string());
            expr.push(']');
        }
    }
    if as_json_text {
        expr = format!("JSON.stringify({expr}, null, 2)");
    }
    format!(
        "{{{{((sourceData, formData, fieldState) => ({expr}))({w}.sourceData, {w}.formData, {w}.fieldState)}}}}",
        w = widget_name
    )
}

/// Whether `value` is the binding generation gives a field at `path`,
/// read either raw or as JSON text.
pub(crate) fn is_default_value_binding(widget_name: &str, path: &[String], value: &Value) -> bool {
    value.as_str().is_some_and(|text| {
        [false, true]
            .into_iter()
            .any(|as_json_text| text == default_value_binding(widget_name, path, as_json_text))
    })
}
