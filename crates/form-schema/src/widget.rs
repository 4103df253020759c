//! The "Generate Form" action over a widget's persisted configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use form_schema_path::{parse_property_path, set};

use crate::compute::{ComputeSchemaArgs, ComputedSchemaStatus, SchemaEngine};
use crate::constants::EVALUATION_PATH;
use crate::dynamic_paths::DynamicPath;
use crate::error::SchemaError;
use crate::schema::{self, Schema};
use crate::stylesheet::FieldThemeStylesheets;

/// The form widget properties the generator reads. Everything else is kept
/// in `rest` so a widget survives a round trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetProperties {
    #[serde(default)]
    pub widget_name: String,
    #[serde(default)]
    pub auto_generate_form: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(default)]
    pub dynamic_property_path_list: Vec<DynamicPath>,
    #[serde(default)]
    pub field_limit_exceeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_stylesheet: Option<FieldThemeStylesheets>,
    #[serde(
        rename = "__evaluation__",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub evaluation: Option<Evaluation>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Property values as last evaluated by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    #[serde(default)]
    pub evaluated_values: Map<String, Value>,
}

impl WidgetProperties {
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        Ok(serde_json::from_value(value)?)
    }

    /// The evaluated `sourceData`, `{}` when it has not been evaluated.
    pub fn evaluated_source_data(&self) -> Value {
        self.evaluation
            .as_ref()
            .and_then(|e| e.evaluated_values.get("sourceData"))
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// The sample the current schema was generated from.
    pub fn prev_source_data(&self) -> Option<&Value> {
        self.schema
            .as_ref()
            .and_then(schema::root)
            .map(|root| &root.source_data)
    }

    /// The button is disabled while the form regenerates on its own.
    pub fn generate_form_disabled(&self) -> bool {
        self.auto_generate_form
    }
}

/// One property write, addressed by property path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUpdate {
    pub property_path: String,
    pub property_value: Value,
}

impl PropertyUpdate {
    pub fn new(property_path: impl Into<String>, property_value: impl Into<Value>) -> Self {
        Self {
            property_path: property_path.into(),
            property_value: property_value.into(),
        }
    }
}

impl SchemaEngine {
    /// The property writes a "Generate Form" click on `widget` results in.
    pub fn on_generate_form_click(
        &self,
        widget: &WidgetProperties,
    ) -> Result<Vec<PropertyUpdate>, SchemaError> {
        if widget.generate_form_disabled() {
            return Ok(Vec::new());
        }

        let curr_source_data = widget.evaluated_source_data();
        let computed = self.compute(ComputeSchemaArgs {
            curr_source_data: &curr_source_data,
            prev_source_data: widget.prev_source_data(),
            prev_schema: widget.schema.as_ref(),
            current_dynamic_property_path_list: &widget.dynamic_property_path_list,
            widget_name: &widget.widget_name,
            field_theme_stylesheets: widget.child_stylesheet.as_ref(),
        });
        debug!(widget = %widget.widget_name, status = ?computed.status, "generate form");

        let updates = match computed.status {
            ComputedSchemaStatus::LimitExceeded => {
                vec![PropertyUpdate::new("fieldLimitExceeded", true)]
            }
            ComputedSchemaStatus::Unchanged if widget.field_limit_exceeded => {
                vec![PropertyUpdate::new("fieldLimitExceeded", false)]
            }
            ComputedSchemaStatus::Unchanged => Vec::new(),
            ComputedSchemaStatus::Updated => vec![
                PropertyUpdate::new(
                    "dynamicPropertyPathList",
                    serde_json::to_value(&computed.dynamic_property_path_list)?,
                ),
                PropertyUpdate::new("schema", serde_json::to_value(&computed.schema)?),
                PropertyUpdate::new("fieldLimitExceeded", false),
            ],
        };
        Ok(updates)
    }
}

/// [`SchemaEngine::on_generate_form_click`] with the default engine.
pub fn on_generate_form_click(
    widget: &WidgetProperties,
) -> Result<Vec<PropertyUpdate>, SchemaError> {
    SchemaEngine::default().on_generate_form_click(widget)
}

/// Write `updates` into a widget configuration in order.
pub fn apply_updates(widget: &mut Value, updates: &[PropertyUpdate]) -> Result<(), SchemaError> {
    for update in updates {
        let path = parse_property_path(&update.property_path)
            .map_err(|e| SchemaError::path(&update.property_path, e))?;
        if path.first().is_some_and(|step| step == EVALUATION_PATH) {
            return Err(SchemaError::ReadOnlyProperty(update.property_path.clone()));
        }
        set(widget, &path, update.property_value.clone())
            .map_err(|e| SchemaError::path(&update.property_path, e))?;
    }
    Ok(())
}
