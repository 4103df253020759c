//! Schema regeneration: synthesize, merge, report.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use form_schema_util::deep_equal_opt;

use crate::config::SchemaLimits;
use crate::constants::ROOT_SCHEMA_KEY;
use crate::dynamic_paths::{compute_dynamic_property_path_list, DynamicPath};
use crate::merge::{Customizations, Merger};
use crate::properties::FieldPropertyRegistry;
use crate::schema::{self, Schema};
use crate::stylesheet::FieldThemeStylesheets;
use crate::synth::{Budget, LimitExceeded, Synthesizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComputedSchemaStatus {
    LimitExceeded,
    Unchanged,
    Updated,
}

/// Inputs of one regeneration.
#[derive(Debug, Clone, Copy)]
pub struct ComputeSchemaArgs<'a> {
    pub curr_source_data: &'a Value,
    pub prev_source_data: Option<&'a Value>,
    pub prev_schema: Option<&'a Schema>,
    pub current_dynamic_property_path_list: &'a [DynamicPath],
    pub widget_name: &'a str,
    /// Theme values new fields start with, keyed by field type.
    pub field_theme_stylesheets: Option<&'a FieldThemeStylesheets>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedSchema {
    pub status: ComputedSchemaStatus,
    pub schema: Schema,
    pub dynamic_property_path_list: Vec<DynamicPath>,
}

impl ComputedSchema {
    fn unchanged(status: ComputedSchemaStatus, args: &ComputeSchemaArgs<'_>) -> Self {
        Self {
            status,
            schema: args.prev_schema.cloned().unwrap_or_default(),
            dynamic_property_path_list: args.current_dynamic_property_path_list.to_vec(),
        }
    }
}

/// Runs regenerations under fixed limits and property tables.
#[derive(Debug, Clone, Default)]
pub struct SchemaEngine {
    limits: SchemaLimits,
    registry: FieldPropertyRegistry,
}

impl SchemaEngine {
    pub fn new(limits: SchemaLimits, registry: FieldPropertyRegistry) -> Self {
        Self { limits, registry }
    }

    pub fn limits(&self) -> &SchemaLimits {
        &self.limits
    }

    pub fn registry(&self) -> &FieldPropertyRegistry {
        &self.registry
    }

    /// Regenerate the schema for new sample data.
    ///
    /// Returns the previous schema and path list untouched when the sample
    /// did not change or when the new schema would not fit the field limit.
    ///
    /// # Example
    ///
    /// ```
    /// use form_schema::{ComputeSchemaArgs, ComputedSchemaStatus, SchemaEngine};
    /// use serde_json::json;
    ///
    /// let engine = SchemaEngine::default();
    /// let data = json!({"name": "John", "age": 24});
    /// let out = engine.compute(ComputeSchemaArgs {
    ///     curr_source_data: &data,
    ///     prev_source_data: None,
    ///     prev_schema: None,
    ///     current_dynamic_property_path_list: &[],
    ///     widget_name: "Form1",
    ///     field_theme_stylesheets: None,
    /// });
    /// assert_eq!(out.status, ComputedSchemaStatus::Updated);
    /// assert_eq!(out.schema["__root_schema__"].children.len(), 2);
    /// ```
    pub fn compute(&self, args: ComputeSchemaArgs<'_>) -> ComputedSchema {
        let start = Instant::now();

        if deep_equal_opt(Some(args.curr_source_data), args.prev_source_data) {
            debug!(widget = args.widget_name, "source data unchanged");
            return ComputedSchema::unchanged(ComputedSchemaStatus::Unchanged, &args);
        }

        let mut budget = Budget::new(self.limits.max_field_count);
        let schema = match self.build(&args, &mut budget) {
            Ok(schema) => schema,
            Err(LimitExceeded { max }) => {
                warn!(
                    widget = args.widget_name,
                    max_field_count = max,
                    "field limit exceeded, keeping previous schema"
                );
                return ComputedSchema::unchanged(ComputedSchemaStatus::LimitExceeded, &args);
            }
        };

        let dynamic_property_path_list =
            compute_dynamic_property_path_list(&schema, args.current_dynamic_property_path_list);
        debug!(
            widget = args.widget_name,
            fields = budget.used(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "schema updated"
        );
        ComputedSchema {
            status: ComputedSchemaStatus::Updated,
            schema,
            dynamic_property_path_list,
        }
    }

    fn build(&self, args: &ComputeSchemaArgs<'_>, budget: &mut Budget) -> Result<Schema, LimitExceeded> {
        let fresh = Synthesizer::new(&self.limits, args.widget_name, budget)
            .with_stylesheets(args.field_theme_stylesheets)
            .synthesize(args.curr_source_data)?;
        let root = match args.prev_schema.and_then(schema::root) {
            Some(prev) => {
                let customizations = Customizations::new(
                    &self.registry,
                    args.widget_name,
                    args.field_theme_stylesheets,
                );
                Merger::new(&self.limits, customizations, budget).merge_root(prev, fresh)?
            }
            None => fresh,
        };
        let mut schema = Schema::with_capacity(1);
        schema.insert(ROOT_SCHEMA_KEY.to_string(), root);
        Ok(schema)
    }
}

/// [`SchemaEngine::compute`] with the default limits and property tables.
pub fn compute_schema(args: ComputeSchemaArgs<'_>) -> ComputedSchema {
    SchemaEngine::default().compute(args)
}
