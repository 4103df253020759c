use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use form_schema::validation::validate_source_data;
use form_schema::{
    apply_updates, ComputeSchemaArgs, FieldPropertyRegistry, FieldType, PropertyUpdate,
    SchemaEngine, SchemaLimits, WidgetProperties,
};

/// Generate and inspect JSON form field schemas
#[derive(Parser, Debug)]
#[command(name = "form-schema", version, about, long_about = None)]
struct Cli {
    /// TOML file with `max_nesting_level` and `max_field_count`
    #[arg(short, long, global = true, env = "FORM_SCHEMA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Regenerate a widget's schema from sample data
    Generate {
        /// Sample data file, `-` for stdin
        #[arg(short, long)]
        data: PathBuf,

        /// Widget configuration holding the previous schema
        #[arg(short, long)]
        widget: Option<PathBuf>,

        /// Widget name used in default value bindings
        #[arg(long)]
        widget_name: Option<String>,

        /// Print the updated widget configuration instead of the result
        #[arg(long)]
        apply: bool,
    },
    /// List the properties a field type can carry
    Properties {
        /// Field type display name, e.g. "Number Input"
        #[arg(long)]
        field_type: String,
    },
    /// Validate a property value against a widget configuration
    Validate {
        #[arg(short, long)]
        widget: PathBuf,

        /// Property path, e.g. schema.__root_schema__.children.age.accessor
        #[arg(short, long)]
        path: String,

        /// New value as JSON
        #[arg(long)]
        value: String,
    },
    /// Set a property and run its follow-up writes
    Update {
        #[arg(short, long)]
        widget: PathBuf,

        /// Property path, e.g. schema.__root_schema__.children.age.fieldType
        #[arg(short, long)]
        path: String,

        /// New value as JSON
        #[arg(long)]
        value: String,

        /// Print the updated widget configuration instead of the writes
        #[arg(long)]
        apply: bool,
    },
}

const DEFAULT_WIDGET_NAME: &str = "JSONForm1";

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let limits = match &cli.config {
        Some(path) => SchemaLimits::load(path)
            .with_context(|| format!("loading limits from {}", path.display()))?,
        None => SchemaLimits::default(),
    };
    let engine = SchemaEngine::new(limits, FieldPropertyRegistry::new());

    let output = match cli.command {
        Command::Generate {
            data,
            widget,
            widget_name,
            apply,
        } => generate(&engine, &data, widget.as_deref(), widget_name, apply)?,
        Command::Properties { field_type } => {
            let field_type: FieldType = field_type.parse()?;
            serde_json::to_value(engine.registry().properties_for(field_type))?
        }
        Command::Validate {
            widget,
            path,
            value,
        } => {
            let widget = read_json(&widget)?;
            let value: Value = serde_json::from_str(&value).context("parsing --value")?;
            serde_json::to_value(engine.registry().validate(&widget, &path, &value)?)?
        }
        Command::Update {
            widget,
            path,
            value,
            apply,
        } => update(&engine, &widget, &path, &value, apply)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn generate(
    engine: &SchemaEngine,
    data: &Path,
    widget: Option<&Path>,
    widget_name: Option<String>,
    apply: bool,
) -> anyhow::Result<Value> {
    let checked = validate_source_data(&read_json(data)?);
    if !checked.is_valid {
        bail!("invalid source data: {}", checked.messages.join("; "));
    }

    let mut widget_json = match widget {
        Some(path) => read_json(path)?,
        None => json!({}),
    };
    if !widget_json.is_object() {
        bail!("widget configuration must be a JSON object");
    }
    if let Some(name) = widget_name {
        widget_json["widgetName"] = Value::from(name);
    } else if widget_json.get("widgetName").is_none() {
        widget_json["widgetName"] = Value::from(DEFAULT_WIDGET_NAME);
    }
    let evaluated_path = ["__evaluation__", "evaluatedValues", "sourceData"].map(String::from);
    form_schema_path::set(&mut widget_json, &evaluated_path, checked.parsed)
        .context("storing evaluated source data")?;
    let props = WidgetProperties::from_value(widget_json.clone())?;

    if apply {
        let updates = engine.on_generate_form_click(&props)?;
        info!(updates = updates.len(), "applying property updates");
        apply_updates(&mut widget_json, &updates)?;
        return Ok(widget_json);
    }

    let curr_source_data = props.evaluated_source_data();
    let computed = engine.compute(ComputeSchemaArgs {
        curr_source_data: &curr_source_data,
        prev_source_data: props.prev_source_data(),
        prev_schema: props.schema.as_ref(),
        current_dynamic_property_path_list: &props.dynamic_property_path_list,
        widget_name: &props.widget_name,
        field_theme_stylesheets: props.child_stylesheet.as_ref(),
    });
    Ok(serde_json::to_value(computed)?)
}

fn update(
    engine: &SchemaEngine,
    widget: &Path,
    path: &str,
    value: &str,
    apply: bool,
) -> anyhow::Result<Value> {
    let mut widget_json = read_json(widget)?;
    let value: Value = serde_json::from_str(value).context("parsing --value")?;
    let props = WidgetProperties::from_value(widget_json.clone())?;

    let mut updates = vec![PropertyUpdate::new(path, value.clone())];
    updates.extend(engine.on_property_update(&props, path, &value)?);
    info!(updates = updates.len(), path, "property updated");
    if apply {
        apply_updates(&mut widget_json, &updates)?;
        return Ok(widget_json);
    }
    Ok(serde_json::to_value(updates)?)
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}
