use form_schema_path::PathError;
use thiserror::Error;

/// Programmer and input-contract errors. Running over the field limit is
/// not one of these; it is reported through the computed status.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("invalid property path `{path}`: {source}")]
    PropertyPath {
        path: String,
        #[source]
        source: PathError,
    },

    #[error("no schema item at `{0}`")]
    MissingSchemaItem(String),

    #[error("`{0}` is computed by the host and cannot be written")]
    ReadOnlyProperty(String),

    #[error("invalid limits: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed widget configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    pub(crate) fn path(path: &str, source: PathError) -> Self {
        SchemaError::PropertyPath {
            path: path.to_string(),
            source,
        }
    }
}
