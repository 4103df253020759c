//! Reserved identifiers and fixed defaults.

/// Key of the root item in a widget schema (`schema.__root_schema__`).
pub const ROOT_SCHEMA_KEY: &str = "__root_schema__";

/// Identifier of the single item-template child of an array field.
pub const ARRAY_ITEM_KEY: &str = "__array_item__";

/// Source key that may keep its name as an accessor (document ids).
pub const MONGO_ID_KEY: &str = "_id";

/// Identifiers no sample-derived field may take.
pub const RESERVED_IDENTIFIERS: [&str; 2] = [ARRAY_ITEM_KEY, ROOT_SCHEMA_KEY];

/// Property path prefix of everything the schema engine owns.
pub const SCHEMA_PROPERTY: &str = "schema";

/// Where the host stores evaluated property values on a widget.
pub const EVALUATION_PATH: &str = "__evaluation__";

pub const DEFAULT_MAX_NESTING_LEVEL: usize = 5;
pub const DEFAULT_MAX_FIELD_COUNT: usize = 50;

/// Whether `accessor` is a reserved name for a field whose source key is
/// `original_identifier`.
pub fn is_reserved_accessor(accessor: &str, original_identifier: &str) -> bool {
    RESERVED_IDENTIFIERS.contains(&accessor)
        || (accessor == MONGO_ID_KEY && original_identifier != MONGO_ID_KEY)
}
