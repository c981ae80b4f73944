//! Error types for schema table loading and registry construction.

use thiserror::Error;

/// Errors raised while building the schema registry.
///
/// Lookups never fail; every error here surfaces at construction time.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Failed to parse an embedded CSV table.
    #[error("Failed to parse {file}: {message}")]
    CsvParse { file: String, message: String },

    /// Invalid value in a schema table column.
    #[error("Invalid {field} value '{value}' in {file}")]
    InvalidValue {
        field: &'static str,
        value: String,
        file: String,
    },

    /// A data type is listed in Datasets.csv but has no field table.
    #[error("No field table embedded for data type '{data_type}'")]
    MissingTable { data_type: String },

    /// A schema has no fields at all.
    #[error("Schema '{data_type}' declares no fields")]
    EmptySchema { data_type: String },

    /// Field name is blank.
    #[error("Schema '{data_type}' declares a field with an empty name")]
    EmptyFieldName { data_type: String },

    /// The same field is declared twice within one schema.
    #[error("Field '{field}' is declared more than once in schema '{data_type}'")]
    DuplicateField { data_type: String, field: String },

    /// Aliases are compared against lowercased headers and must be lowercase.
    #[error("Alias '{alias}' of '{data_type}.{field}' must be lowercase and non-empty")]
    InvalidAlias {
        data_type: String,
        field: String,
        alias: String,
    },

    /// The same data type is registered twice.
    #[error("Schema '{data_type}' is registered more than once")]
    DuplicateSchema { data_type: String },

    /// The fallback schema is not among the registered schemas.
    #[error("Default schema '{data_type}' is not registered")]
    MissingDefault { data_type: String },
}

/// Result type for schema registry operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
