//! Error types for the import pipeline and row-store.

use std::path::PathBuf;

use intake_ingest::IngestError;
use thiserror::Error;

/// Failures that end an import or analysis.
///
/// The pipeline converts these into structured failure results; they never
/// reach a caller of `import_file` or `analyze` as errors.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The source could not be read or decoded.
    #[error("Error reading file: {0}")]
    Ingest(#[from] IngestError),

    /// The source has a header row but no data rows.
    #[error("File contains no data")]
    NoData,

    /// A mapping override names a field the schema does not declare.
    #[error("Unknown target field '{target_field}' for header '{source_header}' in {data_type} schema")]
    UnknownTargetField {
        source_header: String,
        target_field: String,
        data_type: String,
    },

    /// The override payload is not a flat object of strings.
    #[error("Malformed mapping overrides: {0}")]
    MalformedOverrides(String),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, ImportError>;

/// Row-store write failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to create or append to a worksheet file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a record.
    #[error("failed to serialize record for {worksheet}: {source}")]
    Serialize {
        worksheet: String,
        #[source]
        source: serde_json::Error,
    },

    /// A writer panicked while holding the store.
    #[error("record store lock poisoned")]
    LockPoisoned,

    /// Worksheet names are used as file names and must be plain.
    #[error("invalid worksheet name '{0}'")]
    InvalidWorksheet(String),
}
