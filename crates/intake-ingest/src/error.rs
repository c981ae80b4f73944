//! Error types for tabular ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decoding a source file into a table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension names no supported format.
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// File uses an encoding the readers cannot decode.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to open or read a spreadsheet.
    #[error("failed to read spreadsheet {path}: {message}")]
    Spreadsheet { path: PathBuf, message: String },

    /// Failed to parse JSON or the document has an unsupported shape.
    #[error("failed to parse JSON {path}: {message}")]
    JsonParse { path: PathBuf, message: String },

    /// The source has no header row.
    #[error("file is empty: {path}")]
    Empty { path: PathBuf },
}

impl IngestError {
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
