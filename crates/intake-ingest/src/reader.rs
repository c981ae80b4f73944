//! Format dispatch.

use std::fmt;
use std::path::Path;

use intake_model::Table;
use tracing::{debug, instrument};

use crate::error::{IngestError, Result};
use crate::{delimited, excel, json};

/// Supported source formats, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
    Json,
}

impl SourceFormat {
    /// Format for a file extension, ignoring case.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Some(Self::Spreadsheet),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Format of a path.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnsupportedFormat`] for unknown or missing
    /// extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_extension(extension).ok_or_else(|| IngestError::UnsupportedFormat {
            extension: if extension.is_empty() {
                "(none)".to_string()
            } else {
                extension.to_string()
            },
        })
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "csv",
            Self::Spreadsheet => "spreadsheet",
            Self::Json => "json",
        })
    }
}

/// Decodes a file into a header/row table.
pub trait TabularReader: Send + Sync {
    /// Read `path` into a table.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be found, read or decoded.
    fn read(&self, path: &Path) -> Result<Table>;
}

/// Reader that picks a decoder from the file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileReader;

impl TabularReader for FileReader {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn read(&self, path: &Path) -> Result<Table> {
        let format = SourceFormat::from_path(path)?;
        debug!(%format, "reading source");
        match format {
            SourceFormat::Csv => delimited::read_csv(path),
            SourceFormat::Spreadsheet => excel::read_workbook(path),
            SourceFormat::Json => json::read_json(path),
        }
    }
}
