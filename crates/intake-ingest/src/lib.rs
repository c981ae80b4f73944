//! Tabular source readers.
//!
//! Turns CSV, spreadsheet and JSON files into [`intake_model::Table`]
//! values: one header row plus typed cells. Header text is normalized and
//! made unique; blank rows are dropped.

pub mod delimited;
pub mod error;
pub mod excel;
pub mod header;
pub mod json;
pub mod reader;

pub use error::{IngestError, Result};
pub use header::{normalize_header, unique_headers};
pub use reader::{FileReader, SourceFormat, TabularReader};
