//! Row-store: append-only worksheets of canonical records.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use intake_model::CanonicalRecord;

use crate::error::StoreError;

/// Destination for imported records, one worksheet per data type.
///
/// Appends are not batched: each call is committed on its own.
pub trait RecordStore: Send + Sync {
    /// Append one record to `worksheet`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn append(&self, worksheet: &str, record: &CanonicalRecord) -> Result<(), StoreError>;
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sheets: Mutex<BTreeMap<String, Vec<CanonicalRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the records appended to `worksheet`.
    pub fn records(&self, worksheet: &str) -> Vec<CanonicalRecord> {
        self.sheets
            .lock()
            .map(|sheets| sheets.get(worksheet).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn worksheets(&self) -> Vec<String> {
        self.sheets
            .lock()
            .map(|sheets| sheets.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl RecordStore for MemoryStore {
    fn append(&self, worksheet: &str, record: &CanonicalRecord) -> Result<(), StoreError> {
        let mut sheets = self
            .sheets
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?;
        sheets
            .entry(worksheet.to_string())
            .or_default()
            .push(record.clone());
        Ok(())
    }
}

/// Directory of `<Worksheet>.jsonl` files, one JSON object per line.
#[derive(Debug, Clone)]
pub struct JsonLinesStore {
    dir: PathBuf,
}

impl JsonLinesStore {
    /// Store rooted at `dir`; the directory is created on first append.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `worksheet`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidWorksheet`] for names that are empty or
    /// contain path separators.
    pub fn worksheet_path(&self, worksheet: &str) -> Result<PathBuf, StoreError> {
        let plain = !worksheet.is_empty()
            && worksheet
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !plain {
            return Err(StoreError::InvalidWorksheet(worksheet.to_string()));
        }
        Ok(self.dir.join(format!("{worksheet}.jsonl")))
    }
}

impl RecordStore for JsonLinesStore {
    fn append(&self, worksheet: &str, record: &CanonicalRecord) -> Result<(), StoreError> {
        let path = self.worksheet_path(worksheet)?;
        let mut line = serde_json::to_string(record).map_err(|source| StoreError::Serialize {
            worksheet: worksheet.to_string(),
            source,
        })?;
        line.push('\n');

        let io_error = |source| StoreError::Io {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_error)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_error)?;
        file.write_all(line.as_bytes()).map_err(io_error)
    }
}
