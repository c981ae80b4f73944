use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::RawValue;

/// Decoded tabular source: ordered headers and positional rows.
///
/// Every row is aligned to `headers`; short rows read as [`RawValue::Null`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<RawValue>) {
        self.rows.push(row);
    }

    /// Number of data rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn value(&self, row: usize, header: &str) -> Option<&RawValue> {
        let column = self.column_index(header)?;
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// A single row keyed by header, for previews.
    pub fn row_map(&self, row: usize) -> BTreeMap<String, RawValue> {
        let Some(cells) = self.rows.get(row) else {
            return BTreeMap::new();
        };
        self.headers
            .iter()
            .enumerate()
            .map(|(idx, header)| (header.clone(), cells.get(idx).cloned().unwrap_or_default()))
            .collect()
    }
}
