//! Mapped table to canonical records.

use tracing::debug;

use intake_model::{CanonicalRecord, MappingResult, Table};

use crate::coerce::coerce;
use crate::defaults::{DefaultRuleRegistry, default_registry};

/// Turns source rows into canonical records for one data type.
#[derive(Debug, Clone, Copy)]
pub struct DataTransformer<'a> {
    registry: &'a DefaultRuleRegistry,
}

impl Default for DataTransformer<'static> {
    fn default() -> Self {
        Self::new(default_registry())
    }
}

impl<'a> DataTransformer<'a> {
    pub fn new(registry: &'a DefaultRuleRegistry) -> Self {
        Self { registry }
    }

    /// Transform every row, then apply the data type's default rule.
    pub fn transform(
        &self,
        table: &Table,
        mapping: &MappingResult,
        data_type: &str,
    ) -> Vec<CanonicalRecord> {
        let mut records = map_rows(table, mapping);
        match self.registry.get(data_type) {
            Some(rule) => {
                for (index, record) in records.iter_mut().enumerate() {
                    rule.apply(index, record);
                }
                debug!(data_type, rule = rule.description(), records = records.len(), "applied defaults");
            }
            None => debug!(data_type, "no default rule registered"),
        }
        records
    }
}

/// Build one record per row from the mapped columns only.
///
/// Empty cells never produce a key. When several headers map to one field
/// the last non-empty value in header order wins.
pub fn map_rows(table: &Table, mapping: &MappingResult) -> Vec<CanonicalRecord> {
    let columns: Vec<(usize, &str)> = mapping
        .mapping
        .iter()
        .filter_map(|entry| {
            table
                .column_index(&entry.source_header)
                .map(|index| (index, entry.target_field.as_str()))
        })
        .collect();

    table
        .rows
        .iter()
        .map(|row| {
            let mut record = CanonicalRecord::new();
            for &(index, field) in &columns {
                if let Some(value) = row.get(index).and_then(coerce) {
                    record.insert(field.to_string(), value);
                }
            }
            record
        })
        .collect()
}
