//! Schema table loading.
//!
//! Parses the embedded `Datasets.csv` and per-type field tables into
//! [`SchemaDefinition`] values.

use std::io::Cursor;

use serde::Deserialize;

use intake_model::{FieldCore, SchemaDefinition, SchemaField};

use crate::embedded;
use crate::error::{Result, StandardsError};

/// Dataset-level metadata for one data type.
#[derive(Debug, Clone)]
pub struct DatasetEntry {
    pub data_type: String,
    pub worksheet: String,
    pub label: String,
    pub is_default: bool,
}

/// Row from Datasets.csv.
#[derive(Debug, Deserialize)]
struct DatasetCsvRow {
    #[serde(rename = "Data Type")]
    data_type: String,
    #[serde(rename = "Worksheet")]
    worksheet: String,
    #[serde(rename = "Label")]
    label: String,
    #[serde(rename = "Default")]
    default: String,
}

/// Row from a field table.
#[derive(Debug, Deserialize)]
struct FieldCsvRow {
    #[serde(rename = "Order")]
    order: String,
    #[serde(rename = "Field")]
    field: String,
    #[serde(rename = "Core")]
    core: String,
    #[serde(rename = "Aliases")]
    aliases: String,
}

/// Load every embedded schema, returning them with the default data type.
pub fn load_embedded() -> Result<(Vec<SchemaDefinition>, Option<String>)> {
    let datasets = load_datasets_from_str(embedded::DATASETS)?;
    let mut schemas = Vec::with_capacity(datasets.len());
    let mut default_type = None;
    for entry in datasets {
        let table =
            embedded::field_table(&entry.data_type).ok_or_else(|| StandardsError::MissingTable {
                data_type: entry.data_type.clone(),
            })?;
        let fields = load_fields_from_str(&entry.data_type, table)?;
        if entry.is_default {
            default_type = Some(entry.data_type.clone());
        }
        schemas.push(SchemaDefinition::new(
            entry.data_type,
            entry.label,
            entry.worksheet,
            fields,
        ));
    }
    Ok((schemas, default_type))
}

/// Load Datasets.csv from string content.
pub fn load_datasets_from_str(content: &str) -> Result<Vec<DatasetEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(Cursor::new(content.as_bytes()));

    let mut entries = Vec::new();
    for result in reader.deserialize::<DatasetCsvRow>() {
        let row = result.map_err(|e| StandardsError::CsvParse {
            file: "Datasets.csv".to_string(),
            message: e.to_string(),
        })?;
        let data_type = row.data_type.trim().to_lowercase();
        if data_type.is_empty() {
            continue;
        }
        let worksheet = non_empty(&row.worksheet).unwrap_or_else(|| capitalize(&data_type));
        entries.push(DatasetEntry {
            label: non_empty(&row.label).unwrap_or_else(|| data_type.clone()),
            is_default: parse_flag(&row.default),
            data_type,
            worksheet,
        });
    }
    Ok(entries)
}

/// Load a field table from string content, in table order.
pub fn load_fields_from_str(data_type: &str, content: &str) -> Result<Vec<SchemaField>> {
    let file = format!("{data_type}.csv");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(Cursor::new(content.as_bytes()));

    let mut rows: Vec<(u32, SchemaField)> = Vec::new();
    for result in reader.deserialize::<FieldCsvRow>() {
        let row = result.map_err(|e| StandardsError::CsvParse {
            file: file.clone(),
            message: e.to_string(),
        })?;
        let order = row
            .order
            .trim()
            .parse::<u32>()
            .map_err(|_| StandardsError::InvalidValue {
                field: "Order",
                value: row.order.clone(),
                file: file.clone(),
            })?;
        let core = row
            .core
            .parse::<FieldCore>()
            .map_err(|_| StandardsError::InvalidValue {
                field: "Core",
                value: row.core.clone(),
                file: file.clone(),
            })?;
        let aliases = row
            .aliases
            .split(';')
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
            .map(str::to_string)
            .collect();
        rows.push((order, SchemaField::new(row.field.trim(), core, aliases)));
    }
    rows.sort_by_key(|(order, _)| *order);
    Ok(rows.into_iter().map(|(_, field)| field).collect())
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_uppercase().as_str(), "Y" | "YES" | "TRUE")
}

/// Return Some(value) if non-empty, None otherwise.
fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_datasets() {
        let entries = load_datasets_from_str(embedded::DATASETS).expect("load datasets");
        let names: Vec<&str> = entries.iter().map(|e| e.data_type.as_str()).collect();
        assert_eq!(names, vec!["lots", "shipments"]);
        assert!(entries[0].is_default);
        assert_eq!(entries[1].worksheet, "Shipments");
    }

    #[test]
    fn field_rows_follow_order_column() {
        let content = "Order,Field,Core,Aliases\n2,b,Opt,\n1,a,Req,x;y\n";
        let fields = load_fields_from_str("test", content).expect("load fields");
        assert_eq!(fields[0].name, "a");
        assert_eq!(fields[0].aliases, vec!["x", "y"]);
        assert!(fields[1].aliases.is_empty());
    }

    #[test]
    fn rejects_unknown_core() {
        let content = "Order,Field,Core,Aliases\n1,a,Perm,\n";
        let err = load_fields_from_str("test", content).unwrap_err();
        assert!(matches!(err, StandardsError::InvalidValue { field: "Core", .. }));
    }

    #[test]
    fn blank_worksheet_defaults_to_capitalized_type() {
        let content = "Data Type,Worksheet,Label,Default\nreturns,,,N\n";
        let entries = load_datasets_from_str(content).expect("load datasets");
        assert_eq!(entries[0].worksheet, "Returns");
        assert_eq!(entries[0].label, "returns");
    }
}
