//! JSON reading: an array of row objects, or an object of columns.

use std::path::Path;

use intake_model::{RawValue, Table};
use serde_json::{Map, Value};

use crate::error::{IngestError, Result};
use crate::header::unique_headers;

/// Read a JSON document into a [`Table`].
pub fn read_json(path: &Path) -> Result<Table> {
    let content = std::fs::read_to_string(path).map_err(|e| IngestError::from_io(path, e))?;
    let table = parse_json_str(&content).map_err(|message| IngestError::JsonParse {
        path: path.to_path_buf(),
        message,
    })?;
    table.ok_or_else(|| IngestError::Empty {
        path: path.to_path_buf(),
    })
}

/// Parse JSON text. Returns `Ok(None)` when the document names no columns.
///
/// Accepted shapes:
/// - `[{"Lot ID": "A1", "Qty": 4}, ...]`: headers in first-seen order
/// - `{"Lot ID": ["A1", ...], "Qty": [4, ...]}`: column arrays, or column
///   objects keyed by row label
pub fn parse_json_str(content: &str) -> std::result::Result<Option<Table>, String> {
    let document: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    match document {
        Value::Array(rows) => from_records(rows),
        Value::Object(columns) => Ok(from_columns(columns)),
        _ => Err("expected an array of objects or an object of columns".to_string()),
    }
}

fn from_records(rows: Vec<Value>) -> std::result::Result<Option<Table>, String> {
    let mut keys: Vec<String> = Vec::new();
    let mut objects: Vec<Map<String, Value>> = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        let Value::Object(object) = row else {
            return Err(format!("row {index} is not an object"));
        };
        for key in object.keys() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
        objects.push(object);
    }
    if keys.is_empty() {
        return Ok(None);
    }

    let mut table = Table::new(unique_headers(&keys));
    for object in objects {
        let values = keys
            .iter()
            .map(|key| object.get(key).map_or(RawValue::Null, json_value))
            .collect();
        table.push_row(values);
    }
    Ok(Some(table))
}

fn from_columns(columns: Map<String, Value>) -> Option<Table> {
    if columns.is_empty() {
        return None;
    }
    let keys: Vec<String> = columns.keys().cloned().collect();
    let cells: Vec<Vec<RawValue>> = columns
        .into_iter()
        .map(|(_, column)| match column {
            Value::Array(values) => values.iter().map(json_value).collect(),
            Value::Object(values) => values.values().map(json_value).collect(),
            scalar => vec![json_value(&scalar)],
        })
        .collect();
    let height = cells.iter().map(Vec::len).max().unwrap_or(0);

    let mut table = Table::new(unique_headers(&keys));
    for row in 0..height {
        table.push_row(
            cells
                .iter()
                .map(|column| column.get(row).cloned().unwrap_or_default())
                .collect(),
        );
    }
    Some(table)
}

fn json_value(value: &Value) -> RawValue {
    match value {
        Value::Null => RawValue::Null,
        Value::Bool(b) => RawValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(v) => RawValue::Int(v),
            None => n.as_f64().map_or(RawValue::Null, RawValue::Float),
        },
        Value::String(s) if s.trim().is_empty() => RawValue::Null,
        Value::String(s) => RawValue::Text(s.trim().to_string()),
        nested => RawValue::Text(nested.to_string()),
    }
}
