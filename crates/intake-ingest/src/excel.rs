//! Spreadsheet reading: the first worksheet of xlsx, xlsm, xls or ods files.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use intake_model::{RawValue, Table, whole_number};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::header::unique_headers;

/// Read the first worksheet of a workbook into a [`Table`].
///
/// The first non-blank row is the header row; blank rows are skipped.
pub fn read_workbook(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let spreadsheet_error = |message: String| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(e.to_string()))?;
    let sheet_names = workbook.sheet_names();
    let Some(sheet_name) = sheet_names.first().cloned() else {
        return Err(spreadsheet_error("workbook has no worksheets".to_string()));
    };
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| spreadsheet_error(e.to_string()))?;

    let mut rows = range
        .rows()
        .filter(|row| !row.iter().all(|cell| cell_value(cell).is_empty()));
    let Some(header_row) = rows.next() else {
        return Err(IngestError::Empty {
            path: path.to_path_buf(),
        });
    };
    let headers = unique_headers(header_row.iter().map(|cell| cell.to_string()));
    let width = headers.len();

    let mut table = Table::new(headers);
    for row in rows {
        let mut values: Vec<RawValue> = row.iter().take(width).map(cell_value).collect();
        values.resize(width, RawValue::Null);
        table.push_row(values);
    }
    debug!(
        path = %path.display(),
        sheet = %sheet_name,
        columns = width,
        rows = table.height(),
        "read worksheet"
    );
    Ok(table)
}

fn cell_value(cell: &Data) -> RawValue {
    match cell {
        Data::Empty | Data::Error(_) => RawValue::Null,
        Data::Int(v) => RawValue::Int(*v),
        // Workbooks store every number as a float.
        Data::Float(v) => whole_number(*v).map_or(RawValue::Float(*v), RawValue::Int),
        Data::Bool(v) => RawValue::Bool(*v),
        Data::String(s) if s.trim().is_empty() => RawValue::Null,
        Data::String(s) => RawValue::Text(s.trim().to_string()),
        other => RawValue::Text(other.to_string()),
    }
}
