//! Delimited text reading.

use std::path::Path;

use intake_model::{RawValue, Table};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::header::unique_headers;

/// Read a delimited text file into a [`Table`].
///
/// Bytes are decoded as UTF-8, falling back to Windows-1252 (a superset of
/// Latin-1). The delimiter is `,` unless the header line only splits on `;`.
pub fn read_csv(path: &Path) -> Result<Table> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    let text = decode(path, &bytes)?;
    let table = parse_csv_str(&text).map_err(|message| IngestError::CsvParse {
        path: path.to_path_buf(),
        message,
    })?;
    table.ok_or_else(|| IngestError::Empty {
        path: path.to_path_buf(),
    })
}

/// Parse CSV text. Returns `Ok(None)` when the text has no header row.
pub fn parse_csv_str(text: &str) -> std::result::Result<Option<Table>, String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let delimiter = detect_delimiter(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut header: Option<Vec<String>> = None;
    let mut cells: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let values: Vec<String> = record.iter().map(str::to_string).collect();
        if header.is_none() {
            header = Some(values);
        } else {
            cells.push(values);
        }
    }
    let Some(header) = header else {
        return Ok(None);
    };

    let headers = unique_headers(&header);
    let kinds: Vec<ColumnKind> = (0..headers.len())
        .map(|col| ColumnKind::infer(cells.iter().filter_map(|row| row.get(col))))
        .collect();
    debug!(
        columns = headers.len(),
        rows = cells.len(),
        delimiter = %char::from(delimiter),
        "parsed delimited text"
    );

    let mut table = Table::new(headers);
    for row in cells {
        let values = kinds
            .iter()
            .enumerate()
            .map(|(col, kind)| row.get(col).map_or(RawValue::Null, |cell| kind.convert(cell)))
            .collect();
        table.push_row(values);
    }
    Ok(Some(table))
}

fn decode(path: &Path, bytes: &[u8]) -> Result<String> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => {
            debug!(path = %path.display(), "input is not UTF-8, decoding as Windows-1252");
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            Ok(text.into_owned())
        }
    }
}

fn detect_delimiter(text: &str) -> u8 {
    let first_line = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or_default();
    if !first_line.contains(',') && first_line.contains(';') {
        b';'
    } else {
        b','
    }
}

/// Column typing: a column is numeric only when every non-blank cell is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Text,
}

impl ColumnKind {
    fn infer<'a>(cells: impl Iterator<Item = &'a String>) -> Self {
        let mut kind = Self::Int;
        let mut seen = false;
        for cell in cells {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            seen = true;
            if kind == Self::Int && cell.parse::<i64>().is_err() {
                kind = Self::Float;
            }
            if kind == Self::Float && !is_decimal(cell) {
                return Self::Text;
            }
        }
        if seen { kind } else { Self::Text }
    }

    fn convert(self, cell: &str) -> RawValue {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return RawValue::Null;
        }
        match self {
            Self::Int => trimmed.parse().map_or(RawValue::Null, RawValue::Int),
            Self::Float => trimmed.parse().map_or(RawValue::Null, RawValue::Float),
            Self::Text => RawValue::Text(trimmed.to_string()),
        }
    }
}

/// Parses as `f64` and is written with digits, so `inf` and `NaN` stay text.
fn is_decimal(cell: &str) -> bool {
    cell.parse::<f64>().is_ok() && cell.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Table {
        parse_csv_str(text).expect("parse").expect("header")
    }

    #[test]
    fn types_columns_by_content() {
        let table = parse("Lot ID,Qty,Weight\nA1,10,2.5\nA2,,3\n");
        assert_eq!(table.headers, vec!["Lot ID", "Qty", "Weight"]);
        assert_eq!(table.rows[0][0], RawValue::from("A1"));
        assert_eq!(table.rows[0][1], RawValue::Int(10));
        assert_eq!(table.rows[1][1], RawValue::Null);
        assert_eq!(table.rows[1][2], RawValue::Float(3.0));
    }

    #[test]
    fn mixed_column_stays_text() {
        let table = parse("Qty\n10\nten\n");
        assert_eq!(table.rows[0][0], RawValue::from("10"));
        assert_eq!(table.rows[1][0], RawValue::from("ten"));
    }

    #[test]
    fn semicolon_delimiter_detected() {
        let table = parse("Lot ID;Qty\nA1;4\n");
        assert_eq!(table.headers, vec!["Lot ID", "Qty"]);
        assert_eq!(table.rows[0][1], RawValue::Int(4));
    }

    #[test]
    fn skips_blank_rows_and_bom() {
        let table = parse("\u{feff}Lot ID,Qty\n\n,\nA1,1\n");
        assert_eq!(table.headers[0], "Lot ID");
        assert_eq!(table.height(), 1);
    }

    #[test]
    fn empty_text_has_no_table() {
        assert_eq!(parse_csv_str("\n\n"), Ok(None));
    }

    #[test]
    fn infinity_is_not_numeric() {
        let table = parse("Qty\ninf\n");
        assert_eq!(table.rows[0][0], RawValue::from("inf"));
    }
}
