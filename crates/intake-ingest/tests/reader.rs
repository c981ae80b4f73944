//! File-level tests for the tabular readers.

use std::fs;

use intake_ingest::{FileReader, IngestError, TabularReader};
use intake_model::RawValue;
use tempfile::TempDir;

mod support;

#[test]
fn reads_csv_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lots.csv");
    fs::write(&path, "Lot ID,Qty,UOM\nA1,10,g\nA2,5,g\n").unwrap();

    let table = FileReader.read(&path).unwrap();

    assert_eq!(table.headers, vec!["Lot ID", "Qty", "UOM"]);
    assert_eq!(table.height(), 2);
    assert_eq!(table.value(1, "Qty"), Some(&RawValue::Int(5)));
}

#[test]
fn reads_xlsx_whole_numbers_as_integers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lots.xlsx");
    support::write_xlsx(
        &path,
        &[&["Lot ID", "Qty", "UOM"], &["A1", "10", "lbs"], &["A2", "2.5", "g"]],
    );

    let table = FileReader.read(&path).unwrap();

    assert_eq!(table.headers, vec!["Lot ID", "Qty", "UOM"]);
    assert_eq!(table.height(), 2);
    assert_eq!(table.value(0, "Lot ID"), Some(&RawValue::from("A1")));
    assert_eq!(table.value(0, "Qty"), Some(&RawValue::Int(10)));
    assert_eq!(table.value(1, "Qty"), Some(&RawValue::Float(2.5)));
}

#[test]
fn falls_back_to_latin1() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vendors.csv");
    // "Caf\xe9" is not valid UTF-8
    fs::write(&path, b"Vendor,Qty\nCaf\xe9,1\n").unwrap();

    let table = FileReader.read(&path).unwrap();

    assert_eq!(table.value(0, "Vendor"), Some(&RawValue::from("Café")));
}

#[test]
fn rejects_utf16() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wide.csv");
    fs::write(&path, [0xFF, 0xFE, b'a', 0]).unwrap();

    let err = FileReader.read(&path).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedEncoding { .. }));
}

#[test]
fn reads_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shipments.json");
    fs::write(&path, r#"[{"Lot":"A1","Ship Date":"2024-01-02"}]"#).unwrap();

    let table = FileReader.read(&path).unwrap();

    assert_eq!(table.headers, vec!["Lot", "Ship Date"]);
    assert_eq!(table.value(0, "Lot"), Some(&RawValue::from("A1")));
}

#[test]
fn missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = FileReader.read(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn header_only_file_has_no_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "Lot ID,Qty\n").unwrap();

    let table = FileReader.read(&path).unwrap();
    assert_eq!(table.height(), 0);
    assert_eq!(table.headers.len(), 2);
}

#[test]
fn blank_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blank.csv");
    fs::write(&path, "").unwrap();

    let err = FileReader.read(&path).unwrap_err();
    assert!(matches!(err, IngestError::Empty { .. }));
}

#[test]
fn unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lots.pdf");
    fs::write(&path, "x").unwrap();

    let err = FileReader.read(&path).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}
