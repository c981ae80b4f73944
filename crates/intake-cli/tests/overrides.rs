//! Tests for command-line mapping overrides.

use std::fs;

use intake_cli::overrides::{collect_overrides, parse_map_pair};
use intake_core::parse_overrides;

#[test]
fn map_pair_splits_on_last_equals() {
    assert_eq!(
        parse_map_pair("Batch=No=id").unwrap(),
        ("Batch=No".to_string(), "id".to_string())
    );
    assert_eq!(
        parse_map_pair(" Qty = quantity ").unwrap(),
        ("Qty".to_string(), "quantity".to_string())
    );
}

#[test]
fn map_pair_rejects_missing_parts() {
    assert!(parse_map_pair("quantity").is_err());
    assert!(parse_map_pair("=quantity").is_err());
    assert!(parse_map_pair("Qty=").is_err());
}

#[test]
fn command_line_pairs_override_map_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mapping.json");
    fs::write(&path, r#"{"Qty": "originalQuantity", "Batch": "id"}"#).unwrap();

    let pairs = vec![("Qty".to_string(), "quantity".to_string())];
    let payload = collect_overrides(&pairs, Some(&path)).unwrap().unwrap();
    let overrides = parse_overrides(&payload).unwrap();

    assert_eq!(overrides.len(), 2);
    assert_eq!(overrides["Qty"], "quantity");
    assert_eq!(overrides["Batch"], "id");
}

#[test]
fn no_sources_yields_no_payload() {
    assert!(collect_overrides(&[], None).unwrap().is_none());
}

#[test]
fn pairs_alone_become_a_payload() {
    let pairs = vec![("Ref".to_string(), "id".to_string())];
    let payload = collect_overrides(&pairs, None).unwrap().unwrap();
    assert_eq!(payload, r#"{"Ref":"id"}"#);
}

#[test]
fn malformed_map_file_is_passed_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mapping.json");
    fs::write(&path, r#"{"Qty": 3}"#).unwrap();

    let pairs = vec![("Ref".to_string(), "id".to_string())];
    let payload = collect_overrides(&pairs, Some(&path)).unwrap().unwrap();
    assert!(parse_overrides(&payload).is_err());

    fs::write(&path, "not json").unwrap();
    let payload = collect_overrides(&[], Some(&path)).unwrap();
    assert_eq!(payload.as_deref(), Some("not json"));
}

#[test]
fn missing_map_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let error = collect_overrides(&[], Some(&dir.path().join("absent.json"))).unwrap_err();
    assert!(format!("{error:#}").contains("read mapping file"));
}
