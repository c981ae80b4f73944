//! Tests for intake-model result types.

use intake_model::{
    Analysis, AnalysisResult, CanonicalRecord, FieldValue, ImportResult, MappingResult,
    ValidationResult,
};

#[test]
fn failure_result_has_structured_shape() {
    let result = ImportResult::failure("Error reading file: missing.csv");
    let json = serde_json::to_value(&result).expect("serialize failure");

    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Error reading file: missing.csv");
    assert_eq!(json["data"], serde_json::json!([]));
    assert_eq!(json["validation"]["valid"], false);
    assert_eq!(
        json["validation"]["errors"],
        serde_json::json!(["Error reading file: missing.csv"])
    );
    assert_eq!(json["validation"]["warnings"], serde_json::json!([]));
    assert!(result.is_failure());
}

#[test]
fn successful_result_omits_error_key() {
    let mut record = CanonicalRecord::new();
    record.insert("id".to_string(), FieldValue::from("A1"));
    record.insert("quantity".to_string(), FieldValue::Int(10));
    let result = ImportResult {
        success: true,
        error: None,
        data: vec![record.clone()],
        mapping: MappingResult {
            success: true,
            ..MappingResult::default()
        },
        validation: ValidationResult::new(vec![], vec![], 1),
        preview: vec![record],
    };

    let json = serde_json::to_value(&result).expect("serialize result");
    assert!(json.get("error").is_none());
    assert_eq!(json["data"][0]["quantity"], 10);
    assert_eq!(json["data"][0]["id"], "A1");
    assert_eq!(json["validation"]["totalRecords"], 1);
}

#[test]
fn analysis_failure_only_reports_error() {
    let json = serde_json::to_value(AnalysisResult::failure("File contains no data"))
        .expect("serialize analysis");
    assert_eq!(
        json,
        serde_json::json!({"success": false, "error": "File contains no data"})
    );
}

#[test]
fn analysis_fields_are_flattened() {
    let result = AnalysisResult::ok(Analysis {
        source_headers: vec!["Qty".to_string()],
        row_count: 4,
        mapping_suggestions: MappingResult::default(),
        preview_rows: vec![],
    });
    let json = serde_json::to_value(&result).expect("serialize analysis");
    assert_eq!(json["sourceHeaders"], serde_json::json!(["Qty"]));
    assert_eq!(json["rowCount"], 4);
    assert!(json["mappingSuggestions"].is_object());
}

#[test]
fn validation_validity_tracks_errors_only() {
    let result = ValidationResult::new(vec![], vec!["Row 1: Duplicate ID 'X' found".into()], 2);
    assert!(result.valid);
    let result = ValidationResult::new(vec!["Row 1: Invalid quantity value".into()], vec![], 1);
    assert!(!result.valid);
}
