use intake_model::{CanonicalRecord, FieldValue, HeaderMapping, MappingResult, RawValue, Table};
use intake_transform::{DataTransformer, DefaultRule, DefaultRuleRegistry, map_rows};
use proptest::prelude::*;

fn lot_mapping() -> MappingResult {
    let entry = |source: &str, target: &str| HeaderMapping {
        source_header: source.to_string(),
        target_field: target.to_string(),
        confidence_score: 100,
        matched_alias: target.to_lowercase(),
        is_required: true,
    };
    MappingResult {
        mapping: vec![
            entry("Lot ID", "id"),
            entry("Qty", "quantity"),
            entry("UOM", "unit"),
        ],
        success: true,
        ..MappingResult::default()
    }
}

fn lot_table(rows: Vec<Vec<RawValue>>) -> Table {
    let mut table = Table::new(vec!["Lot ID".into(), "Qty".into(), "UOM".into()]);
    for row in rows {
        table.push_row(row);
    }
    table
}

#[test]
fn lot_record_gets_defaults() {
    let table = lot_table(vec![vec![
        RawValue::from("A1"),
        RawValue::Int(10),
        RawValue::from("lbs"),
    ]]);

    let records = DataTransformer::default().transform(&table, &lot_mapping(), "lots");

    let expected: CanonicalRecord = [
        ("id", FieldValue::from("A1")),
        ("quantity", FieldValue::Int(10)),
        ("unit", FieldValue::from("lbs")),
        ("status", FieldValue::from("active")),
        ("type", FieldValue::from("intake")),
        ("originalQuantity", FieldValue::Int(10)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    assert_eq!(records, vec![expected]);
}

#[test]
fn synthesized_ids_use_output_position() {
    let table = lot_table(vec![
        vec![RawValue::from("A1"), RawValue::Int(1), RawValue::from("g")],
        vec![RawValue::Null, RawValue::Int(2), RawValue::from("g")],
        vec![RawValue::from(" "), RawValue::Float(2.5), RawValue::from("g")],
    ]);

    let records = DataTransformer::default().transform(&table, &lot_mapping(), "lots");

    assert_eq!(records[0]["id"], FieldValue::from("A1"));
    assert_eq!(records[1]["id"], FieldValue::from("LOT-IMPORT-1"));
    assert_eq!(records[2]["id"], FieldValue::from("LOT-IMPORT-2"));
    assert_eq!(records[2]["originalQuantity"], FieldValue::Float(2.5));
}

struct ShipmentCarrier;

impl DefaultRule for ShipmentCarrier {
    fn data_type(&self) -> &'static str {
        "shipments"
    }

    fn apply(&self, _index: usize, record: &mut CanonicalRecord) {
        record
            .entry("carrier".to_string())
            .or_insert_with(|| FieldValue::from("UPS"));
    }
}

#[test]
fn custom_rules_can_be_registered() {
    let mut registry = DefaultRuleRegistry::new();
    registry.register(Box::new(ShipmentCarrier));
    let mut table = Table::new(vec!["Lot".into()]);
    table.push_row(vec![RawValue::from("A1")]);
    let mapping = MappingResult {
        mapping: vec![HeaderMapping::user_defined("Lot", "lotId", true)],
        ..MappingResult::default()
    };

    let records = DataTransformer::new(&registry).transform(&table, &mapping, "shipments");

    assert_eq!(records[0]["carrier"], FieldValue::from("UPS"));
    assert_eq!(records[0]["lotId"], FieldValue::from("A1"));
}

fn raw_cell() -> impl Strategy<Value = RawValue> {
    prop_oneof![
        Just(RawValue::Null),
        Just(RawValue::from("")),
        Just(RawValue::from("  ")),
        any::<i64>().prop_map(RawValue::Int),
        "[a-z]{1,6}".prop_map(RawValue::Text),
    ]
}

proptest! {
    #[test]
    fn empty_cells_never_produce_keys(rows in prop::collection::vec(prop::collection::vec(raw_cell(), 3), 0..12)) {
        let table = lot_table(rows.clone());
        let records = map_rows(&table, &lot_mapping());
        prop_assert_eq!(records.len(), rows.len());
        for (row, record) in rows.iter().zip(&records) {
            for (cell, field) in row.iter().zip(["id", "quantity", "unit"]) {
                prop_assert_eq!(cell.is_empty(), !record.contains_key(field));
            }
        }
    }
}
