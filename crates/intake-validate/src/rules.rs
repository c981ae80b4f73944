//! Individual record checks.

use intake_model::{CanonicalRecord, FieldValue};

/// Field checked for numeric, non-negative values.
pub const QUANTITY_FIELD: &str = "quantity";
/// Field checked for duplicates across the record set.
pub const ID_FIELD: &str = "id";

/// Absent keys, zero-length text and numeric zero count as missing.
pub fn is_missing(record: &CanonicalRecord, field: &str) -> bool {
    record.get(field).is_none_or(is_falsy)
}

fn is_falsy(value: &FieldValue) -> bool {
    match value {
        FieldValue::Int(v) => *v == 0,
        FieldValue::Float(v) => *v == 0.0,
        FieldValue::Text(_) => value.is_blank(),
    }
}

/// Error message for a present but unusable quantity.
pub fn quantity_error(row: usize, quantity: &FieldValue) -> Option<String> {
    match quantity.as_f64() {
        Some(value) if value < 0.0 => Some(format!("Row {row}: Quantity cannot be negative")),
        Some(_) => None,
        None => Some(format!("Row {row}: Invalid quantity value")),
    }
}

/// Number of records whose id loosely equals `id`.
pub fn id_occurrences(records: &[CanonicalRecord], id: &FieldValue) -> usize {
    records
        .iter()
        .filter(|other| other.get(ID_FIELD).is_some_and(|value| value.loosely_equals(id)))
        .count()
}
