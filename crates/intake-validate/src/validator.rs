//! Record set validation.

use tracing::debug;

use intake_model::{CanonicalRecord, SchemaDefinition, ValidationResult};

use crate::rules::{ID_FIELD, QUANTITY_FIELD, id_occurrences, is_missing, quantity_error};

/// Validates canonical records against one schema's required fields.
///
/// Per record, at 1-based row `r`:
/// - each missing required field is an error
/// - a negative or non-numeric `quantity` is an error
/// - an `id` shared with another record is a warning
#[derive(Debug, Clone)]
pub struct Validator {
    data_type: String,
    required: Vec<String>,
}

impl Validator {
    pub fn new(schema: &SchemaDefinition) -> Self {
        Self {
            data_type: schema.data_type().to_string(),
            required: schema.required_fields().map(str::to_string).collect(),
        }
    }

    pub fn validate(&self, records: &[CanonicalRecord]) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            let row = idx + 1;
            for field in &self.required {
                if is_missing(record, field) {
                    errors.push(format!("Row {row}: Missing required field '{field}'"));
                }
            }
            if let Some(quantity) = record.get(QUANTITY_FIELD)
                && let Some(error) = quantity_error(row, quantity)
            {
                errors.push(error);
            }
            // Quadratic in record count.
            if let Some(id) = record.get(ID_FIELD).filter(|id| !id.is_blank())
                && id_occurrences(records, id) > 1
            {
                warnings.push(format!("Row {row}: Duplicate ID '{id}' found"));
            }
        }

        debug!(
            data_type = %self.data_type,
            records = records.len(),
            errors = errors.len(),
            warnings = warnings.len(),
            "validated records"
        );
        ValidationResult::new(errors, warnings, records.len())
    }
}
