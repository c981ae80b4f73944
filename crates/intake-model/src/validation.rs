use serde::{Deserialize, Serialize};

/// Row-level diagnostics for a set of canonical records.
///
/// `valid` tracks `errors` only; warnings never invalidate an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub total_records: usize,
}

impl ValidationResult {
    pub fn new(errors: Vec<String>, warnings: Vec<String>, total_records: usize) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
            total_records,
        }
    }

    /// The validation block of a failed import: one error, no records.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![message.into()],
            warnings: Vec::new(),
            total_records: 0,
        }
    }
}
