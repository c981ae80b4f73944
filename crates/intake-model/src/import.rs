//! Results returned by the import pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::mapping::MappingResult;
use crate::validation::ValidationResult;
use crate::value::{CanonicalRecord, RawValue};

/// A raw source row keyed by header.
pub type PreviewRow = BTreeMap<String, RawValue>;

/// Result of a full import: map, transform, validate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    /// Mapping succeeded and every record validated.
    pub success: bool,
    /// Set only when the import failed outright.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub data: Vec<CanonicalRecord>,
    pub mapping: MappingResult,
    pub validation: ValidationResult,
    /// Leading records of `data`.
    #[serde(default)]
    pub preview: Vec<CanonicalRecord>,
}

impl ImportResult {
    /// The structured shape every pipeline failure is converted into.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            validation: ValidationResult::failure(message.clone()),
            error: Some(message),
            data: Vec::new(),
            mapping: MappingResult::default(),
            preview: Vec::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Mapping preview of a source before committing an import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub source_headers: Vec<String>,
    pub row_count: usize,
    pub mapping_suggestions: MappingResult,
    pub preview_rows: Vec<PreviewRow>,
}

/// Result of the map-only analyze operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
}

impl AnalysisResult {
    pub fn ok(analysis: Analysis) -> Self {
        Self {
            success: true,
            error: None,
            analysis: Some(analysis),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            analysis: None,
        }
    }
}
