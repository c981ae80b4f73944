//! Header mapping engine.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use intake_model::{HeaderMapping, MappingResult, SchemaDefinition};

use crate::score::score;

/// Minimum score for a header to map to a field.
pub const CONFIDENCE_THRESHOLD: u8 = 60;

/// A scored (field, alias) pair for one header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub field: String,
    pub alias: String,
    pub score: u8,
    pub is_required: bool,
}

#[derive(Debug, Clone)]
struct FieldCandidates {
    name: String,
    is_required: bool,
    aliases: Vec<String>,
}

/// Maps source headers to the fields of one schema.
///
/// Fields are tried in schema declaration order and aliases in declared
/// order; only a strictly higher score replaces the best match, so ties go
/// to the pair seen first.
#[derive(Debug, Clone)]
pub struct HeaderMapper {
    data_type: String,
    threshold: u8,
    fields: Vec<FieldCandidates>,
}

impl HeaderMapper {
    pub fn new(schema: &SchemaDefinition) -> Self {
        Self::with_threshold(schema, CONFIDENCE_THRESHOLD)
    }

    pub fn with_threshold(schema: &SchemaDefinition, threshold: u8) -> Self {
        let fields = schema
            .fields()
            .iter()
            .map(|field| FieldCandidates {
                name: field.name.clone(),
                is_required: field.is_required(),
                aliases: field.candidates(),
            })
            .collect();
        Self {
            data_type: schema.data_type().to_string(),
            threshold: threshold.min(100),
            fields,
        }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Map every source header, collecting unmapped headers and required
    /// fields left without a header.
    pub fn map_headers(&self, headers: &[String]) -> MappingResult {
        let mut result = MappingResult::default();
        for header in headers {
            if result.get(header).is_some() || result.unmapped_headers.contains(header) {
                continue;
            }
            match self.best_match(header) {
                Some(best) if best.score >= self.threshold => {
                    debug!(
                        header = %header,
                        field = %best.field,
                        alias = %best.alias,
                        score = best.score,
                        "mapped header"
                    );
                    result.mapping.push(HeaderMapping {
                        source_header: header.clone(),
                        target_field: best.field,
                        confidence_score: best.score,
                        matched_alias: best.alias,
                        is_required: best.is_required,
                    });
                }
                best => {
                    debug!(
                        header = %header,
                        best_score = best.map_or(0, |b| b.score),
                        threshold = self.threshold,
                        "no field above threshold"
                    );
                    result.unmapped_headers.push(header.clone());
                }
            }
        }

        result.refresh_required(
            self.fields
                .iter()
                .filter(|field| field.is_required)
                .map(|field| field.name.as_str()),
        );
        if !result.unmapped_headers.is_empty() {
            warn!(
                data_type = %self.data_type,
                unmapped = ?result.unmapped_headers,
                "headers left unmapped"
            );
        }
        if !result.missing_required.is_empty() {
            warn!(
                data_type = %self.data_type,
                missing = ?result.missing_required,
                "required fields have no source header"
            );
        }
        result
    }

    /// Best (field, alias) pair for one header, ignoring the threshold.
    pub fn best_match(&self, header: &str) -> Option<Candidate> {
        let normalized = header.trim().to_lowercase();
        let mut best: Option<Candidate> = None;
        for field in &self.fields {
            for alias in &field.aliases {
                let score = score(&normalized, alias);
                if best.as_ref().is_none_or(|b| score > b.score) {
                    best = Some(Candidate {
                        field: field.name.clone(),
                        alias: alias.clone(),
                        score,
                        is_required: field.is_required,
                    });
                }
            }
        }
        best
    }

    /// Best alias per field for one header, highest score first.
    ///
    /// Equal scores keep schema declaration order.
    pub fn explain(&self, header: &str) -> Vec<Candidate> {
        let normalized = header.trim().to_lowercase();
        let mut candidates: Vec<Candidate> = self
            .fields
            .iter()
            .filter_map(|field| {
                let mut best: Option<(u8, &String)> = None;
                for alias in &field.aliases {
                    let score = score(&normalized, alias);
                    if best.is_none_or(|(top, _)| score > top) {
                        best = Some((score, alias));
                    }
                }
                best.map(|(score, alias)| Candidate {
                    field: field.name.clone(),
                    alias: alias.clone(),
                    score,
                    is_required: field.is_required,
                })
            })
            .collect();
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates
    }
}
