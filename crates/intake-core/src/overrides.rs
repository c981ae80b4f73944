//! User mapping overrides: source header to target field.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use intake_model::{HeaderMapping, MappingResult, SchemaDefinition};

use crate::error::{ImportError, Result};

/// Explicit source header to target field assignments.
pub type MappingOverrides = BTreeMap<String, String>;

/// Parse a flat JSON object of strings into overrides.
///
/// # Errors
///
/// Returns [`ImportError::MalformedOverrides`] for invalid JSON, non-object
/// documents and non-string values.
pub fn parse_overrides(json: &str) -> Result<MappingOverrides> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| ImportError::MalformedOverrides(e.to_string()))?;
    let Value::Object(entries) = value else {
        return Err(ImportError::MalformedOverrides(
            "expected a JSON object of header to field".to_string(),
        ));
    };
    entries
        .into_iter()
        .map(|(source, target)| match target {
            Value::String(field) => Ok((source, field)),
            other => Err(ImportError::MalformedOverrides(format!(
                "value for '{source}' must be a string, found {other}"
            ))),
        })
        .collect()
}

/// Merge overrides into an automatic mapping.
///
/// Every target must be a schema field. Overrides for headers absent from
/// the source are skipped. Returns the number of overrides applied.
///
/// # Errors
///
/// Returns [`ImportError::UnknownTargetField`] before changing `mapping` if
/// any target is not declared by `schema`.
pub fn apply_overrides(
    mapping: &mut MappingResult,
    overrides: &MappingOverrides,
    schema: &SchemaDefinition,
    headers: &[String],
) -> Result<usize> {
    if let Some((source, target)) = overrides
        .iter()
        .find(|(_, target)| !schema.contains_field(target))
    {
        return Err(ImportError::UnknownTargetField {
            source_header: source.clone(),
            target_field: target.clone(),
            data_type: schema.data_type().to_string(),
        });
    }

    let mut applied = 0;
    for (source, target) in overrides {
        if !headers.contains(source) {
            warn!(source_header = %source, target_field = %target, "override names a header not in the source");
            continue;
        }
        debug!(source_header = %source, target_field = %target, "applying mapping override");
        mapping.upsert(
            HeaderMapping::user_defined(source, target, schema.is_required(target)),
            headers,
        );
        applied += 1;
    }
    mapping.refresh_required(schema.required_fields());
    Ok(applied)
}
