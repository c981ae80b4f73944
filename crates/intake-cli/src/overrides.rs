//! Mapping overrides from command-line arguments.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

/// Parse a `SOURCE=FIELD` argument. The last `=` separates the two, so
/// source headers may contain `=`.
pub fn parse_map_pair(raw: &str) -> std::result::Result<(String, String), String> {
    let (source, field) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected SOURCE=FIELD, got '{raw}'"))?;
    let source = source.trim();
    let field = field.trim();
    if source.is_empty() || field.is_empty() {
        return Err(format!("expected SOURCE=FIELD, got '{raw}'"));
    }
    Ok((source.to_string(), field.to_string()))
}

/// Build the override payload from the `--map-file` object and `--map`
/// pairs; pairs win. `None` when neither is given.
///
/// The payload is checked by the import itself, so a map file that is not
/// a flat object of strings is passed through and fails the import.
///
/// # Errors
///
/// Returns an error if the map file cannot be read.
pub fn collect_overrides(
    pairs: &[(String, String)],
    map_file: Option<&Path>,
) -> Result<Option<String>> {
    let content = match map_file {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("read mapping file {}", path.display()))?,
        ),
        None => None,
    };
    if pairs.is_empty() {
        return Ok(content);
    }

    let mut object = match content.as_deref().map(serde_json::from_str::<Value>) {
        None => Map::new(),
        Some(Ok(Value::Object(object))) => object,
        // Unusable file content: the import reports it.
        Some(_) => return Ok(content),
    };
    for (source, field) in pairs {
        object.insert(source.clone(), Value::String(field.clone()));
    }
    Ok(Some(Value::Object(object).to_string()))
}
