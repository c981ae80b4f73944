//! Schema registry: build once, read many.

use std::collections::BTreeSet;

use tracing::debug;

use intake_model::SchemaDefinition;

use crate::error::{Result, StandardsError};
use crate::loader;

/// Data type used when a lookup names an unregistered type.
pub const DEFAULT_DATA_TYPE: &str = "lots";

/// Read-only table of canonical schemas keyed by data type.
///
/// Construction validates every schema; after that the registry is never
/// mutated and can be shared freely between calls.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: Vec<SchemaDefinition>,
    default_index: usize,
}

impl SchemaRegistry {
    /// Build the registry from the embedded schema tables.
    ///
    /// # Errors
    ///
    /// Returns an error if a table fails to parse or a schema is inconsistent.
    pub fn load() -> Result<Self> {
        let (schemas, default_type) = loader::load_embedded()?;
        let default_type = default_type.unwrap_or_else(|| DEFAULT_DATA_TYPE.to_string());
        Self::from_schemas(schemas, &default_type)
    }

    /// Build a registry from explicit schemas after validating each one.
    ///
    /// # Errors
    ///
    /// Returns an error if a schema is inconsistent, a data type repeats, or
    /// `default_type` is not among the schemas.
    pub fn from_schemas(schemas: Vec<SchemaDefinition>, default_type: &str) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for schema in &schemas {
            if !seen.insert(schema.data_type().to_string()) {
                return Err(StandardsError::DuplicateSchema {
                    data_type: schema.data_type().to_string(),
                });
            }
            validate_schema(schema)?;
        }
        let default_index = schemas
            .iter()
            .position(|schema| schema.data_type() == default_type)
            .ok_or_else(|| StandardsError::MissingDefault {
                data_type: default_type.to_string(),
            })?;
        Ok(Self {
            schemas,
            default_index,
        })
    }

    /// Schema registered for `data_type`, or the default schema.
    ///
    /// Matching ignores case and surrounding whitespace.
    pub fn lookup(&self, data_type: &str) -> &SchemaDefinition {
        match self.get(data_type) {
            Some(schema) => schema,
            None => {
                debug!(data_type, fallback = self.default_schema().data_type(), "unknown data type");
                self.default_schema()
            }
        }
    }

    /// Schema registered for `data_type`, without falling back.
    pub fn get(&self, data_type: &str) -> Option<&SchemaDefinition> {
        let key = data_type.trim().to_lowercase();
        self.schemas.iter().find(|schema| schema.data_type() == key)
    }

    pub fn default_schema(&self) -> &SchemaDefinition {
        &self.schemas[self.default_index]
    }

    pub fn schemas(&self) -> &[SchemaDefinition] {
        &self.schemas
    }

    pub fn data_types(&self) -> impl Iterator<Item = &str> {
        self.schemas.iter().map(SchemaDefinition::data_type)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Check a schema for internal consistency.
///
/// Aliases are stored per field, so every alias necessarily belongs to a
/// declared field; what remains to check is naming and uniqueness.
pub fn validate_schema(schema: &SchemaDefinition) -> Result<()> {
    let data_type = schema.data_type();
    if schema.fields().is_empty() {
        return Err(StandardsError::EmptySchema {
            data_type: data_type.to_string(),
        });
    }
    let mut names = BTreeSet::new();
    for field in schema.fields() {
        if field.name.trim().is_empty() {
            return Err(StandardsError::EmptyFieldName {
                data_type: data_type.to_string(),
            });
        }
        if !names.insert(field.name.as_str()) {
            return Err(StandardsError::DuplicateField {
                data_type: data_type.to_string(),
                field: field.name.clone(),
            });
        }
        for alias in &field.aliases {
            if alias.trim().is_empty() || *alias != alias.to_lowercase() {
                return Err(StandardsError::InvalidAlias {
                    data_type: data_type.to_string(),
                    field: field.name.clone(),
                    alias: alias.clone(),
                });
            }
        }
    }
    log_shared_aliases(schema);
    Ok(())
}

/// Aliases declared under more than one field resolve to the field declared
/// first; note them so the ambiguity is visible.
fn log_shared_aliases(schema: &SchemaDefinition) {
    let mut owners: Vec<(String, &str)> = Vec::new();
    for field in schema.fields() {
        for candidate in field.candidates() {
            if let Some((_, owner)) = owners.iter().find(|(alias, _)| *alias == candidate) {
                debug!(
                    data_type = schema.data_type(),
                    alias = %candidate,
                    first = owner,
                    shadowed = %field.name,
                    "alias shared by several fields"
                );
            } else {
                owners.push((candidate, field.name.as_str()));
            }
        }
    }
}
