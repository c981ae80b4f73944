//! Service boundary: analyze, execute and schema operations.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, trace, warn};

use intake_model::{AnalysisResult, CanonicalRecord, FieldValue, ImportResult, SchemaDefinition};

use crate::error::StoreError;
use crate::logging::redact_value;
use crate::overrides::MappingOverrides;
use crate::pipeline::ImportPipeline;
use crate::store::RecordStore;

/// Worksheet receiving chain-of-custody entries for imported lots.
pub const CHAIN_OF_CUSTODY_WORKSHEET: &str = "ChainOfCustody";

const LOTS_DATA_TYPE: &str = "lots";

/// Result of an execute call: the import plus what was persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    #[serde(flatten)]
    pub result: ImportResult,
    /// Records appended before the first store failure, if any.
    pub persisted: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist_error: Option<String>,
}

/// Schema fields for client-side display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaView {
    pub data_type: String,
    pub label: String,
    pub worksheet: String,
    pub required: Vec<String>,
    pub optional: Vec<String>,
    pub aliases: BTreeMap<String, Vec<String>>,
}

impl From<&SchemaDefinition> for SchemaView {
    fn from(schema: &SchemaDefinition) -> Self {
        Self {
            data_type: schema.data_type().to_string(),
            label: schema.label().to_string(),
            worksheet: schema.worksheet().to_string(),
            required: schema.required_fields().map(str::to_string).collect(),
            optional: schema.optional_fields().map(str::to_string).collect(),
            aliases: schema
                .fields()
                .iter()
                .filter(|field| !field.aliases.is_empty())
                .map(|field| (field.name.clone(), field.aliases.clone()))
                .collect(),
        }
    }
}

/// Transport-agnostic front of the import engine.
///
/// `execute` persists only successful imports, one append per record in
/// output order.
#[derive(Debug)]
pub struct ImportService<S> {
    pipeline: ImportPipeline,
    store: S,
}

impl<S: RecordStore> ImportService<S> {
    pub fn new(pipeline: ImportPipeline, store: S) -> Self {
        Self { pipeline, store }
    }

    pub fn pipeline(&self) -> &ImportPipeline {
        &self.pipeline
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn analyze(&self, path: &Path, data_type: &str) -> AnalysisResult {
        self.pipeline.analyze(path, data_type)
    }

    /// Import a file and, when it succeeds, append its records to the
    /// schema's worksheet.
    pub fn execute(
        &self,
        path: &Path,
        data_type: &str,
        overrides: Option<&MappingOverrides>,
    ) -> ExecuteResponse {
        let result = self.pipeline.import_file(path, data_type, overrides);
        self.commit(path, data_type, result)
    }

    /// [`Self::execute`] with overrides given as the raw flat JSON object
    /// received at the boundary. A malformed payload is a failed import and
    /// persists nothing.
    pub fn execute_with_payload(
        &self,
        path: &Path,
        data_type: &str,
        payload: Option<&str>,
    ) -> ExecuteResponse {
        let result = self
            .pipeline
            .import_file_with_payload(path, data_type, payload);
        self.commit(path, data_type, result)
    }

    pub fn schema(&self, data_type: &str) -> SchemaView {
        SchemaView::from(self.pipeline.registry().lookup(data_type))
    }

    fn commit(&self, path: &Path, data_type: &str, result: ImportResult) -> ExecuteResponse {
        if !result.success {
            return ExecuteResponse {
                result,
                persisted: 0,
                persist_error: None,
            };
        }

        let schema = self.pipeline.registry().lookup(data_type);
        let source_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let (persisted, persist_error) = match self.persist(schema, &result.data, &source_name) {
            Ok(count) => (count, None),
            Err((count, error)) => {
                warn!(worksheet = schema.worksheet(), persisted = count, %error, "persist stopped");
                (count, Some(error.to_string()))
            }
        };
        ExecuteResponse {
            result,
            persisted,
            persist_error,
        }
    }

    fn persist(
        &self,
        schema: &SchemaDefinition,
        records: &[CanonicalRecord],
        source_name: &str,
    ) -> Result<usize, (usize, StoreError)> {
        let worksheet = schema.worksheet();
        let _span = info_span!("persist", worksheet = %worksheet).entered();
        let start = Instant::now();
        let with_custody = schema.data_type() == LOTS_DATA_TYPE;

        let mut persisted = 0;
        for record in records {
            let timestamp = now_rfc3339();
            let mut stamped = record.clone();
            stamped
                .entry("timestamp".to_string())
                .or_insert_with(|| FieldValue::Text(timestamp.clone()));
            self.store
                .append(worksheet, &stamped)
                .map_err(|error| (persisted, error))?;
            persisted += 1;

            if with_custody {
                let entry = custody_entry(&stamped, source_name, &timestamp);
                self.store
                    .append(CHAIN_OF_CUSTODY_WORKSHEET, &entry)
                    .map_err(|error| (persisted, error))?;
            }
            let id = stamped.get("id").map(ToString::to_string).unwrap_or_default();
            trace!(id = redact_value(&id), "record persisted");
        }

        info!(
            records = persisted,
            duration_ms = start.elapsed().as_millis(),
            "persist complete"
        );
        Ok(persisted)
    }
}

/// Chain-of-custody entry recording the import of one lot.
pub fn custody_entry(lot: &CanonicalRecord, source_name: &str, timestamp: &str) -> CanonicalRecord {
    let mut entry = CanonicalRecord::new();
    if let Some(id) = lot.get("id") {
        entry.insert("lotId".to_string(), id.clone());
    }
    entry.insert("action".to_string(), FieldValue::from("Import"));
    entry.insert(
        "description".to_string(),
        FieldValue::Text(format!("Imported from {source_name}")),
    );
    if let Ok(details) = serde_json::to_string(lot) {
        entry.insert("details".to_string(), FieldValue::Text(details));
    }
    entry.insert("timestamp".to_string(), FieldValue::from(timestamp));
    entry
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
