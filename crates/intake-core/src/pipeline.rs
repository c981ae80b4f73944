//! Import pipeline: read, map, transform, validate.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, info_span, trace, warn};

use intake_ingest::{FileReader, TabularReader};
use intake_map::HeaderMapper;
use intake_model::{
    Analysis, AnalysisResult, ImportResult, MappingResult, PreviewRow, SchemaDefinition, Table,
};
use intake_standards::{SchemaRegistry, StandardsError};
use intake_transform::{DataTransformer, DefaultRuleRegistry, default_registry};
use intake_validate::Validator;

use crate::error::{ImportError, Result};
use crate::logging::redact_value;
use crate::options::ImportOptions;
use crate::overrides::{MappingOverrides, apply_overrides, parse_overrides};

/// The import engine.
///
/// Holds the read-only schema registry and the collaborators each call
/// uses. Calls share no mutable state.
pub struct ImportPipeline {
    registry: SchemaRegistry,
    reader: Box<dyn TabularReader>,
    rules: Option<DefaultRuleRegistry>,
    options: ImportOptions,
}

impl ImportPipeline {
    pub fn new(registry: SchemaRegistry) -> Self {
        Self {
            registry,
            reader: Box::new(FileReader),
            rules: None,
            options: ImportOptions::default(),
        }
    }

    /// Pipeline over the embedded schemas.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded schema tables are inconsistent.
    pub fn load() -> std::result::Result<Self, StandardsError> {
        Ok(Self::new(SchemaRegistry::load()?))
    }

    #[must_use]
    pub fn with_reader(mut self, reader: impl TabularReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    /// Replace the built-in default rules.
    #[must_use]
    pub fn with_rules(mut self, rules: DefaultRuleRegistry) -> Self {
        self.rules = Some(rules);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    fn rules(&self) -> &DefaultRuleRegistry {
        match &self.rules {
            Some(rules) => rules,
            None => default_registry(),
        }
    }

    /// Read and map a source without transforming it.
    ///
    /// Never fails: errors become `{success: false, error}`.
    pub fn analyze(&self, path: &Path, data_type: &str) -> AnalysisResult {
        match self.try_analyze(path, data_type) {
            Ok(analysis) => AnalysisResult::ok(analysis),
            Err(error) => {
                warn!(path = %path.display(), %error, "analysis failed");
                AnalysisResult::failure(error.to_string())
            }
        }
    }

    /// Fallible form of [`Self::analyze`].
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or has no data rows.
    pub fn try_analyze(&self, path: &Path, data_type: &str) -> Result<Analysis> {
        let table = self.read(path)?;
        if table.height() == 0 {
            return Err(ImportError::NoData);
        }
        let schema = self.registry.lookup(data_type);
        let mapping = self.map(&table, schema);

        let preview_rows: Vec<PreviewRow> = (0..table.height().min(self.options.preview_rows))
            .map(|row| table.row_map(row))
            .collect();
        for (row, preview) in preview_rows.iter().enumerate() {
            for (header, value) in preview {
                trace!(row, header = %header, value = redact_value(&value.to_string()), "preview cell");
            }
        }
        Ok(Analysis {
            source_headers: table.headers.clone(),
            row_count: table.height(),
            mapping_suggestions: mapping,
            preview_rows,
        })
    }

    /// Read, map, transform and validate a source.
    ///
    /// Never fails: errors become [`ImportResult::failure`].
    pub fn import_file(
        &self,
        path: &Path,
        data_type: &str,
        overrides: Option<&MappingOverrides>,
    ) -> ImportResult {
        match self.try_import(path, data_type, overrides) {
            Ok(result) => result,
            Err(error) => {
                warn!(path = %path.display(), %error, "import failed");
                ImportResult::failure(error.to_string())
            }
        }
    }

    /// [`Self::import_file`] with overrides given as a raw JSON object of
    /// source header to field.
    ///
    /// A payload that is not a flat object of strings fails the import with
    /// the structured failure shape.
    pub fn import_file_with_payload(
        &self,
        path: &Path,
        data_type: &str,
        payload: Option<&str>,
    ) -> ImportResult {
        let overrides = match payload.map(parse_overrides).transpose() {
            Ok(overrides) => overrides,
            Err(error) => {
                warn!(path = %path.display(), %error, "import failed");
                return ImportResult::failure(error.to_string());
            }
        };
        self.import_file(path, data_type, overrides.as_ref())
    }

    /// Fallible form of [`Self::import_file`].
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or an override names
    /// an unknown field.
    pub fn try_import(
        &self,
        path: &Path,
        data_type: &str,
        overrides: Option<&MappingOverrides>,
    ) -> Result<ImportResult> {
        let table = self.read(path)?;
        self.import_table(&table, data_type, overrides)
    }

    /// Map, transform and validate an already decoded table.
    ///
    /// # Errors
    ///
    /// Returns an error if an override names an unknown field.
    pub fn import_table(
        &self,
        table: &Table,
        data_type: &str,
        overrides: Option<&MappingOverrides>,
    ) -> Result<ImportResult> {
        let schema = self.registry.lookup(data_type);
        let mut mapping = self.map(table, schema);
        if let Some(overrides) = overrides.filter(|o| !o.is_empty()) {
            let applied = apply_overrides(&mut mapping, overrides, schema, &table.headers)?;
            debug!(applied, requested = overrides.len(), "mapping overrides applied");
        }

        let data = info_span!("transform", data_type = %schema.data_type()).in_scope(|| {
            let start = Instant::now();
            let data =
                DataTransformer::new(self.rules()).transform(table, &mapping, schema.data_type());
            info!(
                records = data.len(),
                duration_ms = start.elapsed().as_millis(),
                "transform complete"
            );
            data
        });

        let validation = info_span!("validate", data_type = %schema.data_type()).in_scope(|| {
            let start = Instant::now();
            let validation = Validator::new(schema).validate(&data);
            info!(
                valid = validation.valid,
                errors = validation.errors.len(),
                warnings = validation.warnings.len(),
                duration_ms = start.elapsed().as_millis(),
                "validate complete"
            );
            validation
        });

        let preview = data.iter().take(self.options.preview_records).cloned().collect();
        Ok(ImportResult {
            success: mapping.success && validation.valid,
            error: None,
            data,
            mapping,
            validation,
            preview,
        })
    }

    fn read(&self, path: &Path) -> Result<Table> {
        info_span!("ingest", path = %path.display()).in_scope(|| -> Result<Table> {
            let start = Instant::now();
            let table = self.reader.read(path)?;
            info!(
                columns = table.headers.len(),
                rows = table.height(),
                duration_ms = start.elapsed().as_millis(),
                "ingest complete"
            );
            Ok(table)
        })
    }

    fn map(&self, table: &Table, schema: &SchemaDefinition) -> MappingResult {
        info_span!("map", data_type = %schema.data_type()).in_scope(|| {
            let start = Instant::now();
            let mapper = HeaderMapper::with_threshold(schema, self.options.confidence_threshold);
            let mapping = mapper.map_headers(&table.headers);
            info!(
                mapped = mapping.mapping.len(),
                unmapped = mapping.unmapped_headers.len(),
                missing_required = mapping.missing_required.len(),
                duration_ms = start.elapsed().as_millis(),
                "map complete"
            );
            mapping
        })
    }
}

impl std::fmt::Debug for ImportPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportPipeline")
            .field("data_types", &self.registry.data_types().collect::<Vec<_>>())
            .field("custom_rules", &self.rules.is_some())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
