use anyhow::{Context, Result};
use tracing::{info, info_span};

use intake_cli::overrides::collect_overrides;
use intake_core::{ImportOptions, ImportPipeline, ImportService, JsonLinesStore, SchemaView};
use intake_map::{Candidate, HeaderMapper};

use crate::cli::{AnalyzeArgs, ImportArgs, OutputArg, SchemaArgs};
use crate::summary::{print_analysis, print_execute, print_import, print_schema, print_schemas};

pub fn run_schemas() -> Result<()> {
    let pipeline = ImportPipeline::load().context("load schemas")?;
    let registry = pipeline.registry();
    print_schemas(registry.schemas(), registry.default_schema().data_type());
    Ok(())
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let pipeline = ImportPipeline::load().context("load schemas")?;
    let view = SchemaView::from(pipeline.registry().lookup(&args.data_type));
    match args.output {
        OutputArg::Json => print_json(&view)?,
        OutputArg::Table => print_schema(&view),
    }
    Ok(())
}

/// Returns whether the source could be analyzed.
pub fn run_analyze(args: &AnalyzeArgs) -> Result<bool> {
    let pipeline = build_pipeline(args.confidence_threshold)?;
    let span = info_span!("analyze", file = %args.file.display(), data_type = %args.data_type);
    let _guard = span.enter();

    let result = pipeline.analyze(&args.file, &args.data_type);
    match args.output {
        OutputArg::Json => print_json(&result)?,
        OutputArg::Table => match (&result.analysis, &result.error) {
            (Some(analysis), _) => {
                let schema = pipeline.registry().lookup(&args.data_type);
                let mapper = HeaderMapper::new(schema);
                let closest: Vec<(String, Option<Candidate>)> = analysis
                    .mapping_suggestions
                    .unmapped_headers
                    .iter()
                    .map(|header| (header.clone(), mapper.explain(header).into_iter().next()))
                    .collect();
                print_analysis(analysis, &closest);
            }
            (None, Some(error)) => eprintln!("error: {error}"),
            (None, None) => {}
        },
    }
    Ok(result.success)
}

/// Returns whether the import succeeded and every record was persisted.
pub fn run_import(args: &ImportArgs) -> Result<bool> {
    let payload = collect_overrides(&args.map, args.map_file.as_deref())?;
    let pipeline = build_pipeline(args.confidence_threshold)?;
    let span = info_span!("import", file = %args.file.display(), data_type = %args.data_type);
    let _guard = span.enter();

    if args.dry_run {
        let result =
            pipeline.import_file_with_payload(&args.file, &args.data_type, payload.as_deref());
        match args.output {
            OutputArg::Json => print_json(&result)?,
            OutputArg::Table => print_import(&result),
        }
        return Ok(result.success);
    }

    let worksheet = pipeline
        .registry()
        .lookup(&args.data_type)
        .worksheet()
        .to_string();
    let service = ImportService::new(pipeline, JsonLinesStore::new(&args.store));
    let response =
        service.execute_with_payload(&args.file, &args.data_type, payload.as_deref());
    info!(
        store = %args.store.display(),
        persisted = response.persisted,
        success = response.result.success,
        "import finished"
    );
    match args.output {
        OutputArg::Json => print_json(&response)?,
        OutputArg::Table => print_execute(&response, &worksheet),
    }
    Ok(response.result.success && response.persist_error.is_none())
}

fn build_pipeline(confidence_threshold: Option<u8>) -> Result<ImportPipeline> {
    let mut options = ImportOptions::default();
    if let Some(threshold) = confidence_threshold {
        options = options.with_confidence_threshold(threshold);
    }
    let pipeline = ImportPipeline::load().context("load schemas")?;
    Ok(pipeline.with_options(options))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{json}");
    Ok(())
}
