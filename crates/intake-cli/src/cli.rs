//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use intake_cli::overrides::parse_map_pair;
use intake_standards::DEFAULT_DATA_TYPE;

#[derive(Parser)]
#[command(
    name = "intake",
    version,
    about = "Import spreadsheets into canonical lot and shipment records",
    long_about = "Map the headers of CSV, Excel or JSON files onto canonical schemas,\n\
                  transform and validate the rows, and append them to a record store."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow source cell values in logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List registered data types.
    Schemas,

    /// Show the fields and aliases of one data type.
    Schema(SchemaArgs),

    /// Suggest a header mapping for a file without importing it.
    Analyze(AnalyzeArgs),

    /// Import a file and append its records to the store.
    Import(ImportArgs),
}

#[derive(Args)]
pub struct SchemaArgs {
    /// Data type to show.
    #[arg(value_name = "DATA_TYPE")]
    pub data_type: String,

    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// CSV, Excel or JSON file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long = "data-type", default_value = DEFAULT_DATA_TYPE)]
    pub data_type: String,

    /// Minimum header score (0-100) to accept a mapping.
    #[arg(long = "confidence-threshold", value_name = "SCORE", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub confidence_threshold: Option<u8>,

    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Args)]
pub struct ImportArgs {
    /// CSV, Excel or JSON file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long = "data-type", default_value = DEFAULT_DATA_TYPE)]
    pub data_type: String,

    /// Map a source header to a field, overriding the suggestion.
    #[arg(long = "map", value_name = "SOURCE=FIELD", value_parser = parse_map_pair)]
    pub map: Vec<(String, String)>,

    /// JSON object of source header to field overrides.
    #[arg(long = "map-file", value_name = "PATH")]
    pub map_file: Option<PathBuf>,

    /// Directory of worksheet files receiving imported records.
    #[arg(long = "store", value_name = "DIR", default_value = "intake-data")]
    pub store: PathBuf,

    /// Map, transform and validate without writing records.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Minimum header score (0-100) to accept a mapping.
    #[arg(long = "confidence-threshold", value_name = "SCORE", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub confidence_threshold: Option<u8>,

    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

/// Result rendering.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
