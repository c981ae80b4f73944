//! Shared data model for the tabular intake engine.
//!
//! The types here are produced and consumed by the other `intake-*` crates:
//!
//! - [`SchemaDefinition`]: canonical fields and aliases for one data type
//! - [`Table`] / [`RawValue`]: decoded source data before mapping
//! - [`MappingResult`] / [`HeaderMapping`]: header-to-field decisions
//! - [`CanonicalRecord`] / [`FieldValue`]: transformed, schema-conformant rows
//! - [`ValidationResult`], [`ImportResult`], [`AnalysisResult`]: per-call results

pub mod import;
pub mod mapping;
pub mod schema;
pub mod table;
pub mod validation;
pub mod value;

pub use import::{Analysis, AnalysisResult, ImportResult, PreviewRow};
pub use mapping::{HeaderMapping, MappingResult, USER_DEFINED_ALIAS};
pub use schema::{FieldCore, SchemaDefinition, SchemaField};
pub use table::Table;
pub use validation::ValidationResult;
pub use value::{CanonicalRecord, FieldValue, RawValue, whole_number};
