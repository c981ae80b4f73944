//! Tabular import engine.
//!
//! [`ImportPipeline`] reads a CSV, spreadsheet or JSON source, maps its
//! headers onto a canonical schema, builds canonical records and validates
//! them. Every failure is returned as a structured result, never as an
//! error. [`ImportService`] adds persistence of successful imports to a
//! [`RecordStore`].

pub mod error;
pub mod logging;
pub mod options;
pub mod overrides;
pub mod pipeline;
pub mod service;
pub mod store;

pub use error::{ImportError, Result, StoreError};
pub use options::ImportOptions;
pub use overrides::{MappingOverrides, apply_overrides, parse_overrides};
pub use pipeline::ImportPipeline;
pub use service::{CHAIN_OF_CUSTODY_WORKSHEET, ExecuteResponse, ImportService, SchemaView, custody_entry};
pub use store::{JsonLinesStore, MemoryStore, RecordStore};
