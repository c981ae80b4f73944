//! Canonical schema tables and the schema registry.
//!
//! Schemas are embedded CSV tables (see `data/schemas/`), parsed and
//! validated once into a [`SchemaRegistry`]. Lookups of unregistered data
//! types fall back to the default schema (`lots`), so callers always get a
//! usable [`SchemaDefinition`].
//!
//! # Example
//!
//! ```rust,ignore
//! use intake_standards::SchemaRegistry;
//!
//! let registry = SchemaRegistry::load()?;
//! let lots = registry.lookup("lots");
//! println!("{} required fields", lots.required_fields().count());
//! ```

pub mod embedded;
pub mod error;
pub mod loader;
pub mod registry;

pub use error::{Result, StandardsError};
pub use loader::DatasetEntry;
pub use registry::{DEFAULT_DATA_TYPE, SchemaRegistry, validate_schema};

pub use intake_model::{FieldCore, SchemaDefinition, SchemaField};
