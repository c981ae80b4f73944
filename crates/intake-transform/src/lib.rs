//! Canonical record construction.
//!
//! Copies mapped cells into records keyed by schema field, coercing each
//! value, then applies the default rule registered for the data type.
//! Nothing here fails: malformed values are left for validation.

pub mod coerce;
pub mod defaults;
pub mod transformer;

pub use coerce::coerce;
pub use defaults::{DefaultRule, DefaultRuleRegistry, LotDefaults, default_registry};
pub use transformer::{DataTransformer, map_rows};
