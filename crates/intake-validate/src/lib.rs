//! Validation of canonical records.
//!
//! Problems are collected, never raised: errors invalidate the import,
//! warnings are reported alongside it.

pub mod rules;
pub mod validator;

pub use validator::Validator;
