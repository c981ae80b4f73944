//! Fuzzy mapping of source headers onto canonical schema fields.
//!
//! Each header is scored against every field name and alias with a
//! character ratio and a token-sort ratio; the best pair at or above the
//! confidence threshold becomes the header's mapping.

pub mod engine;
pub mod score;

pub use engine::{CONFIDENCE_THRESHOLD, Candidate, HeaderMapper};
pub use score::{ratio, score, token_sort_ratio};
