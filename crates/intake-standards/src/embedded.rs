//! Embedded schema tables.
//!
//! Schema tables are compiled into the binary with `include_str!()`, so the
//! registry needs no runtime file access.

/// Data types, their row-store worksheet, label and default flag.
pub const DATASETS: &str = include_str!("../data/schemas/Datasets.csv");

/// Field table for `lots`.
pub const LOTS: &str = include_str!("../data/schemas/lots.csv");

/// Field table for `shipments`.
pub const SHIPMENTS: &str = include_str!("../data/schemas/shipments.csv");

/// Returns the embedded field table for a data type.
pub fn field_table(data_type: &str) -> Option<&'static str> {
    match data_type {
        "lots" => Some(LOTS),
        "shipments" => Some(SHIPMENTS),
        _ => None,
    }
}
