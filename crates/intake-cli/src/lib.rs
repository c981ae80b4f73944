//! Library components of the `intake` command-line tool.

pub mod logging;
pub mod overrides;
