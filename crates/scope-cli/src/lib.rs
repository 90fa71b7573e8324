//! Library components of the `scope-testgen` command-line tool.

pub mod config;
pub mod logging;
pub mod pipeline;
