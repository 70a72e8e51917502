//! Command-line interface for trackmon.
//!
//! Provides commands for running the monitor over an event file, listing
//! the histogram battery, and validating configuration files.

mod commands;

pub use commands::{parse_cli, run_with_cli, Cli};
