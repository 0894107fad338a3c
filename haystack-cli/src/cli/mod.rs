//! Command-line interface orchestration for the haystack generator.
//!
//! A single command prints the haystack graph description, configured by flags
//! with environment-variable fallbacks, to stdout or to a file.

mod commands;

pub use commands::{
    Cli, CliError, ExecutionSummary, GraphArgs, StyleArg, run_cli,
};

#[cfg(test)]
mod test_helpers;
