//! CLI entry point for the haystack generator.
//!
//! Parses command-line arguments with clap, writes the graph description to
//! stdout or the requested file, and maps errors to exit codes: 0 on success
//! (help and version included), 1 on any failure. Arguments are parsed before
//! logging is initialised, so `--help` works whatever the log settings.

use std::io::{self, BufWriter};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, error::ErrorKind};

use haystack_cli::{
    cli::{Cli, CliError, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn parse_args() -> Result<Cli, ExitCode> {
    Cli::try_parse().map_err(|err| {
        let _ = err.print();
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        }
    })
}

fn try_main(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    run_cli(cli, BufWriter::new(stdout.lock())).context("failed to emit haystack")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main(cli) {
        let code = err
            .downcast_ref::<CliError>()
            .and_then(CliError::code)
            .map(|code| field::display(code.as_str()));
        let message = format!("{err:#}");
        error!(error = message.as_str(), code, "command execution failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
