//! Small helpers shared across CLI tests.

use std::path::PathBuf;

use tempfile::TempDir;

use super::{Cli, CliError, GraphArgs, StyleArg, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn cli_with(num_other_paths: i64, style: StyleArg, output: Option<PathBuf>) -> Cli {
    Cli {
        graph: GraphArgs {
            num_other_paths,
            ..GraphArgs::default()
        },
        style,
        output,
    }
}

pub(super) fn run_to_string(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let mut stdout = Vec::new();
    run_cli(cli, &mut stdout)?;
    Ok(String::from_utf8(stdout)?)
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli, std::io::sink()) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
