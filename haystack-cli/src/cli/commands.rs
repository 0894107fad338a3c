//! Argument parsing and command execution for the haystack CLI.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, ValueEnum};
use haystack_core::{
    DEFAULT_NUM_OTHER_PATHS, DEFAULT_OTHER_PATH_FITNESS, DEFAULT_PATH_LENGTH, DirectiveStyle,
    EmitSummary, HaystackEmitter, HaystackError, HaystackErrorCode, HaystackParams,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "haystack",
    version,
    about = "Print a haystack graph description for interpolated fitness graph evaluators."
)]
pub struct Cli {
    /// Shape of the generated graph.
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Directive keywords to emit.
    #[arg(long, value_enum, default_value_t = StyleArg::Long, env = "HAYSTACK_STYLE")]
    pub style: StyleArg,

    /// Write the description to this file instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Parameters of the generated graph.
#[derive(Debug, Args, Clone)]
pub struct GraphArgs {
    /// Number of low-fitness distractor paths; negative values emit none.
    #[arg(
        long = "num-other-paths",
        default_value_t = DEFAULT_NUM_OTHER_PATHS,
        allow_negative_numbers = true,
        env = "HAYSTACK_NUM_OTHER_PATHS",
    )]
    pub num_other_paths: i64,

    /// Fitness of every distractor node.
    #[arg(
        long = "other-path-fitness",
        default_value_t = DEFAULT_OTHER_PATH_FITNESS,
        allow_negative_numbers = true,
        env = "HAYSTACK_OTHER_PATH_FITNESS",
    )]
    pub other_path_fitness: f64,

    /// Weight of `start -> B` and of every `start -> N<i>` edge.
    #[arg(
        long = "path-length",
        default_value_t = DEFAULT_PATH_LENGTH,
        allow_negative_numbers = true,
        env = "HAYSTACK_PATH_LENGTH",
    )]
    pub path_length: f64,
}

impl Default for GraphArgs {
    fn default() -> Self {
        Self {
            num_other_paths: DEFAULT_NUM_OTHER_PATHS,
            other_path_fitness: DEFAULT_OTHER_PATH_FITNESS,
            path_length: DEFAULT_PATH_LENGTH,
        }
    }
}

impl GraphArgs {
    fn to_params(&self) -> Result<HaystackParams, HaystackError> {
        HaystackParams::builder()
            .with_num_other_paths(self.num_other_paths)
            .with_other_path_fitness(self.other_path_fitness)
            .with_path_length(self.path_length)
            .build()
    }
}

/// Directive keyword styles selectable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    /// `add` / `connect`.
    #[default]
    Long,
    /// `a` / `c`.
    Short,
}

impl From<StyleArg> for DirectiveStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Long => Self::Long,
            StyleArg::Short => Self::Short,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The output file could not be created.
    #[error("failed to create `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Parameter validation or emission failed.
    #[error(transparent)]
    Haystack(#[from] HaystackError),
}

impl CliError {
    /// Stable code of the underlying haystack error, if any.
    #[must_use]
    pub const fn code(&self) -> Option<HaystackErrorCode> {
        match self {
            Self::Haystack(err) => Some(err.code()),
            Self::Io { .. } => None,
        }
    }
}

/// Summarises the outcome of executing the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// `stdout` or the output file path.
    pub destination: String,
    /// Counts of what was written.
    pub emitted: EmitSummary,
}

/// Executes the CLI command represented by `cli`, writing to `stdout` unless
/// `--output` names a file.
///
/// # Errors
/// Returns [`CliError`] when a parameter is not finite, the output file cannot
/// be created, or writing fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use haystack_cli::cli::{Cli, GraphArgs, StyleArg, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     graph: GraphArgs {
///         num_other_paths: 0,
///         ..GraphArgs::default()
///     },
///     style: StyleArg::Long,
///     output: None,
/// };
/// let mut stdout = Vec::new();
/// let summary = run_cli(cli, &mut stdout)?;
/// assert_eq!(summary.emitted.nodes, 3);
/// assert!(String::from_utf8(stdout)?.starts_with("add, start, 1\n"));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli, stdout),
    fields(destination = field::Empty, style = field::Empty),
)]
pub fn run_cli<W: Write>(cli: Cli, stdout: W) -> Result<ExecutionSummary, CliError> {
    let Cli {
        graph,
        style,
        output,
    } = cli;
    let params = graph.to_params()?;
    let emitter = HaystackEmitter::new(params).with_style(style.into());

    let span = Span::current();
    span.record("style", field::display(emitter.style()));

    let (destination, emitted) = match output {
        Some(path) => {
            let destination = path.display().to_string();
            span.record("destination", field::display(&destination));
            let file = create_output(&path)?;
            (destination, emitter.emit(BufWriter::new(file))?)
        }
        None => {
            span.record("destination", field::display("stdout"));
            ("stdout".to_owned(), emitter.emit(stdout)?)
        }
    };

    info!(
        destination = destination.as_str(),
        nodes = emitted.nodes,
        edges = emitted.edges,
        "command completed"
    );
    Ok(ExecutionSummary {
        destination,
        emitted,
    })
}

#[instrument(name = "cli.create_output", err, skip_all, fields(path = %path.display()))]
pub(super) fn create_output(path: &Path) -> Result<File, CliError> {
    File::create(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}
