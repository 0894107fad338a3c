//! Streams the haystack directives and writes them to an output stream.
//!
//! Output layout, one directive per line:
//!
//! ```text
//! add, start, 1
//!
//! add, B, 9
//! connect, start, B, <path_length>
//!
//! add, finish, 10␠
//! connect, B, finish, 0
//!
//! add, N1, <other_path_fitness>
//! connect, start, N1, <path_length>
//! connect, N1, finish, 0
//! ...
//! ```
//!
//! `␠` marks a trailing space: the fitness on the `finish` line is written
//! as `10 `. Downstream parsers have seen that byte since the fixture was first
//! generated, so it is kept.

use std::{io::Write, num::NonZeroU64};

use tracing::{info, instrument};

use crate::{
    HaystackParams, Result,
    directive::{Directive, DirectiveStyle, NodeName, Value},
};

const START_FITNESS: Value = Value::Literal("1");
const FAVOURED_FITNESS: Value = Value::Literal("9");
const FINISH_FITNESS: Value = Value::Literal("10 ");
const FINISH_EDGE_WEIGHT: Value = Value::Literal("0");

/// Returns the directives describing the haystack for `params`, in output
/// order.
///
/// The iterator is lazy; a haystack with millions of distractors never
/// materialises in memory.
///
/// # Examples
/// ```
/// use haystack_core::{Directive, HaystackParams, directives};
///
/// let params = HaystackParams::new(2, 0.1, 7.0);
/// let all: Vec<Directive> = directives(params).collect();
/// assert_eq!(all.len(), 8 + 2 * 3);
/// ```
pub fn directives(params: HaystackParams) -> impl Iterator<Item = Directive> {
    header(params.path_length()).into_iter().chain(
        (1..=params.distractor_count())
            .filter_map(NonZeroU64::new)
            .flat_map(move |index| {
                distractor(
                    index,
                    params.other_path_fitness(),
                    params.path_length(),
                )
            }),
    )
}

fn header(path_length: f64) -> [Directive; 8] {
    [
        Directive::add(NodeName::Start, START_FITNESS),
        Directive::Separator,
        Directive::add(NodeName::Favoured, FAVOURED_FITNESS),
        Directive::connect(
            NodeName::Start,
            NodeName::Favoured,
            Value::Number(path_length),
        ),
        Directive::Separator,
        Directive::add(NodeName::Finish, FINISH_FITNESS),
        Directive::connect(NodeName::Favoured, NodeName::Finish, FINISH_EDGE_WEIGHT),
        Directive::Separator,
    ]
}

fn distractor(index: NonZeroU64, fitness: f64, path_length: f64) -> [Directive; 3] {
    let node = NodeName::Distractor(index);
    [
        Directive::add(node, Value::Number(fitness)),
        Directive::connect(NodeName::Start, node, Value::Number(path_length)),
        Directive::connect(node, NodeName::Finish, FINISH_EDGE_WEIGHT),
    ]
}

/// Counts of what an emission wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitSummary {
    /// Number of `add` lines.
    pub nodes: u64,
    /// Number of `connect` lines.
    pub edges: u64,
    /// Total number of lines, blank separators included.
    pub lines: u64,
}

impl EmitSummary {
    fn record(&mut self, directive: &Directive) {
        match directive {
            Directive::Add { .. } => self.nodes += 1,
            Directive::Connect { .. } => self.edges += 1,
            Directive::Separator => {}
        }
        self.lines += 1;
    }
}

/// Writes haystack text for a fixed set of parameters.
///
/// # Examples
/// ```
/// use haystack_core::{DirectiveStyle, HaystackEmitter, HaystackParams};
///
/// let emitter = HaystackEmitter::new(HaystackParams::new(1, 0.1, 7.0))
///     .with_style(DirectiveStyle::Long);
/// let mut buffer = Vec::new();
/// let summary = emitter.emit(&mut buffer).expect("writing to a Vec succeeds");
/// assert_eq!(summary.nodes, 4);
/// assert_eq!(summary.edges, 4);
/// assert!(String::from_utf8_lossy(&buffer).ends_with("connect, N1, finish, 0\n"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HaystackEmitter {
    params: HaystackParams,
    style: DirectiveStyle,
}

impl HaystackEmitter {
    /// Creates an emitter using the long directive keywords.
    #[must_use]
    pub const fn new(params: HaystackParams) -> Self {
        Self {
            params,
            style: DirectiveStyle::Long,
        }
    }

    /// Overrides the directive keyword style.
    #[must_use]
    pub const fn with_style(mut self, style: DirectiveStyle) -> Self {
        self.style = style;
        self
    }

    /// Parameters this emitter renders.
    #[must_use]
    pub const fn params(&self) -> HaystackParams {
        self.params
    }

    /// Directive keyword style this emitter renders with.
    #[must_use]
    pub const fn style(&self) -> DirectiveStyle {
        self.style
    }

    /// Writes every directive followed by `\n`, then flushes `writer`.
    ///
    /// # Errors
    /// Returns [`crate::HaystackError::OutputWrite`] if writing or flushing
    /// fails. Output written before the failure is left as-is.
    #[instrument(
        name = "haystack.emit",
        err,
        skip(self, writer),
        fields(
            num_other_paths = self.params.num_other_paths(),
            style = self.style.as_str(),
        ),
    )]
    pub fn emit<W: Write>(&self, mut writer: W) -> Result<EmitSummary> {
        let mut summary = EmitSummary::default();
        for directive in directives(self.params) {
            writeln!(writer, "{}", directive.render(self.style))?;
            summary.record(&directive);
        }
        writer.flush()?;
        info!(
            nodes = summary.nodes,
            edges = summary.edges,
            lines = summary.lines,
            "haystack emitted"
        );
        Ok(summary)
    }
}

/// Renders the haystack for `params` with the long keywords into a `String`.
///
/// # Examples
/// ```
/// use haystack_core::{HaystackParams, render_to_string};
///
/// let text = render_to_string(HaystackParams::new(0, 0.1, 7.0));
/// assert_eq!(
///     text,
///     "add, start, 1\n\nadd, B, 9\nconnect, start, B, 7\n\nadd, finish, 10 \nconnect, B, finish, 0\n\n",
/// );
/// ```
#[must_use]
pub fn render_to_string(params: HaystackParams) -> String {
    directives(params)
        .map(|directive| format!("{}\n", directive.render(DirectiveStyle::Long)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;

    use rstest::rstest;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FailingFlush(Vec<u8>);

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("flush refused"))
        }
    }

    #[rstest]
    #[case(0, 3, 2, 8)]
    #[case(1, 4, 4, 11)]
    #[case(99, 102, 200, 305)]
    #[case(-7, 3, 2, 8)]
    fn summary_counts_directives(
        #[case] count: i64,
        #[case] nodes: u64,
        #[case] edges: u64,
        #[case] lines: u64,
    ) {
        let emitter = HaystackEmitter::new(HaystackParams::new(count, 0.1, 7.0));
        let summary = emitter.emit(io::sink()).expect("sink never fails");
        assert_eq!(summary, EmitSummary { nodes, edges, lines });
    }

    #[test]
    fn emit_matches_render_to_string() {
        let params = HaystackParams::new(4, 0.3, 2.5);
        let mut buffer = Vec::new();
        HaystackEmitter::new(params)
            .emit(&mut buffer)
            .expect("Vec writes succeed");
        assert_eq!(String::from_utf8_lossy(&buffer), render_to_string(params));
    }

    #[test]
    fn emit_reports_write_failures() {
        let err = HaystackEmitter::default()
            .emit(FailingWriter)
            .expect_err("write must fail");
        assert_eq!(err.code().as_str(), "HAYSTACK_OUTPUT_WRITE");
    }

    #[test]
    fn emit_reports_flush_failures_after_writing_everything() {
        let mut writer = FailingFlush(Vec::new());
        let err = HaystackEmitter::new(HaystackParams::new(0, 0.1, 7.0))
            .emit(&mut writer)
            .expect_err("flush must fail");
        assert_eq!(err.code().as_str(), "HAYSTACK_OUTPUT_WRITE");
        assert_eq!(writer.0.len(), render_to_string(HaystackParams::new(0, 0.1, 7.0)).len());
    }

    #[test]
    fn emitter_defaults_to_reference_parameters() {
        let emitter = HaystackEmitter::default();
        assert_eq!(emitter.params(), HaystackParams::default());
        assert_eq!(emitter.style(), DirectiveStyle::Long);
    }
}
