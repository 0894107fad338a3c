//! Typed directives for the interpolated fitness graph text format.
//!
//! A haystack is a sequence of `add` (node) and `connect` (edge) directives
//! with blank separator lines between the fixed sections. Directives borrow
//! nothing and are cheap to copy, so the emitter streams them lazily.

use std::{fmt, num::NonZeroU64};

/// Name of a node in the haystack graph.
///
/// The reserved names and the numbered distractors cannot collide, so node
/// names are pairwise distinct by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeName {
    /// The entry node, rendered as `start`.
    Start,
    /// The high-fitness intermediate node on the favoured path, rendered as `B`.
    Favoured,
    /// The exit node, rendered as `finish`.
    Finish,
    /// A low-fitness distractor, rendered as `N<n>` and numbered from one.
    Distractor(NonZeroU64),
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Favoured => f.write_str("B"),
            Self::Finish => f.write_str("finish"),
            Self::Distractor(index) => write!(f, "N{index}"),
        }
    }
}

/// A numeric field of a directive.
///
/// Numbers never switch to exponent notation: `1e16` renders as
/// `10000000000000000`, `1e-5` as `0.00001`, and `-0.0` as `-0`.
///
/// `Literal` carries the exact bytes of the fixed header values, including
/// the trailing space on `finish`'s fitness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A caller-supplied number rendered with its default `Display` form.
    Number(f64),
    /// A fixed value rendered verbatim.
    Literal(&'static str),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Literal(text) => f.write_str(text),
        }
    }
}

/// Keyword set used when rendering directives.
///
/// The graph loader treats `a` as `add` and `c` as `connect`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DirectiveStyle {
    /// `add` / `connect`.
    #[default]
    Long,
    /// `a` / `c`.
    Short,
}

impl DirectiveStyle {
    /// Returns the stable label of this style.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }

    const fn add_keyword(self) -> &'static str {
        match self {
            Self::Long => "add",
            Self::Short => "a",
        }
    }

    const fn connect_keyword(self) -> &'static str {
        match self {
            Self::Long => "connect",
            Self::Short => "c",
        }
    }
}

impl fmt::Display for DirectiveStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of haystack output.
///
/// # Examples
/// ```
/// use haystack_core::{Directive, DirectiveStyle, NodeName, Value};
///
/// let edge = Directive::connect(NodeName::Start, NodeName::Favoured, Value::Number(7.0));
/// assert_eq!(edge.render(DirectiveStyle::Long).to_string(), "connect, start, B, 7");
/// assert_eq!(edge.render(DirectiveStyle::Short).to_string(), "c, start, B, 7");
/// assert_eq!(Directive::Separator.render(DirectiveStyle::Long).to_string(), "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Directive {
    /// Declares a node with its fitness.
    Add {
        /// Node being declared.
        name: NodeName,
        /// Fitness of the node.
        fitness: Value,
    },
    /// Declares a directed, weighted edge between two declared nodes.
    Connect {
        /// Source node.
        from: NodeName,
        /// Target node.
        to: NodeName,
        /// Edge weight.
        weight: Value,
    },
    /// A blank line between sections.
    Separator,
}

impl Directive {
    /// Builds an `add` directive.
    #[must_use]
    pub const fn add(name: NodeName, fitness: Value) -> Self {
        Self::Add { name, fitness }
    }

    /// Builds a `connect` directive.
    #[must_use]
    pub const fn connect(from: NodeName, to: NodeName, weight: Value) -> Self {
        Self::Connect { from, to, weight }
    }

    /// Returns a [`fmt::Display`] adapter rendering this directive without
    /// its line terminator.
    #[must_use]
    pub const fn render(&self, style: DirectiveStyle) -> Rendered<'_> {
        Rendered {
            directive: self,
            style,
        }
    }
}

/// Display adapter returned by [`Directive::render`].
#[derive(Debug, Clone, Copy)]
pub struct Rendered<'a> {
    directive: &'a Directive,
    style: DirectiveStyle,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.directive {
            Directive::Add { name, fitness } => {
                write!(f, "{}, {name}, {fitness}", self.style.add_keyword())
            }
            Directive::Connect { from, to, weight } => {
                write!(f, "{}, {from}, {to}, {weight}", self.style.connect_keyword())
            }
            Directive::Separator => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn distractor(index: u64) -> NodeName {
        match NonZeroU64::new(index) {
            Some(index) => NodeName::Distractor(index),
            None => panic!("distractor indices start at one"),
        }
    }

    #[rstest]
    #[case(NodeName::Start, "start")]
    #[case(NodeName::Favoured, "B")]
    #[case(NodeName::Finish, "finish")]
    #[case(distractor(1), "N1")]
    #[case(distractor(99), "N99")]
    fn node_names_render_expected_labels(#[case] name: NodeName, #[case] expected: &str) {
        assert_eq!(name.to_string(), expected);
    }

    #[rstest]
    #[case(Value::Number(7.0), "7")]
    #[case(Value::Number(0.1), "0.1")]
    #[case(Value::Number(-2.5), "-2.5")]
    #[case(Value::Literal("10 "), "10 ")]
    #[case::negative_zero(Value::Number(-0.0), "-0")]
    #[case::large_magnitude(Value::Number(1e16), "10000000000000000")]
    #[case::small_magnitude(Value::Number(1e-5), "0.00001")]
    fn values_use_default_text_conversion(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    #[case(DirectiveStyle::Long, "add, N3, 0.1")]
    #[case(DirectiveStyle::Short, "a, N3, 0.1")]
    fn add_renders_with_style_keyword(#[case] style: DirectiveStyle, #[case] expected: &str) {
        let directive = Directive::add(distractor(3), Value::Number(0.1));
        assert_eq!(directive.render(style).to_string(), expected);
    }

    #[rstest]
    #[case(DirectiveStyle::Long, "connect, N3, finish, 0")]
    #[case(DirectiveStyle::Short, "c, N3, finish, 0")]
    fn connect_renders_with_style_keyword(#[case] style: DirectiveStyle, #[case] expected: &str) {
        let directive = Directive::connect(distractor(3), NodeName::Finish, Value::Literal("0"));
        assert_eq!(directive.render(style).to_string(), expected);
    }

    #[test]
    fn reserved_names_sort_before_distractors() {
        assert!(NodeName::Finish < distractor(1));
        assert!(distractor(2) < distractor(10));
    }
}
