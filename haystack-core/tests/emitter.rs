//! End-to-end checks of the emitted haystack text.

use haystack_core::{
    DirectiveStyle, HaystackEmitter, HaystackParams, render_to_string,
};
use rstest::rstest;

const HEADER: &str = "add, start, 1\n\
\n\
add, B, 9\n\
connect, start, B, 7\n\
\n\
add, finish, 10 \n\
connect, B, finish, 0\n\
\n";

fn emit(params: HaystackParams, style: DirectiveStyle) -> String {
    let mut buffer = Vec::new();
    HaystackEmitter::new(params)
        .with_style(style)
        .emit(&mut buffer)
        .expect("Vec writes succeed");
    match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(err) => panic!("haystack output must be UTF-8: {err}"),
    }
}

#[rstest]
fn zero_distractors_emit_only_the_header() {
    assert_eq!(render_to_string(HaystackParams::new(0, 0.1, 7.0)), HEADER);
}

#[rstest]
#[case(-1)]
#[case(-99)]
#[case(i64::MIN)]
fn negative_counts_behave_as_zero(#[case] count: i64) {
    assert_eq!(render_to_string(HaystackParams::new(count, 0.1, 7.0)), HEADER);
}

#[rstest]
fn two_distractors_follow_the_header_without_separators() {
    let expected = format!(
        "{HEADER}\
add, N1, 0.1\n\
connect, start, N1, 7\n\
connect, N1, finish, 0\n\
add, N2, 0.1\n\
connect, start, N2, 7\n\
connect, N2, finish, 0\n"
    );
    assert_eq!(render_to_string(HaystackParams::new(2, 0.1, 7.0)), expected);
}

#[rstest]
fn reference_defaults_have_expected_shape() {
    let text = render_to_string(HaystackParams::default());
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 305);
    assert_eq!(lines.iter().filter(|line| line.is_empty()).count(), 3);
    assert_eq!(lines.iter().filter(|line| line.starts_with("add, ")).count(), 102);
    assert_eq!(
        lines.iter().filter(|line| line.starts_with("connect, ")).count(),
        200
    );
    assert_eq!(lines.get(5).copied(), Some("add, finish, 10 "));
    assert_eq!(lines.get(8).copied(), Some("add, N1, 0.1"));
    assert_eq!(lines.last().copied(), Some("connect, N99, finish, 0"));
    assert!(text.ends_with('\n'));
}

#[rstest]
fn finish_fitness_keeps_its_trailing_space() {
    let text = render_to_string(HaystackParams::default());
    assert!(text.lines().any(|line| line == "add, finish, 10 "));
    assert!(!text.lines().any(|line| line == "add, finish, 10"));
}

#[rstest]
#[case(7.0, "7")]
#[case(2.5, "2.5")]
#[case(0.1, "0.1")]
#[case(-3.0, "-3")]
fn path_length_renders_identically_on_every_start_edge(
    #[case] path_length: f64,
    #[case] expected: &str,
) {
    let text = render_to_string(HaystackParams::new(3, 0.1, path_length));
    let weights: Vec<&str> = text
        .lines()
        .filter(|line| line.starts_with("connect, start, "))
        .filter_map(|line| line.rsplit(", ").next())
        .collect();
    assert_eq!(weights, vec![expected; 4]);
}

#[rstest]
fn short_style_only_changes_keywords() {
    let params = HaystackParams::new(5, 0.2, 4.0);
    let long = emit(params, DirectiveStyle::Long);
    let short = emit(params, DirectiveStyle::Short);
    let rewritten: Vec<String> = short
        .lines()
        .map(|line| {
            if let Some(rest) = line.strip_prefix("a, ") {
                format!("add, {rest}")
            } else if let Some(rest) = line.strip_prefix("c, ") {
                format!("connect, {rest}")
            } else {
                line.to_owned()
            }
        })
        .collect();
    let long_lines: Vec<&str> = long.lines().collect();
    assert_eq!(rewritten, long_lines);
}

#[rstest]
fn long_style_emission_matches_render_to_string() {
    let params = HaystackParams::new(12, 0.05, 9.0);
    assert_eq!(emit(params, DirectiveStyle::Long), render_to_string(params));
}
