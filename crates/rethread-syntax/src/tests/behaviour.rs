//! Behaviour-driven development (BDD) step definitions for rethread-syntax scenarios.

mod scenarios;

use std::cell::RefCell;
use std::collections::HashMap;

use rstest::fixture;
use rstest_bdd_macros::{given, then, when};

use crate::{
    CaptureFilter, FilterPolicy, MatchResult, ParseResult, Parser, Pattern, SupportedLanguage,
    SyntaxError, SyntaxRole,
};

// =============================================================================
// Test World
// =============================================================================

/// State shared across BDD steps.
#[derive(Default)]
pub(super) struct TestWorld {
    /// Parsed source code for pattern matching.
    parsed_source: Option<ParseResult>,
    /// Compiled pattern for matching.
    pattern: Option<Pattern>,
    /// Policy applied when filtering captures.
    policy: FilterPolicy,
    /// Pattern match results.
    matches: Vec<MatchResultSnapshot>,
    /// Outcome of the last capture filter.
    filtered: Option<Result<Vec<String>, SyntaxError>>,
}

/// Snapshot of match result data (owned, not borrowed).
#[derive(Debug)]
struct MatchResultSnapshot {
    captures: HashMap<String, String>,
}

impl<'a> From<&MatchResult<'a>> for MatchResultSnapshot {
    fn from(m: &MatchResult<'a>) -> Self {
        Self {
            captures: m
                .captures()
                .iter()
                .map(|(k, v)| (k.clone(), v.text().to_owned()))
                .collect(),
        }
    }
}

#[fixture]
pub(super) fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}

/// Strips surrounding double quotes from a string if present.
fn strip_quotes(s: &str) -> &str {
    s.trim_matches('"')
}

// =============================================================================
// Given Steps
// =============================================================================

#[given("Rust source code {code}")]
fn given_rust_source(world: &RefCell<TestWorld>, code: String) {
    let mut w = world.borrow_mut();
    let source_code = strip_quotes(&code).replace("\\n", "\n");

    let mut parser = Parser::new(SupportedLanguage::Rust).expect("parser init");
    w.parsed_source = Some(parser.parse(source_code).expect("parse"));
}

#[given("a pattern {pattern}")]
fn given_pattern(world: &RefCell<TestWorld>, pattern: String) {
    let mut w = world.borrow_mut();
    let compiled =
        Pattern::compile(strip_quotes(&pattern), SupportedLanguage::Rust).expect("pattern compile");
    w.pattern = Some(compiled);
}

#[given("a contextual pattern {context} selecting {selector}")]
fn given_contextual_pattern(world: &RefCell<TestWorld>, context: String, selector: String) {
    let mut w = world.borrow_mut();
    let compiled = Pattern::compile_in_context(
        strip_quotes(&context),
        strip_quotes(&selector),
        SupportedLanguage::Rust,
    )
    .expect("contextual pattern compile");
    w.pattern = Some(compiled);
}

#[given("the best effort filter policy")]
fn given_best_effort(world: &RefCell<TestWorld>) {
    world.borrow_mut().policy = FilterPolicy::BestEffort;
}

// =============================================================================
// When Steps
// =============================================================================

#[when("the pattern is matched against the source")]
fn when_match_pattern(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();

    let parsed = w
        .parsed_source
        .as_ref()
        .expect("parsed source should be set before matching");
    let pattern = w
        .pattern
        .as_ref()
        .expect("pattern should be set before matching");

    let snapshots = pattern
        .find_all(parsed)
        .iter()
        .map(MatchResultSnapshot::from)
        .collect();
    w.matches = snapshots;
}

#[when("the capture {name} is filtered to identifiers")]
fn when_filter_capture(world: &RefCell<TestWorld>, name: String) {
    let mut w = world.borrow_mut();
    let capture_name = strip_quotes(&name);

    let filtered = {
        let parsed = w.parsed_source.as_ref().expect("parsed source");
        let pattern = w.pattern.as_ref().expect("pattern");
        let found = pattern.find_first(parsed).expect("a match to filter");
        let nodes = found.multiple(capture_name).expect("multi capture");
        CaptureFilter::new(SupportedLanguage::Rust, w.policy)
            .retain_text(nodes, SyntaxRole::Identifier)
            .map(|texts| texts.into_iter().map(str::to_owned).collect())
    };
    w.filtered = Some(filtered);
}

// =============================================================================
// Then Steps
// =============================================================================

#[then("{count} match is found")]
fn then_exact_matches(world: &RefCell<TestWorld>, count: usize) {
    let w = world.borrow();
    assert_eq!(
        w.matches.len(),
        count,
        "unexpected matches: {:?}",
        w.matches
    );
}

#[then("no matches are found")]
fn then_no_matches(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    assert!(
        w.matches.is_empty(),
        "Expected no matches, got {:?}",
        w.matches
    );
}

#[then("the capture {name} holds {expected}")]
fn then_capture_is(world: &RefCell<TestWorld>, name: String, expected: String) {
    let w = world.borrow();
    let capture_name = strip_quotes(&name);
    let expected_text = strip_quotes(&expected);
    let found = w
        .matches
        .iter()
        .any(|m| m.captures.get(capture_name).is_some_and(|v| v == expected_text));
    assert!(
        found,
        "Expected capture '{capture_name}' to be '{expected_text}', matches: {:?}",
        w.matches
    );
}

#[then("the filtered identifiers are {expected}")]
fn then_filtered_identifiers(world: &RefCell<TestWorld>, expected: String) {
    let w = world.borrow();
    let expected: Vec<&str> = strip_quotes(&expected)
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let filtered = w
        .filtered
        .as_ref()
        .expect("filter should have run")
        .as_ref()
        .expect("filter should succeed");
    assert_eq!(filtered, &expected);
}

#[then("filtering rejects a {kind} node")]
fn then_filter_rejects(world: &RefCell<TestWorld>, kind: String) {
    let w = world.borrow();
    let expected_kind = strip_quotes(&kind);
    let outcome = w.filtered.as_ref().expect("filter should have run");
    match outcome {
        Err(SyntaxError::UnsupportedShape { kind, .. }) => assert_eq!(kind, expected_kind),
        other => panic!("expected an unsupported shape, got {other:?}"),
    }
}
