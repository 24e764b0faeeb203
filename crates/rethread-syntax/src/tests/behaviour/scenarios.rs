//! Scenario bindings for the `rethread-syntax` BDD feature file.
//!
//! These functions bind Gherkin scenario names to the step definitions in the
//! parent module.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::scenario;

use super::TestWorld;

/// Fixture providing the shared BDD world.
#[fixture]
fn world() -> RefCell<TestWorld> {
    super::world()
}

#[scenario(
    path = "tests/features/rethread_syntax.feature",
    name = "Pattern captures a call's type and arguments"
)]
fn pattern_captures_call(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/rethread_syntax.feature",
    name = "Pattern with no matches returns empty"
)]
fn pattern_no_matches(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/rethread_syntax.feature",
    name = "Contextual pattern only matches associated functions"
)]
fn contextual_pattern_matches_impl(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/rethread_syntax.feature",
    name = "Identifier filter keeps plain arguments"
)]
fn filter_keeps_identifiers(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/rethread_syntax.feature",
    name = "Strict filter rejects nested expressions"
)]
fn strict_filter_rejects(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/rethread_syntax.feature",
    name = "Best effort filter drops nested expressions"
)]
fn best_effort_filter_drops(world: RefCell<TestWorld>) {
    drop(world);
}
