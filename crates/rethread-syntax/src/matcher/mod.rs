//! Pattern matching engine for finding code structures.
//!
//! This module implements a structural matcher inspired by ast-grep. It walks a
//! parsed Tree-sitter syntax tree in pre-order and yields matches alongside
//! captured metavariables. A search can start at the root of a parse or at any
//! node inside it, which is how hierarchical matching is expressed.

mod capture;
mod context;
mod matching;

use std::collections::HashMap;
use std::ops::Range;

use crate::parser::ParseResult;
use crate::pattern::Pattern;
use crate::position::Location;

pub use capture::{CapturedNode, CapturedNodes, CapturedValue};

use context::MatchContext;
use matching::Search;

/// Result of a successful pattern match.
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    node: tree_sitter::Node<'a>,
    source: &'a str,
    captures: HashMap<String, CapturedValue<'a>>,
}

impl<'a> MatchResult<'a> {
    /// Returns the matched AST node.
    #[must_use]
    pub const fn node(&self) -> tree_sitter::Node<'a> {
        self.node
    }

    /// Returns the byte range of the match in the source.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.node.byte_range()
    }

    /// Returns the text of the matched region.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.source.get(self.byte_range()).unwrap_or_default()
    }

    /// Returns the full source text the match was found in.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    /// Where the match starts.
    #[must_use]
    pub fn start(&self) -> Location {
        self.node.start_position().into()
    }

    /// Where the match ends.
    #[must_use]
    pub fn end(&self) -> Location {
        self.node.end_position().into()
    }

    /// Gets a captured metavariable by name.
    #[must_use]
    pub fn capture(&self, name: &str) -> Option<&CapturedValue<'a>> {
        self.captures.get(name)
    }

    /// Gets a single-node capture by name.
    #[must_use]
    pub fn single(&self, name: &str) -> Option<&CapturedNode<'a>> {
        self.capture(name).and_then(CapturedValue::as_single)
    }

    /// Gets a multi-node capture by name.
    #[must_use]
    pub fn multiple(&self, name: &str) -> Option<&CapturedNodes<'a>> {
        self.capture(name).and_then(CapturedValue::as_multiple)
    }

    /// Returns all captured metavariables.
    #[must_use]
    pub const fn captures(&self) -> &HashMap<String, CapturedValue<'a>> {
        &self.captures
    }

    /// Searches inside the matched node for the first match of `pattern`.
    #[must_use]
    pub fn find_within(&self, pattern: &Pattern) -> Option<MatchResult<'a>> {
        pattern.find_first_in(self.node, self.source)
    }

    /// Searches inside the matched node for the first match of `pattern`
    /// accepted by `accept`.
    #[must_use]
    pub fn find_within_where(
        &self,
        pattern: &Pattern,
        accept: impl Fn(&MatchResult<'a>) -> bool,
    ) -> Option<MatchResult<'a>> {
        Matcher::new(pattern).find_first_in_where(self.node, self.source, &accept)
    }
}

/// Pattern matcher that finds occurrences in parsed code.
pub struct Matcher<'p> {
    pattern: &'p Pattern,
}

impl<'p> Matcher<'p> {
    /// Creates a new matcher for the given pattern.
    #[must_use]
    pub const fn new(pattern: &'p Pattern) -> Self {
        Self { pattern }
    }

    /// Finds all matches of the pattern in the parsed source, in pre-order.
    #[must_use]
    pub fn find_all<'a>(&self, parsed: &'a ParseResult) -> Vec<MatchResult<'a>> {
        self.search(parsed.root_node(), parsed.source(), &accept_any, false)
    }

    /// Finds the first match of the pattern in the parsed source.
    #[must_use]
    pub fn find_first<'a>(&self, parsed: &'a ParseResult) -> Option<MatchResult<'a>> {
        self.find_first_in_where(parsed.root_node(), parsed.source(), &accept_any)
    }

    /// Finds the first match in the parsed source accepted by `accept`.
    #[must_use]
    pub fn find_first_where<'a>(
        &self,
        parsed: &'a ParseResult,
        accept: &dyn Fn(&MatchResult<'a>) -> bool,
    ) -> Option<MatchResult<'a>> {
        self.find_first_in_where(parsed.root_node(), parsed.source(), accept)
    }

    /// Finds the first match accepted by `accept` in the subtree rooted at
    /// `node`, which must belong to a tree parsed from `source`.
    #[must_use]
    pub fn find_first_in_where<'a>(
        &self,
        node: tree_sitter::Node<'a>,
        source: &'a str,
        accept: &dyn Fn(&MatchResult<'a>) -> bool,
    ) -> Option<MatchResult<'a>> {
        self.search(node, source, accept, true).into_iter().next()
    }

    fn search<'a>(
        &self,
        node: tree_sitter::Node<'a>,
        source: &'a str,
        accept: &dyn Fn(&MatchResult<'a>) -> bool,
        first_only: bool,
    ) -> Vec<MatchResult<'a>> {
        let search = Search {
            ctx: MatchContext::new(self.pattern, source),
            accept,
            first_only,
        };
        let mut results = Vec::new();
        search.visit(node, &mut results);
        results
    }
}

fn accept_any(_: &MatchResult<'_>) -> bool {
    true
}

impl Pattern {
    /// Finds all matches of this pattern in the parsed source.
    #[must_use]
    pub fn find_all<'a>(&self, parsed: &'a ParseResult) -> Vec<MatchResult<'a>> {
        Matcher::new(self).find_all(parsed)
    }

    /// Finds the first match of this pattern in the parsed source.
    #[must_use]
    pub fn find_first<'a>(&self, parsed: &'a ParseResult) -> Option<MatchResult<'a>> {
        Matcher::new(self).find_first(parsed)
    }

    /// Finds the first match of this pattern accepted by `accept`.
    #[must_use]
    pub fn find_first_where<'a>(
        &self,
        parsed: &'a ParseResult,
        accept: impl Fn(&MatchResult<'a>) -> bool,
    ) -> Option<MatchResult<'a>> {
        Matcher::new(self).find_first_where(parsed, &accept)
    }

    pub(crate) fn find_first_in<'a>(
        &self,
        node: tree_sitter::Node<'a>,
        source: &'a str,
    ) -> Option<MatchResult<'a>> {
        Matcher::new(self).find_first_in_where(node, source, &accept_any)
    }
}
