//! Capture types for pattern matching.
//!
//! Captures bind metavariable names to the parts of the source code they match.
//! They borrow from the [`crate::ParseResult`] that was searched and therefore
//! cannot outlive the next commit of that tree.

use std::collections::HashMap;
use std::ops::Range;

use crate::matcher::MatchResult;
use crate::metavariables::WILDCARD;
use crate::pattern::Pattern;

/// A single captured AST node.
#[derive(Debug, Clone, Copy)]
pub struct CapturedNode<'a> {
    node: tree_sitter::Node<'a>,
    source: &'a str,
}

impl<'a> CapturedNode<'a> {
    pub(crate) const fn new(node: tree_sitter::Node<'a>, source: &'a str) -> Self {
        Self { node, source }
    }

    /// Returns the captured AST node.
    #[must_use]
    pub const fn node(&self) -> tree_sitter::Node<'a> {
        self.node
    }

    /// Returns the grammar kind of the captured node.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    /// Returns the text of the captured node.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.source.get(self.node.byte_range()).unwrap_or_default()
    }

    /// Returns the byte range of the captured node.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.node.byte_range()
    }

    /// Searches the subtree rooted at this capture for the first match of
    /// `pattern` in pre-order.
    #[must_use]
    pub fn find_within(&self, pattern: &Pattern) -> Option<MatchResult<'a>> {
        pattern.find_first_in(self.node, self.source)
    }
}

/// A capture for a multiple-node metavariable (`$$$NAME`).
#[derive(Debug, Clone)]
pub struct CapturedNodes<'a> {
    nodes: Vec<CapturedNode<'a>>,
    source: &'a str,
    byte_range: Range<usize>,
}

impl<'a> CapturedNodes<'a> {
    /// Returns the captured nodes in source order.
    #[must_use]
    pub fn nodes(&self) -> &[CapturedNode<'a>] {
        &self.nodes
    }

    /// Returns an iterator over the captured nodes in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, CapturedNode<'a>> {
        self.nodes.iter()
    }

    /// Returns whether the capture bound no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the full source text covered by the capture, separators
    /// included.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.source.get(self.byte_range.clone()).unwrap_or_default()
    }

    /// Returns the byte range covered by the capture.
    ///
    /// Empty captures report a zero-length range at the position the sequence
    /// would have occupied.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.byte_range.clone()
    }
}

impl<'s, 'a> IntoIterator for &'s CapturedNodes<'a> {
    type Item = &'s CapturedNode<'a>;
    type IntoIter = std::slice::Iter<'s, CapturedNode<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Captured metavariable value.
#[derive(Debug, Clone)]
pub enum CapturedValue<'a> {
    /// A single-node capture (`$NAME`).
    Single(CapturedNode<'a>),
    /// A multi-node capture (`$$$NAME`).
    Multiple(CapturedNodes<'a>),
}

impl<'a> CapturedValue<'a> {
    /// Returns the captured text.
    #[must_use]
    pub fn text(&self) -> &'a str {
        match self {
            Self::Single(node) => node.text(),
            Self::Multiple(nodes) => nodes.text(),
        }
    }

    /// Returns the byte range of the capture.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        match self {
            Self::Single(node) => node.byte_range(),
            Self::Multiple(nodes) => nodes.byte_range(),
        }
    }

    /// Returns the capture as a single node, if applicable.
    #[must_use]
    pub const fn as_single(&self) -> Option<&CapturedNode<'a>> {
        match self {
            Self::Single(node) => Some(node),
            Self::Multiple(_) => None,
        }
    }

    /// Returns the capture as multiple nodes, if applicable.
    #[must_use]
    pub const fn as_multiple(&self) -> Option<&CapturedNodes<'a>> {
        match self {
            Self::Multiple(nodes) => Some(nodes),
            Self::Single(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub(super) struct Captures<'a> {
    source: &'a str,
    inner: HashMap<String, CapturedValue<'a>>,
}

impl<'a> Captures<'a> {
    pub(super) fn new(source: &'a str) -> Self {
        Self {
            source,
            inner: HashMap::new(),
        }
    }

    pub(super) fn into_inner(self) -> HashMap<String, CapturedValue<'a>> {
        self.inner
    }

    pub(super) fn capture_single(&mut self, name: &str, node: tree_sitter::Node<'a>) -> bool {
        if name == WILDCARD {
            return true;
        }

        let value = CapturedValue::Single(CapturedNode::new(node, self.source));
        self.insert_consistent(name, value)
    }

    /// Binds `nodes` to `name`. `empty_anchor` positions the zero-length range
    /// of an empty capture.
    pub(super) fn capture_multiple(
        &mut self,
        name: &str,
        nodes: &[tree_sitter::Node<'a>],
        empty_anchor: usize,
    ) -> bool {
        if name == WILDCARD {
            return true;
        }

        let byte_range = match (nodes.first(), nodes.last()) {
            (Some(first), Some(last)) => first.start_byte()..last.end_byte(),
            _ => empty_anchor..empty_anchor,
        };

        let value = CapturedValue::Multiple(CapturedNodes {
            nodes: nodes
                .iter()
                .map(|node| CapturedNode::new(*node, self.source))
                .collect(),
            source: self.source,
            byte_range,
        });

        self.insert_consistent(name, value)
    }

    /// Inserts a binding, requiring repeated metavariables to bind
    /// structurally equal text.
    fn insert_consistent(&mut self, name: &str, next: CapturedValue<'a>) -> bool {
        let Some(existing) = self.inner.get(name) else {
            self.inner.insert(name.to_owned(), next);
            return true;
        };

        match (existing, &next) {
            (CapturedValue::Single(a), CapturedValue::Single(b)) => {
                a.kind() == b.kind() && a.text() == b.text()
            }
            (CapturedValue::Multiple(a), CapturedValue::Multiple(b)) => {
                a.nodes.len() == b.nodes.len()
                    && a
                        .nodes
                        .iter()
                        .zip(b.nodes.iter())
                        .all(|(left, right)| {
                            left.kind() == right.kind() && left.text() == right.text()
                        })
            }
            _ => false,
        }
    }
}
