//! Matching context shared across recursive operations.

use crate::metavariables::{MetaVariable, name_from_placeholder};
use crate::pattern::Pattern;

pub(super) struct MatchContext<'a, 'p> {
    pub(super) pattern_root: tree_sitter::Node<'p>,
    pub(super) source: &'a str,
    pub(super) pattern: &'p Pattern,
}

impl<'a, 'p> MatchContext<'a, 'p> {
    pub(super) fn new(pattern: &'p Pattern, source: &'a str) -> Self {
        let root = pattern.root();
        let tree_root = pattern.parsed().root_node();
        let pattern_root = locate(tree_root, root.kind, &root.range).unwrap_or(tree_root);

        Self {
            pattern_root,
            source,
            pattern,
        }
    }

    pub(super) fn pattern_text(&self, node: tree_sitter::Node<'_>) -> &'p str {
        self.pattern.parsed().node_text(node)
    }

    /// Returns the metavariable a pattern node stands for, if its whole text
    /// is a placeholder.
    pub(super) fn metavariable(
        &self,
        pattern_node: tree_sitter::Node<'_>,
    ) -> Option<&'p MetaVariable> {
        let name = name_from_placeholder(self.pattern_text(pattern_node))?;
        self.pattern
            .metavariables()
            .iter()
            .find(|metavar| metavar.name == name)
    }

    /// Returns whether `candidate` sits under the ancestor kinds recorded for
    /// contextual patterns.
    pub(super) fn frame_matches(&self, candidate: tree_sitter::Node<'_>) -> bool {
        let mut current = candidate.parent();
        for expected in &self.pattern.root().frame {
            match current {
                Some(ancestor) if ancestor.kind() == *expected => current = ancestor.parent(),
                _ => return false,
            }
        }
        true
    }
}

fn locate<'t>(
    node: tree_sitter::Node<'t>,
    kind: &str,
    range: &std::ops::Range<usize>,
) -> Option<tree_sitter::Node<'t>> {
    if node.kind() == kind && node.byte_range() == *range {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<_> = node
        .children(&mut cursor)
        .filter(|child| child.start_byte() <= range.start && range.end <= child.end_byte())
        .collect();
    children
        .into_iter()
        .find_map(|child| locate(child, kind, range))
}
