//! Matching algorithms for the [`Matcher`](super::Matcher) implementation.

use crate::matcher::MatchResult;
use crate::matcher::capture::Captures;
use crate::matcher::context::MatchContext;
use crate::metavariables::{MetaVarKind, MetaVariable};

/// Pre-order search over a subtree.
///
/// Every node is a candidate; `accept` can veto a structurally valid match so
/// callers can reject candidates on properties the pattern cannot express.
pub(super) struct Search<'a, 'p, 'f> {
    pub(super) ctx: MatchContext<'a, 'p>,
    pub(super) accept: &'f dyn Fn(&MatchResult<'a>) -> bool,
    pub(super) first_only: bool,
}

impl<'a> Search<'a, '_, '_> {
    /// Walks `node` and its descendants, pushing matches onto `results`.
    ///
    /// Returns `true` once the search should stop.
    pub(super) fn visit(
        &self,
        node: tree_sitter::Node<'a>,
        results: &mut Vec<MatchResult<'a>>,
    ) -> bool {
        if let Some(found) = self.try_match(node).filter(|found| (self.accept)(found)) {
            results.push(found);
            if self.first_only {
                return true;
            }
        }

        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        children.into_iter().any(|child| self.visit(child, results))
    }

    fn try_match(&self, node: tree_sitter::Node<'a>) -> Option<MatchResult<'a>> {
        if node.is_extra() || !self.ctx.frame_matches(node) {
            return None;
        }

        let mut captures = Captures::new(self.ctx.source);
        nodes_match(node, self.ctx.pattern_root, &self.ctx, &mut captures).then(|| MatchResult {
            node,
            source: self.ctx.source,
            captures: captures.into_inner(),
        })
    }
}

/// Checks whether `source_node` matches `pattern_node`, handling metavariables,
/// kind comparison, leaf text comparison, and delegating to child matching.
/// Updates `captures` if the match succeeds.
fn nodes_match<'a>(
    source_node: tree_sitter::Node<'a>,
    pattern_node: tree_sitter::Node<'_>,
    ctx: &MatchContext<'a, '_>,
    captures: &mut Captures<'a>,
) -> bool {
    if let Some(metavar) = ctx.metavariable(pattern_node) {
        return match metavar.kind {
            MetaVarKind::Single => captures.capture_single(&metavar.name, source_node),
            MetaVarKind::Multiple => {
                captures.capture_multiple(&metavar.name, &[source_node], source_node.start_byte())
            }
        };
    }

    if source_node.kind() != pattern_node.kind() {
        return false;
    }

    if pattern_node.child_count() == 0 {
        let source_text = ctx.source.get(source_node.byte_range()).unwrap_or_default();
        return source_text == ctx.pattern_text(pattern_node);
    }

    match_children(source_node, pattern_node, ctx, captures)
}

/// Collects the children of `node` that take part in matching. Comments are
/// extras and never constrain a match.
fn significant_children(node: tree_sitter::Node<'_>) -> Vec<tree_sitter::Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

/// Matches children of `source_node` against children of `pattern_node`.
/// If the pattern contains Multiple metavariables, delegates to
/// `SequenceMatcher` for backtracking; otherwise performs pairwise matching.
fn match_children<'a>(
    source_node: tree_sitter::Node<'a>,
    pattern_node: tree_sitter::Node<'_>,
    ctx: &MatchContext<'a, '_>,
    captures: &mut Captures<'a>,
) -> bool {
    let source_children = significant_children(source_node);
    let pattern_children = significant_children(pattern_node);

    let has_multiple = pattern_children.iter().any(|child| {
        ctx.metavariable(*child)
            .is_some_and(|metavar| metavar.kind == MetaVarKind::Multiple)
    });

    if has_multiple {
        return SequenceMatcher {
            source_parent: source_node,
            source_children: &source_children,
            pattern_children: &pattern_children,
            ctx,
        }
        .matches(0, 0, captures);
    }

    if source_children.len() != pattern_children.len() {
        return false;
    }

    source_children
        .iter()
        .zip(pattern_children.iter())
        .all(|(source_child, pattern_child)| {
            nodes_match(*source_child, *pattern_child, ctx, captures)
        })
}

/// Backtracking matcher for child sequences containing Multiple
/// metavariables (`$$$VAR`). Shorter bindings are tried first.
struct SequenceMatcher<'a, 'p, 'c> {
    source_parent: tree_sitter::Node<'a>,
    source_children: &'c [tree_sitter::Node<'a>],
    pattern_children: &'c [tree_sitter::Node<'p>],
    ctx: &'c MatchContext<'a, 'p>,
}

impl<'a, 'p> SequenceMatcher<'a, 'p, '_> {
    /// Byte position anchoring an empty capture: the start of the next source
    /// child, the end of the last one, or the parent's start.
    fn empty_anchor_byte(&self, source_idx: usize) -> usize {
        if let Some(next) = self.source_children.get(source_idx) {
            return next.start_byte();
        }

        if let Some(last) = self.source_children.last() {
            return last.end_byte();
        }

        self.source_parent.start_byte()
    }

    fn matches(&self, source_idx: usize, pattern_idx: usize, captures: &mut Captures<'a>) -> bool {
        let Some(pattern_child) = self.pattern_children.get(pattern_idx).copied() else {
            return source_idx == self.source_children.len();
        };

        if let Some(metavar) = self
            .ctx
            .metavariable(pattern_child)
            .filter(|metavar| metavar.kind == MetaVarKind::Multiple)
        {
            return self.matches_multiple(source_idx, pattern_idx, metavar, captures);
        }

        self.matches_single(source_idx, pattern_idx, pattern_child, captures)
    }

    fn matches_multiple(
        &self,
        source_idx: usize,
        pattern_idx: usize,
        metavar: &MetaVariable,
        captures: &mut Captures<'a>,
    ) -> bool {
        let anchor = self.empty_anchor_byte(source_idx);
        for end in source_idx..=self.source_children.len() {
            let Some(candidate) = self.source_children.get(source_idx..end) else {
                continue;
            };

            let mut trial = captures.clone();
            if !trial.capture_multiple(&metavar.name, candidate, anchor) {
                continue;
            }

            if self.matches(end, pattern_idx + 1, &mut trial) {
                *captures = trial;
                return true;
            }
        }

        false
    }

    fn matches_single(
        &self,
        source_idx: usize,
        pattern_idx: usize,
        pattern_child: tree_sitter::Node<'p>,
        captures: &mut Captures<'a>,
    ) -> bool {
        let Some(source_child) = self.source_children.get(source_idx).copied() else {
            return false;
        };

        let mut trial = captures.clone();
        if !nodes_match(source_child, pattern_child, self.ctx, &mut trial) {
            return false;
        }

        if self.matches(source_idx + 1, pattern_idx + 1, &mut trial) {
            *captures = trial;
            return true;
        }

        false
    }
}
