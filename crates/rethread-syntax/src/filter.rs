//! Capture filtering by structural role.
//!
//! Multi-captures hold every sibling between two pattern anchors, separators
//! included. The filter narrows such a capture to the nodes that play one
//! structural role, e.g. the `parameter` declarations of a signature or the
//! bare `identifier` arguments of a call.

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::matcher::{CapturedNode, CapturedNodes};
use crate::role::SyntaxRole;

/// What to do with nodes that are neither the requested role nor separators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Reject the capture with [`SyntaxError::UnsupportedShape`].
    #[default]
    Strict,
    /// Drop such nodes silently.
    BestEffort,
}

/// Narrows multi-captures to nodes of a single role.
#[derive(Debug, Clone, Copy)]
pub struct CaptureFilter {
    language: SupportedLanguage,
    policy: FilterPolicy,
}

impl CaptureFilter {
    /// Creates a filter for captures taken from `language` sources.
    #[must_use]
    pub const fn new(language: SupportedLanguage, policy: FilterPolicy) -> Self {
        Self { language, policy }
    }

    /// Returns the policy applied to unexpected nodes.
    #[must_use]
    pub const fn policy(&self) -> FilterPolicy {
        self.policy
    }

    /// Returns the nodes of `capture` whose role is `role`, in source order.
    ///
    /// Punctuation and comments are always skipped.
    ///
    /// # Errors
    ///
    /// Under [`FilterPolicy::Strict`], returns
    /// [`SyntaxError::UnsupportedShape`] for the first node that is neither a
    /// separator nor of the requested role.
    pub fn retain<'a>(
        &self,
        capture: &CapturedNodes<'a>,
        role: SyntaxRole,
    ) -> Result<Vec<CapturedNode<'a>>, SyntaxError> {
        let mut kept = Vec::new();

        for node in capture {
            let node_role = self.language.role_of(node.node());
            if node_role == role {
                kept.push(*node);
                continue;
            }

            if node_role.is_separator() || self.policy == FilterPolicy::BestEffort {
                continue;
            }

            return Err(SyntaxError::unsupported_shape(role, node.kind(), node.text()));
        }

        Ok(kept)
    }

    /// Convenience wrapper returning the text of each retained node.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`CaptureFilter::retain`].
    pub fn retain_text<'a>(
        &self,
        capture: &CapturedNodes<'a>,
        role: SyntaxRole,
    ) -> Result<Vec<&'a str>, SyntaxError> {
        Ok(self
            .retain(capture, role)?
            .iter()
            .map(CapturedNode::text)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Parser, Pattern};
    use rstest::rstest;

    fn arguments_of(call: &str, policy: FilterPolicy) -> Result<Vec<String>, SyntaxError> {
        let mut parser = Parser::new(SupportedLanguage::Rust).expect("parser");
        let source = parser
            .parse(format!("fn main() {{ {call}; }}"))
            .expect("parse");
        let pattern = Pattern::compile("$T::new_inherited($$$ARGS)", SupportedLanguage::Rust)
            .expect("pattern");
        let found = pattern.find_first(&source).expect("call");
        let args = found.multiple("ARGS").expect("ARGS");

        CaptureFilter::new(SupportedLanguage::Rust, policy)
            .retain_text(args, SyntaxRole::Identifier)
            .map(|texts| texts.into_iter().map(str::to_owned).collect())
    }

    #[rstest]
    #[case("Base::new_inherited(a, b)", vec!["a", "b"])]
    #[case("Base::new_inherited()", vec![])]
    #[case("Base::new_inherited(a, /* keep */ b,)", vec!["a", "b"])]
    fn identifiers_pass_in_every_policy(#[case] call: &str, #[case] expected: Vec<&str>) {
        for policy in [FilterPolicy::Strict, FilterPolicy::BestEffort] {
            let args = arguments_of(call, policy).expect("filter");
            assert_eq!(args, expected);
        }
    }

    #[rstest]
    #[case("Base::new_inherited(a, some_fn())", vec!["a"])]
    #[case("Base::new_inherited(a, 3, self.b, c)", vec!["a", "c"])]
    fn best_effort_drops_other_shapes(#[case] call: &str, #[case] expected: Vec<&str>) {
        let args = arguments_of(call, FilterPolicy::BestEffort).expect("filter");
        assert_eq!(args, expected);
    }

    #[test]
    fn strict_rejects_nested_calls() {
        let error = arguments_of("Base::new_inherited(a, some_fn())", FilterPolicy::Strict)
            .expect_err("nested call should be rejected");
        match error {
            SyntaxError::UnsupportedShape {
                expected,
                kind,
                text,
            } => {
                assert_eq!(expected, SyntaxRole::Identifier);
                assert_eq!(kind, "call_expression");
                assert_eq!(text, "some_fn()");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parameters_are_retained_from_signatures() {
        let mut parser = Parser::new(SupportedLanguage::Rust).expect("parser");
        let source = parser
            .parse("fn build(document: &Document, prototype: Option<HandleObject>) {}")
            .expect("parse");
        let pattern =
            Pattern::compile("fn build($$$ARGS) {}", SupportedLanguage::Rust).expect("pattern");
        let found = pattern.find_first(&source).expect("function");

        let params = CaptureFilter::new(SupportedLanguage::Rust, FilterPolicy::Strict)
            .retain_text(found.multiple("ARGS").expect("ARGS"), SyntaxRole::Parameter)
            .expect("filter");
        assert_eq!(params, vec!["document: &Document", "prototype: Option<HandleObject>"]);
    }
}
