//! Pattern compilation for structural code matching.
//!
//! This module implements an ast-grep-inspired pattern language. Patterns are
//! compiled from source strings containing metavariables and parsed with the
//! target grammar; the resulting tree is what candidates are matched against.
//!
//! # Pattern Syntax
//!
//! - `$VAR` - Matches any single AST node and captures it as `VAR`
//! - `$_` - Matches any single AST node without capturing (wildcard)
//! - `$$$VAR` - Matches zero or more sibling nodes and captures them as `VAR`
//!
//! # Contextual patterns
//!
//! Some fragments are ambiguous or unparsable on their own. A contextual
//! pattern is written as a larger, complete piece of code (the *context*) plus
//! a *selector* naming the node kind inside it that matches are resolved to.
//! Candidates must also sit under the same chain of ancestor kinds as the
//! selected node does inside the context.

use std::ops::Range;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::metavariables::{MetaVariable, normalise};
use crate::parser::{ParseResult, Parser};

/// A compiled structural pattern for matching code.
#[derive(Debug)]
pub struct Pattern {
    source: String,
    language: SupportedLanguage,
    metavariables: Vec<MetaVariable>,
    parsed: ParseResult,
    root: PatternRoot,
    selector: Option<String>,
}

/// Location of the node inside the parsed pattern that candidates are
/// compared against, plus the ancestor kinds a candidate must sit under.
#[derive(Debug, Clone)]
pub(crate) struct PatternRoot {
    pub(crate) kind: &'static str,
    pub(crate) range: Range<usize>,
    pub(crate) frame: Vec<&'static str>,
}

impl Pattern {
    /// Compiles a fragment pattern for the given language.
    ///
    /// The fragment is first parsed as top-level code. If that fails it is
    /// hosted inside a synthetic function body, first as a tail expression and
    /// then as a statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern contains invalid metavariable syntax
    /// or cannot be parsed by the language grammar in any position.
    pub fn compile(source: &str, language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let normalised = normalise(source)?;
        let mut parser = Parser::new(language)?;

        let parsed = parser.parse(normalised.text.as_str())?;
        if !parsed.has_errors() {
            let root = top_level_root(&parsed);
            return Ok(Self::assemble(source, normalised.metavariables, parsed, root, None));
        }

        let (prefix, suffix) = language.fragment_host();
        let hosted = [
            format!("{prefix}{}{suffix}", normalised.text),
            format!("{prefix}{};{suffix}", normalised.text),
        ];
        for candidate in hosted {
            let parsed = parser.parse(candidate)?;
            if parsed.has_errors() {
                continue;
            }
            let root = hosted_root(&parsed).ok_or_else(|| {
                SyntaxError::pattern_compile(language, "pattern host has no body")
            })?;
            return Ok(Self::assemble(source, normalised.metavariables, parsed, root, None));
        }

        Err(SyntaxError::pattern_compile(
            language,
            "pattern contains syntax errors",
        ))
    }

    /// Compiles a contextual pattern.
    ///
    /// `context` must parse as complete top-level code. The first node of kind
    /// `selector` in a pre-order walk of the context becomes the pattern root.
    ///
    /// # Errors
    ///
    /// Returns an error if the context has invalid metavariables, fails to
    /// parse, or contains no node of kind `selector`.
    pub fn compile_in_context(
        context: &str,
        selector: &str,
        language: SupportedLanguage,
    ) -> Result<Self, SyntaxError> {
        let normalised = normalise(context)?;
        let mut parser = Parser::new(language)?;
        let parsed = parser.parse(normalised.text.as_str())?;

        if parsed.has_errors() {
            return Err(SyntaxError::pattern_compile(
                language,
                "pattern context contains syntax errors",
            ));
        }

        let boundary = parsed.root_node();
        let selected = first_of_kind(boundary, selector).ok_or_else(|| {
            SyntaxError::pattern_compile(
                language,
                format!("selector `{selector}` does not occur in the context"),
            )
        })?;

        let root = PatternRoot {
            kind: selected.kind(),
            range: selected.byte_range(),
            frame: ancestor_kinds(selected, boundary),
        };

        Ok(Self::assemble(
            context,
            normalised.metavariables,
            parsed,
            root,
            Some(selector.to_owned()),
        ))
    }

    fn assemble(
        source: &str,
        metavariables: Vec<MetaVariable>,
        parsed: ParseResult,
        root: PatternRoot,
        selector: Option<String>,
    ) -> Self {
        Self {
            source: source.to_owned(),
            language: parsed.language(),
            metavariables,
            parsed,
            root,
            selector,
        }
    }

    /// Returns the original pattern source (the context, for contextual
    /// patterns).
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the language this pattern is compiled for.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns the selector kind for contextual patterns.
    #[must_use]
    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    /// Returns the metavariables defined in this pattern.
    #[must_use]
    pub fn metavariables(&self) -> &[MetaVariable] {
        &self.metavariables
    }

    /// Returns the parsed syntax tree of the pattern.
    #[must_use]
    pub const fn parsed(&self) -> &ParseResult {
        &self.parsed
    }

    /// Returns whether this pattern has any metavariables.
    #[must_use]
    pub fn has_metavariables(&self) -> bool {
        !self.metavariables.is_empty()
    }

    pub(crate) const fn root(&self) -> &PatternRoot {
        &self.root
    }
}

fn significant_named_children(node: tree_sitter::Node<'_>) -> Vec<tree_sitter::Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

/// Expression statements wrapping a block-like expression without a trailing
/// `;` stand for the expression itself.
fn unwrap_statement(node: tree_sitter::Node<'_>) -> tree_sitter::Node<'_> {
    if node.kind() != "expression_statement" {
        return node;
    }

    let mut cursor = node.walk();
    let has_semicolon = node
        .children(&mut cursor)
        .last()
        .is_some_and(|last| last.kind() == ";");
    match significant_named_children(node).as_slice() {
        [inner] if !has_semicolon => *inner,
        _ => node,
    }
}

fn root_from(node: tree_sitter::Node<'_>, frame: Vec<&'static str>) -> PatternRoot {
    PatternRoot {
        kind: node.kind(),
        range: node.byte_range(),
        frame,
    }
}

fn top_level_root(parsed: &ParseResult) -> PatternRoot {
    let root = parsed.root_node();
    let node = significant_named_children(root)
        .first()
        .copied()
        .map_or(root, unwrap_statement);
    root_from(node, Vec::new())
}

fn hosted_root(parsed: &ParseResult) -> Option<PatternRoot> {
    let host = significant_named_children(parsed.root_node())
        .first()
        .copied()?;
    let body = host.child_by_field_name("body")?;
    let node = match significant_named_children(body).as_slice() {
        [single] => unwrap_statement(*single),
        _ => body,
    };
    Some(root_from(node, Vec::new()))
}

/// Finds the first node of `kind` in a pre-order walk starting at `node`.
pub(crate) fn first_of_kind<'t>(
    node: tree_sitter::Node<'t>,
    kind: &str,
) -> Option<tree_sitter::Node<'t>> {
    if node.kind() == kind {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(|child| first_of_kind(child, kind))
}

fn ancestor_kinds(
    node: tree_sitter::Node<'_>,
    boundary: tree_sitter::Node<'_>,
) -> Vec<&'static str> {
    let mut kinds = Vec::new();
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if ancestor.id() == boundary.id() {
            break;
        }
        kinds.push(ancestor.kind());
        current = ancestor.parent();
    }
    kinds
}
