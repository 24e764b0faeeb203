//! Errors raised while parsing, compiling patterns, filtering captures, and
//! committing edits.

use std::ops::Range;

use thiserror::Error;

use crate::language::SupportedLanguage;
use crate::role::SyntaxRole;

/// Failure of a syntax-level operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// The grammar could not be loaded into a Tree-sitter parser.
    #[error("cannot load the {language} grammar: {message}")]
    ParserInit {
        /// Grammar that failed to load.
        language: SupportedLanguage,
        /// Reason reported by Tree-sitter.
        message: String,
    },

    /// Tree-sitter produced no tree at all.
    #[error("{language} parser produced no tree: {message}")]
    Parse {
        /// Grammar in use.
        language: SupportedLanguage,
        /// Reason for the failure.
        message: String,
    },

    /// A pattern could not be turned into a matchable tree.
    #[error("cannot compile {language} pattern: {message}")]
    PatternCompile {
        /// Grammar the pattern targets.
        language: SupportedLanguage,
        /// What was wrong with the pattern.
        message: String,
    },

    /// A `$` token in a pattern is not a valid metavariable.
    #[error("bad metavariable: {message}")]
    InvalidMetavariable {
        /// What was wrong with the token.
        message: String,
    },

    /// A multi-capture held a node outside the requested role.
    #[error("expected only {expected} nodes but found {kind} `{text}`")]
    UnsupportedShape {
        /// The role the filter was asked to forward.
        expected: SyntaxRole,
        /// Grammar kind of the rejected node.
        kind: String,
        /// Source text of the rejected node.
        text: String,
    },

    /// Two edits in one commit touch the same bytes.
    #[error("edits overlap at bytes {first:?} and {second:?}")]
    OverlappingEdits {
        /// Range of the earlier edit.
        first: Range<usize>,
        /// Range of the later edit.
        second: Range<usize>,
    },

    /// An edit range does not address valid text in the committed source.
    #[error("edit range {range:?} is invalid for source of {len} bytes")]
    InvalidEditRange {
        /// The offending range.
        range: Range<usize>,
        /// Length of the source text.
        len: usize,
    },
}

impl SyntaxError {
    pub(crate) fn parser_init(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParserInit {
            language,
            message: message.into(),
        }
    }

    pub(crate) fn parse(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::Parse {
            language,
            message: message.into(),
        }
    }

    pub(crate) fn pattern_compile(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::PatternCompile {
            language,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_metavariable(message: impl Into<String>) -> Self {
        Self::InvalidMetavariable {
            message: message.into(),
        }
    }

    pub(crate) fn unsupported_shape(
        expected: SyntaxRole,
        kind: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::UnsupportedShape {
            expected,
            kind: kind.into(),
            text: text.into(),
        }
    }
}
