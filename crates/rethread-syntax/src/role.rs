//! Structural roles that the engine dispatches on.
//!
//! Grammar kinds are open-ended strings. The language adapter folds them into
//! [`SyntaxRole`] so filters and builders switch on a closed set and get
//! exhaustiveness checking from the compiler.

use std::fmt;

/// Structural role of a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxRole {
    /// A parameter declaration in a function signature.
    Parameter,
    /// A bare identifier reference.
    Identifier,
    /// A literal value of any type.
    Literal,
    /// Anonymous tokens such as parentheses and commas.
    Punctuation,
    /// Line and block comments.
    Comment,
    /// Anything else: nested expressions, field access, `self`, and so on.
    Other,
}

impl SyntaxRole {
    /// Returns whether nodes of this role carry no structure of their own.
    ///
    /// Filters skip these silently in every policy.
    #[must_use]
    pub const fn is_separator(self) -> bool {
        matches!(self, Self::Punctuation | Self::Comment)
    }

    /// Returns the lower-case name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parameter => "parameter",
            Self::Identifier => "identifier",
            Self::Literal => "literal",
            Self::Punctuation => "punctuation",
            Self::Comment => "comment",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SyntaxRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
