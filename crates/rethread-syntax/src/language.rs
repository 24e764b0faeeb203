//! Grammar selection and node classification.
//!
//! [`SupportedLanguage`] is the closed set of grammars the engine parses. It
//! also owns the mapping from grammar kinds to [`SyntaxRole`]s, so nothing
//! else in the engine matches on raw kind strings.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::role::SyntaxRole;

/// Grammars the engine can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SupportedLanguage {
    /// Rust source files (`.rs`).
    #[default]
    Rust,
}

impl SupportedLanguage {
    /// Maps a file extension, case-insensitively, to a grammar.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let normalised = ext.to_ascii_lowercase();
        match normalised.as_str() {
            "rs" => Some(Self::Rust),
            _ => None,
        }
    }

    /// Maps a path to a grammar by its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// The Tree-sitter grammar.
    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
        }
    }

    /// Lower-case name used in messages and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rust => "rust",
        }
    }

    /// Returns the prefix and suffix of the synthetic function that hosts
    /// fragment patterns which are not valid top-level code.
    pub(crate) const fn fragment_host(self) -> (&'static str, &'static str) {
        match self {
            Self::Rust => ("fn __rethread_fragment__() { ", " }"),
        }
    }

    /// Classifies a node. Anonymous tokens are always punctuation.
    #[must_use]
    pub fn role_of(self, node: tree_sitter::Node<'_>) -> SyntaxRole {
        if !node.is_named() {
            return SyntaxRole::Punctuation;
        }

        match self {
            Self::Rust => rust_role(node.kind()),
        }
    }
}

fn rust_role(kind: &str) -> SyntaxRole {
    match kind {
        "parameter" => SyntaxRole::Parameter,
        "identifier" => SyntaxRole::Identifier,
        "integer_literal" | "float_literal" | "string_literal" | "raw_string_literal"
        | "char_literal" | "boolean_literal" | "negative_literal" => SyntaxRole::Literal,
        "line_comment" | "block_comment" => SyntaxRole::Comment,
        _ => SyntaxRole::Other,
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A language name that names no supported grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported language: '{0}'")]
pub struct LanguageParseError(String);

impl LanguageParseError {
    /// The rejected name, lower-cased.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl FromStr for SupportedLanguage {
    type Err = LanguageParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalised = input.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "rust" | "rs" => Ok(Self::Rust),
            other => Err(LanguageParseError(other.to_owned())),
        }
    }
}
