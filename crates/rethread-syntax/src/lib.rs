//! Tree-sitter powered structural matching and editing for `rethread`.
//!
//! This crate provides the language-facing half of the rewriting engine:
//!
//! - **Parsing** via [`Parser`], producing a [`ParseResult`] that owns both the
//!   syntax tree and its source text
//! - **Pattern matching** via [`Pattern`], including contextual patterns for
//!   fragments that only parse inside a larger piece of code
//! - **Capture filtering** via [`CaptureFilter`], narrowing multi-captures to
//!   nodes of one [`SyntaxRole`]
//! - **Editing** via [`Edit`] and [`commit`], which consumes the tree it
//!   rewrites
//!
//! # Pattern Language
//!
//! The pattern language is inspired by [ast-grep](https://ast-grep.github.io/)
//! and supports metavariables for capturing code elements:
//!
//! - `$VAR` - Matches any single AST node and captures it
//! - `$_` - Matches any single AST node without capturing (wildcard)
//! - `$$$VAR` - Matches zero or more AST nodes
//!
//! # Example
//!
//! ```
//! use rethread_syntax::{
//!     CaptureFilter, Edit, FilterPolicy, Parser, Pattern, SupportedLanguage, SyntaxRole, commit,
//! };
//!
//! let mut parser = Parser::new(SupportedLanguage::Rust)?;
//! let parsed = parser.parse("fn main() { Base::new_inherited(a, b); }")?;
//!
//! let pattern = Pattern::compile("$T::new_inherited($$$ARGS)", SupportedLanguage::Rust)?;
//! let edit = {
//!     let found = pattern.find_first(&parsed).expect("call");
//!     let args = CaptureFilter::new(SupportedLanguage::Rust, FilterPolicy::Strict)
//!         .retain_text(found.multiple("ARGS").expect("ARGS"), SyntaxRole::Identifier)?;
//!     Edit::for_node(found.node(), format!("Base::new_inherited({},)", args.join(", ")))
//! };
//!
//! let output = commit(parsed, vec![edit])?;
//! assert_eq!(output, "fn main() { Base::new_inherited(a, b,); }");
//! # Ok::<(), rethread_syntax::SyntaxError>(())
//! ```

mod edit;
mod error;
mod filter;
mod language;
mod matcher;
mod metavariables;
mod parser;
mod pattern;
mod position;
mod role;

pub use edit::{Edit, commit};
pub use error::SyntaxError;
pub use filter::{CaptureFilter, FilterPolicy};
pub use language::{LanguageParseError, SupportedLanguage};
pub use matcher::{CapturedNode, CapturedNodes, CapturedValue, MatchResult, Matcher};
pub use metavariables::{MetaVarKind, MetaVariable};
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};
pub use pattern::Pattern;
pub use position::Location;
pub use role::SyntaxRole;

#[cfg(test)]
mod tests;
