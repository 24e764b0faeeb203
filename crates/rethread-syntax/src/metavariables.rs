//! Metavariable scanning shared by pattern compilation.
//!
//! Patterns use `$NAME` and `$$$NAME` metavariables. Before a pattern is handed
//! to the grammar, every metavariable is replaced with a placeholder identifier
//! so the pattern parses as ordinary code.

use crate::error::SyntaxError;

const PLACEHOLDER_PREFIX: &str = "__RETHREAD_MV_";
const PLACEHOLDER_SUFFIX: &str = "__";

/// Name reserved for wildcards that match without binding.
pub(crate) const WILDCARD: &str = "_";

/// A metavariable in a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaVariable {
    /// The name of the metavariable (without the `$` prefix).
    pub name: String,
    /// Whether the metavariable binds one node or a sequence.
    pub kind: MetaVarKind,
    /// Byte offset where this metavariable appears in the pattern source.
    pub offset: usize,
}

/// The kind of metavariable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaVarKind {
    /// Matches a single AST node (`$VAR`).
    Single,
    /// Matches zero or more AST nodes (`$$$VAR`).
    Multiple,
}

/// A pattern source with metavariables replaced by placeholders.
#[derive(Debug)]
pub(crate) struct Normalised {
    pub(crate) text: String,
    pub(crate) metavariables: Vec<MetaVariable>,
}

const fn is_valid_start_char(c: char) -> bool {
    c.is_ascii_uppercase() || c == '_'
}

const fn is_valid_continuation_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'
}

fn take_name(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> String {
    let mut name = String::new();

    if !chars.peek().is_some_and(|(_, c)| is_valid_start_char(*c)) {
        return name;
    }

    while let Some((_, c)) = chars.next_if(|(_, c)| is_valid_continuation_char(*c)) {
        name.push(c);
    }

    name
}

/// Scans `source` for metavariables and replaces each with a placeholder.
///
/// # Errors
///
/// Returns an error for `$$` prefixes, more than three `$`, or a `$` that is
/// not followed by a valid name.
pub(crate) fn normalise(source: &str) -> Result<Normalised, SyntaxError> {
    let mut text = String::with_capacity(source.len());
    let mut metavariables = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if ch != '$' {
            text.push(ch);
            continue;
        }

        let mut dollar_count = 1;
        while chars.next_if(|(_, c)| *c == '$').is_some() {
            dollar_count += 1;
        }

        let kind = match dollar_count {
            1 => MetaVarKind::Single,
            3 => MetaVarKind::Multiple,
            other => {
                return Err(SyntaxError::invalid_metavariable(format!(
                    "metavariable at offset {offset} has invalid '$' prefix length ({other})"
                )));
            }
        };

        let name = take_name(&mut chars);
        if name.is_empty() {
            return Err(SyntaxError::invalid_metavariable(format!(
                "metavariable at offset {offset} has no valid name"
            )));
        }

        text.push_str(&placeholder_for(&name));
        metavariables.push(MetaVariable { name, kind, offset });
    }

    Ok(Normalised {
        text,
        metavariables,
    })
}

fn placeholder_for(name: &str) -> String {
    format!("{PLACEHOLDER_PREFIX}{name}{PLACEHOLDER_SUFFIX}")
}

/// Extracts the metavariable name from a placeholder.
///
/// Accepts the placeholder as an expression statement too (`__X__;`) so a
/// lone `$X` statement binds the whole statement.
pub(crate) fn name_from_placeholder(text: &str) -> Option<&str> {
    text.trim()
        .trim_end_matches(';')
        .trim_end()
        .strip_prefix(PLACEHOLDER_PREFIX)
        .and_then(|rest| rest.strip_suffix(PLACEHOLDER_SUFFIX))
        .filter(|name| !name.is_empty())
}
