//! Text edits and the commit step that applies them.
//!
//! An [`Edit`] owns its byte range and replacement text, so it survives the
//! tree it was computed from. [`commit`] takes the [`ParseResult`] by value:
//! once edits are applied, every node, match, and capture borrowed from the
//! old tree is rejected by the compiler.

use std::ops::Range;

use crate::error::SyntaxError;
use crate::parser::ParseResult;

/// Replacement of a byte range in committed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    range: Range<usize>,
    replacement: String,
}

impl Edit {
    /// Creates an edit replacing `range` with `replacement`.
    #[must_use]
    pub fn replace(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    /// Creates an edit inserting `text` at `offset`.
    #[must_use]
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::replace(offset..offset, text)
    }

    /// Creates an edit replacing the full extent of `node`.
    #[must_use]
    pub fn for_node(node: tree_sitter::Node<'_>, replacement: impl Into<String>) -> Self {
        Self::replace(node.byte_range(), replacement)
    }

    /// Returns the byte range being replaced.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Returns the replacement text.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Applies `edits` to the source of `parsed`, consuming the tree.
///
/// Edits may be given in any order. They are applied against the original
/// offsets, so none needs to account for the length change of another.
///
/// # Errors
///
/// Returns [`SyntaxError::InvalidEditRange`] when a range is reversed, runs
/// past the end of the source, or splits a UTF-8 character, and
/// [`SyntaxError::OverlappingEdits`] when two ranges share bytes. Two
/// insertions at the same offset also count as overlapping because their
/// order would be ambiguous.
pub fn commit(parsed: ParseResult, mut edits: Vec<Edit>) -> Result<String, SyntaxError> {
    let source = parsed.source();

    for edit in &edits {
        validate_range(source, &edit.range)?;
    }

    edits.sort_by_key(|edit| (edit.range.start, edit.range.end));
    for (first, second) in edits.iter().zip(edits.iter().skip(1)) {
        if overlaps(&first.range, &second.range) {
            return Err(SyntaxError::OverlappingEdits {
                first: first.range.clone(),
                second: second.range.clone(),
            });
        }
    }

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in &edits {
        output.push_str(source.get(cursor..edit.range.start).unwrap_or_default());
        output.push_str(&edit.replacement);
        cursor = edit.range.end;
    }
    output.push_str(source.get(cursor..).unwrap_or_default());

    Ok(output)
}

fn validate_range(source: &str, range: &Range<usize>) -> Result<(), SyntaxError> {
    let valid = range.start <= range.end
        && range.end <= source.len()
        && source.is_char_boundary(range.start)
        && source.is_char_boundary(range.end);
    if valid {
        Ok(())
    } else {
        Err(SyntaxError::InvalidEditRange {
            range: range.clone(),
            len: source.len(),
        })
    }
}

const fn overlaps(first: &Range<usize>, second: &Range<usize>) -> bool {
    if first.start == second.start {
        return true;
    }
    second.start < first.end
}
