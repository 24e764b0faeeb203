//! One-based source locations for diagnostics.

use std::fmt;

/// A line and column, both counted from one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    /// Line number.
    pub line: u32,
    /// Column number, in bytes.
    pub column: u32,
}

impl From<tree_sitter::Point> for Location {
    fn from(point: tree_sitter::Point) -> Self {
        Self {
            line: one_based(point.row),
            column: one_based(point.column),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

fn one_based(index: usize) -> u32 {
    u32::try_from(index).map_or(u32::MAX, |value| value.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_become_one_based() {
        let location = Location::from(tree_sitter::Point { row: 0, column: 4 });
        assert_eq!(location, Location { line: 1, column: 5 });
        assert_eq!(location.to_string(), "1:5");
    }
}
