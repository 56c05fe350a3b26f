//! Line/column source positions.

use std::fmt;

/// A 1-based line and column in the source text.
///
/// Columns count characters, not bytes, so positions inside non-ASCII text
/// line up with what an editor shows.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Position for synthesized nodes that have no source text.
    pub const SYNTHETIC: Position = Position { line: 0, column: 0 };

    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    /// Whether this position points into real source text.
    #[inline]
    pub const fn is_known(self) -> bool {
        self.line != 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn displays_as_line_colon_column() {
        assert_eq!(Position::new(3, 14).to_string(), "3:14");
    }

    #[test]
    fn synthetic_position_is_unknown() {
        assert!(!Position::SYNTHETIC.is_known());
        assert!(Position::new(1, 1).is_known());
    }
}
