//! Source location tracking for diagnostics.
//!
//! The front end stamps every AST node with a [`Span`]. The code generator
//! copies spans into its diagnostics so errors point back at source text.

use std::fmt;

/// A span of source code, represented by its starting position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, byte-based).
    pub col: u32,
    /// Length in bytes.
    pub len: u32,
}

impl Span {
    /// Create a new span from a line, column, and length.
    #[inline]
    pub fn new(line: u32, col: u32, len: u32) -> Self {
        Self { line, col, len }
    }

    /// Create a zero-length span at a position.
    #[inline]
    pub fn point(line: u32, col: u32) -> Self {
        Self { line, col, len: 0 }
    }

    /// Whether this span was never filled in by the front end.
    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.line == 0
    }

    /// Extend this span so it also covers `other`.
    ///
    /// Spans on different lines keep the starting position of `self`.
    #[inline]
    pub fn to(self, other: Span) -> Span {
        if self.line != other.line {
            return Span {
                len: self.len + other.len,
                ..self
            };
        }
        let start = self.col.min(other.col);
        let end = (self.col + self.len).max(other.col + other.len);
        Span {
            line: self.line,
            col: start,
            len: end - start,
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            f.write_str("<unknown>")
        } else {
            write!(f, "{}:{}", self.line, self.col)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_known_and_unknown() {
        assert_eq!(Span::new(3, 15, 5).to_string(), "3:15");
        assert_eq!(Span::default().to_string(), "<unknown>");
    }

    #[test]
    fn to_covers_both_on_same_line() {
        let let_kw = Span::new(2, 5, 3);
        let semi = Span::new(2, 14, 1);
        let stmt = let_kw.to(semi);
        assert_eq!(stmt, Span::new(2, 5, 10));
        // Order does not matter on a single line.
        assert_eq!(semi.to(let_kw), Span::new(2, 5, 10));
    }

    #[test]
    fn to_across_lines_keeps_start() {
        let open = Span::new(1, 10, 1);
        let close = Span::new(4, 1, 1);
        let block = open.to(close);
        assert_eq!(block.line, 1);
        assert_eq!(block.col, 10);
        assert_eq!(block.len, 2);
    }
}
