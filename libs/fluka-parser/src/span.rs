//! # Source Spans
//!
//! Byte/line/column positions used to locate tokens, cards and errors in
//! the input deck.

use serde::{Deserialize, Serialize};

/// A position in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub byte: usize,
    /// Line number (0-indexed).
    pub line: usize,
    /// Column in characters (0-indexed).
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub const fn new(byte: usize, line: usize, column: usize) -> Self {
        Self { byte, line, column }
    }
}

/// A half-open range `[start, end)` in source text.
///
/// ## Example
///
/// ```rust
/// use fluka_parser::Span;
///
/// let span = Span::from_bytes(3, 7);
/// assert_eq!(span.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive).
    pub start: Position,
    /// End position (exclusive).
    pub end: Position,
}

impl Span {
    /// Create a span between two positions.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from byte offsets only (line/column left at zero).
    pub const fn from_bytes(start: usize, end: usize) -> Self {
        Self {
            start: Position::new(start, 0, 0),
            end: Position::new(end, 0, 0),
        }
    }

    /// Empty span at the start of the source.
    pub const fn zero() -> Self {
        Self::from_bytes(0, 0)
    }

    /// Length in bytes.
    pub const fn len(&self) -> usize {
        self.end.byte.saturating_sub(self.start.byte)
    }

    /// Whether the span covers no bytes.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        let start = if self.start.byte <= other.start.byte { self.start } else { other.start };
        let end = if self.end.byte >= other.end.byte { self.end } else { other.end };
        Span::new(start, end)
    }
}

/// Anything that knows where it came from.
pub trait Spanned {
    /// Source span of the item.
    fn span(&self) -> Span;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_orders_endpoints() {
        let a = Span::from_bytes(5, 9);
        let b = Span::from_bytes(2, 6);
        let merged = a.merge(b);
        assert_eq!(merged.start.byte, 2);
        assert_eq!(merged.end.byte, 9);
    }

    #[test]
    fn test_zero_is_empty() {
        assert!(Span::zero().is_empty());
    }
}
