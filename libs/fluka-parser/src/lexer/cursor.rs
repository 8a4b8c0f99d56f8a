//! # Character Cursor
//!
//! Peekable character cursor for the lexer.
//! Tracks position (byte, line, column) as it advances.
//!
//! ## Example
//!
//! ```rust
//! use fluka_parser::lexer::Cursor;
//!
//! let mut cursor = Cursor::new("RPP");
//! assert_eq!(cursor.peek(), Some('R'));
//! cursor.advance();
//! assert_eq!(cursor.peek(), Some('P'));
//! ```

use crate::span::Position;

// =============================================================================
// CURSOR
// =============================================================================

/// Character cursor with position tracking.
pub struct Cursor<'a> {
    /// Source text.
    source: &'a str,
    /// Current byte offset.
    byte: usize,
    /// Current line (0-indexed).
    line: usize,
    /// Current column (0-indexed).
    column: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor for source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            byte: 0,
            line: 0,
            column: 0,
        }
    }

    /// Get current position.
    pub fn position(&self) -> Position {
        Position::new(self.byte, self.line, self.column)
    }

    /// Check if at end of file.
    pub fn is_eof(&self) -> bool {
        self.byte >= self.source.len()
    }

    /// Peek at current character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Peek at next character (one ahead of current).
    pub fn peek_next(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    /// Remaining unconsumed source.
    pub fn rest(&self) -> &'a str {
        &self.source[self.byte..]
    }

    /// Check whether the remaining source starts with `prefix`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use fluka_parser::lexer::Cursor;
    ///
    /// let cursor = Cursor::new("-DEFI 1");
    /// assert!(cursor.starts_with("-DEFI"));
    /// ```
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Advance to next character.
    ///
    /// ## Returns
    ///
    /// Character that was consumed, or None if at EOF
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.byte += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Advance over `count` characters.
    pub fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// Advance while predicate is true.
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_empty() {
        let cursor = Cursor::new("");
        assert!(cursor.is_eof());
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_cursor_peek_next() {
        let cursor = Cursor::new("+A");
        assert_eq!(cursor.peek(), Some('+'));
        assert_eq!(cursor.peek_next(), Some('A'));
    }

    #[test]
    fn test_cursor_newline_resets_column() {
        let mut cursor = Cursor::new("a\nb");
        cursor.advance();
        assert_eq!(cursor.position().column, 1);
        cursor.advance();
        assert_eq!(cursor.position().line, 1);
        assert_eq!(cursor.position().column, 0);
    }

    #[test]
    fn test_cursor_advance_by_stops_at_eof() {
        let mut cursor = Cursor::new("ab");
        cursor.advance_by(5);
        assert!(cursor.is_eof());
        assert_eq!(cursor.position().byte, 2);
    }

    #[test]
    fn test_cursor_advance_while() {
        let mut cursor = Cursor::new("SPH1 0");
        cursor.advance_while(|c| c.is_alphanumeric());
        assert_eq!(cursor.peek(), Some(' '));
        assert_eq!(cursor.position().byte, 4);
    }
}
