//! # Tokens
//!
//! Token types for the deck lexer.
//!
//! ## Example
//!
//! ```rust
//! use fluka_parser::lexer::{Token, TokenKind};
//! use fluka_parser::Span;
//!
//! let token = Token::new(TokenKind::Number, Span::from_bytes(0, 2), "10".to_string());
//! assert_eq!(token.kind, TokenKind::Number);
//! ```

use crate::span::{Span, Spanned};

// =============================================================================
// TOKEN
// =============================================================================

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token type.
    pub kind: TokenKind,
    /// Source span.
    pub span: Span,
    /// Token text.
    pub text: String,
}

impl Token {
    /// Create a new token.
    ///
    /// ## Parameters
    ///
    /// - `kind`: Token type
    /// - `span`: Source location
    /// - `text`: Token text
    pub fn new(kind: TokenKind, span: Span, text: String) -> Self {
        Self { kind, span, text }
    }

    /// Check if token is EOF.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Check if the token ends a card line.
    pub fn is_line_end(&self) -> bool {
        matches!(self.kind, TokenKind::Newline | TokenKind::Eof)
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

// =============================================================================
// TOKEN KIND
// =============================================================================

/// Types of tokens.
///
/// The deck format is line oriented, so line breaks are tokens too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Card keyword, body code or name like `RPP`, `TARGET`, `ROT-DEFI`
    Word,
    /// Number literal like `10`, `-3.5` or `1e-4`
    Number,
    /// Scope directive like `$start_transform`
    Directive,

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `|`
    Pipe,
    /// `(`
    LParen,
    /// `)`
    RParen,

    /// End of a line
    Newline,
    /// End of file
    Eof,
    /// Character that starts no token
    Error,
}

impl TokenKind {
    /// Check if this token can start or continue a zone expression.
    pub const fn is_expression_operator(&self) -> bool {
        matches!(self, Self::Plus | Self::Minus | Self::Pipe | Self::LParen)
    }

    /// Get display string for error messages.
    pub const fn display(&self) -> &'static str {
        match self {
            Self::Word => "name",
            Self::Number => "number",
            Self::Directive => "directive",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Pipe => "|",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Newline => "end of line",
            Self::Eof => "end of file",
            Self::Error => "error",
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
    fn test_expression_operators() {
        assert!(TokenKind::Plus.is_expression_operator());
        assert!(TokenKind::Pipe.is_expression_operator());
        assert!(TokenKind::LParen.is_expression_operator());
        assert!(!TokenKind::RParen.is_expression_operator());
        assert!(!TokenKind::Word.is_expression_operator());
    }

    #[test]
    fn test_token_display() {
        assert_eq!(TokenKind::LParen.display(), "(");
        assert_eq!(TokenKind::Word.display(), "name");
    }

    #[test]
    fn test_line_end() {
        let newline = Token::new(TokenKind::Newline, Span::zero(), "\n".to_string());
        assert!(newline.is_line_end());
        let word = Token::new(TokenKind::Word, Span::zero(), "END".to_string());
        assert!(!word.is_line_end());
    }
}
