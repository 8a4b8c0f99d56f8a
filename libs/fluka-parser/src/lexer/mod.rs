//! # Deck Lexer
//!
//! Tokenizes free-format geometry decks.
//!
//! The format is line oriented: every line break becomes a
//! [`TokenKind::Newline`] token. Lines whose first non-blank character is
//! `*` are comments, and `!` comments out the rest of a line.
//!
//! ## Example
//!
//! ```rust
//! use fluka_parser::lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("SPH S1 0 0 0 5").tokenize();
//! assert_eq!(tokens[0].kind, TokenKind::Word);
//! assert_eq!(tokens[2].kind, TokenKind::Number);
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind};

use crate::span::{Position, Span};

/// The only card keyword containing a dash.
const ROT_DEFI_TAIL: &str = "-DEFI";

// =============================================================================
// LEXER
// =============================================================================

/// Deck lexer.
///
/// Converts source text into a stream of tokens. Never fails: characters
/// that start no token become [`TokenKind::Error`] tokens and the parser
/// decides whether they matter.
pub struct Lexer<'a> {
    /// Source text being lexed.
    source: &'a str,
    /// Character cursor.
    cursor: Cursor<'a>,
    /// Collected tokens.
    tokens: Vec<Token>,
    /// Whether a token was already produced on the current line.
    line_started: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
            tokens: Vec::new(),
            line_started: false,
        }
    }

    /// Tokenize the entire source.
    ///
    /// ## Returns
    ///
    /// Vector of tokens ending with an EOF token.
    pub fn tokenize(mut self) -> Vec<Token> {
        while !self.cursor.is_eof() {
            self.skip_blanks_and_comments();
            if self.cursor.is_eof() {
                break;
            }
            self.scan_token();
        }

        let eof_pos = self.cursor.position();
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(eof_pos, eof_pos), String::new()));
        self.tokens
    }

    /// Skip blanks (not line breaks) and comments.
    fn skip_blanks_and_comments(&mut self) {
        loop {
            self.cursor
                .advance_while(|c| c.is_whitespace() && c != '\n');

            match self.cursor.peek() {
                Some('*') if !self.line_started => self.skip_to_line_end(),
                Some('!') => self.skip_to_line_end(),
                _ => break,
            }
        }
    }

    /// Consume everything up to (not including) the next line break.
    fn skip_to_line_end(&mut self) {
        self.cursor.advance_while(|c| c != '\n');
    }

    /// Scan a single token.
    fn scan_token(&mut self) {
        let start = self.cursor.position();
        let c = match self.cursor.peek() {
            Some(c) => c,
            None => return,
        };

        if c == '\n' {
            self.cursor.advance();
            self.push(TokenKind::Newline, start);
            self.line_started = false;
            return;
        }
        self.line_started = true;

        match c {
            '0'..='9' => self.scan_number(start),
            '.' if self.cursor.peek_next().is_some_and(|n| n.is_ascii_digit()) => {
                self.scan_number(start)
            }
            '+' | '-' if self.sign_starts_number() => {
                self.cursor.advance();
                self.scan_number(start);
            }
            'a'..='z' | 'A'..='Z' | '_' => self.scan_word(start),
            '$' => {
                self.cursor.advance();
                self.cursor.advance_while(is_word_char);
                self.push(TokenKind::Directive, start);
            }
            _ => {
                self.cursor.advance();
                let kind = match c {
                    '+' => TokenKind::Plus,
                    '-' => TokenKind::Minus,
                    '|' => TokenKind::Pipe,
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    _ => TokenKind::Error,
                };
                self.push(kind, start);
            }
        }
    }

    /// A sign directly followed by a digit (or `.digit`) is part of a number.
    ///
    /// Names always start with a letter, so `-5` can never be a subtracted
    /// body.
    fn sign_starts_number(&self) -> bool {
        let mut rest = self.cursor.rest().chars().skip(1);
        match rest.next() {
            Some(d) if d.is_ascii_digit() => true,
            Some('.') => rest.next().is_some_and(|d| d.is_ascii_digit()),
            _ => false,
        }
    }

    /// Scan a number literal (sign already consumed if present).
    fn scan_number(&mut self, start: Position) {
        let mut has_dot = false;
        let mut has_exponent = false;

        while let Some(c) = self.cursor.peek() {
            match c {
                '0'..='9' => {
                    self.cursor.advance();
                }
                '.' if !has_dot && !has_exponent => {
                    has_dot = true;
                    self.cursor.advance();
                }
                'e' | 'E' | 'd' | 'D' if !has_exponent => {
                    has_exponent = true;
                    self.cursor.advance();
                    if matches!(self.cursor.peek(), Some('+') | Some('-')) {
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }

        self.push(TokenKind::Number, start);
    }

    /// Scan a card keyword or name.
    fn scan_word(&mut self, start: Position) {
        self.cursor.advance_while(is_word_char);

        let text = &self.source[start.byte..self.cursor.position().byte];
        if text == "ROT" && self.cursor.starts_with(ROT_DEFI_TAIL) {
            self.cursor.advance_by(ROT_DEFI_TAIL.len());
        }

        self.push(TokenKind::Word, start);
    }

    fn push(&mut self, kind: TokenKind, start: Position) {
        let end = self.cursor.position();
        let text = &self.source[start.byte..end.byte];
        self.tokens
            .push(Token::new(kind, Span::new(start, end), text.to_string()));
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).tokenize().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_body_card() {
        let tokens = Lexer::new("RPP box1 -5 5 -5. .5 -1e2 1E+2").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Word);
        assert_eq!(tokens[1].text, "box1");
        let numbers: Vec<&str> = tokens[2..8].iter().map(|t| t.text.as_str()).collect();
        assert_eq!(numbers, ["-5", "5", "-5.", ".5", "-1e2", "1E+2"]);
        assert!(tokens[2..8].iter().all(|t| t.kind == TokenKind::Number));
        assert_eq!(tokens[8].kind, TokenKind::Eof);
    }

    #[test]
    fn test_tokenize_region_expression() {
        assert_eq!(
            kinds("+A -(+B -C) | +D"),
            vec![
                TokenKind::Plus,
                TokenKind::Word,
                TokenKind::Minus,
                TokenKind::LParen,
                TokenKind::Plus,
                TokenKind::Word,
                TokenKind::Minus,
                TokenKind::Word,
                TokenKind::RParen,
                TokenKind::Pipe,
                TokenKind::Plus,
                TokenKind::Word,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_rot_defi_keyword() {
        let tokens = Lexer::new("ROT-DEFI 3 90 45 0 0 0 R1").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Word);
        assert_eq!(tokens[0].text, "ROT-DEFI");
        assert_eq!(tokens[1].text, "3");
    }

    #[test]
    fn test_rot_is_plain_word_otherwise() {
        let tokens = Lexer::new("+ROT -B").tokenize();
        assert_eq!(tokens[1].text, "ROT");
        assert_eq!(tokens[2].kind, TokenKind::Minus);
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = Lexer::new("* full line\nSPH s 0 0 0 1 ! trailing\n").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Newline);
        assert_eq!(tokens[1].text, "SPH");
        let last_number = tokens.iter().rfind(|t| t.kind == TokenKind::Number).map(|t| t.text.clone());
        assert_eq!(last_number.as_deref(), Some("1"));
    }

    #[test]
    fn test_star_mid_line_is_error() {
        let tokens = Lexer::new("+A * +B").tokenize();
        assert_eq!(tokens[2].kind, TokenKind::Error);
    }

    #[test]
    fn test_directive() {
        let tokens = Lexer::new("$start_transform -R1").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Directive);
        assert_eq!(tokens[0].text, "$start_transform");
        assert_eq!(tokens[1].kind, TokenKind::Minus);
        assert_eq!(tokens[2].text, "R1");
    }

    #[test]
    fn test_newlines_are_tokens() {
        assert_eq!(
            kinds("END\n\nEND"),
            vec![
                TokenKind::Word,
                TokenKind::Newline,
                TokenKind::Newline,
                TokenKind::Word,
                TokenKind::Eof,
            ]
        );
    }
}
