//! # Deck Parser
//!
//! Recursive descent parser for free-format geometry decks.
//!
//! A deck is read section by section:
//!
//! 1. preamble cards up to `GEOBEGIN` (and its title line)
//! 2. body cards and scope directives up to `END`
//! 3. region cards up to `END`
//! 4. trailer cards: `GEOEND`, `ASSIGNMA`, `ROT-DEFI` and anything else
//!
//! Every error is fatal. The parser never resynchronizes, so a deck either
//! parses completely or not at all.
//!
//! ## Example
//!
//! ```rust
//! use fluka_parser::lexer::Lexer;
//! use fluka_parser::parser::Parser;
//!
//! let source = "SPH S1 0 0 0 5\nEND\nR1 5 +S1\nEND\n";
//! let deck = Parser::new(Lexer::new(source).tokenize()).parse_deck().unwrap();
//! assert_eq!(deck.bodies.len(), 1);
//! assert_eq!(deck.regions.len(), 1);
//! ```

mod cards;
mod regions;

use config::constants::MAX_NAME_LENGTH;

use crate::ast::{BodyCode, Deck};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Token, TokenKind};
use crate::span::Span;

pub(crate) use cards::DirectiveScope;

/// Card opening the geometry.
const GEOBEGIN: &str = "GEOBEGIN";
/// Card closing the geometry.
const GEOEND: &str = "GEOEND";
/// Sentinel closing the body and region sections.
const END: &str = "END";
/// Roto-translation card.
const ROT_DEFI: &str = "ROT-DEFI";
/// Material assignment card.
const ASSIGNMA: &str = "ASSIGNMA";
/// Material composition card; rejected.
const COMPOUND: &str = "COMPOUND";
/// Lattice card; rejected.
const LATTICE: &str = "LATTICE";

// =============================================================================
// PARSER
// =============================================================================

/// Recursive descent parser over a token stream.
pub struct Parser {
    /// Token stream, always ending with EOF.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
    /// Directive scopes in force while reading bodies.
    scope: DirectiveScope,
}

impl Parser {
    /// Create a new parser.
    ///
    /// ## Parameters
    ///
    /// - `tokens`: Tokens from the lexer, ending with EOF
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            scope: DirectiveScope::default(),
        }
    }

    /// Parse a complete deck.
    pub fn parse_deck(&mut self) -> Result<Deck, ParseError> {
        let start = self.peek().span;
        let mut deck = Deck::default();

        if self.parse_preamble(&mut deck)? {
            self.parse_body_section(&mut deck)?;
            self.parse_region_section(&mut deck)?;
            self.parse_trailer(&mut deck)?;
        }

        deck.span = start.merge(self.peek().span);
        Ok(deck)
    }

    // =========================================================================
    // SECTIONS
    // =========================================================================

    /// Read cards before the body section.
    ///
    /// ## Returns
    ///
    /// `true` if a body section follows, `false` for blank input.
    ///
    /// ## Errors
    ///
    /// Input holding cards but no body section ends too early. A line shaped
    /// like a body card (`CODE NAME number…`) starts the body section even
    /// when its code is unknown, so the code is reported instead of skipped.
    fn parse_preamble(&mut self, deck: &mut Deck) -> Result<bool, ParseError> {
        loop {
            self.skip_newlines();
            let token = self.peek().clone();
            match token.kind {
                TokenKind::Eof if deck.is_blank() => return Ok(false),
                TokenKind::Eof => return Err(self.unexpected_eof(END)),
                TokenKind::Directive => return Ok(true),
                TokenKind::Word if token.text == GEOBEGIN => {
                    self.skip_line();
                    self.skip_title_line();
                    return Ok(true);
                }
                TokenKind::Word if BodyCode::from_keyword(&token.text).is_some() => {
                    return Ok(true);
                }
                TokenKind::Word if self.is_outer_card(&token.text) => {
                    self.parse_outer_card(deck)?
                }
                TokenKind::Word if self.looks_like_body() => return Ok(true),
                TokenKind::Word => self.parse_outer_card(deck)?,
                _ => return Err(self.unexpected("card keyword")),
            }
        }
    }

    /// Read body cards, directives and roto-translations up to `END`.
    fn parse_body_section(&mut self, deck: &mut Deck) -> Result<(), ParseError> {
        loop {
            self.skip_newlines();
            let token = self.peek().clone();
            match token.kind {
                TokenKind::Eof => return Err(self.unexpected_eof(END)),
                TokenKind::Directive => self.parse_directive()?,
                TokenKind::Word if token.text == END => {
                    self.scope.ensure_closed(token.span)?;
                    self.skip_line();
                    return Ok(());
                }
                TokenKind::Word if token.text == ROT_DEFI => {
                    let card = self.parse_rot_defi()?;
                    deck.rotdefis.push(card);
                }
                TokenKind::Word => {
                    let card = self.parse_body()?;
                    deck.bodies.push(card);
                }
                _ => return Err(self.unexpected("body code")),
            }
        }
    }

    /// Read region cards up to `END`.
    fn parse_region_section(&mut self, deck: &mut Deck) -> Result<(), ParseError> {
        loop {
            self.skip_newlines();
            let token = self.peek().clone();
            match token.kind {
                TokenKind::Eof => return Err(self.unexpected_eof(END)),
                TokenKind::Word if token.text == END => {
                    self.skip_line();
                    return Ok(());
                }
                TokenKind::Word if token.text == LATTICE => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnsupportedCard { card: token.text },
                        token.span,
                    ));
                }
                TokenKind::Word => {
                    let region = self.parse_region()?;
                    deck.regions.push(region);
                }
                _ => return Err(self.unexpected("region name")),
            }
        }
    }

    /// Read everything after the region section.
    fn parse_trailer(&mut self, deck: &mut Deck) -> Result<(), ParseError> {
        loop {
            self.skip_newlines();
            let token = self.peek().clone();
            match token.kind {
                TokenKind::Eof => return Ok(()),
                TokenKind::Word if token.text == GEOEND => self.skip_line(),
                TokenKind::Word if token.text == LATTICE => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnsupportedCard { card: token.text },
                        token.span,
                    ));
                }
                TokenKind::Word => self.parse_outer_card(deck)?,
                _ => return Err(self.unexpected("card keyword")),
            }
        }
    }

    /// Interpret a card found outside the body and region sections.
    fn parse_outer_card(&mut self, deck: &mut Deck) -> Result<(), ParseError> {
        let token = self.peek().clone();
        match token.text.as_str() {
            ROT_DEFI => {
                let card = self.parse_rot_defi()?;
                deck.rotdefis.push(card);
            }
            ASSIGNMA => {
                let card = self.parse_assignma()?;
                deck.assignments.push(card);
            }
            COMPOUND | LATTICE => {
                return Err(ParseError::new(
                    ParseErrorKind::UnsupportedCard { card: token.text },
                    token.span,
                ));
            }
            _ => {
                deck.ignored_cards.push(token.text);
                self.skip_line();
            }
        }
        Ok(())
    }

    /// Whether `keyword` is a card with its own meaning outside the sections.
    fn is_outer_card(&self, keyword: &str) -> bool {
        matches!(keyword, ROT_DEFI | ASSIGNMA | COMPOUND | LATTICE | GEOEND)
    }

    /// Whether the current line reads `WORD WORD NUMBER`.
    fn looks_like_body(&self) -> bool {
        self.peek_at(1).kind == TokenKind::Word && self.peek_at(2).kind == TokenKind::Number
    }

    /// Skip the title line after `GEOBEGIN`, which starts with a number.
    fn skip_title_line(&mut self) {
        self.skip_newlines();
        if self.check(TokenKind::Number) {
            self.skip_line();
        }
    }

    // =========================================================================
    // TOKEN ACCESS
    // =========================================================================

    /// Get current token.
    fn peek(&self) -> &Token {
        let index = self.current.min(self.tokens.len().saturating_sub(1));
        &self.tokens[index]
    }

    /// Get the token `offset` positions ahead.
    fn peek_at(&self, offset: usize) -> &Token {
        let index = (self.current + offset).min(self.tokens.len().saturating_sub(1));
        &self.tokens[index]
    }

    /// Check if current token matches kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Check if at end of file.
    fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Advance to next token, returning the consumed one.
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Try to consume token if it matches.
    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume token if it matches expected kind.
    ///
    /// ## Parameters
    ///
    /// - `kind`: Expected token kind
    /// - `expected`: Description used in the error message
    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Consume a name that defines something, enforcing the width limit.
    fn expect_defined_name(&mut self, expected: &str) -> Result<Token, ParseError> {
        let token = self.expect(TokenKind::Word, expected)?;
        if token.text.chars().count() > MAX_NAME_LENGTH {
            return Err(ParseError::new(
                ParseErrorKind::NameTooLong {
                    name: token.text,
                    max: MAX_NAME_LENGTH,
                },
                token.span,
            ));
        }
        Ok(token)
    }

    /// Consume a number literal.
    ///
    /// Fortran `d`/`D` exponents are accepted.
    fn expect_number(&mut self, expected: &str) -> Result<f64, ParseError> {
        let token = self.expect(TokenKind::Number, expected)?;
        parse_float(&token)
    }

    /// Require the end of the current card line.
    fn expect_line_end(&mut self) -> Result<(), ParseError> {
        if self.peek().is_line_end() {
            self.match_token(TokenKind::Newline);
            Ok(())
        } else {
            Err(self.unexpected("end of line"))
        }
    }

    /// Require that nothing but blank lines remains.
    pub(crate) fn expect_expression_end(&mut self) -> Result<(), ParseError> {
        self.skip_newlines();
        if self.is_at_end() {
            Ok(())
        } else {
            Err(self.unexpected("end of expression"))
        }
    }

    /// Skip blank lines.
    fn skip_newlines(&mut self) {
        while self.match_token(TokenKind::Newline) {}
    }

    /// Skip the rest of the current line, including its line break.
    fn skip_line(&mut self) {
        while !self.peek().is_line_end() {
            self.advance();
        }
        self.match_token(TokenKind::Newline);
    }

    /// Error for the current token.
    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        match token.kind {
            TokenKind::Eof => self.unexpected_eof(expected),
            TokenKind::Error => ParseError::new(
                ParseErrorKind::UnknownCharacter {
                    text: token.text.clone(),
                },
                token.span,
            ),
            TokenKind::Newline => {
                ParseError::unexpected_token("end of line", expected).with_span(token.span)
            }
            _ => ParseError::unexpected_token(&token.text, expected).with_span(token.span),
        }
    }

    /// End-of-input error at the current position.
    fn unexpected_eof(&self, expected: &str) -> ParseError {
        ParseError::unexpected_eof(expected).with_span(self.peek().span)
    }
}

/// Parse a number token into `f64`.
pub(crate) fn parse_float(token: &Token) -> Result<f64, ParseError> {
    let normalized = token.text.replace(|c| c == 'd' || c == 'D', "e");
    normalized.parse::<f64>().map_err(|_| {
        ParseError::new(
            ParseErrorKind::InvalidNumber {
                text: token.text.clone(),
            },
            token.span,
        )
    })
}

/// Span from the start of `first` to the end of `last`.
pub(crate) fn covering(first: Span, last: Span) -> Span {
    first.merge(last)
}

#[cfg(test)]
mod tests;
