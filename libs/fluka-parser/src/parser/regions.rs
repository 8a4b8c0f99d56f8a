//! Region cards and zone expressions.
//!
//! ```text
//! region    := NAME COUNT zoneUnion
//! zoneUnion := "|"? zone ("|" zone)* "|"?
//! zone      := term+
//! term      := ("+" | "-") (NAME | "(" zone ")")
//! ```
//!
//! A region card may continue on following lines that start with one of
//! `+ - | (`. Inside parentheses every line break is a continuation.

use config::constants::MAX_ZONE_DEPTH;

use super::{covering, Parser};
use crate::ast::{RegionCard, Sign, Term, ZoneExpr};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::TokenKind;
use crate::span::Spanned;

impl Parser {
    /// Parse `NAME COUNT zoneUnion`.
    pub(super) fn parse_region(&mut self) -> Result<RegionCard, ParseError> {
        let name = self.expect_defined_name("region name")?;
        let count = self.expect(TokenKind::Number, "neighbour count")?;
        let neighbours = count.text.parse::<u32>().map_err(|_| {
            ParseError::new(
                ParseErrorKind::InvalidNumber {
                    text: count.text.clone(),
                },
                count.span,
            )
        })?;

        let zones = self.parse_zone_union()?;
        let end = zones.last().map_or(count.span, |zone| zone.span);
        self.expect_line_end()?;

        Ok(RegionCard {
            name: name.text,
            neighbours,
            zones,
            span: covering(name.span, end),
        })
    }

    /// Parse a union of zones separated by `|`.
    ///
    /// A leading or trailing `|` is accepted; two consecutive separators
    /// leave an empty zone, which is an error.
    pub(crate) fn parse_zone_union(&mut self) -> Result<Vec<ZoneExpr>, ParseError> {
        let mut zones = Vec::new();

        self.skip_continuation(0);
        self.match_token(TokenKind::Pipe);

        loop {
            zones.push(self.parse_zone(0)?);
            self.skip_continuation(0);
            if !self.match_token(TokenKind::Pipe) {
                break;
            }
            self.skip_continuation(0);
            if self.peek().is_line_end() {
                break;
            }
        }

        Ok(zones)
    }

    /// Parse an intersection of signed terms.
    fn parse_zone(&mut self, depth: usize) -> Result<ZoneExpr, ParseError> {
        self.skip_continuation(depth);
        if !matches!(self.peek().kind, TokenKind::Plus | TokenKind::Minus) {
            return Err(match self.peek().kind {
                TokenKind::Pipe | TokenKind::RParen | TokenKind::Newline | TokenKind::Eof => {
                    ParseError::new(ParseErrorKind::EmptyZone, self.peek().span)
                }
                _ => self.unexpected("'+' or '-'"),
            });
        }

        let mut terms = Vec::new();
        while matches!(self.peek().kind, TokenKind::Plus | TokenKind::Minus) {
            terms.push(self.parse_term(depth)?);
            self.skip_continuation(depth);
        }

        let span = match (terms.first(), terms.last()) {
            (Some(first), Some(last)) => covering(first.span(), last.span()),
            _ => self.peek().span,
        };
        Ok(ZoneExpr { terms, span })
    }

    /// Parse `+NAME`, `-NAME`, `+( zone )` or `-( zone )`.
    fn parse_term(&mut self, depth: usize) -> Result<Term, ParseError> {
        let sign_token = self.advance();
        let sign = if sign_token.kind == TokenKind::Plus {
            Sign::Plus
        } else {
            Sign::Minus
        };

        if self.check(TokenKind::LParen) {
            let open = self.advance();
            let inner_depth = depth + 1;
            if inner_depth > MAX_ZONE_DEPTH {
                return Err(ParseError::new(
                    ParseErrorKind::ZoneTooDeep {
                        max: MAX_ZONE_DEPTH,
                    },
                    open.span,
                ));
            }
            let zone = self.parse_zone(inner_depth)?;
            self.skip_continuation(inner_depth);
            let close = self.expect(TokenKind::RParen, "')'")?;
            return Ok(Term::SubZone {
                sign,
                zone,
                span: covering(sign_token.span, close.span),
            });
        }

        let name = self.expect(TokenKind::Word, "body name")?;
        Ok(Term::Body {
            sign,
            name: name.text,
            span: covering(sign_token.span, name.span),
        })
    }

    /// Consume line breaks that continue the current card.
    ///
    /// At depth zero a break continues the card only if the next line starts
    /// with an expression operator; inside parentheses every break does.
    fn skip_continuation(&mut self, depth: usize) {
        let mut offset = 0;
        while self.peek_at(offset).kind == TokenKind::Newline {
            offset += 1;
        }
        if offset == 0 {
            return;
        }

        let next = self.peek_at(offset).kind;
        let continues = if depth > 0 {
            next != TokenKind::Eof
        } else {
            next.is_expression_operator()
        };
        if continues {
            for _ in 0..offset {
                self.advance();
            }
        }
    }
}
