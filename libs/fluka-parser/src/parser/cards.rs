//! Body cards, scope directives, `ROT-DEFI` and `ASSIGNMA`.

use super::Parser;
use crate::ast::{AssignCard, BodyCard, BodyCode, RotDefiCard, TransformRef};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::TokenKind;
use crate::span::Span;

const START_EXPANSION: &str = "$start_expansion";
const END_EXPANSION: &str = "$end_expansion";
const START_TRANSLAT: &str = "$start_translat";
const END_TRANSLAT: &str = "$end_translat";
const START_TRANSFORM: &str = "$start_transform";
const END_TRANSFORM: &str = "$end_transform";

/// Directive scopes currently open in the body section.
///
/// Each kind can be open at most once; different kinds nest freely.
#[derive(Debug, Clone, Default)]
pub(crate) struct DirectiveScope {
    expansion: Option<f64>,
    translation: Option<[f64; 3]>,
    transform: Option<TransformRef>,
}

impl DirectiveScope {
    /// Fail if any scope is still open when the body section ends.
    pub(crate) fn ensure_closed(&self, span: Span) -> Result<(), ParseError> {
        let open = [
            (self.expansion.is_some(), START_EXPANSION),
            (self.translation.is_some(), START_TRANSLAT),
            (self.transform.is_some(), START_TRANSFORM),
        ];
        match open.into_iter().find(|(is_open, _)| *is_open) {
            Some((_, directive)) => Err(ParseError::new(
                ParseErrorKind::UnbalancedDirective {
                    directive: directive.to_string(),
                },
                span,
            )),
            None => Ok(()),
        }
    }
}

fn nested(directive: &str, span: Span) -> ParseError {
    ParseError::new(
        ParseErrorKind::NestedDirective {
            directive: directive.to_string(),
        },
        span,
    )
}

fn unbalanced(directive: &str, span: Span) -> ParseError {
    ParseError::new(
        ParseErrorKind::UnbalancedDirective {
            directive: directive.to_string(),
        },
        span,
    )
}

impl Parser {
    /// Parse a `$start_*` or `$end_*` directive line.
    pub(super) fn parse_directive(&mut self) -> Result<(), ParseError> {
        let token = self.advance();
        let span = token.span;

        match token.text.as_str() {
            START_EXPANSION => {
                if self.scope.expansion.is_some() {
                    return Err(nested(START_EXPANSION, span));
                }
                let factor = self.expect_number("expansion factor")?;
                self.scope.expansion = Some(factor);
            }
            START_TRANSLAT => {
                if self.scope.translation.is_some() {
                    return Err(nested(START_TRANSLAT, span));
                }
                let dx = self.expect_number("x offset")?;
                let dy = self.expect_number("y offset")?;
                let dz = self.expect_number("z offset")?;
                self.scope.translation = Some([dx, dy, dz]);
            }
            START_TRANSFORM => {
                if self.scope.transform.is_some() {
                    return Err(nested(START_TRANSFORM, span));
                }
                let inverse = self.match_token(TokenKind::Minus);
                let name = self.expect(TokenKind::Word, "roto-translation name")?;
                self.scope.transform = Some(TransformRef {
                    name: name.text,
                    inverse,
                });
            }
            END_EXPANSION => {
                if self.scope.expansion.take().is_none() {
                    return Err(unbalanced(END_EXPANSION, span));
                }
            }
            END_TRANSLAT => {
                if self.scope.translation.take().is_none() {
                    return Err(unbalanced(END_TRANSLAT, span));
                }
            }
            END_TRANSFORM => {
                if self.scope.transform.take().is_none() {
                    return Err(unbalanced(END_TRANSFORM, span));
                }
            }
            other => {
                return Err(ParseError::unexpected_token(other, "$start_* or $end_* directive")
                    .with_span(span));
            }
        }

        self.expect_line_end()
    }

    /// Parse `CODE NAME p1 ... pn`.
    ///
    /// Parameters may continue on following lines as long as those lines
    /// start with a number.
    pub(super) fn parse_body(&mut self) -> Result<BodyCard, ParseError> {
        let code_token = self.advance();
        let code = BodyCode::from_keyword(&code_token.text).ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::UnknownBodyCode {
                    code: code_token.text.clone(),
                },
                code_token.span,
            )
        })?;
        let name = self.expect_defined_name("body name")?;

        let expected = code.param_count();
        let mut params = Vec::with_capacity(expected);
        let mut end = name.span;
        loop {
            while self.check(TokenKind::Number) {
                let token = self.advance();
                params.push(super::parse_float(&token)?);
                end = token.span;
            }

            let continues = self.check(TokenKind::Newline)
                && self.peek_at(1).kind == TokenKind::Number
                && params.len() < expected;
            if continues {
                self.advance();
                continue;
            }
            break;
        }

        if !self.peek().is_line_end() {
            return Err(self.unexpected("number"));
        }
        if params.len() != expected {
            return Err(ParseError::new(
                ParseErrorKind::WrongParameterCount {
                    code: code.keyword().to_string(),
                    expected,
                    found: params.len(),
                },
                code_token.span.merge(end),
            ));
        }
        self.expect_line_end()?;

        Ok(BodyCard {
            code,
            name: name.text,
            params,
            expansion: self.scope.expansion,
            translation: self.scope.translation,
            transform: self.scope.transform.clone(),
            span: code_token.span.merge(end),
        })
    }

    /// Parse `ROT-DEFI axis polar azimuth dx dy dz NAME`.
    pub(super) fn parse_rot_defi(&mut self) -> Result<RotDefiCard, ParseError> {
        let keyword = self.advance();
        let axis = match self.peek().kind {
            TokenKind::Word | TokenKind::Number => self.advance().text,
            _ => return Err(self.unexpected("rotation axis")),
        };
        let polar = self.expect_number("polar angle")?;
        let azimuth = self.expect_number("azimuthal angle")?;
        let dx = self.expect_number("x offset")?;
        let dy = self.expect_number("y offset")?;
        let dz = self.expect_number("z offset")?;
        let name = self.expect_defined_name("roto-translation name")?;
        self.expect_line_end()?;

        Ok(RotDefiCard {
            axis,
            polar,
            azimuth,
            translation: [dx, dy, dz],
            name: name.text,
            span: keyword.span.merge(name.span),
        })
    }

    /// Parse `ASSIGNMA MATERIAL REGION [LAST_REGION] [numbers...]`.
    ///
    /// Trailing numeric fields (step, field flags) are accepted and dropped.
    pub(super) fn parse_assignma(&mut self) -> Result<AssignCard, ParseError> {
        let keyword = self.advance();
        let material = self.expect(TokenKind::Word, "material name")?;
        let region = self.expect(TokenKind::Word, "region name")?;
        let mut end = region.span;

        let last_region = if self.check(TokenKind::Word) {
            let token = self.advance();
            end = token.span;
            Some(token.text)
        } else {
            None
        };
        while self.check(TokenKind::Number) {
            end = self.advance().span;
        }
        self.expect_line_end()?;

        Ok(AssignCard {
            material: material.text,
            region: region.text,
            last_region,
            span: keyword.span.merge(end),
        })
    }
}
