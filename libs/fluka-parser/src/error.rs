//! # Parse Errors
//!
//! Error types for the deck parser. Every parse error is fatal: a partially
//! read geometry is never handed to later stages.
//!
//! ## Example
//!
//! ```rust
//! use fluka_parser::error::ParseError;
//!
//! let error = ParseError::unexpected_token(")", "body name");
//! assert!(error.to_string().contains("unexpected token ')'"));
//! ```

use crate::span::Span;
use thiserror::Error;

// =============================================================================
// PARSE ERROR
// =============================================================================

/// A parse error with location information.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at line {line}, column {column}", line = .span.start.line + 1, column = .span.start.column + 1)]
pub struct ParseError {
    /// Error kind with details.
    pub kind: ParseErrorKind,
    /// Source location of error.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub const fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Create unexpected token error.
    ///
    /// ## Parameters
    ///
    /// - `found`: Token that was found
    /// - `expected`: Description of expected token
    pub fn unexpected_token(found: &str, expected: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken {
                found: found.to_string(),
                expected: expected.to_string(),
            },
            Span::zero(),
        )
    }

    /// Create unexpected EOF error.
    pub fn unexpected_eof(expected: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEof {
                expected: expected.to_string(),
            },
            Span::zero(),
        )
    }

    /// Attach a span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

// =============================================================================
// PARSE ERROR KIND
// =============================================================================

/// Kinds of parse errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    /// Found unexpected token.
    #[error("unexpected token '{found}', expected {expected}")]
    UnexpectedToken {
        /// Token that was found.
        found: String,
        /// Description of what was expected.
        expected: String,
    },

    /// Unexpected end of input.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// Description of what was expected.
        expected: String,
    },

    /// Character that starts no token.
    #[error("unknown character '{text}'")]
    UnknownCharacter {
        /// The offending text.
        text: String,
    },

    /// Number literal that does not parse.
    #[error("invalid number '{text}'")]
    InvalidNumber {
        /// The invalid text.
        text: String,
    },

    /// Body card with a code this parser does not know.
    #[error("unknown body code '{code}'")]
    UnknownBodyCode {
        /// The code as written.
        code: String,
    },

    /// Body card with the wrong number of parameters for its code.
    #[error("body {code} expects {expected} parameters, found {found}")]
    WrongParameterCount {
        /// Body code.
        code: String,
        /// Parameters required by the code.
        expected: usize,
        /// Parameters present on the card.
        found: usize,
    },

    /// Name longer than the card format allows.
    #[error("name '{name}' is longer than {max} characters")]
    NameTooLong {
        /// The name as written.
        name: String,
        /// Maximum accepted length.
        max: usize,
    },

    /// `$end_*` without a matching `$start_*`, or a scope left open.
    #[error("unbalanced directive '{directive}'")]
    UnbalancedDirective {
        /// Directive text.
        directive: String,
    },

    /// `$start_*` opened while the same kind of scope is already open.
    #[error("directive '{directive}' cannot be nested")]
    NestedDirective {
        /// Directive text.
        directive: String,
    },

    /// Zone with no terms, e.g. `| |`.
    #[error("empty zone")]
    EmptyZone,

    /// Parenthesised sub-zones nested beyond the supported depth.
    #[error("sub-zones nested deeper than {max} levels")]
    ZoneTooDeep {
        /// Maximum nesting depth.
        max: usize,
    },

    /// Card that is understood but deliberately not supported.
    #[error("unsupported card '{card}'")]
    UnsupportedCard {
        /// Card keyword.
        card: String,
    },
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    #[test]
    fn test_unexpected_token_display() {
        let error = ParseError::unexpected_token(")", "body name");
        let msg = error.to_string();
        assert!(msg.contains("unexpected token ')'"));
        assert!(msg.contains("body name"));
    }

    #[test]
    fn test_unexpected_eof_display() {
        let error = ParseError::unexpected_eof("END");
        assert!(error.to_string().contains("unexpected end of input, expected END"));
    }

    #[test]
    fn test_error_reports_one_based_location() {
        let span = Span::new(Position::new(12, 2, 4), Position::new(13, 2, 5));
        let error = ParseError::new(ParseErrorKind::EmptyZone, span);
        assert_eq!(error.to_string(), "empty zone at line 3, column 5");
    }

    #[test]
    fn test_wrong_parameter_count_display() {
        let kind = ParseErrorKind::WrongParameterCount {
            code: "SPH".to_string(),
            expected: 4,
            found: 3,
        };
        assert_eq!(kind.to_string(), "body SPH expects 4 parameters, found 3");
    }
}
