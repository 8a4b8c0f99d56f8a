//! # Geometry Deck Parser
//!
//! Lexer, recursive descent parser, AST and printer for free-format
//! combinatorial-geometry decks: body cards, region cards built from zone
//! expressions, roto-translations and material assignments.
//!
//! ## Example
//!
//! ```rust
//! use fluka_parser::parse;
//!
//! let deck = parse("RPP BOX1 -5 5 -5 5 -5 5\nEND\nINSIDE 5 +BOX1\nEND\nGEOEND\n").unwrap();
//! assert_eq!(deck.bodies[0].name, "BOX1");
//! assert_eq!(deck.regions[0].zones.len(), 1);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod span;

pub use ast::{AssignCard, BodyCard, BodyCode, Deck, RegionCard, RotDefiCard, Sign, Term, TransformRef, ZoneExpr};
pub use error::{ParseError, ParseErrorKind};
pub use span::{Position, Span, Spanned};

use lexer::Lexer;
use parser::Parser;

/// Parse a complete geometry deck.
///
/// ## Parameters
///
/// - `source`: Deck text
///
/// ## Returns
///
/// The deck, or the first (fatal) parse error.
pub fn parse(source: &str) -> Result<Deck, ParseError> {
    let tokens = Lexer::new(source).tokenize();
    Parser::new(tokens).parse_deck()
}

/// Parse a bare zone expression such as `+A -B | +C -(+D -E)`.
///
/// The expression may span several lines following the region card
/// continuation rules.
///
/// ## Example
///
/// ```rust
/// use fluka_parser::parse_zone_expression;
///
/// let zones = parse_zone_expression("| +A -B | +C |").unwrap();
/// assert_eq!(zones.len(), 2);
/// ```
pub fn parse_zone_expression(source: &str) -> Result<Vec<ZoneExpr>, ParseError> {
    let tokens = Lexer::new(source).tokenize();
    let mut parser = Parser::new(tokens);
    let zones = parser.parse_zone_union()?;
    parser.expect_expression_end()?;
    Ok(zones)
}
