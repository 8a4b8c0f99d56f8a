//! Parser tests.

use super::*;
use crate::ast::{Sign, Term};
use crate::lexer::Lexer;

fn parse(source: &str) -> Result<Deck, ParseError> {
    Parser::new(Lexer::new(source).tokenize()).parse_deck()
}

fn parse_ok(source: &str) -> Deck {
    match parse(source) {
        Ok(deck) => deck,
        Err(error) => panic!("unexpected parse error: {error}"),
    }
}

fn parse_err(source: &str) -> ParseErrorKind {
    match parse(source) {
        Ok(deck) => panic!("expected a parse error, got {deck:?}"),
        Err(error) => error.kind,
    }
}

const SIMPLE: &str = "\
GEOBEGIN                                                  COMBNAME
    0    0          simple target
RPP BLKBODY -500 500 -500 500 -500 500
SPH TARGET 0 0 0 5
END
BLKHOLE 5 +BLKBODY -TARGET
TARGREG 5 +TARGET
END
GEOEND
ASSIGNMA BLCKHOLE BLKHOLE
ASSIGNMA IRON TARGREG
";

#[test]
fn test_parse_simple_deck() {
    let deck = parse_ok(SIMPLE);
    assert_eq!(deck.bodies.len(), 2);
    assert_eq!(deck.bodies[0].code, BodyCode::Rpp);
    assert_eq!(deck.bodies[1].params, vec![0.0, 0.0, 0.0, 5.0]);
    assert_eq!(deck.regions.len(), 2);
    assert_eq!(deck.regions[0].neighbours, 5);
    assert_eq!(deck.regions[0].zones[0].terms.len(), 2);
    assert_eq!(deck.assignments.len(), 2);
    assert_eq!(deck.assignments[1].material, "IRON");
}

#[test]
fn test_preamble_cards_are_recorded() {
    let deck = parse_ok("TITLE\nBEAM 10.0\nGEOBEGIN\nSPH S 0 0 0 1\nEND\nR 5 +S\nEND\n");
    assert_eq!(deck.ignored_cards, vec!["TITLE", "BEAM"]);
}

#[test]
fn test_deck_without_geobegin() {
    let deck = parse_ok("SPH S 0 0 0 1\nEND\nR 5 +S\nEND\n");
    assert_eq!(deck.bodies.len(), 1);
}

#[test]
fn test_geoend_is_optional() {
    let deck = parse_ok("SPH S 0 0 0 1\nEND\nR 5 +S\nEND");
    assert_eq!(deck.regions.len(), 1);
}

#[test]
fn test_body_parameters_continue_on_next_line() {
    let deck = parse_ok("BOX B 0 0 0 1 0 0\n 0 1 0\n 0 0 1\nEND\nR 5 +B\nEND\n");
    assert_eq!(deck.bodies[0].params.len(), 12);
    assert_eq!(deck.bodies[0].params[11], 1.0);
}

#[test]
fn test_fortran_exponent() {
    let deck = parse_ok("SPH S 0 0 0 1.5D+01\nEND\nR 5 +S\nEND\n");
    assert_eq!(deck.bodies[0].params[3], 15.0);
}

#[test]
fn test_directives_scope_bodies() {
    let source = "\
ROT-DEFI z 90 45 0 0 0 R1
$start_transform -R1
$start_translat 1 2 3
SPH A 0 0 0 1
$end_translat
SPH B 0 0 0 1
$end_transform
$start_expansion 2
SPH C 0 0 0 1
$end_expansion
END
R 5 +A +B +C
END
";
    let deck = parse_ok(source);
    assert_eq!(deck.rotdefis.len(), 1);
    assert_eq!(deck.rotdefis[0].axis, "z");
    let [a, b, c] = &deck.bodies[..] else {
        panic!("expected three bodies");
    };
    assert_eq!(a.translation, Some([1.0, 2.0, 3.0]));
    assert_eq!(a.transform.as_ref().map(|t| t.inverse), Some(true));
    assert_eq!(b.translation, None);
    assert_eq!(b.transform.as_ref().map(|t| t.name.as_str()), Some("R1"));
    assert_eq!(c.transform, None);
    assert_eq!(c.expansion, Some(2.0));
}

#[test]
fn test_region_continuation_lines() {
    let source = "\
SPH A 0 0 0 1
SPH B 0 0 0 2
SPH C 0 0 0 3
END
R 5 +A
      -B
      | +C
END
";
    let deck = parse_ok(source);
    let region = &deck.regions[0];
    assert_eq!(region.zones.len(), 2);
    assert_eq!(region.zones[0].terms.len(), 2);
    assert_eq!(region.zones[1].terms[0].sign(), Sign::Plus);
}

#[test]
fn test_leading_and_trailing_pipes() {
    let deck = parse_ok("SPH A 0 0 0 1\nSPH B 5 0 0 1\nEND\nR 5 | +A | +B |\nEND\n");
    assert_eq!(deck.regions[0].zones.len(), 2);
}

#[test]
fn test_nested_sub_zone() {
    let deck = parse_ok("SPH A 0 0 0 9\nSPH B 0 0 0 5\nSPH C 0 0 0 2\nEND\nR 5 +A -(+B -C)\nEND\n");
    let zone = &deck.regions[0].zones[0];
    match &zone.terms[1] {
        Term::SubZone { sign, zone, .. } => {
            assert_eq!(*sign, Sign::Minus);
            assert_eq!(zone.terms.len(), 2);
        }
        other => panic!("expected sub-zone, got {other:?}"),
    }
}

#[test]
fn test_sub_zone_spans_lines() {
    let deck = parse_ok("SPH A 0 0 0 9\nSPH B 0 0 0 5\nEND\nR 5 +A -(\n+B\n)\nEND\n");
    assert_eq!(deck.regions[0].zones[0].body_count(), 2);
}

#[test]
fn test_unknown_body_code() {
    assert!(matches!(
        parse_err("FOO A 0 0 0 1\nEND\nR 5 +A\nEND\n"),
        ParseErrorKind::UnknownBodyCode { .. }
    ));
}

#[test]
fn test_unknown_body_code_after_preamble() {
    assert_eq!(
        parse_err("TITLE\nBEAM 10.0\nFOO A 0 0 0 1\nSPH B 0 0 0 1\nEND\nR 5 +B\nEND\n"),
        ParseErrorKind::UnknownBodyCode {
            code: "FOO".to_string()
        }
    );
}

#[test]
fn test_cards_without_body_section() {
    assert!(matches!(
        parse_err("R 5 +A -B\n"),
        ParseErrorKind::UnexpectedEof { .. }
    ));
    assert!(matches!(
        parse_err("TITLE\nBEAM 10.0\n"),
        ParseErrorKind::UnexpectedEof { .. }
    ));
}

#[test]
fn test_blank_input_is_an_empty_deck() {
    assert!(parse_ok("\n\n").is_blank());
}

#[test]
fn test_lattice_before_bodies_is_rejected() {
    assert!(matches!(
        parse_err("LATTICE CELL 1\nSPH A 0 0 0 1\nEND\nR 5 +A\nEND\n"),
        ParseErrorKind::UnsupportedCard { .. }
    ));
}

#[test]
fn test_wrong_parameter_count() {
    assert_eq!(
        parse_err("SPH A 0 0 0\nEND\nR 5 +A\nEND\n"),
        ParseErrorKind::WrongParameterCount {
            code: "SPH".to_string(),
            expected: 4,
            found: 3
        }
    );
    assert!(matches!(
        parse_err("SPH A 0 0 0 1 2\nEND\nR 5 +A\nEND\n"),
        ParseErrorKind::WrongParameterCount { found: 5, .. }
    ));
}

#[test]
fn test_name_too_long() {
    assert!(matches!(
        parse_err("SPH ABCDEFGHI 0 0 0 1\nEND\n"),
        ParseErrorKind::NameTooLong { max: 8, .. }
    ));
}

#[test]
fn test_unbalanced_directives() {
    assert!(matches!(
        parse_err("$end_translat\nEND\n"),
        ParseErrorKind::UnbalancedDirective { .. }
    ));
    assert!(matches!(
        parse_err("$start_expansion 2\nSPH A 0 0 0 1\nEND\nR 5 +A\nEND\n"),
        ParseErrorKind::UnbalancedDirective { .. }
    ));
}

#[test]
fn test_nested_directive_of_same_kind() {
    assert!(matches!(
        parse_err("$start_translat 1 0 0\n$start_translat 0 1 0\n"),
        ParseErrorKind::NestedDirective { .. }
    ));
}

#[test]
fn test_empty_zone_between_pipes() {
    assert_eq!(
        parse_err("SPH A 0 0 0 1\nEND\nR 5 +A | | +A\nEND\n"),
        ParseErrorKind::EmptyZone
    );
}

#[test]
fn test_region_without_zones() {
    assert_eq!(parse_err("SPH A 0 0 0 1\nEND\nR 5\nEND\n"), ParseErrorKind::EmptyZone);
}

#[test]
fn test_unmatched_parenthesis() {
    assert!(matches!(
        parse_err("SPH A 0 0 0 1\nEND\nR 5 +A -(+A\nEND\n"),
        ParseErrorKind::UnexpectedToken { .. }
    ));
}

#[test]
fn test_union_inside_parentheses_is_rejected() {
    assert!(matches!(
        parse_err("SPH A 0 0 0 1\nEND\nR 5 -(+A | +A)\nEND\n"),
        ParseErrorKind::UnexpectedToken { .. }
    ));
}

#[test]
fn test_missing_sign() {
    assert!(matches!(
        parse_err("SPH A 0 0 0 1\nEND\nR 5 A\nEND\n"),
        ParseErrorKind::UnexpectedToken { .. }
    ));
}

#[test]
fn test_missing_end_is_eof_error() {
    assert!(matches!(
        parse_err("SPH A 0 0 0 1\n"),
        ParseErrorKind::UnexpectedEof { .. }
    ));
}

#[test]
fn test_compound_fails_loudly() {
    assert_eq!(
        parse_err("COMPOUND 1.0 HYDROGEN 2.0 OXYGEN WATER\n"),
        ParseErrorKind::UnsupportedCard {
            card: "COMPOUND".to_string()
        }
    );
}

#[test]
fn test_lattice_is_unsupported() {
    assert!(matches!(
        parse_err("SPH A 0 0 0 1\nEND\nR 5 +A\nLATTICE CELL1\nEND\n"),
        ParseErrorKind::UnsupportedCard { .. }
    ));
}

#[test]
fn test_unknown_character() {
    assert!(matches!(
        parse_err("SPH A 0 0 0 1\nEND\nR 5 +A # +A\nEND\n"),
        ParseErrorKind::UnknownCharacter { .. }
    ));
}

#[test]
fn test_zone_depth_limit() {
    let depth = MAX_ZONE_DEPTH_FOR_TEST + 1;
    let mut expression = String::from("+A");
    for _ in 0..depth {
        expression = format!("+({expression})");
    }
    let source = format!("SPH A 0 0 0 1\nEND\nR 5 {expression}\nEND\n");
    assert!(matches!(parse_err(&source), ParseErrorKind::ZoneTooDeep { .. }));
}

const MAX_ZONE_DEPTH_FOR_TEST: usize = config::constants::MAX_ZONE_DEPTH;

#[test]
fn test_assignma_range_and_trailing_fields() {
    let deck = parse_ok("SPH A 0 0 0 1\nEND\nR1 5 +A\nR2 5 -A\nEND\nASSIGNMA VACUUM R1 R2 1.0 0.0\n");
    let card = &deck.assignments[0];
    assert_eq!(card.region, "R1");
    assert_eq!(card.last_region.as_deref(), Some("R2"));
}

#[test]
fn test_error_location() {
    let error = match parse("SPH A 0 0 0 1\nEND\nR 5 +A | | +A\nEND\n") {
        Err(error) => error,
        Ok(_) => panic!("expected error"),
    };
    assert_eq!(error.span.start.line, 2);
    assert_eq!(error.span.start.column, 9);
}
