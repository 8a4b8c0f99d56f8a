//! Print/parse round trips over whole decks and zone expressions.

use fluka_parser::printer::{print_deck, print_zone};
use fluka_parser::{parse, parse_zone_expression, Deck, Term, ZoneExpr};

const DECK: &str = "\
TITLE
Two targets in a vacuum box
GEOBEGIN                                                  COMBNAME
    0    0          two targets
ROT-DEFI 3 0 30 0 0 0 TILT
* black body and world
RPP BLKBODY -1000 1000 -1000 1000 -1000 1000
RPP WORLD -500 500 -500 500 -500 500
$start_transform TILT
RCC TUBE 0 0 -50 0 0 100 10
$end_transform
$start_translat 0 0 200
$start_expansion 0.5
SPH BALL 0 0 0 20
$end_expansion
$end_translat
XYP FLOOR -100
ZCC PIPE 0 0 2
END
BLKHOLE 5 +BLKBODY -WORLD
VOID 5 +WORLD -TUBE -BALL
TARGETS 5 | +TUBE -PIPE | +BALL
      | +FLOOR +WORLD -(+TUBE -PIPE)
END
GEOEND
ASSIGNMA BLCKHOLE BLKHOLE
ASSIGNMA VACUUM VOID
ASSIGNMA LEAD TARGETS
";

/// Zone structure with spans stripped.
fn shape(zone: &ZoneExpr) -> Vec<String> {
    zone.terms
        .iter()
        .map(|term| match term {
            Term::Body { sign, name, .. } => format!("{}{}", sign.symbol(), name),
            Term::SubZone { sign, zone, .. } => format!("{}({})", sign.symbol(), shape(zone).join(" ")),
        })
        .collect()
}

fn same_cards(a: &Deck, b: &Deck) {
    assert_eq!(a.bodies.len(), b.bodies.len());
    for (x, y) in a.bodies.iter().zip(&b.bodies) {
        assert_eq!(x.code, y.code);
        assert_eq!(x.name, y.name);
        assert_eq!(x.params, y.params);
        assert_eq!(x.expansion, y.expansion);
        assert_eq!(x.translation, y.translation);
        assert_eq!(x.transform, y.transform);
    }
    assert_eq!(a.regions.len(), b.regions.len());
    for (x, y) in a.regions.iter().zip(&b.regions) {
        assert_eq!(x.name, y.name);
        assert_eq!(x.neighbours, y.neighbours);
        let xs: Vec<_> = x.zones.iter().map(shape).collect();
        let ys: Vec<_> = y.zones.iter().map(shape).collect();
        assert_eq!(xs, ys);
    }
    assert_eq!(a.rotdefis.len(), b.rotdefis.len());
    assert_eq!(a.assignments.len(), b.assignments.len());
}

#[test]
fn test_deck_round_trip_preserves_cards() {
    let first = parse(DECK).unwrap();
    let printed = print_deck(&first);
    let second = parse(&printed).unwrap();
    same_cards(&first, &second);
}

#[test]
fn test_printing_is_a_fixed_point() {
    let printed = print_deck(&parse(DECK).unwrap());
    let reprinted = print_deck(&parse(&printed).unwrap());
    assert_eq!(printed, reprinted);
}

#[test]
fn test_directive_scopes_survive_round_trip() {
    let deck = parse(&print_deck(&parse(DECK).unwrap())).unwrap();
    let ball = deck.bodies.iter().find(|b| b.name == "BALL").unwrap();
    assert_eq!(ball.translation, Some([0.0, 0.0, 200.0]));
    assert_eq!(ball.expansion, Some(0.5));
    let tube = deck.bodies.iter().find(|b| b.name == "TUBE").unwrap();
    assert_eq!(tube.transform.as_ref().map(|t| t.name.as_str()), Some("TILT"));
}

#[test]
fn test_pipe_delimiters_normalize() {
    let bare = parse_zone_expression("+A -B | +C").unwrap();
    let delimited = parse_zone_expression("| +A -B | +C |").unwrap();
    let bare: Vec<_> = bare.iter().map(print_zone).collect();
    let delimited: Vec<_> = delimited.iter().map(print_zone).collect();
    assert_eq!(bare, delimited);
    assert_eq!(bare, vec!["+A -B", "+C"]);
}

#[test]
fn test_zone_expression_round_trip() {
    let source = "+A -(+B -(+C -D)) +E";
    let zones = parse_zone_expression(source).unwrap();
    assert_eq!(print_zone(&zones[0]), source);
}

#[test]
fn test_multiline_region_reprints_on_one_line() {
    let deck = parse(DECK).unwrap();
    let targets = deck.regions.iter().find(|r| r.name == "TARGETS").unwrap();
    assert_eq!(targets.zones.len(), 3);
    let printed = fluka_parser::printer::print_region(targets);
    assert_eq!(
        printed,
        "TARGETS 5 +TUBE -PIPE | +BALL | +FLOOR +WORLD -(+TUBE -PIPE)"
    );
}

#[test]
fn test_deck_json_round_trip() {
    let deck = parse(DECK).unwrap();
    let json = serde_json::to_string(&deck).unwrap();
    let restored: Deck = serde_json::from_str(&json).unwrap();
    assert_eq!(deck, restored);
}
