//! # Registry → Text
//!
//! Serializes a registry back to a free-format deck through the parser's
//! printer. Nested zones are written inline as parenthesised sub-zones,
//! so only zones reached from a region appear in the output.
//!
//! Names produced by the passes (`_e`, `_s`, `_djz` suffixes) may exceed
//! the input name limit; such output documents the registry but is not
//! accepted back by the parser.

use fluka_parser::printer::print_deck;
use fluka_parser::{AssignCard, Deck, RegionCard, RotDefiCard, Sign, Span, Term, ZoneExpr};

use crate::registry::{Registry, ZoneId};
use crate::zone::{Operand, Operator};

/// Render a registry as deck text.
pub fn write_registry(registry: &Registry) -> String {
    print_deck(&to_deck(registry))
}

/// Convert a registry back into cards.
pub fn to_deck(registry: &Registry) -> Deck {
    let rotdefis = registry
        .rototranslations()
        .flat_map(|chain| {
            chain.steps().iter().map(move |step| RotDefiCard {
                axis: step.axis.name().to_string(),
                polar: step.polar,
                azimuth: step.azimuth,
                translation: step.translation.to_array(),
                name: chain.name().to_string(),
                span: Span::zero(),
            })
        })
        .collect();

    let bodies = registry.bodies().map(|(_, body)| body.to_card()).collect();

    let regions = registry
        .regions()
        .map(|(_, region)| RegionCard {
            name: region.name().to_string(),
            neighbours: region.neighbours(),
            zones: region.zones().iter().map(|&id| zone_expr(registry, id)).collect(),
            span: Span::zero(),
        })
        .collect();

    let assignments = registry
        .regions()
        .filter_map(|(_, region)| {
            region.material().map(|material| AssignCard {
                material: material.card_name().to_string(),
                region: region.name().to_string(),
                last_region: None,
                span: Span::zero(),
            })
        })
        .collect();

    Deck {
        rotdefis,
        bodies,
        regions,
        assignments,
        ignored_cards: Vec::new(),
        span: Span::zero(),
    }
}

fn zone_expr(registry: &Registry, id: ZoneId) -> ZoneExpr {
    let terms = registry
        .zone(id)
        .items()
        .iter()
        .map(|item| {
            let sign = match item.operator {
                Operator::Intersect => Sign::Plus,
                Operator::Subtract => Sign::Minus,
            };
            match item.operand {
                Operand::Body(body) => Term::Body {
                    sign,
                    name: registry.body(body).name().to_string(),
                    span: Span::zero(),
                },
                Operand::Zone(nested) => Term::SubZone {
                    sign,
                    zone: zone_expr(registry, nested),
                    span: Span::zero(),
                },
            }
        })
        .collect();
    ZoneExpr {
        terms,
        span: Span::zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::load;

    #[test]
    fn test_nested_zone_written_inline() {
        let registry = load("SPH A 0 0 0 1\nSPH B 0 0 0 2\nEND\nR 5 +B -(+A -B)\nEND\n").unwrap();
        let text = write_registry(&registry);
        assert!(text.contains("R 5 +B -(+A -B)"), "{text}");
    }

    #[test]
    fn test_material_written() {
        let registry = load("SPH A 0 0 0 1\nEND\nR 5 +A\nEND\nGEOEND\nASSIGNMA BLCKHOLE R\n").unwrap();
        let deck = to_deck(&registry);
        assert_eq!(deck.assignments[0].material, "BLCKHOLE");
        assert_eq!(deck.assignments[0].region, "R");
    }
}
