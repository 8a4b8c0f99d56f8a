//! # Deck Printer
//!
//! Renders a [`Deck`] back to canonical free-format text. Parsing the
//! printed text yields the same cards, so `parse → print → parse → print`
//! is a fixed point.
//!
//! ## Example
//!
//! ```rust
//! use fluka_parser::{parse, printer::print_region};
//!
//! let deck = parse("SPH A 0 0 0 1\nSPH B 0 0 0 2\nEND\nR 5 | +B -A |\nEND\n").unwrap();
//! assert_eq!(print_region(&deck.regions[0]), "R 5 +B -A");
//! ```

use crate::ast::{AssignCard, BodyCard, Deck, RegionCard, RotDefiCard, Term, TransformRef, ZoneExpr};

/// Render a whole deck.
pub fn print_deck(deck: &Deck) -> String {
    let mut lines = vec![
        format!("{:<66}{}", "GEOBEGIN", "COMBNAME"),
        "    0    0".to_string(),
    ];

    lines.extend(deck.rotdefis.iter().map(print_rot_defi));
    print_bodies(&deck.bodies, &mut lines);
    lines.push("END".to_string());
    lines.extend(deck.regions.iter().map(print_region));
    lines.push("END".to_string());
    lines.push("GEOEND".to_string());
    lines.extend(deck.assignments.iter().map(print_assignment));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Render body cards, opening and closing directive scopes as they change.
fn print_bodies(bodies: &[BodyCard], lines: &mut Vec<String>) {
    let mut open: Option<&BodyCard> = None;
    for body in bodies {
        let same_scope = open.is_some_and(|previous| {
            previous.expansion == body.expansion
                && previous.translation == body.translation
                && previous.transform == body.transform
        });
        if !same_scope {
            if let Some(previous) = open {
                close_scopes(previous, lines);
            }
            open_scopes(body, lines);
        }
        lines.push(print_body(body));
        open = Some(body);
    }
    if let Some(previous) = open {
        close_scopes(previous, lines);
    }
}

fn open_scopes(body: &BodyCard, lines: &mut Vec<String>) {
    if let Some(TransformRef { name, inverse }) = &body.transform {
        let sign = if *inverse { "-" } else { "" };
        lines.push(format!("$start_transform {sign}{name}"));
    }
    if let Some([dx, dy, dz]) = body.translation {
        lines.push(format!(
            "$start_translat {} {} {}",
            number(dx),
            number(dy),
            number(dz)
        ));
    }
    if let Some(factor) = body.expansion {
        lines.push(format!("$start_expansion {}", number(factor)));
    }
}

fn close_scopes(body: &BodyCard, lines: &mut Vec<String>) {
    if body.expansion.is_some() {
        lines.push("$end_expansion".to_string());
    }
    if body.translation.is_some() {
        lines.push("$end_translat".to_string());
    }
    if body.transform.is_some() {
        lines.push("$end_transform".to_string());
    }
}

/// Render one body card on a single line.
pub fn print_body(body: &BodyCard) -> String {
    let mut line = format!("{} {}", body.code.keyword(), body.name);
    for param in &body.params {
        line.push(' ');
        line.push_str(&number(*param));
    }
    line
}

/// Render a region card: name, neighbour count and zones separated by `|`.
pub fn print_region(region: &RegionCard) -> String {
    let zones: Vec<String> = region.zones.iter().map(print_zone).collect();
    format!("{} {} {}", region.name, region.neighbours, zones.join(" | "))
}

/// Render one zone expression.
pub fn print_zone(zone: &ZoneExpr) -> String {
    zone.terms
        .iter()
        .map(|term| match term {
            Term::Body { sign, name, .. } => format!("{}{}", sign.symbol(), name),
            Term::SubZone { sign, zone, .. } => format!("{}({})", sign.symbol(), print_zone(zone)),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_rot_defi(card: &RotDefiCard) -> String {
    let [dx, dy, dz] = card.translation;
    format!(
        "ROT-DEFI {} {} {} {} {} {} {}",
        card.axis,
        number(card.polar),
        number(card.azimuth),
        number(dx),
        number(dy),
        number(dz),
        card.name
    )
}

fn print_assignment(card: &AssignCard) -> String {
    match &card.last_region {
        Some(last) => format!("ASSIGNMA {} {} {}", card.material, card.region, last),
        None => format!("ASSIGNMA {} {}", card.material, card.region),
    }
}

/// Shortest text that parses back to the same value.
fn number(value: f64) -> String {
    format!("{value}")
}
