//! # Deck → Registry
//!
//! Turns a parsed [`Deck`] into a [`Registry`]: roto-translation chains
//! first, then bodies with their directive transforms, then one zone per
//! zone expression and one region per region card with its assigned
//! material.
//!
//! ## Naming
//!
//! Zones are named `{region}_z{i}` and parenthesised sub-zones
//! `{zone}_s{j}`, both counted from zero in input order.
//!
//! ## Term order
//!
//! A zone's first operand must be intersected. When a zone is written
//! with a leading `-` term, the first `+` term is moved to the front; the
//! terms of a zone all intersect so the volume is unchanged. A zone with
//! no `+` term at all describes an unbounded volume and is rejected.

use std::collections::HashMap;

use fluka_parser::{BodyCard, Deck, RegionCard, Sign, Term, ZoneExpr};
use glam::DVec3;
use tracing::debug;

use crate::body::{Body, BodyKind};
use crate::error::GeometryError;
use crate::material::Material;
use crate::region::Region;
use crate::registry::{Registry, ZoneId};
use crate::transform::{Axis, RotDefi, RotoTranslation, Transform};
use crate::zone::{Operand, Operator, Zone, ZoneItem};

/// Parse and build in one step.
///
/// ## Example
///
/// ```rust
/// let registry = fluka_geometry::load(
///     "SPH TARGET 0 0 0 5\nRPP WORLD -10 10 -10 10 -10 10\nEND\n\
///      TARG 5 +TARGET\nAIR 5 +WORLD -TARGET\nEND\nGEOEND\n",
/// )
/// .unwrap();
/// assert_eq!(registry.region_count(), 2);
/// ```
pub fn load(source: &str) -> Result<Registry, GeometryError> {
    let deck = fluka_parser::parse(source)?;
    build_registry(&deck)
}

/// Build a registry from a parsed deck.
///
/// ## Errors
///
/// - `Validation` for out-of-range parameters or angles and for zones
///   without an intersected term
/// - `RegistryLookup` for references to undefined bodies, chains or regions
/// - `NameCollision` for names defined twice
pub fn build_registry(deck: &Deck) -> Result<Registry, GeometryError> {
    let mut registry = Registry::new();

    for chain in group_rotdefis(deck)? {
        registry.add_rototranslation(chain)?;
    }
    for card in &deck.bodies {
        let body = build_body(&registry, card)?;
        registry.add_body(body)?;
    }

    let materials = resolve_assignments(deck)?;
    for (card, material) in deck.regions.iter().zip(materials) {
        if registry.region_id(&card.name).is_ok() {
            return Err(GeometryError::NameCollision {
                kind: "region",
                name: card.name.clone(),
            });
        }
        let zones = build_zones(&mut registry, card)?;
        registry.add_region(Region::new(&card.name, zones, card.neighbours, material)?)?;
    }

    debug!(
        bodies = registry.body_count(),
        zones = registry.zone_count(),
        regions = registry.region_count(),
        "built registry"
    );
    Ok(registry)
}

// =============================================================================
// BODIES
// =============================================================================

/// Collect `ROT-DEFI` cards into chains, keeping first-appearance order.
fn group_rotdefis(deck: &Deck) -> Result<Vec<RotoTranslation>, GeometryError> {
    let mut order: Vec<&str> = Vec::new();
    let mut steps: HashMap<&str, Vec<(String, RotDefi)>> = HashMap::new();
    for card in &deck.rotdefis {
        let step = RotDefi::new(
            &card.name,
            Axis::parse(&card.axis)?,
            card.polar,
            card.azimuth,
            DVec3::from_array(card.translation),
        )?;
        let entry = steps.entry(card.name.as_str()).or_insert_with(|| {
            order.push(card.name.as_str());
            Vec::new()
        });
        entry.push((card.name.clone(), step));
    }
    order
        .into_iter()
        .map(|name| RotoTranslation::new(name, steps.remove(name).unwrap_or_default()))
        .collect()
}

fn build_body(registry: &Registry, card: &BodyCard) -> Result<Body, GeometryError> {
    let kind = BodyKind::from_card(card.code, &card.params)
        .map_err(|message| GeometryError::validation(&card.name, message))?;
    let rototranslation = card
        .transform
        .as_ref()
        .map(|reference| registry.rototranslation(&reference.name).cloned())
        .transpose()?;
    let transform = Transform::new(
        card.expansion.unwrap_or(1.0),
        card.translation.map(DVec3::from_array).unwrap_or(DVec3::ZERO),
        rototranslation,
        card.transform.as_ref().is_some_and(|reference| reference.inverse),
    )?;
    Body::new(&card.name, kind, Some(transform))
}

// =============================================================================
// ZONES
// =============================================================================

fn build_zones(registry: &mut Registry, card: &RegionCard) -> Result<Vec<ZoneId>, GeometryError> {
    card.zones
        .iter()
        .enumerate()
        .map(|(i, expr)| build_zone(registry, &format!("{}_z{i}", card.name), expr))
        .collect()
}

/// Register a zone expression, nested sub-zones first.
fn build_zone(registry: &mut Registry, name: &str, expr: &ZoneExpr) -> Result<ZoneId, GeometryError> {
    let mut items = Vec::with_capacity(expr.terms.len());
    let mut sub_zones = 0;
    for term in &expr.terms {
        let item = match term {
            Term::Body { sign, name: body, .. } => ZoneItem {
                operator: operator(*sign),
                operand: Operand::Body(registry.body_id(body)?),
            },
            Term::SubZone { sign, zone, .. } => {
                let nested = build_zone(registry, &format!("{name}_s{sub_zones}"), zone)?;
                sub_zones += 1;
                ZoneItem {
                    operator: operator(*sign),
                    operand: Operand::Zone(nested),
                }
            }
        };
        items.push(item);
    }

    let Some(first) = items.iter().position(|item| item.operator == Operator::Intersect) else {
        return Err(GeometryError::validation(name, "zone has no '+' term"));
    };
    if first > 0 {
        debug!(zone = name, "moved first '+' term to the front");
        items[..=first].rotate_right(1);
    }
    registry.add_zone(Zone::new(name, items)?)
}

fn operator(sign: Sign) -> Operator {
    match sign {
        Sign::Plus => Operator::Intersect,
        Sign::Minus => Operator::Subtract,
    }
}

// =============================================================================
// MATERIALS
// =============================================================================

/// Material per region card, applying `ASSIGNMA` ranges in card order.
fn resolve_assignments(deck: &Deck) -> Result<Vec<Option<Material>>, GeometryError> {
    let index: HashMap<&str, usize> = deck
        .regions
        .iter()
        .enumerate()
        .map(|(i, region)| (region.name.as_str(), i))
        .collect();
    let position = |name: &str| {
        index
            .get(name)
            .copied()
            .ok_or_else(|| GeometryError::lookup("region", name))
    };

    let mut materials = vec![None; deck.regions.len()];
    for card in &deck.assignments {
        let first = position(&card.region)?;
        let last = card.last_region.as_deref().map(position).transpose()?.unwrap_or(first);
        if last < first {
            return Err(GeometryError::validation(
                &card.region,
                format!("material range ends before it starts at '{}'", deck.regions[last].name),
            ));
        }
        let material = Material::resolve(&card.material);
        for slot in &mut materials[first..=last] {
            *slot = Some(material.clone());
        }
    }
    Ok(materials)
}
