use super::*;
use crate::body::BodyKind;
use crate::zone::ZoneItem;
use glam::DVec3;

fn sphere(name: &str, x: f64, r: f64) -> Body {
    Body::new(
        name,
        BodyKind::Sph {
            centre: DVec3::new(x, 0.0, 0.0),
            radius: r,
        },
        None,
    )
    .unwrap()
}

#[test]
fn test_duplicate_body_name() {
    let mut registry = Registry::new();
    registry.add_body(sphere("A", 0.0, 1.0)).unwrap();
    let err = registry.add_body(sphere("A", 5.0, 1.0)).unwrap_err();
    assert_eq!(
        err,
        GeometryError::NameCollision {
            kind: "body",
            name: "A".to_string()
        }
    );
}

#[test]
fn test_lookup_miss() {
    let registry = Registry::new();
    assert!(matches!(registry.body_id("NOPE"), Err(GeometryError::RegistryLookup { .. })));
    assert!(registry.region_id("NOPE").is_err());
    assert!(registry.rototranslation("NOPE").is_err());
}

#[test]
fn test_zone_with_foreign_operand_is_rejected() {
    let mut registry = Registry::new();
    let zone = Zone::new("Z", vec![ZoneItem::intersect(Operand::Body(BodyId(4)))]).unwrap();
    assert!(matches!(registry.add_zone(zone), Err(GeometryError::RegistryLookup { .. })));
}

#[test]
fn test_zone_frame_follows_first_operand() {
    let mut registry = Registry::new();
    let a = registry.add_body(sphere("A", 3.0, 1.0)).unwrap();
    let b = registry.add_body(sphere("B", -7.0, 1.0)).unwrap();
    let inner = registry
        .add_zone(Zone::new("IN", vec![ZoneItem::intersect(Operand::Body(a))]).unwrap())
        .unwrap();
    let outer = registry
        .add_zone(
            Zone::new(
                "OUT",
                vec![
                    ZoneItem::intersect(Operand::Zone(inner)),
                    ZoneItem::subtract(Operand::Body(b)),
                ],
            )
            .unwrap(),
        )
        .unwrap();
    assert_eq!(registry.zone_frame(outer).centre, DVec3::new(3.0, 0.0, 0.0));
    assert_eq!(registry.zone_operand_count(outer), 2);
}

#[test]
fn test_zone_extent_ignores_subtractions() {
    let mut registry = Registry::new();
    let a = registry.add_body(sphere("A", 0.0, 5.0)).unwrap();
    let b = registry.add_body(sphere("B", 4.0, 5.0)).unwrap();
    let c = registry.add_body(sphere("C", 0.0, 50.0)).unwrap();
    let zone = registry
        .add_zone(
            Zone::new(
                "Z",
                vec![
                    ZoneItem::intersect(Operand::Body(a)),
                    ZoneItem::intersect(Operand::Body(b)),
                    ZoneItem::subtract(Operand::Body(c)),
                ],
            )
            .unwrap(),
        )
        .unwrap();
    let extent = registry.zone_extent(zone);
    assert_eq!(extent.min.x, -1.0);
    assert_eq!(extent.max.x, 5.0);
}

#[test]
fn test_shared_bodies_between_registries() {
    let mut first = Registry::new();
    let id = first.add_body(sphere("A", 0.0, 1.0)).unwrap();
    let mut second = Registry::new();
    second.add_shared_body(Arc::clone(first.body(id))).unwrap();
    assert!(Arc::ptr_eq(first.body(id), second.body(BodyId(0))));
}
