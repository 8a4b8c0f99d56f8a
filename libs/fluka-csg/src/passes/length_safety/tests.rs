use super::*;
use fluka_geometry::{load, BodyKind};

const DECK: &str = "\
RPP WORLD -100 100 -100 100 -100 100
RPP BOX -5 5 -5 5 -5 5
SPH BALL 0 0 0 2
SPH CORE 0 0 0 1
END
OUT 5 +WORLD -(+BOX -BALL)
IN 5 +BOX -BALL
BALL 5 +BALL -CORE
END
";

fn radius(registry: &Registry, name: &str) -> f64 {
    match registry.body(registry.body_id(name).unwrap()).kind() {
        BodyKind::Sph { radius, .. } => *radius,
        other => panic!("{name} is {other:?}"),
    }
}

#[test]
fn test_entering_expanded_subtracted_shrunk() {
    let input = load(DECK).unwrap();
    let output = LengthSafetyPass::new(0.1).run(&input).unwrap();
    let registry = &output.registry;

    let zone = registry.zone(registry.zone_id("IN_z0").unwrap());
    assert_eq!(registry.operand_name(zone.items()[0].operand), "BOX_e");
    assert_eq!(registry.operand_name(zone.items()[1].operand), "BALL_s");
    assert!((radius(registry, "BALL_s") - 1.9).abs() < 1e-12);
    assert!(output.warnings.is_empty());
}

#[test]
fn test_polarity_flips_inside_subtracted_zone() {
    let input = load(DECK).unwrap();
    let output = LengthSafetyPass::new(0.1).run(&input).unwrap();
    let registry = &output.registry;

    let nested = registry.zone(registry.zone_id("OUT_z0_s0").unwrap());
    assert_eq!(registry.operand_name(nested.items()[0].operand), "BOX_s");
    assert_eq!(registry.operand_name(nested.items()[1].operand), "BALL_e");
    assert!((radius(registry, "BALL_e") - 2.1).abs() < 1e-12);
}

#[test]
fn test_input_registry_is_untouched() {
    let input = load(DECK).unwrap();
    let before = fluka_geometry::write_registry(&input);
    LengthSafetyPass::default().run(&input).unwrap();
    assert_eq!(fluka_geometry::write_registry(&input), before);
    assert!(input.body_id("BOX_e").is_err());
}

#[test]
fn test_twins_hold_the_whole_geometry() {
    let input = load(DECK).unwrap();
    let output = LengthSafetyPass::new(0.5).run(&input).unwrap();
    assert_eq!(output.expanded.region_count(), input.region_count());
    assert_eq!(output.shrunk.zone_count(), input.zone_count());
    assert!((radius(&output.expanded, "CORE_e") - 1.5).abs() < 1e-12);
    assert!((radius(&output.shrunk, "CORE_s") - 0.5).abs() < 1e-12);
    // zones are shared, not copied
    let zone = input.zone_id("IN_z0").unwrap();
    assert!(Arc::ptr_eq(input.zone(zone), output.expanded.zone(zone)));
}

#[test]
fn test_zone_operand_count_preserved() {
    let input = load(DECK).unwrap();
    let output = LengthSafetyPass::default().run(&input).unwrap();
    for (id, region) in input.regions() {
        let rebuilt = output.registry.region_id(region.name()).unwrap();
        assert_eq!(
            output.registry.region_operand_count(rebuilt),
            input.region_operand_count(id)
        );
    }
}

#[test]
fn test_unsupported_kind_passes_through_with_warning() {
    let source = "QUA Q 1 1 1 0 0 0 0 0 0 -4\nRPP BOX -5 5 -5 5 -5 5\nEND\nR 5 +BOX -Q\nEND\n";
    let output = LengthSafetyPass::default().run(&load(source).unwrap()).unwrap();
    assert_eq!(
        output.warnings,
        vec![Warning::UnsupportedPrimitive {
            body: "Q".to_string(),
            code: "QUA".to_string()
        }]
    );
    assert!(output.registry.body_id("Q").is_ok());
    assert!(output.registry.body_id("BOX_e").is_ok());
}

#[test]
fn test_too_thin_body_is_an_error() {
    let input = load("SPH A 0 0 0 0.5\nEND\nR 5 +A\nEND\n").unwrap();
    let err = LengthSafetyPass::new(1.0).run(&input).unwrap_err();
    assert!(matches!(
        err,
        CsgError::Geometry(fluka_geometry::GeometryError::Validation { .. })
    ));
}
