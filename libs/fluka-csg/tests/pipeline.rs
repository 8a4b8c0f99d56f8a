use fluka_csg::{convert, ConversionOptions, CsgError, SampledEvaluator, Warning};
use fluka_geometry::GeometryError;

const DECK: &str = "\
GEOBEGIN                                                          COMBNAME
    0    0
* a shielded target and two detectors on either side
RPP WORLD -100 100 -100 100 -100 100
SPH TARGET 0 0 0 5
RPP SHIELD -10 10 -10 10 -10 10
RPP DET -60 -40 -5 5 -5 5
RPP DET2 40 60 -5 5 -5 5
END
BLACK 5 +WORLD -SHIELD -DET -DET2
TARG 5 +TARGET
SHLD 5 +SHIELD -TARGET
DETS 5 +DET | +DET2
END
GEOEND
ASSIGNMA BLCKHOLE BLACK
ASSIGNMA IRON TARG
ASSIGNMA LEAD SHLD
ASSIGNMA AIR DETS
";

fn options() -> ConversionOptions {
    ConversionOptions {
        samples_per_axis: 16,
        ..ConversionOptions::default()
    }
}

#[test]
fn test_convert_splits_and_compiles() {
    let conversion = convert(DECK, &options()).unwrap();
    let names: Vec<&str> = conversion.geometry.regions.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["BLACK", "TARG", "SHLD", "DETS_djz0", "DETS_djz1"]);
    assert!(conversion.overlaps.is_empty(), "{:?}", conversion.overlaps);
    assert!(conversion.warnings.is_empty());
}

#[test]
fn test_regions_keep_materials() {
    let conversion = convert(DECK, &options()).unwrap();
    let material = |name: &str| {
        conversion
            .geometry
            .region(name)
            .and_then(|r| r.material.as_ref())
            .map(|m| m.card_name().to_string())
    };
    assert_eq!(material("BLACK").as_deref(), Some("BLCKHOLE"));
    assert_eq!(material("DETS_djz1").as_deref(), Some("AIR"));
}

#[test]
fn test_region_volumes() {
    let options = ConversionOptions {
        samples_per_axis: 40,
        ..options()
    };
    let conversion = convert(DECK, &options).unwrap();
    let geometry = &conversion.geometry;
    let evaluator = SampledEvaluator::new(40, 1e-3);
    let volume = |name: &str| evaluator.volume(&geometry.solids, &geometry.region(name).unwrap().solid);

    let sphere = 4.0 / 3.0 * std::f64::consts::PI * 125.0;
    assert!((volume("TARG") - sphere).abs() / sphere < 0.03);
    assert!((volume("SHLD") - (8000.0 - sphere)).abs() / 8000.0 < 0.03);
    assert!((volume("DETS_djz0") - 2000.0).abs() < 1e-6);
}

#[test]
fn test_overlap_is_reported() {
    let source = "SPH A 0 0 0 5\nSPH B 4 0 0 5\nEND\nRA 5 +A\nRB 5 +B\nEND\n";
    let conversion = convert(source, &options()).unwrap();
    assert_eq!(conversion.overlaps.len(), 1);
    assert!(conversion.overlaps[0].involves("RB"));
}

#[test]
fn test_length_safety_in_pipeline() {
    let source = "RPP BOX -5 5 -5 5 -5 5\nQUA Q 1 1 1 0 0 0 0 0 0 -4\nEND\nR 5 +BOX -Q\nEND\n";
    let options = ConversionOptions {
        length_safety: true,
        check_overlaps: false,
        ..options()
    };
    let conversion = convert(source, &options).unwrap();
    assert!(conversion.registry.body_id("BOX_e").is_ok());
    assert!(matches!(conversion.warnings[..], [Warning::UnsupportedPrimitive { .. }]));
}

#[test]
fn test_syntax_error_surfaces() {
    let err = convert("SPH A 0 0 0\n", &options()).unwrap_err();
    assert!(matches!(err, CsgError::Geometry(GeometryError::Syntax(_))));
}

#[test]
fn test_misspelled_first_body_is_not_dropped() {
    let source = "FOO A 0 0 0 1\nSPH B 0 0 0 1\nEND\nR 5 +B\nEND\nGEOEND\n";
    let err = convert(source, &options()).unwrap_err();
    assert!(matches!(err, CsgError::Geometry(GeometryError::Syntax(_))));
}

#[test]
fn test_region_line_alone_is_rejected() {
    let err = convert("R 5 +A -B\n", &options()).unwrap_err();
    assert!(matches!(err, CsgError::Geometry(GeometryError::Syntax(_))));
}

#[test]
fn test_null_solid_surfaces() {
    let err = convert("SPH A 0 0 0 1\nSPH B 9 0 0 1\nEND\nR 5 +A +B\nEND\n", &options()).unwrap_err();
    assert!(matches!(err, CsgError::NullSolid { .. }));
}

#[test]
fn test_compound_card_fails_loudly() {
    let source = "COMPOUND 0.5 IRON 0.5 LEAD MIX\nSPH A 0 0 0 1\nEND\nR 5 +A\nEND\n";
    let err = convert(source, &options()).unwrap_err();
    assert!(err.to_string().contains("COMPOUND"), "{err}");
}
