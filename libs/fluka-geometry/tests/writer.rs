use fluka_geometry::{load, write_registry};

const DECK: &str = "\
ROT-DEFI z 0 30 0 0 0 TILT
ROT-DEFI x 90 0 1 2 3 TILT
GEOBEGIN                                                          COMBNAME
    0    0
RPP WORLD -100 100 -100 100 -100 100
$start_transform TILT
RCC PIPE 0 0 -20 0 0 40 1
ZCC CORE 0 0 0.5
$end_transform
$start_expansion 2
SPH BALL 10 0 0 2
$end_expansion
END
BLACK 5 +WORLD -(+PIPE -CORE) -BALL
PIPE 5 +PIPE -CORE
BALL 5 +BALL
END
GEOEND
ASSIGNMA BLCKHOLE BLACK
ASSIGNMA IRON PIPE BALL
";

#[test]
fn test_write_then_load_is_a_fixed_point() {
    let first = write_registry(&load(DECK).unwrap());
    let second = write_registry(&load(&first).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_written_deck_keeps_structure() {
    let registry = load(DECK).unwrap();
    let reloaded = load(&write_registry(&registry)).unwrap();
    assert_eq!(reloaded.body_count(), registry.body_count());
    assert_eq!(reloaded.zone_count(), registry.zone_count());
    for (id, region) in registry.regions() {
        let other = reloaded.region(reloaded.region_id(region.name()).unwrap());
        assert_eq!(other.material(), region.material());
        assert_eq!(reloaded.region_extent(reloaded.region_id(region.name()).unwrap()), registry.region_extent(id));
    }
}

#[test]
fn test_directives_wrap_transformed_bodies() {
    let text = write_registry(&load(DECK).unwrap());
    assert!(text.contains("$start_transform TILT\nRCC PIPE"), "{text}");
    assert!(text.contains("$start_expansion 2\nSPH BALL 10 0 0 2\n$end_expansion"), "{text}");
}
