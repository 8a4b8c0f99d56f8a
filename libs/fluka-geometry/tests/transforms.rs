use approx::assert_relative_eq;
use fluka_geometry::{load, Primitive};
use glam::DVec3;

fn centre_of(source: &str, body: &str) -> DVec3 {
    let registry = load(source).unwrap();
    registry.body(registry.body_id(body).unwrap()).centre()
}

#[test]
fn test_rotdefi_rotates_body_centre() {
    let source = "ROT-DEFI z 0 90 0 0 0 ROT1\n\
                  GEOBEGIN                                                          COMBNAME\n\
                  \x20   0    0\n\
                  $start_transform ROT1\n\
                  SPH BALL 1 0 0 0.5\n\
                  $end_transform\n\
                  END\nR 5 +BALL\nEND\nGEOEND\n";
    let centre = centre_of(source, "BALL");
    assert_relative_eq!(centre.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(centre.y, -1.0, epsilon = 1e-12);
}

#[test]
fn test_numeric_axis_field_with_index() {
    let source = "ROT-DEFI 300.0 0 90 0 0 0 ROT1\n\
                  $start_transform ROT1\n\
                  SPH BALL 1 0 0 0.5\n\
                  $end_transform\n\
                  END\nR 5 +BALL\nEND\n";
    let centre = centre_of(source, "BALL");
    assert_relative_eq!(centre.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(centre.y, -1.0, epsilon = 1e-12);
}

#[test]
fn test_inverse_transform_undoes_chain() {
    let source = "ROT-DEFI z 0 90 0 0 0 ROT1\n\
                  $start_transform -ROT1\n\
                  SPH BALL 1 0 0 0.5\n\
                  $end_transform\n\
                  END\nR 5 +BALL\nEND\n";
    let centre = centre_of(source, "BALL");
    assert_relative_eq!(centre.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(centre.y, 1.0, epsilon = 1e-12);
}

#[test]
fn test_rotdefi_translation_applies_before_rotation() {
    let source = "ROT-DEFI z 0 0 0 0 10 SHIFT\n\
                  $start_transform SHIFT\n\
                  SPH BALL 1 2 3 0.5\n\
                  $end_transform\n\
                  END\nR 5 +BALL\nEND\n";
    assert_eq!(centre_of(source, "BALL"), DVec3::new(1.0, 2.0, 13.0));
}

#[test]
fn test_chained_steps_compose_in_order() {
    let chained = "ROT-DEFI z 0 90 0 0 0 ROT\n\
                   ROT-DEFI z 0 0 5 0 0 ROT\n\
                   $start_transform ROT\n\
                   SPH BALL 1 0 0 0.5\n\
                   $end_transform\n\
                   END\nR 5 +BALL\nEND\n";
    // rotate (1,0,0) to (0,-1,0), then shift by +5 in x
    let centre = centre_of(chained, "BALL");
    assert_relative_eq!(centre.x, 5.0, epsilon = 1e-12);
    assert_relative_eq!(centre.y, -1.0, epsilon = 1e-12);
}

#[test]
fn test_expansion_scales_position_and_size() {
    let source = "$start_expansion 2\nSPH BALL 1 0 0 1\n$end_expansion\nEND\nR 5 +BALL\nEND\n";
    let registry = load(source).unwrap();
    let body = registry.body(registry.body_id("BALL").unwrap());
    assert_eq!(body.centre(), DVec3::new(2.0, 0.0, 0.0));
    assert_eq!(body.primitive(), Primitive::Sphere { radius: 2.0 });
}

#[test]
fn test_translation_directive() {
    let source = "$start_translat 0 0 -4\nRPP BOX -1 1 -1 1 -1 1\n$end_translat\nEND\nR 5 +BOX\nEND\n";
    assert_eq!(centre_of(source, "BOX"), DVec3::new(0.0, 0.0, -4.0));
}

#[test]
fn test_invalid_polar_angle_fails_the_build() {
    let source = "ROT-DEFI z 181 0 0 0 0 BAD\nSPH BALL 0 0 0 1\nEND\nR 5 +BALL\nEND\n";
    assert!(load(source).is_err());
}
