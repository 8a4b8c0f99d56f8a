use super::*;
use approx::assert_relative_eq;

fn step(axis: Axis, polar: f64, azimuth: f64, t: [f64; 3]) -> RotDefi {
    RotDefi::new("R", axis, polar, azimuth, DVec3::from_array(t)).unwrap()
}

fn assert_vec_eq(a: DVec3, b: DVec3) {
    assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
    assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
    assert_relative_eq!(a.z, b.z, epsilon = 1e-9);
}

#[test]
fn test_polar_out_of_range() {
    let err = RotDefi::new("R1", Axis::Z, 181.0, 0.0, DVec3::ZERO).unwrap_err();
    assert!(matches!(err, GeometryError::Validation { .. }));
}

#[test]
fn test_azimuth_out_of_range() {
    assert!(RotDefi::new("R1", Axis::Z, 90.0, -180.5, DVec3::ZERO).is_err());
    assert!(RotDefi::new("R1", Axis::Z, 90.0, 180.0, DVec3::ZERO).is_ok());
}

#[test]
fn test_z_rotation_closed_form() {
    let rotation = step(Axis::Z, 90.0, 45.0, [0.0; 3]).rotation();
    let h = std::f64::consts::FRAC_1_SQRT_2;
    let expected = rows([[0.0, 0.0, -1.0], [-h, h, 0.0], [h, h, 0.0]]);
    assert!(rotation.abs_diff_eq(expected, 1e-12));
}

#[test]
fn test_pure_azimuth_about_z() {
    let rotation = step(Axis::Z, 0.0, 90.0, [0.0; 3]).rotation();
    assert_vec_eq(rotation * DVec3::X, DVec3::new(0.0, -1.0, 0.0));
}

#[test]
fn test_every_step_is_a_rotation() {
    for axis in [Axis::X, Axis::Y, Axis::Z] {
        let r = step(axis, 37.0, -122.0, [0.0; 3]).rotation();
        assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-12);
        assert!((r.transpose() * r).abs_diff_eq(DMat3::IDENTITY, 1e-12));
    }
}

#[test]
fn test_translation_applies_before_rotation() {
    let s = step(Axis::Z, 0.0, 90.0, [1.0, 0.0, 0.0]);
    let moved = s.matrix().transform_point3(DVec3::ZERO);
    assert_vec_eq(moved, s.rotation() * DVec3::X);
    assert_vec_eq(moved, s.apply(DVec3::ZERO));
}

#[test]
fn test_chain_equals_sequential_application() {
    let steps = vec![
        step(Axis::X, 30.0, 10.0, [1.0, 2.0, 3.0]),
        step(Axis::Y, 120.0, -45.0, [0.0, -4.0, 0.5]),
        step(Axis::Z, 75.0, 160.0, [2.0, 0.0, -1.0]),
    ];
    let chain = RotoTranslation::new(
        "CHAIN",
        steps.iter().map(|s| ("CHAIN".to_string(), s.clone())).collect(),
    )
    .unwrap();

    let point = DVec3::new(0.7, -1.3, 2.9);
    let sequential = steps.iter().fold(point, |p, s| s.apply(p));
    let composite = chain.matrix().transform_point3(point);
    assert_vec_eq(composite, sequential);
}

#[test]
fn test_chain_members_share_name() {
    let err = RotoTranslation::new(
        "A",
        vec![
            ("A".to_string(), step(Axis::X, 10.0, 0.0, [0.0; 3])),
            ("B".to_string(), step(Axis::X, 10.0, 0.0, [0.0; 3])),
        ],
    )
    .unwrap_err();
    assert!(matches!(err, GeometryError::Validation { .. }));
    assert!(RotoTranslation::new("A", Vec::new()).is_err());
}

#[test]
fn test_axis_codes() {
    assert_eq!(Axis::parse("X").unwrap(), Axis::X);
    assert_eq!(Axis::parse("2").unwrap(), Axis::Y);
    assert_eq!(Axis::parse("3.0").unwrap(), Axis::Z);
    assert!(Axis::parse("4").is_err());
    assert_eq!(Axis::parse("300.0").unwrap(), Axis::Z);
    assert_eq!(Axis::parse("101").unwrap(), Axis::X);
    assert_eq!(Axis::parse("212").unwrap(), Axis::Y);
    assert!(Axis::parse("401").is_err());
    assert!(Axis::parse("-2").is_err());
}

#[test]
fn test_transform_expansion_then_translation() {
    let transform = Transform::new(2.0, DVec3::new(0.0, 0.0, 10.0), None, false).unwrap();
    assert_vec_eq(transform.apply_point(DVec3::ONE), DVec3::new(2.0, 2.0, 12.0));
}

#[test]
fn test_inverse_transform_undoes_chain() {
    let chain = Arc::new(
        RotoTranslation::new(
            "R",
            vec![("R".to_string(), step(Axis::Y, 40.0, 25.0, [3.0, 1.0, 0.0]))],
        )
        .unwrap(),
    );
    let forward = Transform::new(1.0, DVec3::ZERO, Some(chain.clone()), false).unwrap();
    let inverse = Transform::new(1.0, DVec3::ZERO, Some(chain), true).unwrap();
    let p = DVec3::new(5.0, -2.0, 1.0);
    assert_vec_eq(inverse.apply_point(forward.apply_point(p)), p);
}

#[test]
fn test_non_positive_expansion() {
    assert!(Transform::new(0.0, DVec3::ZERO, None, false).is_err());
    assert!(Transform::default().is_identity());
}
