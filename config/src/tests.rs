//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_epsilon_is_small() {
    assert!(EPSILON < 1e-6, "EPSILON should be small for precision");
}

#[test]
fn test_angle_tolerance_is_tiny() {
    assert!(ANGLE_TOLERANCE < 1e-3);
}

// =============================================================================
// GEOMETRY TESTS
// =============================================================================

#[test]
fn test_length_safety_below_contact_tolerance() {
    assert!(
        LENGTH_SAFETY < CONTACT_TOLERANCE,
        "shrunk bodies must still be detected as touching"
    );
    assert!(COVER_TOLERANCE * 100.0 < LENGTH_SAFETY);
}

#[test]
fn test_infinity_dwarfs_length_safety() {
    assert!(INFINITY / LENGTH_SAFETY > 1e9);
}

// =============================================================================
// INPUT AND LIMIT TESTS
// =============================================================================

#[test]
fn test_name_length_matches_card_format() {
    assert_eq!(MAX_NAME_LENGTH, 8);
}

#[test]
fn test_red_zone_smaller_than_stack() {
    assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
}

#[test]
fn test_samples_per_axis_reasonable() {
    assert!(DEFAULT_SAMPLES_PER_AXIS >= 16);
    assert!(DEFAULT_SAMPLES_PER_AXIS <= 512);
}

// =============================================================================
// HELPER TESTS
// =============================================================================

#[test]
fn test_approx_equal() {
    assert!(approx_equal(1.0, 1.0));
    assert!(approx_equal(1.0, 1.0 + EPSILON / 2.0));
    assert!(!approx_equal(1.0, 1.0 + EPSILON * 2.0));
}

#[test]
fn test_approx_zero() {
    assert!(approx_zero(0.0));
    assert!(approx_zero(EPSILON / 2.0));
    assert!(!approx_zero(EPSILON * 2.0));
}

#[test]
fn test_angle_in_range_bounds() {
    assert!(angle_in_range(0.0, 0.0, 180.0));
    assert!(angle_in_range(180.0, 0.0, 180.0));
    assert!(angle_in_range(-180.0, -180.0, 180.0));
    assert!(!angle_in_range(181.0, 0.0, 180.0));
    assert!(!angle_in_range(-0.5, 0.0, 180.0));
    assert!(!angle_in_range(f64::NAN, 0.0, 180.0));
}
