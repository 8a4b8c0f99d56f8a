//! # Configuration Constants
//!
//! Centralized constants for the conversion pipeline. All tolerances,
//! safety margins and resolution parameters are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Geometry**: Length safety and the size used for infinite bodies
//! - **Input**: Limits imposed by the card format
//! - **Sampling**: Resolution of the reference point-membership evaluator
//! - **Limits**: Recursion and stack guards

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Tolerance (in degrees) applied to angle range checks.
///
/// A polar angle of `180.0 + 1e-12` caused by a decimal round trip is still
/// accepted, `181.0` is not.
///
/// # Example
///
/// ```rust
/// use config::constants::ANGLE_TOLERANCE;
///
/// let polar: f64 = 180.0 + 1e-12;
/// assert!(polar <= 180.0 + ANGLE_TOLERANCE);
/// ```
pub const ANGLE_TOLERANCE: f64 = 1e-9;

/// Relative tolerance for perpendicularity checks on body edge vectors.
///
/// Two edges `a` and `b` are accepted as perpendicular when
/// `|a·b| <= ORTHOGONALITY_TOLERANCE * |a| * |b|`.
pub const ORTHOGONALITY_TOLERANCE: f64 = 1e-6;

// =============================================================================
// GEOMETRY CONSTANTS
// =============================================================================

/// Default length-safety margin (in input length units, cm for FLUKA).
///
/// Bodies entering a Boolean result are grown by this amount and bodies
/// being subtracted are shrunk by it, so that nominally coincident
/// surfaces never produce coplanar faces downstream.
///
/// # Example
///
/// ```rust
/// use config::constants::LENGTH_SAFETY;
///
/// let radius = 5.0;
/// let expanded = radius + LENGTH_SAFETY;
/// let shrunk = radius - LENGTH_SAFETY;
/// assert!(expanded > radius && shrunk < radius);
/// ```
pub const LENGTH_SAFETY: f64 = 1e-6;

/// Half-size used to bound infinite bodies (half-spaces, infinite
/// cylinders, quadrics).
///
/// The downstream kernel cannot represent unbounded solids, so infinite
/// bodies are emitted as boxes or tubes of this half-length.
pub const INFINITY: f64 = 50_000.0;

// =============================================================================
// INPUT CONSTANTS
// =============================================================================

/// Maximum length of a body or region name read from input.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_NAME_LENGTH;
///
/// assert!("TARGET01".len() <= MAX_NAME_LENGTH);
/// assert!("TARGET012".len() > MAX_NAME_LENGTH);
/// ```
pub const MAX_NAME_LENGTH: usize = 8;

/// Maximum nesting depth of parenthesised sub-zones.
pub const MAX_ZONE_DEPTH: usize = 256;

// =============================================================================
// SAMPLING CONSTANTS
// =============================================================================

/// Default number of sample cells per axis used by the reference evaluator.
///
/// Volume estimates use `n³` midpoint samples over a solid's extent.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_SAMPLES_PER_AXIS;
///
/// let samples = DEFAULT_SAMPLES_PER_AXIS.pow(3);
/// assert!(samples > 10_000);
/// ```
pub const DEFAULT_SAMPLES_PER_AXIS: usize = 48;

/// Distance below which two zones are considered touching.
///
/// Must stay larger than [`LENGTH_SAFETY`] so that length-safe shrinkage
/// does not break contact between zones that touch nominally.
pub const CONTACT_TOLERANCE: f64 = 1e-3;

/// Inward pull applied to outline points before testing whether one solid
/// lies inside another.
///
/// Absorbs rounding from relative placements. Must stay well below
/// [`LENGTH_SAFETY`], otherwise a shrunk body would count as covered by
/// its original.
pub const COVER_TOLERANCE: f64 = 1e-9;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Bytes of stack space reserved when growing the stack for recursive
/// zone lowering using the `stacker` crate.
///
/// # Example
///
/// ```rust
/// use config::constants::STACKER_STACK_SIZE_BYTES;
/// assert!(STACKER_STACK_SIZE_BYTES >= 1024);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 8 * 1024 * 1024;

/// Remaining stack below which `stacker` allocates a new segment.
pub const STACKER_RED_ZONE_BYTES: usize = STACKER_STACK_SIZE_BYTES / 8;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Checks that an angle in degrees lies in `[min, max]` up to
/// [`ANGLE_TOLERANCE`].
///
/// # Example
///
/// ```rust
/// use config::constants::angle_in_range;
///
/// assert!(angle_in_range(90.0, 0.0, 180.0));
/// assert!(!angle_in_range(181.0, 0.0, 180.0));
/// ```
#[inline]
pub fn angle_in_range(degrees: f64, min: f64, max: f64) -> bool {
    degrees.is_finite() && degrees >= min - ANGLE_TOLERANCE && degrees <= max + ANGLE_TOLERANCE
}
