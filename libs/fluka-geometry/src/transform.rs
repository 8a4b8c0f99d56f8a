//! # Transforms
//!
//! Roto-translations and the composite transform attached to a body.
//!
//! A `ROT-DEFI` step rotates about one world axis by a polar angle `θ`
//! and an azimuthal angle `φ` after translating by `T`. Its homogeneous
//! matrix is
//!
//! ```text
//! M = | R   R·T |      R = R₁(θ) · R₂(φ)
//!     | 0    1  |
//! ```
//!
//! A chain of steps sharing one name composes as `Mₙ · … · M₁`, so the
//! first card is applied first. A body transform then maps a definition
//! point `p` to `M · (e·p + t)` where `e` is the `$start_expansion`
//! factor and `t` the `$start_translat` offset.

use std::fmt;
use std::sync::Arc;

use config::constants::{angle_in_range, approx_equal, EPSILON};
use glam::{DMat3, DMat4, DVec3, DVec4};
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

// =============================================================================
// AXIS
// =============================================================================

/// Rotation axis of a `ROT-DEFI` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// World x.
    X,
    /// World y.
    Y,
    /// World z.
    Z,
}

impl Axis {
    /// Parse an axis as written on the card: `x`/`y`/`z` in either case or
    /// the numeric codes `1`/`2`/`3`, with `0` meaning z.
    ///
    /// A numeric field of at least 100 is read as `100·j + i`, where `i` is
    /// the transformation index and `j` the axis code.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use fluka_geometry::transform::Axis;
    ///
    /// assert_eq!(Axis::parse("y").unwrap(), Axis::Y);
    /// assert_eq!(Axis::parse("0").unwrap(), Axis::Z);
    /// assert_eq!(Axis::parse("201.0").unwrap(), Axis::Y);
    /// assert!(Axis::parse("w").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, GeometryError> {
        let code = text
            .parse::<f64>()
            .ok()
            .filter(|v| v.fract() == 0.0 && *v >= 0.0)
            .map(|v| v as i64)
            .map(|v| if v >= 100 { v / 100 } else { v });
        match (text.to_ascii_lowercase().as_str(), code) {
            ("x", _) | (_, Some(1)) => Ok(Axis::X),
            ("y", _) | (_, Some(2)) => Ok(Axis::Y),
            ("z", _) | (_, Some(3)) | (_, Some(0)) => Ok(Axis::Z),
            _ => Err(GeometryError::validation(
                format!("axis '{text}'"),
                "expected x, y, z, 1, 2, 3 or 100·axis + index",
            )),
        }
    }

    /// Lower-case name used when writing cards.
    pub const fn name(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// ROT-DEFI
// =============================================================================

/// One validated roto-translation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotDefi {
    /// Rotation axis.
    pub axis: Axis,
    /// Polar angle in degrees, `[0, 180]`.
    pub polar: f64,
    /// Azimuthal angle in degrees, `[-180, 180]`.
    pub azimuth: f64,
    /// Translation applied before the rotation.
    pub translation: DVec3,
}

impl RotDefi {
    /// Creates a step, validating both angles.
    ///
    /// ## Parameters
    ///
    /// - `name`: Chain name, used in error messages
    /// - `axis`, `polar`, `azimuth`, `translation`: Card fields
    pub fn new(
        name: &str,
        axis: Axis,
        polar: f64,
        azimuth: f64,
        translation: DVec3,
    ) -> Result<Self, GeometryError> {
        if !angle_in_range(polar, 0.0, 180.0) {
            return Err(GeometryError::validation(
                name,
                format!("polar angle {polar} outside [0, 180]"),
            ));
        }
        if !angle_in_range(azimuth, -180.0, 180.0) {
            return Err(GeometryError::validation(
                name,
                format!("azimuthal angle {azimuth} outside [-180, 180]"),
            ));
        }
        if !translation.is_finite() {
            return Err(GeometryError::validation(name, "translation is not finite"));
        }
        Ok(Self {
            axis,
            polar,
            azimuth,
            translation,
        })
    }

    /// Rotation block `R₁(θ) · R₂(φ)`.
    pub fn rotation(&self) -> DMat3 {
        let (st, ct) = self.polar.to_radians().sin_cos();
        let (sp, cp) = self.azimuth.to_radians().sin_cos();
        let (r1, r2) = match self.axis {
            Axis::X => (
                rows([[ct, st, 0.0], [-st, ct, 0.0], [0.0, 0.0, 1.0]]),
                rows([[1.0, 0.0, 0.0], [0.0, cp, sp], [0.0, -sp, cp]]),
            ),
            Axis::Y => (
                rows([[1.0, 0.0, 0.0], [0.0, ct, st], [0.0, -st, ct]]),
                rows([[cp, 0.0, -sp], [0.0, 1.0, 0.0], [sp, 0.0, cp]]),
            ),
            Axis::Z => (
                rows([[ct, 0.0, -st], [0.0, 1.0, 0.0], [st, 0.0, ct]]),
                rows([[cp, sp, 0.0], [-sp, cp, 0.0], [0.0, 0.0, 1.0]]),
            ),
        };
        r1 * r2
    }

    /// Homogeneous matrix `[[R, R·T], [0, 1]]`.
    pub fn matrix(&self) -> DMat4 {
        let rotation = self.rotation();
        let column = rotation * self.translation;
        DMat4::from_cols(
            rotation.x_axis.extend(0.0),
            rotation.y_axis.extend(0.0),
            rotation.z_axis.extend(0.0),
            DVec4::new(column.x, column.y, column.z, 1.0),
        )
    }

    /// Applies this step alone to a point.
    pub fn apply(&self, point: DVec3) -> DVec3 {
        self.rotation() * (point + self.translation)
    }
}

/// Build a matrix from rows.
fn rows(r: [[f64; 3]; 3]) -> DMat3 {
    DMat3::from_cols(
        DVec3::new(r[0][0], r[1][0], r[2][0]),
        DVec3::new(r[0][1], r[1][1], r[2][1]),
        DVec3::new(r[0][2], r[1][2], r[2][2]),
    )
}

// =============================================================================
// ROTO-TRANSLATION
// =============================================================================

/// A named chain of [`RotDefi`] steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotoTranslation {
    name: String,
    steps: Vec<RotDefi>,
}

impl RotoTranslation {
    /// Creates a chain from steps that all carry `name`.
    ///
    /// ## Parameters
    ///
    /// - `name`: Chain name
    /// - `steps`: `(step name, step)` pairs in card order
    ///
    /// ## Errors
    ///
    /// `Validation` if the chain is empty or a step carries another name.
    pub fn new(name: &str, steps: Vec<(String, RotDefi)>) -> Result<Self, GeometryError> {
        if steps.is_empty() {
            return Err(GeometryError::validation(name, "roto-translation has no steps"));
        }
        if let Some((other, _)) = steps.iter().find(|(step_name, _)| step_name != name) {
            return Err(GeometryError::validation(
                name,
                format!("chain member is named '{other}'"),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            steps: steps.into_iter().map(|(_, step)| step).collect(),
        })
    }

    /// Chain name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Steps in application order.
    pub fn steps(&self) -> &[RotDefi] {
        &self.steps
    }

    /// Composite matrix `Mₙ · … · M₁`.
    pub fn matrix(&self) -> DMat4 {
        self.steps
            .iter()
            .fold(DMat4::IDENTITY, |acc, step| step.matrix() * acc)
    }
}

// =============================================================================
// TRANSFORM
// =============================================================================

/// Composite transform of one body: expansion, translation and an optional
/// (possibly inverted) roto-translation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// `$start_expansion` factor, 1 when absent.
    pub expansion: f64,
    /// `$start_translat` offset, zero when absent.
    pub translation: DVec3,
    /// `$start_transform` chain.
    pub rototranslation: Option<Arc<RotoTranslation>>,
    /// `$start_transform -NAME` applies the inverse chain.
    pub inverse: bool,
}

impl Transform {
    /// Creates a transform, validating the expansion factor.
    pub fn new(
        expansion: f64,
        translation: DVec3,
        rototranslation: Option<Arc<RotoTranslation>>,
        inverse: bool,
    ) -> Result<Self, GeometryError> {
        if !(expansion.is_finite() && expansion > EPSILON) {
            return Err(GeometryError::validation(
                "expansion",
                format!("factor {expansion} must be positive"),
            ));
        }
        Ok(Self {
            expansion,
            translation,
            rototranslation,
            inverse,
        })
    }

    /// Matrix of the roto-translation part, inverted if requested.
    pub fn chain_matrix(&self) -> DMat4 {
        match &self.rototranslation {
            Some(chain) if self.inverse => chain.matrix().inverse(),
            Some(chain) => chain.matrix(),
            None => DMat4::IDENTITY,
        }
    }

    /// Maps a body-definition point to world: `M · (e·p + t)`.
    pub fn apply_point(&self, point: DVec3) -> DVec3 {
        self.chain_matrix()
            .transform_point3(point * self.expansion + self.translation)
    }

    /// Maps a definition-space frame (already expanded) to world.
    pub fn apply_frame(&self, centre: DVec3, rotation: DMat3) -> (DVec3, DMat3) {
        let matrix = self.chain_matrix();
        let chain_rotation = DMat3::from_mat4(matrix);
        (
            matrix.transform_point3(centre + self.translation),
            chain_rotation * rotation,
        )
    }

    /// Whether the transform changes nothing.
    pub fn is_identity(&self) -> bool {
        self.rototranslation.is_none()
            && approx_equal(self.expansion, 1.0)
            && self.translation == DVec3::ZERO
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            expansion: 1.0,
            translation: DVec3::ZERO,
            rototranslation: None,
            inverse: false,
        }
    }
}

#[cfg(test)]
mod tests;
