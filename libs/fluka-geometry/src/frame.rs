//! # Frames and Placements
//!
//! A [`Frame`] is where a body (or a zone, through its first operand) sits
//! in the world: a centre and an active rotation whose columns are the
//! local axes expressed in world coordinates.
//!
//! A [`Placement`] is one frame expressed inside another. Binary solid
//! nodes place their second operand with a placement relative to the first
//! operand's local frame:
//!
//! ```text
//! rotation    = A.rotationᵀ · B.rotation
//! translation = A.rotationᵀ · (B.centre − A.centre)
//! ```
//!
//! so that a point `p` in B's local frame sits at `rotation · p + translation`
//! in A's local frame.

use config::constants::ORTHOGONALITY_TOLERANCE;
use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

// =============================================================================
// FRAME
// =============================================================================

/// World position and orientation of a local coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Origin of the local frame in world coordinates.
    pub centre: DVec3,
    /// Active local → world rotation.
    pub rotation: DMat3,
}

impl Frame {
    /// The world frame.
    pub const IDENTITY: Frame = Frame {
        centre: DVec3::ZERO,
        rotation: DMat3::IDENTITY,
    };

    /// Creates a frame.
    pub fn new(centre: DVec3, rotation: DMat3) -> Self {
        Self { centre, rotation }
    }

    /// Frame at `centre` with axes parallel to the world axes.
    pub fn at(centre: DVec3) -> Self {
        Self::new(centre, DMat3::IDENTITY)
    }

    /// Frame at `centre` whose local z axis points along `axis`.
    ///
    /// The rotation is the shortest arc taking world z onto `axis`.
    pub fn along(centre: DVec3, axis: DVec3) -> Self {
        let rotation = match axis.try_normalize() {
            Some(dir) => DMat3::from_quat(glam::DQuat::from_rotation_arc(DVec3::Z, dir)),
            None => DMat3::IDENTITY,
        };
        Self::new(centre, rotation)
    }

    /// Local → world.
    pub fn to_world(&self, local: DVec3) -> DVec3 {
        self.rotation * local + self.centre
    }

    /// World → local.
    pub fn to_local(&self, world: DVec3) -> DVec3 {
        self.rotation.transpose() * (world - self.centre)
    }

    /// Whether the rotation is orthonormal and right-handed.
    pub fn is_orthonormal(&self) -> bool {
        let product = self.rotation.transpose() * self.rotation;
        product.abs_diff_eq(DMat3::IDENTITY, ORTHOGONALITY_TOLERANCE)
            && (self.rotation.determinant() - 1.0).abs() < ORTHOGONALITY_TOLERANCE
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// =============================================================================
// PLACEMENT
// =============================================================================

/// A frame expressed in another frame's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Rotation of the placed frame relative to the reference frame.
    pub rotation: DMat3,
    /// Origin of the placed frame in reference-local coordinates.
    pub translation: DVec3,
}

impl Placement {
    /// No rotation, no translation.
    pub const IDENTITY: Placement = Placement {
        rotation: DMat3::IDENTITY,
        translation: DVec3::ZERO,
    };

    /// Placement of `placed` relative to `reference`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use fluka_geometry::frame::{Frame, Placement};
    /// use glam::DVec3;
    ///
    /// let a = Frame::at(DVec3::new(1.0, 0.0, 0.0));
    /// let b = Frame::at(DVec3::new(4.0, 2.0, 0.0));
    /// let placement = Placement::between(&a, &b);
    /// assert_eq!(placement.translation, DVec3::new(3.0, 2.0, 0.0));
    /// ```
    pub fn between(reference: &Frame, placed: &Frame) -> Self {
        let inverse = reference.rotation.transpose();
        Self {
            rotation: inverse * placed.rotation,
            translation: inverse * (placed.centre - reference.centre),
        }
    }

    /// Maps a point from the placed frame into the reference frame.
    pub fn apply(&self, point: DVec3) -> DVec3 {
        self.rotation * point + self.translation
    }

    /// Maps a point from the reference frame into the placed frame.
    pub fn apply_inverse(&self, point: DVec3) -> DVec3 {
        self.rotation.transpose() * (point - self.translation)
    }

    /// Tait-Bryan angles `(x, y, z)` in radians such that
    /// `rotation = Rz(z) · Ry(y) · Rx(x)`.
    pub fn tait_bryan_xyz(&self) -> DVec3 {
        tait_bryan_xyz(&self.rotation)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Decompose a rotation into Tait-Bryan angles `(x, y, z)` with
/// `m = Rz(z) · Ry(y) · Rx(x)`.
pub fn tait_bryan_xyz(m: &DMat3) -> DVec3 {
    // m.col(j)[i] is row i, column j
    let r00 = m.x_axis.x;
    let r10 = m.x_axis.y;
    let r20 = m.x_axis.z;
    let r01 = m.y_axis.x;
    let r11 = m.y_axis.y;
    let r21 = m.y_axis.z;
    let r22 = m.z_axis.z;

    let sin_y = (-r20).clamp(-1.0, 1.0);
    let y = sin_y.asin();
    if (1.0 - sin_y.abs()) > 1e-12 {
        DVec3::new(r21.atan2(r22), y, r10.atan2(r00))
    } else {
        // gimbal lock: z folded into x
        DVec3::new((r01 * sin_y).atan2(r11), y, 0.0)
    }
}

/// Rebuild a rotation from Tait-Bryan angles; inverse of [`tait_bryan_xyz`].
pub fn from_tait_bryan_xyz(angles: DVec3) -> DMat3 {
    DMat3::from_rotation_z(angles.z) * DMat3::from_rotation_y(angles.y) * DMat3::from_rotation_x(angles.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frame_round_trip() {
        let frame = Frame::along(DVec3::new(1.0, 2.0, 3.0), DVec3::new(1.0, 1.0, 0.0));
        let p = DVec3::new(0.3, -0.7, 2.0);
        let back = frame.to_local(frame.to_world(p));
        assert_relative_eq!(back.x, p.x, epsilon = 1e-12);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-12);
        assert_relative_eq!(back.z, p.z, epsilon = 1e-12);
        assert!(frame.is_orthonormal());
    }

    #[test]
    fn test_along_points_z_at_axis() {
        let frame = Frame::along(DVec3::ZERO, DVec3::new(0.0, 0.0, -5.0));
        let z = frame.rotation * DVec3::Z;
        assert_relative_eq!(z.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_placement_maps_between_frames() {
        let a = Frame::new(DVec3::new(1.0, 0.0, 0.0), DMat3::from_rotation_z(0.4));
        let b = Frame::new(DVec3::new(-2.0, 3.0, 1.0), DMat3::from_rotation_x(1.1));
        let placement = Placement::between(&a, &b);

        let p_b = DVec3::new(0.5, 0.25, -1.0);
        let world = b.to_world(p_b);
        let in_a = placement.apply(p_b);
        let expected = a.to_local(world);
        assert_relative_eq!(in_a.x, expected.x, epsilon = 1e-12);
        assert_relative_eq!(in_a.y, expected.y, epsilon = 1e-12);
        assert_relative_eq!(in_a.z, expected.z, epsilon = 1e-12);

        let back = placement.apply_inverse(in_a);
        assert_relative_eq!(back.x, p_b.x, epsilon = 1e-12);
    }

    #[test]
    fn test_placement_of_self_is_identity() {
        let a = Frame::new(DVec3::new(7.0, 1.0, 0.0), DMat3::from_rotation_y(0.3));
        let placement = Placement::between(&a, &a);
        assert!(placement.rotation.abs_diff_eq(DMat3::IDENTITY, 1e-12));
        assert!(placement.translation.abs_diff_eq(DVec3::ZERO, 1e-12));
    }

    #[test]
    fn test_tait_bryan_round_trip() {
        let angles = DVec3::new(0.3, -0.8, 1.9);
        let m = from_tait_bryan_xyz(angles);
        let back = tait_bryan_xyz(&m);
        assert_relative_eq!(back.x, angles.x, epsilon = 1e-10);
        assert_relative_eq!(back.y, angles.y, epsilon = 1e-10);
        assert_relative_eq!(back.z, angles.z, epsilon = 1e-10);
    }

    #[test]
    fn test_tait_bryan_gimbal_lock_rebuilds_matrix() {
        let angles = DVec3::new(0.4, std::f64::consts::FRAC_PI_2, 0.0);
        let m = from_tait_bryan_xyz(angles);
        let rebuilt = from_tait_bryan_xyz(tait_bryan_xyz(&m));
        assert!(rebuilt.abs_diff_eq(m, 1e-9));
    }
}
