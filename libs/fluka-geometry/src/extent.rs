//! # Extents
//!
//! Axis-aligned bounding boxes used for pruning: two solids whose extents
//! do not overlap cannot intersect, and two zones whose (grown) extents do
//! not overlap cannot touch.

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
///
/// # Fields
///
/// - `min`: Minimum corner of the box
/// - `max`: Maximum corner of the box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Minimum corner (x, y, z)
    pub min: DVec3,
    /// Maximum corner (x, y, z)
    pub max: DVec3,
}

impl Extent {
    /// Creates a new extent from min/max corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Creates an empty (invalid) extent, the identity of [`Extent::union`].
    pub fn empty() -> Self {
        Self {
            min: DVec3::splat(f64::INFINITY),
            max: DVec3::splat(f64::NEG_INFINITY),
        }
    }

    /// Extent symmetric about the origin with the given half sizes.
    pub fn symmetric(half: DVec3) -> Self {
        Self::new(-half, half)
    }

    /// Smallest extent containing every point.
    pub fn from_points<I: IntoIterator<Item = DVec3>>(points: I) -> Self {
        points.into_iter().fold(Self::empty(), |acc, p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        })
    }

    /// Checks if this extent overlaps with another (touching counts).
    ///
    /// # Arguments
    ///
    /// * `other` - The other extent
    ///
    /// # Returns
    ///
    /// True if boxes overlap on all three axes.
    pub fn overlaps(&self, other: &Extent) -> bool {
        self.is_valid()
            && other.is_valid()
            && self.min.cmple(other.max).all()
            && self.max.cmpge(other.min).all()
    }

    /// Expands this extent to include another.
    pub fn union(&self, other: &Extent) -> Extent {
        Extent {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Computes the intersection of two extents; invalid if they are disjoint.
    pub fn intersection(&self, other: &Extent) -> Extent {
        Extent {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }

    /// Extent grown by `margin` on every side.
    pub fn grown(&self, margin: f64) -> Extent {
        Extent {
            min: self.min - DVec3::splat(margin),
            max: self.max + DVec3::splat(margin),
        }
    }

    /// Checks if the extent is valid (non-empty).
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    /// Edge lengths, zero for an invalid extent.
    pub fn size(&self) -> DVec3 {
        if self.is_valid() {
            self.max - self.min
        } else {
            DVec3::ZERO
        }
    }

    /// Centre point.
    pub fn centre(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Computes the volume of the extent.
    pub fn volume(&self) -> f64 {
        let size = self.size();
        size.x * size.y * size.z
    }

    /// Whether `point` lies inside or on the boundary.
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// The eight corners.
    pub fn corners(&self) -> [DVec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            DVec3::new(a.x, a.y, a.z),
            DVec3::new(b.x, a.y, a.z),
            DVec3::new(a.x, b.y, a.z),
            DVec3::new(b.x, b.y, a.z),
            DVec3::new(a.x, a.y, b.z),
            DVec3::new(b.x, a.y, b.z),
            DVec3::new(a.x, b.y, b.z),
            DVec3::new(b.x, b.y, b.z),
        ]
    }

    /// Extent of this box after `p ↦ rotation · p + translation`.
    pub fn transformed(&self, rotation: DMat3, translation: DVec3) -> Extent {
        if !self.is_valid() {
            return *self;
        }
        Extent::from_points(self.corners().into_iter().map(|c| rotation * c + translation))
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::empty()
    }
}
