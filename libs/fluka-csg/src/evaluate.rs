//! # Sampling Evaluator
//!
//! Reference evaluation of solid trees by point classification on a
//! regular midpoint grid. It answers volume, overlap and contact queries
//! without a meshing kernel, at a precision set by the number of samples
//! per axis.
//!
//! Grids are split into slabs along x and counted in parallel.

use config::constants::{CONTACT_TOLERANCE, DEFAULT_SAMPLES_PER_AXIS, EPSILON};
use fluka_geometry::Extent;
use glam::DVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::solid::{PlacedSolid, SolidRegistry};

/// Common volume of two solids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overlap {
    /// Bounding box of the sampled common volume.
    pub extent: Extent,
    /// Estimated common volume.
    pub volume: f64,
}

/// Grid-sampling evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampledEvaluator {
    /// Samples per axis of every grid.
    pub resolution: usize,
    /// Distance within which two solids count as touching.
    pub contact_tolerance: f64,
}

impl Default for SampledEvaluator {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_SAMPLES_PER_AXIS,
            contact_tolerance: CONTACT_TOLERANCE,
        }
    }
}

impl SampledEvaluator {
    /// Creates an evaluator.
    pub fn new(resolution: usize, contact_tolerance: f64) -> Self {
        Self {
            resolution: resolution.max(1),
            contact_tolerance,
        }
    }

    /// Whether a world point is inside.
    pub fn contains(&self, solids: &SolidRegistry, solid: &PlacedSolid, world: DVec3) -> bool {
        solid.contains(solids, world)
    }

    /// World bounding box.
    pub fn extent(&self, solids: &SolidRegistry, solid: &PlacedSolid) -> Extent {
        solid.extent(solids)
    }

    /// Estimated volume: inside samples times the cell volume.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use fluka_csg::evaluate::SampledEvaluator;
    /// use fluka_csg::solid::{PlacedSolid, SolidRegistry};
    /// use fluka_geometry::{Frame, Primitive};
    /// use glam::DVec3;
    ///
    /// let mut solids = SolidRegistry::new();
    /// let cube = solids.add_primitive("CUBE_1", Primitive::Box { half: DVec3::splat(5.0) }).unwrap();
    /// let placed = PlacedSolid::new(cube, Frame::IDENTITY);
    /// let volume = SampledEvaluator::new(10, 1e-3).volume(&solids, &placed);
    /// assert!((volume - 1000.0).abs() < 1e-6);
    /// ```
    pub fn volume(&self, solids: &SolidRegistry, solid: &PlacedSolid) -> f64 {
        let extent = solid.extent(solids);
        let grid = Grid::new(extent, self.resolution);
        grid.count(|p| solid.contains(solids, p)) as f64 * grid.cell_volume()
    }

    /// Common volume of two solids, or `None` when no sample lies in both.
    pub fn intersect(
        &self,
        solids: &SolidRegistry,
        first: &PlacedSolid,
        second: &PlacedSolid,
    ) -> Option<Overlap> {
        let a = first.extent(solids);
        let b = second.extent(solids);
        if !a.overlaps(&b) {
            return None;
        }
        let common = a.intersection(&b);
        if common.size().min_element() <= EPSILON {
            return None;
        }

        let grid = Grid::new(common, self.resolution);
        let (count, hits) = grid.collect(|p| first.contains(solids, p) && second.contains(solids, p));
        let volume = count as f64 * grid.cell_volume();
        (count > 0 && volume > EPSILON).then(|| Overlap {
            extent: hits.grown(grid.half_cell().max_element()).intersection(&common),
            volume,
        })
    }

    /// Whether two solids overlap or come within the contact tolerance.
    ///
    /// Samples the intersection of both extents grown by the tolerance; a
    /// sample inside one solid touches the other if it, or one of its six
    /// axis neighbours at the tolerance distance, is inside the other.
    pub fn touching(&self, solids: &SolidRegistry, first: &PlacedSolid, second: &PlacedSolid) -> bool {
        let tolerance = self.contact_tolerance;
        let a = first.extent(solids).grown(tolerance);
        let b = second.extent(solids).grown(tolerance);
        if !a.overlaps(&b) {
            return false;
        }
        let probes = [
            DVec3::ZERO,
            DVec3::X * tolerance,
            DVec3::NEG_X * tolerance,
            DVec3::Y * tolerance,
            DVec3::NEG_Y * tolerance,
            DVec3::Z * tolerance,
            DVec3::NEG_Z * tolerance,
        ];
        let near = |solid: &PlacedSolid, p: DVec3| probes.iter().any(|d| solid.contains(solids, p + *d));
        Grid::new(a.intersection(&b), self.resolution).any(|p| {
            (first.contains(solids, p) && near(second, p)) || (second.contains(solids, p) && near(first, p))
        })
    }
}

// =============================================================================
// GRID
// =============================================================================

/// Midpoint grid over an extent.
struct Grid {
    min: DVec3,
    step: DVec3,
    n: usize,
}

impl Grid {
    fn new(extent: Extent, n: usize) -> Self {
        let n = n.max(1);
        let step = if extent.is_valid() {
            extent.size() / n as f64
        } else {
            DVec3::ZERO
        };
        Self {
            min: extent.min,
            step,
            n: if extent.is_valid() { n } else { 0 },
        }
    }

    fn cell_volume(&self) -> f64 {
        self.step.x * self.step.y * self.step.z
    }

    fn half_cell(&self) -> DVec3 {
        self.step * 0.5
    }

    fn point(&self, i: usize, j: usize, k: usize) -> DVec3 {
        self.min + DVec3::new(i as f64 + 0.5, j as f64 + 0.5, k as f64 + 0.5) * self.step
    }

    fn slab(&self, i: usize) -> impl Iterator<Item = DVec3> + '_ {
        (0..self.n).flat_map(move |j| (0..self.n).map(move |k| self.point(i, j, k)))
    }

    fn count<F>(&self, inside: F) -> usize
    where
        F: Fn(DVec3) -> bool + Sync,
    {
        (0..self.n)
            .into_par_iter()
            .map(|i| self.slab(i).filter(|p| inside(*p)).count())
            .sum()
    }

    fn collect<F>(&self, inside: F) -> (usize, Extent)
    where
        F: Fn(DVec3) -> bool + Sync,
    {
        (0..self.n)
            .into_par_iter()
            .map(|i| {
                self.slab(i)
                    .filter(|p| inside(*p))
                    .fold((0, Extent::empty()), |(count, extent), p| {
                        (count + 1, extent.union(&Extent::new(p, p)))
                    })
            })
            .reduce(
                || (0, Extent::empty()),
                |(n1, e1), (n2, e2)| (n1 + n2, e1.union(&e2)),
            )
    }

    fn any<F>(&self, inside: F) -> bool
    where
        F: Fn(DVec3) -> bool + Sync,
    {
        (0..self.n)
            .into_par_iter()
            .any(|i| self.slab(i).any(|p| inside(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fluka_geometry::{Frame, Primitive};

    fn cube(solids: &mut SolidRegistry, name: &str, half: f64, centre: DVec3) -> PlacedSolid {
        let id = solids
            .add_primitive(name, Primitive::Box { half: DVec3::splat(half) })
            .unwrap();
        PlacedSolid::new(id, Frame::at(centre))
    }

    #[test]
    fn test_sphere_volume_converges() {
        let mut solids = SolidRegistry::new();
        let id = solids.add_primitive("S", Primitive::Sphere { radius: 2.0 }).unwrap();
        let placed = PlacedSolid::new(id, Frame::IDENTITY);
        let volume = SampledEvaluator::new(64, 1e-3).volume(&solids, &placed);
        let exact = 4.0 / 3.0 * std::f64::consts::PI * 8.0;
        assert_relative_eq!(volume, exact, max_relative = 0.02);
    }

    #[test]
    fn test_intersect_half_overlapping_cubes() {
        let mut solids = SolidRegistry::new();
        let a = cube(&mut solids, "A", 1.0, DVec3::ZERO);
        let b = cube(&mut solids, "B", 1.0, DVec3::new(1.0, 0.0, 0.0));
        let overlap = SampledEvaluator::new(20, 1e-3).intersect(&solids, &a, &b).unwrap();
        assert_relative_eq!(overlap.volume, 4.0, max_relative = 1e-9);
        assert_relative_eq!(overlap.extent.min.x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_face_contact_is_not_an_overlap() {
        let mut solids = SolidRegistry::new();
        let a = cube(&mut solids, "A", 1.0, DVec3::ZERO);
        let b = cube(&mut solids, "B", 1.0, DVec3::new(2.0, 0.0, 0.0));
        let evaluator = SampledEvaluator::default();
        assert_eq!(evaluator.intersect(&solids, &a, &b), None);
        assert!(evaluator.touching(&solids, &a, &b));
    }

    #[test]
    fn test_gap_is_not_touching() {
        let mut solids = SolidRegistry::new();
        let a = cube(&mut solids, "A", 1.0, DVec3::ZERO);
        let b = cube(&mut solids, "B", 1.0, DVec3::new(2.5, 0.0, 0.0));
        assert!(!SampledEvaluator::default().touching(&solids, &a, &b));
    }
}
