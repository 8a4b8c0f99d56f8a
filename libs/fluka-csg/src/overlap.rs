//! # Overlap Checker
//!
//! Pairwise detection of regions that share volume. Every unordered pair
//! is visited once. A pair whose bounding boxes are disjoint is rejected
//! before the kernel's intersection is ever called, and bounding boxes
//! are computed once per region.
//!
//! ## Example
//!
//! ```rust
//! use fluka_csg::compile::compile;
//! use fluka_csg::overlap::{Cancellation, OverlapChecker, SampledKernel};
//! use fluka_csg::evaluate::SampledEvaluator;
//!
//! let registry = fluka_geometry::load(
//!     "SPH A 0 0 0 2\nSPH B 1 0 0 2\nEND\nRA 5 +A\nRB 5 +B\nEND\n",
//! )
//! .unwrap();
//! let geometry = compile(&registry).unwrap();
//! let kernel = SampledKernel::new(&geometry.solids, SampledEvaluator::default());
//! let regions = geometry.regions.iter().map(|r| (r.name.clone(), r.solid)).collect();
//! let overlaps = OverlapChecker::new(kernel, regions).check_all(&Cancellation::new()).unwrap();
//! assert_eq!(overlaps.len(), 1);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use fluka_geometry::Extent;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CsgError;
use crate::evaluate::{Overlap, SampledEvaluator};
use crate::solid::{PlacedSolid, SolidRegistry};

/// Queries the checker needs from a kernel.
pub trait IntersectionKernel {
    /// Handle to a placed solid.
    type Solid;

    /// World bounding box of a solid.
    fn extent(&self, solid: &Self::Solid) -> Extent;

    /// Common volume of two solids, `None` when empty.
    fn intersect(&self, first: &Self::Solid, second: &Self::Solid) -> Option<Overlap>;
}

/// [`IntersectionKernel`] over placed solids of one registry, backed by
/// the sampling evaluator.
#[derive(Debug, Clone, Copy)]
pub struct SampledKernel<'a> {
    solids: &'a SolidRegistry,
    evaluator: SampledEvaluator,
}

impl<'a> SampledKernel<'a> {
    /// Creates a kernel over `solids`.
    pub fn new(solids: &'a SolidRegistry, evaluator: SampledEvaluator) -> Self {
        Self { solids, evaluator }
    }
}

impl IntersectionKernel for SampledKernel<'_> {
    type Solid = PlacedSolid;

    fn extent(&self, solid: &PlacedSolid) -> Extent {
        self.evaluator.extent(self.solids, solid)
    }

    fn intersect(&self, first: &PlacedSolid, second: &PlacedSolid) -> Option<Overlap> {
        self.evaluator.intersect(self.solids, first, second)
    }
}

/// Shared flag that stops a long check between two pairs.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    /// A token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; every clone observes it.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Two regions sharing volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionOverlap {
    /// First region, in input order.
    pub first: String,
    /// Second region.
    pub second: String,
    /// The common volume.
    pub overlap: Overlap,
}

impl RegionOverlap {
    /// Whether the overlap involves `region`, on either side.
    pub fn involves(&self, region: &str) -> bool {
        self.first == region || self.second == region
    }
}

/// Pairwise overlap detection over named regions.
pub struct OverlapChecker<K: IntersectionKernel> {
    kernel: K,
    regions: Vec<(String, K::Solid, Extent)>,
}

impl<K: IntersectionKernel> OverlapChecker<K> {
    /// Creates a checker, computing each region's extent once.
    pub fn new(kernel: K, regions: Vec<(String, K::Solid)>) -> Self {
        let regions = regions
            .into_iter()
            .map(|(name, solid)| {
                let extent = kernel.extent(&solid);
                (name, solid, extent)
            })
            .collect();
        Self { kernel, regions }
    }

    /// The kernel.
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether there are no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Overlap of regions `i` and `j`, `None` when they share no volume.
    ///
    /// Symmetric: `check_pair(i, j)` and `check_pair(j, i)` report the same
    /// volume, always with the lower index first.
    pub fn check_pair(&self, i: usize, j: usize) -> Option<RegionOverlap> {
        if i == j {
            return None;
        }
        let (i, j) = (i.min(j), i.max(j));
        let (first, a, a_extent) = &self.regions[i];
        let (second, b, b_extent) = &self.regions[j];
        if !a_extent.overlaps(b_extent) {
            return None;
        }
        self.kernel.intersect(a, b).map(|overlap| RegionOverlap {
            first: first.clone(),
            second: second.clone(),
            overlap,
        })
    }

    /// Every overlapping pair, checking for cancellation before each pair.
    pub fn check_all(&self, cancel: &Cancellation) -> Result<Vec<RegionOverlap>, CsgError> {
        let mut overlaps = Vec::new();
        for i in 0..self.regions.len() {
            for j in (i + 1)..self.regions.len() {
                if cancel.is_cancelled() {
                    return Err(CsgError::Cancelled);
                }
                if let Some(overlap) = self.check_pair(i, j) {
                    debug!(first = %overlap.first, second = %overlap.second, volume = overlap.overlap.volume, "overlap");
                    overlaps.push(overlap);
                }
            }
        }
        Ok(overlaps)
    }
}
