//! # Solid Tree
//!
//! Target representation: a registry of named solids, each either a
//! primitive in its own local frame or a binary Boolean node. The second
//! operand of a Boolean node is placed in the first operand's frame by a
//! [`Placement`], so a tree is evaluated entirely in its root's frame.
//!
//! ## Example
//!
//! ```rust
//! use fluka_csg::solid::{BooleanOp, SolidRegistry};
//! use fluka_geometry::{Placement, Primitive};
//! use glam::DVec3;
//!
//! let mut solids = SolidRegistry::new();
//! let outer = solids.add_primitive("OUT_1", Primitive::Box { half: DVec3::splat(5.0) }).unwrap();
//! let inner = solids.add_primitive("IN_2", Primitive::Box { half: DVec3::splat(2.0) }).unwrap();
//! let shell = solids
//!     .add_boolean("SHELL_3", BooleanOp::Subtraction, outer, inner, Placement::IDENTITY)
//!     .unwrap();
//! assert!(solids.contains(shell, DVec3::new(4.0, 0.0, 0.0)));
//! assert!(!solids.contains(shell, DVec3::ZERO));
//! ```

use std::collections::HashMap;
use std::fmt;

use config::constants::{COVER_TOLERANCE, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use fluka_geometry::{Extent, Frame, Placement, Primitive};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use stacker::maybe_grow;

use crate::error::CsgError;

/// Binary Boolean operation types.
///
/// # Variants
///
/// - `Union`: A ∪ B
/// - `Subtraction`: A − B
/// - `Intersection`: A ∩ B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BooleanOp {
    /// Union: A ∪ B
    Union,
    /// Subtraction: A − B
    Subtraction,
    /// Intersection: A ∩ B
    Intersection,
}

impl BooleanOp {
    /// Returns the operation name.
    pub fn name(&self) -> &'static str {
        match self {
            BooleanOp::Union => "union",
            BooleanOp::Subtraction => "subtraction",
            BooleanOp::Intersection => "intersection",
        }
    }
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Index of a solid in its [`SolidRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SolidId(pub usize);

/// Shape of one solid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SolidNode {
    /// A kernel primitive in its local frame.
    Primitive(Primitive),
    /// `first op second`, with `second` placed in `first`'s frame.
    Boolean {
        /// The operation.
        op: BooleanOp,
        /// Left operand; defines the frame.
        first: SolidId,
        /// Right operand.
        second: SolidId,
        /// Placement of `second` in `first`'s frame.
        placement: Placement,
    },
}

/// A named solid with a conservative bounding box in its own frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    /// Unique name.
    pub name: String,
    /// Shape.
    pub node: SolidNode,
    /// Bounding box in the solid's frame; invalid when provably empty.
    pub extent: Extent,
}

/// Append-only registry of named solids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolidRegistry {
    solids: Vec<Solid>,
    #[serde(skip)]
    names: HashMap<String, SolidId>,
}

impl SolidRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a primitive solid.
    pub fn add_primitive(
        &mut self,
        name: impl Into<String>,
        primitive: Primitive,
    ) -> Result<SolidId, CsgError> {
        let extent = primitive.local_extent();
        self.insert(name.into(), SolidNode::Primitive(primitive), extent)
    }

    /// Registers a Boolean solid over two registered operands.
    ///
    /// ## Parameters
    ///
    /// - `name`: Unique solid name
    /// - `op`: Operation
    /// - `first`: Operand that defines the frame
    /// - `second`: Operand placed into `first`'s frame
    /// - `placement`: Rotation and translation of `second` in that frame
    pub fn add_boolean(
        &mut self,
        name: impl Into<String>,
        op: BooleanOp,
        first: SolidId,
        second: SolidId,
        placement: Placement,
    ) -> Result<SolidId, CsgError> {
        let a = self.solid(first).extent;
        let b = self.placed_extent(second, &placement);
        let extent = match op {
            BooleanOp::Union if !a.is_valid() => b,
            BooleanOp::Union if !b.is_valid() => a,
            BooleanOp::Union => a.union(&b),
            BooleanOp::Intersection if a.overlaps(&b) => a.intersection(&b),
            BooleanOp::Intersection => Extent::empty(),
            BooleanOp::Subtraction if self.covers(second, &placement, first) => Extent::empty(),
            BooleanOp::Subtraction => a,
        };
        self.insert(
            name.into(),
            SolidNode::Boolean {
                op,
                first,
                second,
                placement,
            },
            extent,
        )
    }

    /// Whether `cover`, placed by `placement`, contains all of `inner`.
    ///
    /// Only a convex primitive can cover: the hull points of `inner` must
    /// all lie inside it. Round outlines are sampled, so a sliver poking out
    /// between two outline points goes unnoticed.
    fn covers(&self, cover: SolidId, placement: &Placement, inner: SolidId) -> bool {
        let SolidNode::Primitive(primitive) = &self.solid(cover).node else {
            return false;
        };
        if !primitive.is_convex() || !self.solid(inner).extent.is_valid() {
            return false;
        }
        let points = self.hull_points(inner);
        let centre = points.iter().fold(DVec3::ZERO, |acc, p| acc + *p) / points.len().max(1) as f64;
        points.iter().all(|p| {
            let pulled = *p - (*p - centre).normalize_or_zero() * COVER_TOLERANCE;
            primitive.contains(placement.apply_inverse(pulled))
        })
    }

    /// Points in the solid's frame whose convex hull covers the solid.
    ///
    /// A subtraction or intersection lies inside its first operand, so only
    /// the first operand's points are kept.
    pub fn hull_points(&self, id: SolidId) -> Vec<DVec3> {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            match &self.solid(id).node {
                SolidNode::Primitive(primitive) => primitive.hull_points(),
                SolidNode::Boolean {
                    op: BooleanOp::Union,
                    first,
                    second,
                    placement,
                } => {
                    let mut points = self.hull_points(*first);
                    points.extend(self.hull_points(*second).into_iter().map(|p| placement.apply(p)));
                    points
                }
                SolidNode::Boolean { first, .. } => self.hull_points(*first),
            }
        })
    }

    fn insert(&mut self, name: String, node: SolidNode, extent: Extent) -> Result<SolidId, CsgError> {
        if self.names.contains_key(&name) {
            return Err(CsgError::NameCollision { name });
        }
        let id = SolidId(self.solids.len());
        self.names.insert(name.clone(), id);
        self.solids.push(Solid { name, node, extent });
        Ok(id)
    }

    fn placed_extent(&self, id: SolidId, placement: &Placement) -> Extent {
        let extent = self.solid(id).extent;
        if extent.is_valid() {
            extent.transformed(placement.rotation, placement.translation)
        } else {
            extent
        }
    }

    /// Solid by id.
    pub fn solid(&self, id: SolidId) -> &Solid {
        &self.solids[id.0]
    }

    /// Solid id by name.
    pub fn find(&self, name: &str) -> Option<SolidId> {
        self.names.get(name).copied()
    }

    /// Solids in registration order; operands precede the nodes using them.
    pub fn iter(&self) -> impl Iterator<Item = (SolidId, &Solid)> {
        self.solids.iter().enumerate().map(|(i, s)| (SolidId(i), s))
    }

    /// Number of solids.
    pub fn len(&self) -> usize {
        self.solids.len()
    }

    /// Whether the registry holds no solid.
    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    /// Rebuilds the name index, e.g. after deserializing.
    pub fn reindex(&mut self) {
        self.names = self
            .solids
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), SolidId(i)))
            .collect();
    }

    /// Point-membership test for a point in the solid's frame.
    pub fn contains(&self, id: SolidId, point: DVec3) -> bool {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            let solid = self.solid(id);
            if !solid.extent.contains(point) {
                return false;
            }
            match &solid.node {
                SolidNode::Primitive(primitive) => primitive.contains(point),
                SolidNode::Boolean {
                    op,
                    first,
                    second,
                    placement,
                } => {
                    let inside_first = self.contains(*first, point);
                    let inside_second = || self.contains(*second, placement.apply_inverse(point));
                    match op {
                        BooleanOp::Union => inside_first || inside_second(),
                        BooleanOp::Intersection => inside_first && inside_second(),
                        BooleanOp::Subtraction => inside_first && !inside_second(),
                    }
                }
            }
        })
    }

    /// Number of primitive leaves reached from `id`, counting shared
    /// subtrees once per use.
    pub fn leaf_count(&self, id: SolidId) -> usize {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            match &self.solid(id).node {
                SolidNode::Primitive(_) => 1,
                SolidNode::Boolean { first, second, .. } => {
                    self.leaf_count(*first) + self.leaf_count(*second)
                }
            }
        })
    }
}

/// A solid tree positioned in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedSolid {
    /// Root of the tree.
    pub root: SolidId,
    /// World frame of the root's local coordinates.
    pub frame: Frame,
}

impl PlacedSolid {
    /// Places `root` at `frame`.
    pub fn new(root: SolidId, frame: Frame) -> Self {
        Self { root, frame }
    }

    /// World bounding box.
    pub fn extent(&self, solids: &SolidRegistry) -> Extent {
        let extent = solids.solid(self.root).extent;
        if extent.is_valid() {
            extent.transformed(self.frame.rotation, self.frame.centre)
        } else {
            extent
        }
    }

    /// Point-membership test for a world point.
    pub fn contains(&self, solids: &SolidRegistry, world: DVec3) -> bool {
        solids.contains(self.root, self.frame.to_local(world))
    }
}
