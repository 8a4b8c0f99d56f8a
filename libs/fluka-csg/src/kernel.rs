//! # Target Kernel Seam
//!
//! The compiler never builds solids itself; it asks a [`Kernel`] for
//! primitives and binary Boolean nodes. [`SolidRegistry`] is the provided
//! kernel; a meshing backend would implement the same trait.

use fluka_geometry::{Placement, Primitive};

use crate::error::CsgError;
use crate::solid::{BooleanOp, SolidId, SolidRegistry};

/// Builder of target solids.
pub trait Kernel {
    /// Handle to a built solid.
    type Solid: Clone;

    /// Builds a primitive solid in its local frame.
    fn primitive(&mut self, name: &str, primitive: &Primitive) -> Result<Self::Solid, CsgError>;

    /// Builds `first op second`, with `second` placed in `first`'s frame.
    fn boolean(
        &mut self,
        name: &str,
        op: BooleanOp,
        first: &Self::Solid,
        second: &Self::Solid,
        placement: Placement,
    ) -> Result<Self::Solid, CsgError>;

    /// Whether a solid is known to be empty.
    fn is_null(&self, solid: &Self::Solid) -> bool;

    /// Name the solid was built with.
    fn solid_name<'a>(&'a self, solid: &'a Self::Solid) -> &'a str;
}

impl Kernel for SolidRegistry {
    type Solid = SolidId;

    fn primitive(&mut self, name: &str, primitive: &Primitive) -> Result<SolidId, CsgError> {
        self.add_primitive(name, primitive.clone())
    }

    fn boolean(
        &mut self,
        name: &str,
        op: BooleanOp,
        first: &SolidId,
        second: &SolidId,
        placement: Placement,
    ) -> Result<SolidId, CsgError> {
        self.add_boolean(name, op, *first, *second, placement)
    }

    fn is_null(&self, solid: &SolidId) -> bool {
        !self.solid(*solid).extent.is_valid()
    }

    fn solid_name<'a>(&'a self, solid: &'a SolidId) -> &'a str {
        &self.solid(*solid).name
    }
}
