//! # CSG Compiler
//!
//! Lowers zones and regions into binary Boolean solids.
//!
//! ## Lowering rules
//!
//! - body → kernel primitive in the body's local frame
//! - zone → fold over its items, seeded with the first operand:
//!   `seed = seed ∩ operand` or `seed = seed − operand`
//! - region → fold of its zones with union
//!
//! Every folded operand is placed with [`Placement::between`] the frame of
//! the seed's first operand and its own frame, so the result of a zone is
//! expressed in the frame of its first operand, and the result of a region
//! in the frame of its first zone.
//!
//! ## Naming
//!
//! Each solid built in one run is named `{entity}_{n}` with `n` a counter
//! that increases by one per solid.

use std::collections::HashMap;

use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use fluka_geometry::{BodyId, GeometryError, Material, Operand, Operator, Placement, RegionId, Registry, ZoneId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use stacker::maybe_grow;
use tracing::debug;

use crate::error::CsgError;
use crate::kernel::Kernel;
use crate::solid::{BooleanOp, PlacedSolid, SolidNode, SolidRegistry};

// =============================================================================
// COMPILER
// =============================================================================

/// Lowers entities of one registry through a kernel.
///
/// Bodies and zones are lowered once per compiler and reused, so the
/// result is a DAG when an entity appears in several places.
pub struct CsgCompiler<'r, K: Kernel> {
    registry: &'r Registry,
    kernel: K,
    counter: usize,
    bodies: HashMap<BodyId, K::Solid>,
    zones: HashMap<ZoneId, K::Solid>,
}

impl<'r, K: Kernel> CsgCompiler<'r, K> {
    /// Creates a compiler that builds into `kernel`.
    pub fn new(registry: &'r Registry, kernel: K) -> Self {
        Self {
            registry,
            kernel,
            counter: 0,
            bodies: HashMap::new(),
            zones: HashMap::new(),
        }
    }

    /// The kernel built so far.
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Consumes the compiler, returning the kernel.
    pub fn into_kernel(self) -> K {
        self.kernel
    }

    /// Lowers a body to a primitive.
    pub fn body_solid(&mut self, id: BodyId) -> Result<K::Solid, CsgError> {
        if let Some(solid) = self.bodies.get(&id) {
            return Ok(solid.clone());
        }
        let registry = self.registry;
        let body = registry.body(id);
        let name = self.next_name(body.name());
        let solid = self.kernel.primitive(&name, &body.primitive())?;
        self.bodies.insert(id, solid.clone());
        Ok(solid)
    }

    /// Lowers a zone; the result lives in the frame of its first operand.
    pub fn zone_solid(&mut self, id: ZoneId) -> Result<K::Solid, CsgError> {
        if let Some(solid) = self.zones.get(&id) {
            return Ok(solid.clone());
        }
        let solid = maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || self.lower_zone(id))?;
        self.zones.insert(id, solid.clone());
        Ok(solid)
    }

    /// Lowers a region; the result lives in the frame of its first zone.
    pub fn region_solid(&mut self, id: RegionId) -> Result<K::Solid, CsgError> {
        let registry = self.registry;
        let region = registry.region(id);
        let zones = region.zones();
        let frame = registry.zone_frame(zones[0]);

        let mut seed = self.zone_solid(zones[0])?;
        for &zone in &zones[1..] {
            let solid = self.zone_solid(zone)?;
            let placement = Placement::between(&frame, &registry.zone_frame(zone));
            seed = self.combine(region.name(), BooleanOp::Union, &seed, &solid, placement)?;
        }
        Ok(seed)
    }

    fn lower_zone(&mut self, id: ZoneId) -> Result<K::Solid, CsgError> {
        let registry = self.registry;
        let zone = registry.zone(id);
        let (first, rest) = zone.items().split_first().ok_or_else(|| {
            GeometryError::validation(zone.name(), "zone has no operands")
        })?;
        assert_eq!(
            first.operator,
            Operator::Intersect,
            "zone {} must start with an intersected operand",
            zone.name()
        );
        let frame = registry.operand_frame(first.operand);

        let mut seed = self.operand_solid(first.operand)?;
        for item in rest {
            let solid = self.operand_solid(item.operand)?;
            let placement = Placement::between(&frame, &registry.operand_frame(item.operand));
            let op = match item.operator {
                Operator::Intersect => BooleanOp::Intersection,
                Operator::Subtract => BooleanOp::Subtraction,
            };
            seed = self.combine(zone.name(), op, &seed, &solid, placement)?;
        }
        Ok(seed)
    }

    fn operand_solid(&mut self, operand: Operand) -> Result<K::Solid, CsgError> {
        match operand {
            Operand::Body(id) => self.body_solid(id),
            Operand::Zone(id) => self.zone_solid(id),
        }
    }

    fn combine(
        &mut self,
        label: &str,
        op: BooleanOp,
        first: &K::Solid,
        second: &K::Solid,
        placement: Placement,
    ) -> Result<K::Solid, CsgError> {
        let name = self.next_name(label);
        let result = self.kernel.boolean(&name, op, first, second, placement)?;
        if self.kernel.is_null(&result) {
            return Err(CsgError::NullSolid {
                operator: op,
                first: self.kernel.solid_name(first).to_string(),
                second: self.kernel.solid_name(second).to_string(),
            });
        }
        Ok(result)
    }

    fn next_name(&mut self, label: &str) -> String {
        self.counter += 1;
        format!("{label}_{}", self.counter)
    }
}

// =============================================================================
// REGION LOWERING
// =============================================================================

/// A region solid positioned in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRegion {
    /// Region name.
    pub name: String,
    /// Assigned material.
    pub material: Option<Material>,
    /// Root solid and its world frame.
    pub solid: PlacedSolid,
}

/// One region lowered into its own solid registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoweredRegion {
    /// The placed region; its root indexes `solids`.
    pub region: PlacedRegion,
    /// Solids of this region only.
    pub solids: SolidRegistry,
}

/// All regions of a registry in one solid registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledGeometry {
    /// Every solid of every region.
    pub solids: SolidRegistry,
    /// Regions in registry order.
    pub regions: Vec<PlacedRegion>,
}

impl CompiledGeometry {
    /// Region by name.
    pub fn region(&self, name: &str) -> Option<&PlacedRegion> {
        self.regions.iter().find(|region| region.name == name)
    }
}

/// Lowers one region into a fresh solid registry.
///
/// Pure: depends only on the registry, so regions can be lowered in any
/// order or in parallel.
pub fn lower_region(registry: &Registry, id: RegionId) -> Result<LoweredRegion, CsgError> {
    let region = registry.region(id);
    let mut compiler = CsgCompiler::new(registry, SolidRegistry::new());
    let root = compiler.region_solid(id)?;
    let solids = compiler.into_kernel();
    debug!(region = region.name(), solids = solids.len(), "lowered region");
    Ok(LoweredRegion {
        region: PlacedRegion {
            name: region.name().to_string(),
            material: region.material().cloned(),
            solid: PlacedSolid::new(root, registry.region_frame(id)),
        },
        solids,
    })
}

/// Lowers every region in parallel, in registry order.
pub fn lower_all(registry: &Registry) -> Result<Vec<LoweredRegion>, CsgError> {
    (0..registry.region_count())
        .into_par_iter()
        .map(|i| lower_region(registry, RegionId(i)))
        .collect()
}

/// Merges lowered regions into one solid registry.
///
/// Solids are renumbered with a single counter in region order, which
/// keeps names unique across regions.
pub fn assemble(lowered: Vec<LoweredRegion>) -> Result<CompiledGeometry, CsgError> {
    let mut solids = SolidRegistry::new();
    let mut regions = Vec::with_capacity(lowered.len());
    let mut counter = 0;

    for part in lowered {
        let mut remap = Vec::with_capacity(part.solids.len());
        for (_, solid) in part.solids.iter() {
            counter += 1;
            let label = solid.name.rsplit_once('_').map_or(solid.name.as_str(), |(label, _)| label);
            let name = format!("{label}_{counter}");
            let id = match &solid.node {
                SolidNode::Primitive(primitive) => solids.add_primitive(name, primitive.clone())?,
                SolidNode::Boolean {
                    op,
                    first,
                    second,
                    placement,
                } => solids.add_boolean(name, *op, remap[first.0], remap[second.0], *placement)?,
            };
            remap.push(id);
        }
        let mut region = part.region;
        region.solid.root = remap[region.solid.root.0];
        regions.push(region);
    }

    debug!(regions = regions.len(), solids = solids.len(), "assembled geometry");
    Ok(CompiledGeometry { solids, regions })
}

/// Lowers and assembles every region of a registry.
pub fn compile(registry: &Registry) -> Result<CompiledGeometry, CsgError> {
    assemble(lower_all(registry)?)
}
