//! # Registry
//!
//! Arena that owns the bodies, roto-translations, zones and regions of one
//! geometry. Entities are built as plain values first and then handed to
//! `add_*`, which checks name uniqueness and returns a typed index.
//!
//! The registry is append-only. Passes that transform a geometry build a
//! new registry and share unchanged entities with the old one through
//! `Arc`, so an input registry is never modified.
//!
//! Zones and regions may only reference entities that are already
//! registered, which keeps nested zones acyclic.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::error::GeometryError;
use crate::extent::Extent;
use crate::frame::Frame;
use crate::region::Region;
use crate::transform::RotoTranslation;
use crate::zone::{Operand, Operator, Zone};

/// Index of a body in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub usize);

/// Index of a zone in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneId(pub usize);

/// Index of a region in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub usize);

/// Named, append-only store of geometry entities.
///
/// Ids are only meaningful for the registry that returned them; indexing
/// with a foreign id panics or returns an unrelated entity.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    bodies: Vec<Arc<Body>>,
    body_names: HashMap<String, BodyId>,
    rototranslations: Vec<Arc<RotoTranslation>>,
    rototranslation_names: HashMap<String, usize>,
    zones: Vec<Arc<Zone>>,
    zone_names: HashMap<String, ZoneId>,
    regions: Vec<Arc<Region>>,
    region_names: HashMap<String, RegionId>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // REGISTRATION
    // =========================================================================

    /// Registers a body.
    pub fn add_body(&mut self, body: Body) -> Result<BodyId, GeometryError> {
        self.add_shared_body(Arc::new(body))
    }

    /// Registers a body shared with another registry.
    pub fn add_shared_body(&mut self, body: Arc<Body>) -> Result<BodyId, GeometryError> {
        if self.body_names.contains_key(body.name()) {
            return Err(collision("body", body.name()));
        }
        let id = BodyId(self.bodies.len());
        self.body_names.insert(body.name().to_string(), id);
        self.bodies.push(body);
        Ok(id)
    }

    /// Registers a roto-translation chain.
    pub fn add_rototranslation(
        &mut self,
        chain: RotoTranslation,
    ) -> Result<Arc<RotoTranslation>, GeometryError> {
        self.add_shared_rototranslation(Arc::new(chain))
    }

    /// Registers a roto-translation chain shared with another registry.
    pub fn add_shared_rototranslation(
        &mut self,
        chain: Arc<RotoTranslation>,
    ) -> Result<Arc<RotoTranslation>, GeometryError> {
        if self.rototranslation_names.contains_key(chain.name()) {
            return Err(collision("roto-translation", chain.name()));
        }
        self.rototranslation_names
            .insert(chain.name().to_string(), self.rototranslations.len());
        self.rototranslations.push(Arc::clone(&chain));
        Ok(chain)
    }

    /// Registers a zone whose operands are already registered.
    pub fn add_zone(&mut self, zone: Zone) -> Result<ZoneId, GeometryError> {
        self.add_shared_zone(Arc::new(zone))
    }

    /// Registers a zone shared with another registry.
    ///
    /// Operand ids must be valid in this registry.
    pub fn add_shared_zone(&mut self, zone: Arc<Zone>) -> Result<ZoneId, GeometryError> {
        if self.zone_names.contains_key(zone.name()) {
            return Err(collision("zone", zone.name()));
        }
        for item in zone.items() {
            match item.operand {
                Operand::Body(BodyId(i)) if i >= self.bodies.len() => {
                    return Err(GeometryError::lookup("body", format!("#{i} in zone {}", zone.name())));
                }
                Operand::Zone(ZoneId(i)) if i >= self.zones.len() => {
                    return Err(GeometryError::lookup("zone", format!("#{i} in zone {}", zone.name())));
                }
                _ => {}
            }
        }
        let id = ZoneId(self.zones.len());
        self.zone_names.insert(zone.name().to_string(), id);
        self.zones.push(zone);
        Ok(id)
    }

    /// Registers a region whose zones are already registered.
    pub fn add_region(&mut self, region: Region) -> Result<RegionId, GeometryError> {
        if self.region_names.contains_key(region.name()) {
            return Err(collision("region", region.name()));
        }
        if let Some(ZoneId(i)) = region.zones().iter().find(|z| z.0 >= self.zones.len()) {
            return Err(GeometryError::lookup("zone", format!("#{i} in region {}", region.name())));
        }
        let id = RegionId(self.regions.len());
        self.region_names.insert(region.name().to_string(), id);
        self.regions.push(Arc::new(region));
        Ok(id)
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Body by id.
    pub fn body(&self, id: BodyId) -> &Arc<Body> {
        &self.bodies[id.0]
    }

    /// Zone by id.
    pub fn zone(&self, id: ZoneId) -> &Arc<Zone> {
        &self.zones[id.0]
    }

    /// Region by id.
    pub fn region(&self, id: RegionId) -> &Arc<Region> {
        &self.regions[id.0]
    }

    /// Body id by name.
    pub fn body_id(&self, name: &str) -> Result<BodyId, GeometryError> {
        self.body_names
            .get(name)
            .copied()
            .ok_or_else(|| GeometryError::lookup("body", name))
    }

    /// Zone id by name.
    pub fn zone_id(&self, name: &str) -> Result<ZoneId, GeometryError> {
        self.zone_names
            .get(name)
            .copied()
            .ok_or_else(|| GeometryError::lookup("zone", name))
    }

    /// Region id by name.
    pub fn region_id(&self, name: &str) -> Result<RegionId, GeometryError> {
        self.region_names
            .get(name)
            .copied()
            .ok_or_else(|| GeometryError::lookup("region", name))
    }

    /// Roto-translation chain by name.
    pub fn rototranslation(&self, name: &str) -> Result<&Arc<RotoTranslation>, GeometryError> {
        self.rototranslation_names
            .get(name)
            .map(|&i| &self.rototranslations[i])
            .ok_or_else(|| GeometryError::lookup("roto-translation", name))
    }

    /// Bodies in registration order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Arc<Body>)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    /// Zones in registration order.
    pub fn zones(&self) -> impl Iterator<Item = (ZoneId, &Arc<Zone>)> {
        self.zones.iter().enumerate().map(|(i, z)| (ZoneId(i), z))
    }

    /// Regions in registration order.
    pub fn regions(&self) -> impl Iterator<Item = (RegionId, &Arc<Region>)> {
        self.regions.iter().enumerate().map(|(i, r)| (RegionId(i), r))
    }

    /// Roto-translation chains in registration order.
    pub fn rototranslations(&self) -> impl Iterator<Item = &Arc<RotoTranslation>> {
        self.rototranslations.iter()
    }

    /// Number of bodies.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of zones, nested ones included.
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Number of regions.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    // =========================================================================
    // DERIVED GEOMETRY
    // =========================================================================

    /// Name of an operand.
    pub fn operand_name(&self, operand: Operand) -> &str {
        match operand {
            Operand::Body(id) => self.body(id).name(),
            Operand::Zone(id) => self.zone(id).name(),
        }
    }

    /// Frame of an operand: a body's own frame, or the frame of a zone's
    /// first operand followed down to a body.
    pub fn operand_frame(&self, operand: Operand) -> Frame {
        let mut current = operand;
        loop {
            match current {
                Operand::Body(id) => return self.body(id).frame(),
                Operand::Zone(id) => current = self.zone(id).first_operand(),
            }
        }
    }

    /// Frame of a zone, defined by its first operand.
    pub fn zone_frame(&self, id: ZoneId) -> Frame {
        self.operand_frame(Operand::Zone(id))
    }

    /// Frame of a region, defined by its first zone.
    pub fn region_frame(&self, id: RegionId) -> Frame {
        self.zone_frame(self.region(id).zones()[0])
    }

    /// Conservative world extent of an operand.
    ///
    /// Intersected operands shrink the extent, subtracted ones are ignored.
    pub fn operand_extent(&self, operand: Operand) -> Extent {
        match operand {
            Operand::Body(id) => self.body(id).extent(),
            Operand::Zone(id) => self
                .zone(id)
                .items()
                .iter()
                .filter(|item| item.operator == Operator::Intersect)
                .map(|item| self.operand_extent(item.operand))
                .reduce(|acc, e| acc.intersection(&e))
                .unwrap_or_else(Extent::empty),
        }
    }

    /// Conservative world extent of a zone.
    pub fn zone_extent(&self, id: ZoneId) -> Extent {
        self.operand_extent(Operand::Zone(id))
    }

    /// Conservative world extent of a region: the union of its zones.
    pub fn region_extent(&self, id: RegionId) -> Extent {
        self.region(id)
            .zones()
            .iter()
            .fold(Extent::empty(), |acc, z| acc.union(&self.zone_extent(*z)))
    }

    /// Number of body references in a zone, nested zones included.
    pub fn zone_operand_count(&self, id: ZoneId) -> usize {
        self.zone(id)
            .items()
            .iter()
            .map(|item| match item.operand {
                Operand::Body(_) => 1,
                Operand::Zone(nested) => self.zone_operand_count(nested),
            })
            .sum()
    }

    /// Number of body references in a region.
    pub fn region_operand_count(&self, id: RegionId) -> usize {
        self.region(id)
            .zones()
            .iter()
            .map(|z| self.zone_operand_count(*z))
            .sum()
    }
}

fn collision(kind: &'static str, name: &str) -> GeometryError {
    GeometryError::NameCollision {
        kind,
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests;
