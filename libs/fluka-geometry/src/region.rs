//! # Regions
//!
//! A region is the union of its zones plus a material. Like a zone, its
//! first member defines the frame the others are placed in.

use crate::error::GeometryError;
use crate::material::Material;
use crate::registry::ZoneId;

/// A named union of zones.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    name: String,
    zones: Vec<ZoneId>,
    neighbours: u32,
    material: Option<Material>,
}

impl Region {
    /// Creates a region; `zones` must not be empty.
    pub fn new(
        name: impl Into<String>,
        zones: Vec<ZoneId>,
        neighbours: u32,
        material: Option<Material>,
    ) -> Result<Self, GeometryError> {
        let name = name.into();
        if zones.is_empty() {
            return Err(GeometryError::validation(&name, "region has no zones"));
        }
        Ok(Self {
            name,
            zones,
            neighbours,
            material,
        })
    }

    /// Region name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zones in order; never empty.
    pub fn zones(&self) -> &[ZoneId] {
        &self.zones
    }

    /// Neighbour count from the region card.
    pub fn neighbours(&self) -> u32 {
        self.neighbours
    }

    /// Assigned material.
    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    /// The same region with other zones under another name.
    pub fn derived(&self, name: impl Into<String>, zones: Vec<ZoneId>) -> Result<Region, GeometryError> {
        Region::new(name, zones, self.neighbours, self.material.clone())
    }
}
