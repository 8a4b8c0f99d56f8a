//! # Length Safety
//!
//! Adjacent solids that share a face are ambiguous for a meshing kernel.
//! This pass rebuilds a geometry so that every Boolean operand is nudged by
//! a small margin: operands entering a result are expanded and subtracted
//! operands are shrunk. Inside a subtracted nested zone the roles swap.
//!
//! The pass also returns two twin registries holding the same zones and
//! regions over bodies that are all expanded or all shrunk.

use std::collections::HashMap;
use std::sync::Arc;

use config::constants::{LENGTH_SAFETY, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use fluka_geometry::body::{EXPANDED_SUFFIX, SHRUNK_SUFFIX};
use fluka_geometry::{Body, BodyId, Operand, Operator, Registry, Zone, ZoneId, ZoneItem};
use stacker::maybe_grow;
use tracing::{debug, warn};

use crate::error::{CsgError, Warning};

/// Result of a length-safety run.
#[derive(Debug, Clone)]
pub struct LengthSafetyOutput {
    /// Every body expanded.
    pub expanded: Registry,
    /// Every body shrunk.
    pub shrunk: Registry,
    /// Geometry with entering operands expanded and subtracted ones shrunk.
    pub registry: Registry,
    /// Bodies that could not be adjusted.
    pub warnings: Vec<Warning>,
}

/// Expands entering operands and shrinks subtracted ones by a margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthSafetyPass {
    margin: f64,
}

impl Default for LengthSafetyPass {
    fn default() -> Self {
        Self::new(LENGTH_SAFETY)
    }
}

impl LengthSafetyPass {
    /// Creates a pass with the given world-length margin.
    pub fn new(margin: f64) -> Self {
        Self { margin }
    }

    /// The margin.
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Runs the pass. The input registry is left untouched.
    ///
    /// ## Errors
    ///
    /// A `Validation` error when a body is too thin to shrink by the margin.
    pub fn run(&self, input: &Registry) -> Result<LengthSafetyOutput, CsgError> {
        let mut expanded = Registry::new();
        let mut shrunk = Registry::new();
        let mut warnings = Vec::new();

        for chain in input.rototranslations() {
            expanded.add_shared_rototranslation(Arc::clone(chain))?;
            shrunk.add_shared_rototranslation(Arc::clone(chain))?;
        }
        for (_, body) in input.bodies() {
            match (body.safety_expanded(self.margin)?, body.safety_shrunk(self.margin)?) {
                (Some(grown), Some(thinned)) => {
                    expanded.add_body(grown)?;
                    shrunk.add_body(thinned)?;
                }
                _ => {
                    let code = body.kind().code().keyword();
                    warn!(body = body.name(), code, "no length-safety variant, using body unchanged");
                    warnings.push(Warning::UnsupportedPrimitive {
                        body: body.name().to_string(),
                        code: code.to_string(),
                    });
                    expanded.add_shared_body(Arc::clone(body))?;
                    shrunk.add_shared_body(Arc::clone(body))?;
                }
            }
        }
        // body ids line up with the input, so zones can be shared as they are
        for twin in [&mut expanded, &mut shrunk] {
            for (_, zone) in input.zones() {
                twin.add_shared_zone(Arc::clone(zone))?;
            }
            for (_, region) in input.regions() {
                twin.add_region((**region).clone())?;
            }
        }

        let registry = Rebuild::new(input, &expanded, &shrunk).run()?;
        debug!(
            bodies = registry.body_count(),
            warnings = warnings.len(),
            "length safety applied"
        );
        Ok(LengthSafetyOutput {
            expanded,
            shrunk,
            registry,
            warnings,
        })
    }
}

/// Builds the mixed registry from the two twins.
struct Rebuild<'a> {
    input: &'a Registry,
    expanded: &'a Registry,
    shrunk: &'a Registry,
    output: Registry,
    zones: HashMap<(ZoneId, bool), ZoneId>,
}

impl<'a> Rebuild<'a> {
    fn new(input: &'a Registry, expanded: &'a Registry, shrunk: &'a Registry) -> Self {
        Self {
            input,
            expanded,
            shrunk,
            output: Registry::new(),
            zones: HashMap::new(),
        }
    }

    fn run(mut self) -> Result<Registry, CsgError> {
        let input = self.input;
        for chain in input.rototranslations() {
            self.output.add_shared_rototranslation(Arc::clone(chain))?;
        }
        for (_, region) in input.regions() {
            let zones = region
                .zones()
                .iter()
                .map(|&zone| self.zone(zone, true))
                .collect::<Result<Vec<_>, _>>()?;
            self.output.add_region(region.derived(region.name(), zones)?)?;
        }
        Ok(self.output)
    }

    /// Registers the variant of a body for the given polarity once.
    fn body(&mut self, id: BodyId, entering: bool) -> Result<BodyId, CsgError> {
        let twin = if entering { self.expanded } else { self.shrunk };
        let body: &Arc<Body> = twin.body(id);
        if let Ok(existing) = self.output.body_id(body.name()) {
            return Ok(existing);
        }
        Ok(self.output.add_shared_body(Arc::clone(body))?)
    }

    fn zone(&mut self, id: ZoneId, entering: bool) -> Result<ZoneId, CsgError> {
        if let Some(&done) = self.zones.get(&(id, entering)) {
            return Ok(done);
        }
        let rebuilt = maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.rebuild_zone(id, entering)
        })?;
        self.zones.insert((id, entering), rebuilt);
        Ok(rebuilt)
    }

    fn rebuild_zone(&mut self, id: ZoneId, entering: bool) -> Result<ZoneId, CsgError> {
        let input = self.input;
        let zone = input.zone(id);
        let mut items = Vec::with_capacity(zone.items().len());
        for item in zone.items() {
            let operand_entering = entering == (item.operator == Operator::Intersect);
            let operand = match item.operand {
                Operand::Body(body) => Operand::Body(self.body(body, operand_entering)?),
                Operand::Zone(nested) => Operand::Zone(self.zone(nested, operand_entering)?),
            };
            items.push(ZoneItem {
                operator: item.operator,
                operand,
            });
        }

        // a zone used with both polarities needs two copies
        let name = if self.output.zone_id(zone.name()).is_ok() {
            let suffix = if entering { EXPANDED_SUFFIX } else { SHRUNK_SUFFIX };
            format!("{}{suffix}", zone.name())
        } else {
            zone.name().to_string()
        };
        Ok(self.output.add_zone(Zone::new(name, items)?)?)
    }
}

#[cfg(test)]
mod tests;
