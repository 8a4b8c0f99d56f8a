//! # Disjoint Union Splitting
//!
//! A region whose zones fall apart into separate pieces is split into one
//! region per piece, so that every region solid is connected.
//!
//! Zones are grouped by contact: two zones belong together when their
//! solids overlap or come within the contact tolerance, and groups are
//! closed under that relation. A region with a single group is carried
//! over unchanged. A region with several groups becomes
//! `{region}_djz{i_j...}` regions, named after the zone indices of each
//! group, whose zones are copies named `{zone}_djz_z{index}`.
//!
//! Splitting an already split registry changes nothing.

use std::collections::HashMap;
use std::sync::Arc;

use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use fluka_geometry::{Operand, RegionId, Registry, Zone, ZoneId, ZoneItem};
use stacker::maybe_grow;
use tracing::debug;

use crate::compile::CsgCompiler;
use crate::error::CsgError;
use crate::evaluate::SampledEvaluator;
use crate::solid::{PlacedSolid, SolidRegistry};

/// Groups the zone indices of a region into maximal connected sets.
///
/// Groups are ordered by their smallest index and hold ascending indices.
///
/// ## Example
///
/// ```rust
/// use fluka_csg::evaluate::SampledEvaluator;
/// use fluka_csg::passes::connected_zones;
///
/// let registry = fluka_geometry::load(
///     "SPH A 0 0 0 1\nSPH B 1000 0 0 1\nSPH C 1001 0 0 1\nEND\nR 5 +A | +B | +C\nEND\n",
/// )
/// .unwrap();
/// let region = registry.region_id("R").unwrap();
/// let groups = connected_zones(&registry, region, &SampledEvaluator::default()).unwrap();
/// assert_eq!(groups, vec![vec![0], vec![1, 2]]);
/// ```
pub fn connected_zones(
    registry: &Registry,
    id: RegionId,
    evaluator: &SampledEvaluator,
) -> Result<Vec<Vec<usize>>, CsgError> {
    let zones = registry.region(id).zones();
    if zones.len() == 1 {
        return Ok(vec![vec![0]]);
    }

    let mut compiler = CsgCompiler::new(registry, SolidRegistry::new());
    let placed = zones
        .iter()
        .map(|&zone| Ok(PlacedSolid::new(compiler.zone_solid(zone)?, registry.zone_frame(zone))))
        .collect::<Result<Vec<_>, CsgError>>()?;
    let solids = compiler.into_kernel();

    let mut parent: Vec<usize> = (0..zones.len()).collect();
    for i in 0..zones.len() {
        for j in (i + 1)..zones.len() {
            let (a, b) = (root(&mut parent, i), root(&mut parent, j));
            if a != b && evaluator.touching(&solids, &placed[i], &placed[j]) {
                parent[a.max(b)] = a.min(b);
            }
        }
    }

    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut slot: HashMap<usize, usize> = HashMap::new();
    for i in 0..zones.len() {
        let r = root(&mut parent, i);
        let index = *slot.entry(r).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[index].push(i);
    }
    Ok(groups)
}

/// Union-find root with path halving.
fn root(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Splits regions whose zones are not connected.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisjointUnionSplitter {
    evaluator: SampledEvaluator,
}

impl DisjointUnionSplitter {
    /// Creates a splitter using `evaluator` for contact tests.
    pub fn new(evaluator: SampledEvaluator) -> Self {
        Self { evaluator }
    }

    /// See [`connected_zones`].
    pub fn connected_zones(&self, registry: &Registry, id: RegionId) -> Result<Vec<Vec<usize>>, CsgError> {
        connected_zones(registry, id, &self.evaluator)
    }

    /// Builds the split registry. The input registry is left untouched.
    pub fn run(&self, input: &Registry) -> Result<Registry, CsgError> {
        let mut output = Registry::new();
        for chain in input.rototranslations() {
            output.add_shared_rototranslation(Arc::clone(chain))?;
        }
        // body ids line up with the input from here on
        for (_, body) in input.bodies() {
            output.add_shared_body(Arc::clone(body))?;
        }

        let mut copier = ZoneCopier {
            input,
            output,
            kept: HashMap::new(),
        };
        for (id, region) in input.regions() {
            let groups = self.connected_zones(input, id)?;
            if groups.len() == 1 {
                let zones = region
                    .zones()
                    .iter()
                    .map(|&zone| copier.keep(zone))
                    .collect::<Result<Vec<_>, _>>()?;
                copier.output.add_region(region.derived(region.name(), zones)?)?;
                continue;
            }

            debug!(region = region.name(), pieces = groups.len(), "splitting region");
            for group in &groups {
                let indices = group.iter().map(usize::to_string).collect::<Vec<_>>().join("_");
                let zones = group
                    .iter()
                    .map(|&i| copier.rename(region.zones()[i], &format!("_djz_z{i}")))
                    .collect::<Result<Vec<_>, _>>()?;
                copier
                    .output
                    .add_region(region.derived(format!("{}_djz{indices}", region.name()), zones)?)?;
            }
        }
        Ok(copier.output)
    }
}

/// Copies zones from the input registry into the output.
struct ZoneCopier<'a> {
    input: &'a Registry,
    output: Registry,
    kept: HashMap<ZoneId, ZoneId>,
}

impl ZoneCopier<'_> {
    /// Copies a zone under its own name, once.
    fn keep(&mut self, id: ZoneId) -> Result<ZoneId, CsgError> {
        if let Some(&done) = self.kept.get(&id) {
            return Ok(done);
        }
        let copied = maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            let input = self.input;
            let zone = input.zone(id);
            let items = self.items(zone, |copier, nested| copier.keep(nested))?;
            if items == zone.items() {
                Ok::<ZoneId, CsgError>(self.output.add_shared_zone(Arc::clone(zone))?)
            } else {
                Ok(self.output.add_zone(Zone::new(zone.name(), items)?)?)
            }
        })?;
        self.kept.insert(id, copied);
        Ok(copied)
    }

    /// Deep-copies a zone and its nested zones, appending `suffix` to
    /// every name.
    fn rename(&mut self, id: ZoneId, suffix: &str) -> Result<ZoneId, CsgError> {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            let input = self.input;
            let zone = input.zone(id);
            let items = self.items(zone, |copier, nested| copier.rename(nested, suffix))?;
            Ok(self.output.add_zone(Zone::new(format!("{}{suffix}", zone.name()), items)?)?)
        })
    }

    fn items<F>(&mut self, zone: &Zone, mut nested: F) -> Result<Vec<ZoneItem>, CsgError>
    where
        F: FnMut(&mut Self, ZoneId) -> Result<ZoneId, CsgError>,
    {
        zone.items()
            .iter()
            .map(|item| {
                let operand = match item.operand {
                    Operand::Body(body) => Operand::Body(body),
                    Operand::Zone(id) => Operand::Zone(nested(self, id)?),
                };
                Ok(ZoneItem {
                    operator: item.operator,
                    operand,
                })
            })
            .collect()
    }
}
