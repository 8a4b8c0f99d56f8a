//! # Conversion Pipeline
//!
//! Text in, placed solid tree out:
//!
//! 1. parse and build the registry
//! 2. optionally apply length safety
//! 3. optionally split disconnected regions
//! 4. lower every region and assemble one solid registry
//! 5. optionally check regions for overlaps
//!
//! [`ConversionOptions`] selects the steps and their tolerances. Missing
//! fields take their defaults, so an empty JSON object is a valid
//! configuration.

use config::constants::{CONTACT_TOLERANCE, DEFAULT_SAMPLES_PER_AXIS, LENGTH_SAFETY};
use fluka_geometry::Registry;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::compile::{compile, CompiledGeometry};
use crate::error::{CsgError, Warning};
use crate::evaluate::SampledEvaluator;
use crate::overlap::{Cancellation, OverlapChecker, RegionOverlap, SampledKernel};
use crate::passes::{DisjointUnionSplitter, LengthSafetyPass};

/// Steps and tolerances of a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Apply the length-safety pass.
    pub length_safety: bool,
    /// Margin of the length-safety pass.
    pub length_safety_margin: f64,
    /// Split regions whose zones are not connected.
    pub split_disjoint: bool,
    /// Report overlapping regions.
    pub check_overlaps: bool,
    /// Samples per axis of the reference evaluator.
    pub samples_per_axis: usize,
    /// Contact tolerance of the splitter.
    pub contact_tolerance: f64,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            length_safety: false,
            length_safety_margin: LENGTH_SAFETY,
            split_disjoint: true,
            check_overlaps: true,
            samples_per_axis: DEFAULT_SAMPLES_PER_AXIS,
            contact_tolerance: CONTACT_TOLERANCE,
        }
    }
}

impl ConversionOptions {
    /// Evaluator configured by these options.
    pub fn evaluator(&self) -> SampledEvaluator {
        SampledEvaluator::new(self.samples_per_axis, self.contact_tolerance)
    }
}

/// Everything a conversion produces.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The registry that was lowered, after the selected passes.
    pub registry: Registry,
    /// Lowered solids and placed regions.
    pub geometry: CompiledGeometry,
    /// Overlapping region pairs; empty when checking is off.
    pub overlaps: Vec<RegionOverlap>,
    /// Non-fatal findings.
    pub warnings: Vec<Warning>,
}

/// Converts deck text.
///
/// ## Example
///
/// ```rust
/// use fluka_csg::pipeline::{convert, ConversionOptions};
///
/// let source = "RPP BOX -5 5 -5 5 -5 5\nEND\nINSIDE 5 +BOX\nEND\nGEOEND\n";
/// let conversion = convert(source, &ConversionOptions::default()).unwrap();
/// assert_eq!(conversion.geometry.regions[0].name, "INSIDE");
/// assert!(conversion.overlaps.is_empty());
/// ```
pub fn convert(source: &str, options: &ConversionOptions) -> Result<Conversion, CsgError> {
    let registry = fluka_geometry::load(source)?;
    convert_registry(&registry, options, &Cancellation::new())
}

/// Converts an already built registry.
#[instrument(skip_all, fields(regions = input.region_count()))]
pub fn convert_registry(
    input: &Registry,
    options: &ConversionOptions,
    cancel: &Cancellation,
) -> Result<Conversion, CsgError> {
    let mut warnings = Vec::new();
    let mut registry = input.clone();

    if options.length_safety {
        let output = LengthSafetyPass::new(options.length_safety_margin).run(&registry)?;
        warnings.extend(output.warnings);
        registry = output.registry;
    }
    if cancel.is_cancelled() {
        return Err(CsgError::Cancelled);
    }
    if options.split_disjoint {
        registry = DisjointUnionSplitter::new(options.evaluator()).run(&registry)?;
    }
    if cancel.is_cancelled() {
        return Err(CsgError::Cancelled);
    }

    let geometry = compile(&registry)?;
    let overlaps = if options.check_overlaps {
        check_overlaps(&geometry, options.evaluator(), cancel)?
    } else {
        Vec::new()
    };

    info!(
        regions = geometry.regions.len(),
        solids = geometry.solids.len(),
        overlaps = overlaps.len(),
        warnings = warnings.len(),
        "conversion finished"
    );
    Ok(Conversion {
        registry,
        geometry,
        overlaps,
        warnings,
    })
}

/// Pairwise overlap check over compiled regions.
pub fn check_overlaps(
    geometry: &CompiledGeometry,
    evaluator: SampledEvaluator,
    cancel: &Cancellation,
) -> Result<Vec<RegionOverlap>, CsgError> {
    let kernel = SampledKernel::new(&geometry.solids, evaluator);
    let regions = geometry
        .regions
        .iter()
        .map(|region| (region.name.clone(), region.solid))
        .collect();
    OverlapChecker::new(kernel, regions).check_all(cancel)
}
