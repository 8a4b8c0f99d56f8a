//! # Binary CSG Lowering
//!
//! Compiles a combinatorial geometry registry into binary Boolean solid
//! trees, with the passes that make a geometry safe to hand to a solid
//! kernel and a pairwise region overlap check.
//!
//! ## Modules
//!
//! - [`solid`]: target solid registry
//! - [`kernel`]: the trait the compiler builds through
//! - [`compile`]: zone and region lowering
//! - [`passes`]: length safety and disjoint-union splitting
//! - [`overlap`]: pairwise region overlap detection
//! - [`evaluate`]: grid-sampling reference evaluator
//! - [`pipeline`]: text to solids in one call

pub mod compile;
pub mod error;
pub mod evaluate;
pub mod kernel;
pub mod overlap;
pub mod passes;
pub mod pipeline;
pub mod solid;

pub use compile::{assemble, compile, lower_all, lower_region, CompiledGeometry, CsgCompiler, LoweredRegion, PlacedRegion};
pub use error::{CsgError, Warning};
pub use evaluate::{Overlap, SampledEvaluator};
pub use kernel::Kernel;
pub use overlap::{Cancellation, IntersectionKernel, OverlapChecker, RegionOverlap, SampledKernel};
pub use passes::{connected_zones, DisjointUnionSplitter, LengthSafetyOutput, LengthSafetyPass};
pub use pipeline::{convert, convert_registry, ConversionOptions, Conversion};
pub use solid::{BooleanOp, PlacedSolid, Solid, SolidId, SolidNode, SolidRegistry};
