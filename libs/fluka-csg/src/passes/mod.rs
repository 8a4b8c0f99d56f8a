//! # Legalization Passes
//!
//! Registry-to-registry rewrites applied before lowering. Each pass reads
//! an input registry and builds new ones; bodies, chains and zones that do
//! not change are shared with the input through `Arc`.

pub mod disjoint;
pub mod length_safety;

pub use disjoint::{connected_zones, DisjointUnionSplitter};
pub use length_safety::{LengthSafetyOutput, LengthSafetyPass};
