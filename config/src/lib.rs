//! # Config Crate
//!
//! Centralized configuration constants for the combinatorial-geometry
//! conversion pipeline. Tolerances, length-safety margins and sampling
//! resolutions live here so that the parser, the geometry model and the
//! CSG lowering agree on every magic number.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, LENGTH_SAFETY, INFINITY};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! assert!(value.abs() < EPSILON);
//!
//! // Length safety is always far below the size of an infinite body
//! assert!(LENGTH_SAFETY < INFINITY);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Pure**: No dependencies, no runtime state
//! - **FLUKA Compatible**: Name widths and units follow the input format

pub mod constants;

#[cfg(test)]
mod tests;
