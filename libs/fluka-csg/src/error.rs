//! # CSG Errors
//!
//! Fatal errors of the lowering pipeline and the non-fatal warnings it
//! collects along the way.

use fluka_geometry::GeometryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::solid::BooleanOp;

/// Errors that abort a conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CsgError {
    /// Error from the geometry model (parsing, validation, lookup).
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// A Boolean operation produced an empty solid.
    #[error("{operator} of '{first}' and '{second}' is empty")]
    NullSolid {
        /// The operation that produced nothing.
        operator: BooleanOp,
        /// Solid the operation was applied to.
        first: String,
        /// Solid combined into it.
        second: String,
    },

    /// A solid name registered twice in a target registry.
    #[error("solid '{name}' is already defined")]
    NameCollision {
        /// The duplicated name.
        name: String,
    },

    /// The run was cancelled between two steps.
    #[error("cancelled")]
    Cancelled,
}

/// Conditions that do not stop a conversion but are worth reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum Warning {
    /// A body kind without a length-safety variant; it was used unchanged.
    #[error("no length-safety variant for {code} body '{body}', using it unchanged")]
    UnsupportedPrimitive {
        /// Body name.
        body: String,
        /// Body code keyword.
        code: String,
    },
}
