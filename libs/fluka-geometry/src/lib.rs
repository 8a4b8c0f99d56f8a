//! # Combinatorial Geometry Model
//!
//! Bodies, transforms, zones and regions built from a parsed deck.
//!
//! Entities are plain values that are handed to a [`Registry`], which owns
//! them behind `Arc` and hands out typed ids. Zones reference bodies and
//! nested zones through the closed [`Operand`] variant; a zone's first
//! operand defines the frame its other operands are placed in.
//!
//! ## Example
//!
//! ```rust
//! use fluka_geometry::{load, write_registry};
//!
//! let registry = load("RPP BOX -5 5 -5 5 -5 5\nEND\nINSIDE 5 +BOX\nEND\nGEOEND\n").unwrap();
//! let region = registry.region_id("INSIDE").unwrap();
//! assert_eq!(registry.region_extent(region).volume(), 1000.0);
//! assert!(write_registry(&registry).contains("RPP BOX -5 5 -5 5 -5 5"));
//! ```

pub mod body;
pub mod build;
pub mod error;
pub mod extent;
pub mod frame;
pub mod material;
pub mod primitive;
pub mod region;
pub mod registry;
pub mod transform;
pub mod writer;
pub mod zone;

pub use body::{Body, BodyKind};
pub use build::{build_registry, load};
pub use error::GeometryError;
pub use extent::Extent;
pub use frame::{Frame, Placement};
pub use material::Material;
pub use primitive::{Plane, Primitive};
pub use region::Region;
pub use registry::{BodyId, Registry, RegionId, ZoneId};
pub use transform::{Axis, RotDefi, RotoTranslation, Transform};
pub use writer::write_registry;
pub use zone::{Operand, Operator, Zone, ZoneItem};
