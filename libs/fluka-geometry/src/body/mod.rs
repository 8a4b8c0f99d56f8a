//! # Bodies
//!
//! A body is a named primitive solid with native card parameters and an
//! optional transform. Its world frame, local primitive and extent are all
//! derived on demand from those two pieces:
//!
//! 1. scale the native parameters by the expansion factor
//! 2. take the kind's native frame (see [`shape`] for the conventions)
//! 3. shift it by the translation and map it through the roto-translation
//!
//! ## Example
//!
//! ```rust
//! use fluka_geometry::body::{Body, BodyKind};
//! use glam::DVec3;
//!
//! let kind = BodyKind::Sph { centre: DVec3::new(0.0, 0.0, 5.0), radius: 2.0 };
//! let body = Body::new("BALL", kind, None).unwrap();
//! assert_eq!(body.centre(), DVec3::new(0.0, 0.0, 5.0));
//! assert!(body.contains(DVec3::new(0.0, 1.0, 5.0)));
//! ```

mod kind;
mod safety;
pub mod shape;

pub use kind::BodyKind;

use glam::{DMat3, DVec3};

use fluka_parser::printer::print_body;
use fluka_parser::{BodyCard, Span, TransformRef};

use crate::error::GeometryError;
use crate::extent::Extent;
use crate::frame::Frame;
use crate::primitive::Primitive;
use crate::transform::Transform;

/// Suffix of length-safety expanded bodies.
pub const EXPANDED_SUFFIX: &str = "_e";
/// Suffix of length-safety shrunk bodies.
pub const SHRUNK_SUFFIX: &str = "_s";

/// A named primitive with an optional transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    name: String,
    kind: BodyKind,
    transform: Option<Transform>,
}

impl Body {
    /// Creates a body after validating its parameters.
    ///
    /// ## Parameters
    ///
    /// - `name`: Body name
    /// - `kind`: Kind with native parameters
    /// - `transform`: Optional expansion / translation / roto-translation
    pub fn new(
        name: impl Into<String>,
        kind: BodyKind,
        transform: Option<Transform>,
    ) -> Result<Self, GeometryError> {
        let name = name.into();
        kind.validate()
            .map_err(|message| GeometryError::validation(&name, message))?;
        Ok(Self {
            name,
            kind,
            transform: transform.filter(|t| !t.is_identity()),
        })
    }

    /// Body name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind with native (unexpanded) parameters.
    pub fn kind(&self) -> &BodyKind {
        &self.kind
    }

    /// Attached transform, if any.
    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    /// The same body under another name.
    pub fn renamed(&self, name: impl Into<String>) -> Body {
        Body {
            name: name.into(),
            ..self.clone()
        }
    }

    fn expansion(&self) -> f64 {
        self.transform.as_ref().map_or(1.0, |t| t.expansion)
    }

    /// Native parameters after expansion.
    fn expanded_kind(&self) -> BodyKind {
        match &self.transform {
            Some(t) if t.expansion != 1.0 => self.kind.scaled(t.expansion),
            _ => self.kind.clone(),
        }
    }

    /// World frame of the body.
    pub fn frame(&self) -> Frame {
        let native = shape::native_frame(&self.expanded_kind());
        match &self.transform {
            Some(t) => {
                let (centre, rotation) = t.apply_frame(native.centre, native.rotation);
                Frame::new(centre, rotation)
            }
            None => native,
        }
    }

    /// World position of the local origin.
    pub fn centre(&self) -> DVec3 {
        self.frame().centre
    }

    /// Active local → world rotation.
    pub fn rotation(&self) -> DMat3 {
        self.frame().rotation
    }

    /// Target-kernel primitive in the body's local frame.
    pub fn primitive(&self) -> Primitive {
        shape::primitive(&self.expanded_kind())
    }

    /// World-space bounding box.
    pub fn extent(&self) -> Extent {
        let frame = self.frame();
        self.primitive()
            .local_extent()
            .transformed(frame.rotation, frame.centre)
    }

    /// Point-membership test for a world point.
    pub fn contains(&self, world: DVec3) -> bool {
        self.primitive().contains(self.frame().to_local(world))
    }

    /// Body grown outward by `margin`, named `{name}_e`.
    ///
    /// ## Returns
    ///
    /// `Ok(None)` when the kind has no length-safety variant.
    pub fn safety_expanded(&self, margin: f64) -> Result<Option<Body>, GeometryError> {
        self.safety_variant(margin, EXPANDED_SUFFIX)
    }

    /// Body shrunk inward by `margin`, named `{name}_s`.
    ///
    /// ## Returns
    ///
    /// `Ok(None)` when the kind has no length-safety variant, and a
    /// validation error when the body is too thin to shrink.
    pub fn safety_shrunk(&self, margin: f64) -> Result<Option<Body>, GeometryError> {
        self.safety_variant(-margin, SHRUNK_SUFFIX)
    }

    fn safety_variant(&self, margin: f64, suffix: &str) -> Result<Option<Body>, GeometryError> {
        // margins are world lengths; native parameters are scaled later
        let native_margin = margin / self.expansion();
        match self.kind.safety_adjusted(native_margin) {
            Some(kind) => Body::new(format!("{}{suffix}", self.name), kind, self.transform.clone()).map(Some),
            None => Ok(None),
        }
    }

    /// Card representation, with the directives in force for this body.
    pub fn to_card(&self) -> BodyCard {
        let transform = self.transform.as_ref();
        BodyCard {
            code: self.kind.code(),
            name: self.name.clone(),
            params: self.kind.params(),
            expansion: transform.map(|t| t.expansion).filter(|e| *e != 1.0),
            translation: transform
                .map(|t| t.translation)
                .filter(|t| *t != DVec3::ZERO)
                .map(|t| t.to_array()),
            transform: transform.and_then(|t| {
                t.rototranslation.as_ref().map(|chain| TransformRef {
                    name: chain.name().to_string(),
                    inverse: t.inverse,
                })
            }),
            span: Span::zero(),
        }
    }

    /// One-line free-format card, without directives.
    pub fn card_line(&self) -> String {
        print_body(&self.to_card())
    }
}
