//! # Deck AST
//!
//! Syntax tree for a geometry deck: roto-translation cards, body cards with
//! their directive scope, region cards with zone expressions and material
//! assignments.
//!
//! The AST is purely syntactic. Name resolution and geometric validation
//! happen when the deck is turned into a registry.

use serde::{Deserialize, Serialize};

use crate::span::{Span, Spanned};

// =============================================================================
// DECK
// =============================================================================

/// A parsed geometry deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// `ROT-DEFI` cards in input order.
    pub rotdefis: Vec<RotDefiCard>,
    /// Body cards in input order.
    pub bodies: Vec<BodyCard>,
    /// Region cards in input order.
    pub regions: Vec<RegionCard>,
    /// `ASSIGNMA` cards in input order.
    pub assignments: Vec<AssignCard>,
    /// Keywords of cards outside the geometry that were skipped.
    pub ignored_cards: Vec<String>,
    /// Span of the whole deck.
    pub span: Span,
}

impl Deck {
    /// Whether no card of any kind has been read.
    pub fn is_blank(&self) -> bool {
        self.rotdefis.is_empty()
            && self.bodies.is_empty()
            && self.regions.is_empty()
            && self.assignments.is_empty()
            && self.ignored_cards.is_empty()
    }
}

// =============================================================================
// BODIES
// =============================================================================

/// Body codes understood by the parser, with their fixed parameter counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyCode {
    /// Rectangular parallelepiped aligned with the axes.
    Rpp,
    /// General rectangular box.
    Box,
    /// Sphere.
    Sph,
    /// Right circular cylinder.
    Rcc,
    /// Right elliptical cylinder.
    Rec,
    /// Truncated right circular cone.
    Trc,
    /// Ellipsoid of revolution.
    Ell,
    /// Arbitrary convex polyhedron (8 vertices, 6 faces).
    Arb,
    /// Half-space `z < v`.
    Xyp,
    /// Half-space `y < v`.
    Xzp,
    /// Half-space `x < v`.
    Yzp,
    /// Generic half-space.
    Pla,
    /// Infinite circular cylinder along x.
    Xcc,
    /// Infinite circular cylinder along y.
    Ycc,
    /// Infinite circular cylinder along z.
    Zcc,
    /// Infinite elliptical cylinder along x.
    Xec,
    /// Infinite elliptical cylinder along y.
    Yec,
    /// Infinite elliptical cylinder along z.
    Zec,
    /// Generic quadric.
    Qua,
}

impl BodyCode {
    /// Every supported code.
    pub const ALL: [BodyCode; 19] = [
        Self::Rpp,
        Self::Box,
        Self::Sph,
        Self::Rcc,
        Self::Rec,
        Self::Trc,
        Self::Ell,
        Self::Arb,
        Self::Xyp,
        Self::Xzp,
        Self::Yzp,
        Self::Pla,
        Self::Xcc,
        Self::Ycc,
        Self::Zcc,
        Self::Xec,
        Self::Yec,
        Self::Zec,
        Self::Qua,
    ];

    /// Look a code up by its card keyword.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use fluka_parser::ast::BodyCode;
    ///
    /// assert_eq!(BodyCode::from_keyword("RCC"), Some(BodyCode::Rcc));
    /// assert_eq!(BodyCode::from_keyword("FOO"), None);
    /// ```
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.keyword() == keyword)
    }

    /// Card keyword.
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Rpp => "RPP",
            Self::Box => "BOX",
            Self::Sph => "SPH",
            Self::Rcc => "RCC",
            Self::Rec => "REC",
            Self::Trc => "TRC",
            Self::Ell => "ELL",
            Self::Arb => "ARB",
            Self::Xyp => "XYP",
            Self::Xzp => "XZP",
            Self::Yzp => "YZP",
            Self::Pla => "PLA",
            Self::Xcc => "XCC",
            Self::Ycc => "YCC",
            Self::Zcc => "ZCC",
            Self::Xec => "XEC",
            Self::Yec => "YEC",
            Self::Zec => "ZEC",
            Self::Qua => "QUA",
        }
    }

    /// Number of numeric parameters on the card.
    pub const fn param_count(&self) -> usize {
        match self {
            Self::Rpp => 6,
            Self::Box => 12,
            Self::Sph => 4,
            Self::Rcc => 7,
            Self::Rec => 12,
            Self::Trc => 8,
            Self::Ell => 7,
            Self::Arb => 30,
            Self::Xyp | Self::Xzp | Self::Yzp => 1,
            Self::Pla => 6,
            Self::Xcc | Self::Ycc | Self::Zcc => 3,
            Self::Xec | Self::Yec | Self::Zec => 4,
            Self::Qua => 10,
        }
    }
}

/// Reference to a roto-translation from a `$start_transform` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformRef {
    /// Roto-translation name.
    pub name: String,
    /// `$start_transform -NAME` applies the inverse.
    pub inverse: bool,
}

/// A body card together with the directives in force where it appears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyCard {
    /// Body code.
    pub code: BodyCode,
    /// Body name.
    pub name: String,
    /// Numeric parameters, exactly `code.param_count()` of them.
    pub params: Vec<f64>,
    /// Factor from an enclosing `$start_expansion`.
    pub expansion: Option<f64>,
    /// Offset from an enclosing `$start_translat`.
    pub translation: Option<[f64; 3]>,
    /// Roto-translation from an enclosing `$start_transform`.
    pub transform: Option<TransformRef>,
    /// Source span.
    pub span: Span,
}

/// A `ROT-DEFI` card: one step of a named roto-translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotDefiCard {
    /// Rotation axis as written (`x`, `y`, `z` or a numeric code).
    pub axis: String,
    /// Polar angle in degrees.
    pub polar: f64,
    /// Azimuthal angle in degrees.
    pub azimuth: f64,
    /// Translation applied before the rotation.
    pub translation: [f64; 3],
    /// Name shared by all steps of the chain.
    pub name: String,
    /// Source span.
    pub span: Span,
}

// =============================================================================
// REGIONS
// =============================================================================

/// Sign of a zone term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    /// `+`: the term is intersected.
    Plus,
    /// `-`: the term is subtracted.
    Minus,
}

impl Sign {
    /// Operator character.
    pub const fn symbol(&self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
        }
    }
}

/// One signed operand of a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term {
    /// `+NAME` or `-NAME`.
    Body {
        /// Term sign.
        sign: Sign,
        /// Referenced body name.
        name: String,
        /// Source span.
        span: Span,
    },
    /// `+( zone )` or `-( zone )`.
    SubZone {
        /// Term sign.
        sign: Sign,
        /// Parenthesised zone.
        zone: ZoneExpr,
        /// Source span.
        span: Span,
    },
}

impl Term {
    /// Sign of the term.
    pub fn sign(&self) -> Sign {
        match self {
            Term::Body { sign, .. } | Term::SubZone { sign, .. } => *sign,
        }
    }
}

impl Spanned for Term {
    fn span(&self) -> Span {
        match self {
            Term::Body { span, .. } | Term::SubZone { span, .. } => *span,
        }
    }
}

/// An intersection of signed terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneExpr {
    /// Terms in input order.
    pub terms: Vec<Term>,
    /// Source span.
    pub span: Span,
}

impl ZoneExpr {
    /// Total number of body references, including those in sub-zones.
    pub fn body_count(&self) -> usize {
        self.terms
            .iter()
            .map(|term| match term {
                Term::Body { .. } => 1,
                Term::SubZone { zone, .. } => zone.body_count(),
            })
            .sum()
    }
}

/// A region card: a union of zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionCard {
    /// Region name.
    pub name: String,
    /// Neighbour count (the card's COUNT field).
    pub neighbours: u32,
    /// Zones whose union forms the region.
    pub zones: Vec<ZoneExpr>,
    /// Source span.
    pub span: Span,
}

/// An `ASSIGNMA` card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignCard {
    /// Material name.
    pub material: String,
    /// First (or only) region.
    pub region: String,
    /// Last region of an inclusive range, in region definition order.
    pub last_region: Option<String>,
    /// Source span.
    pub span: Span,
}
