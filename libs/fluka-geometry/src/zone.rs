//! # Zones
//!
//! A zone is an ordered Boolean composition: the first operand enters the
//! result, every following operand is intersected with it or subtracted
//! from it. Operands are bodies or nested zones, so a zone is a tree.
//!
//! The first operand also defines the zone's frame: every later operand is
//! placed relative to it when the zone is lowered. [`Zone::new`] enforces
//! that the first item is an intersection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::registry::{BodyId, ZoneId};

/// Boolean operator applied to a zone operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `+`: keep the common volume.
    Intersect,
    /// `-`: remove the operand's volume.
    Subtract,
}

impl Operator {
    /// The opposite operator.
    pub fn flipped(self) -> Operator {
        match self {
            Operator::Intersect => Operator::Subtract,
            Operator::Subtract => Operator::Intersect,
        }
    }

    /// Card sign character.
    pub fn symbol(self) -> char {
        match self {
            Operator::Intersect => '+',
            Operator::Subtract => '-',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Intersect => f.write_str("intersection"),
            Operator::Subtract => f.write_str("subtraction"),
        }
    }
}

/// A zone operand: a body or a nested zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operand {
    /// A registered body.
    Body(BodyId),
    /// A registered nested zone.
    Zone(ZoneId),
}

/// One `(operator, operand)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneItem {
    /// How the operand combines with what precedes it.
    pub operator: Operator,
    /// The operand.
    pub operand: Operand,
}

impl ZoneItem {
    /// `+operand`
    pub fn intersect(operand: Operand) -> Self {
        Self {
            operator: Operator::Intersect,
            operand,
        }
    }

    /// `-operand`
    pub fn subtract(operand: Operand) -> Self {
        Self {
            operator: Operator::Subtract,
            operand,
        }
    }
}

/// A named ordered Boolean composition of operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    name: String,
    items: Vec<ZoneItem>,
}

impl Zone {
    /// Creates a zone.
    ///
    /// ## Errors
    ///
    /// `Validation` if `items` is empty or the first item subtracts: the
    /// first operand defines the zone's volume and frame.
    pub fn new(name: impl Into<String>, items: Vec<ZoneItem>) -> Result<Self, GeometryError> {
        let name = name.into();
        match items.first() {
            None => Err(GeometryError::validation(&name, "zone has no operands")),
            Some(first) if first.operator != Operator::Intersect => Err(GeometryError::validation(
                &name,
                "the first operand of a zone must be intersected",
            )),
            Some(_) => Ok(Self { name, items }),
        }
    }

    /// Zone name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Items in order; never empty.
    pub fn items(&self) -> &[ZoneItem] {
        &self.items
    }

    /// The operand that defines the zone's frame.
    pub fn first_operand(&self) -> Operand {
        self.items[0].operand
    }

    /// The same items under another name.
    pub fn renamed(&self, name: impl Into<String>) -> Zone {
        Zone {
            name: name.into(),
            items: self.items.clone(),
        }
    }
}
