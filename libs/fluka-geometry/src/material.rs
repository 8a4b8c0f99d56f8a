//! # Materials
//!
//! Region materials are looked up by their card name in a fixed table of
//! builtin materials with a known target-kernel name. Any other name is
//! kept as an opaque custom material. Material composition (`COMPOUND`)
//! is rejected by the parser.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Builtin card names and their target-kernel names.
const BUILTIN: &[(&str, &str)] = &[
    ("VACUUM", "G4_Galactic"),
    ("HYDROGEN", "G4_H"),
    ("HELIUM", "G4_He"),
    ("BERYLLIU", "G4_Be"),
    ("CARBON", "G4_C"),
    ("NITROGEN", "G4_N"),
    ("OXYGEN", "G4_O"),
    ("MAGNESIU", "G4_Mg"),
    ("SODIUM", "G4_Na"),
    ("ALUMINUM", "G4_Al"),
    ("SILICON", "G4_Si"),
    ("ARGON", "G4_Ar"),
    ("CALCIUM", "G4_Ca"),
    ("TITANIUM", "G4_Ti"),
    ("IRON", "G4_Fe"),
    ("NICKEL", "G4_Ni"),
    ("COPPER", "G4_Cu"),
    ("ZINC", "G4_Zn"),
    ("SILVER", "G4_Ag"),
    ("TIN", "G4_Sn"),
    ("TANTALUM", "G4_Ta"),
    ("TUNGSTEN", "G4_W"),
    ("GOLD", "G4_Au"),
    ("MERCURY", "G4_Hg"),
    ("LEAD", "G4_Pb"),
    ("URANIUM", "G4_U"),
    ("WATER", "G4_WATER"),
    ("AIR", "G4_AIR"),
    ("POLYSTYR", "G4_POLYSTYRENE"),
    ("CONCRETE", "G4_CONCRETE"),
];

/// Card name of the black-hole material.
const BLACK_HOLE: &str = "BLCKHOLE";

/// A region material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Material {
    /// Absorbs everything; regions made of it are not placed downstream.
    BlackHole,
    /// A material from the builtin table.
    Builtin {
        /// Card name.
        name: String,
        /// Target-kernel name.
        target: String,
    },
    /// Any other name, passed through untouched.
    Custom(String),
}

impl Material {
    /// Resolve a card material name.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use fluka_geometry::material::Material;
    ///
    /// assert_eq!(Material::resolve("IRON").target_name(), Some("G4_Fe"));
    /// assert_eq!(Material::resolve("MYALLOY"), Material::Custom("MYALLOY".into()));
    /// ```
    pub fn resolve(name: &str) -> Material {
        if name == BLACK_HOLE {
            return Material::BlackHole;
        }
        match BUILTIN.iter().find(|(card, _)| *card == name) {
            Some((card, target)) => Material::Builtin {
                name: card.to_string(),
                target: target.to_string(),
            },
            None => Material::Custom(name.to_string()),
        }
    }

    /// Name as written on an `ASSIGNMA` card.
    pub fn card_name(&self) -> &str {
        match self {
            Material::BlackHole => BLACK_HOLE,
            Material::Builtin { name, .. } => name,
            Material::Custom(name) => name,
        }
    }

    /// Target-kernel name, if known.
    pub fn target_name(&self) -> Option<&str> {
        match self {
            Material::Builtin { target, .. } => Some(target),
            Material::BlackHole | Material::Custom(_) => None,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.card_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_hole() {
        assert_eq!(Material::resolve("BLCKHOLE"), Material::BlackHole);
        assert_eq!(Material::BlackHole.target_name(), None);
        assert_eq!(Material::BlackHole.card_name(), "BLCKHOLE");
    }

    #[test]
    fn test_builtin_lookup_is_exact() {
        assert_eq!(Material::resolve("VACUUM").target_name(), Some("G4_Galactic"));
        assert!(matches!(Material::resolve("iron"), Material::Custom(_)));
    }
}
