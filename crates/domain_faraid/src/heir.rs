//! Heir taxonomy and schools of jurisprudence
//!
//! The canonical heir classes and the Madhhab selector. The enum's
//! declaration order is the canonical presentation order of a
//! distribution, so `HeirClass` derives `Ord`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// School of Islamic jurisprudence governing a calculation
///
/// Selects which variant rule entries the blocking and share tables
/// consult. Immutable for one computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Madhhab {
    Hanafi,
    Maliki,
    Shafii,
    Hanbali,
}

impl Madhhab {
    /// All supported schools
    pub const ALL: [Madhhab; 4] = [
        Madhhab::Hanafi,
        Madhhab::Maliki,
        Madhhab::Shafii,
        Madhhab::Hanbali,
    ];

    /// Whether the paternal grandfather totally excludes full and paternal
    /// half siblings. Hanafi doctrine excludes them; the other three
    /// schools let the grandfather share the residue with them when no
    /// descendant survives.
    pub fn grandfather_excludes_siblings(&self) -> bool {
        matches!(self, Madhhab::Hanafi)
    }
}

impl fmt::Display for Madhhab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Madhhab::Hanafi => "Hanafi",
            Madhhab::Maliki => "Maliki",
            Madhhab::Shafii => "Shafi'i",
            Madhhab::Hanbali => "Hanbali",
        };
        write!(f, "{}", name)
    }
}

/// Canonical heir classes
///
/// The maternal grandfather is deliberately absent: he is not an heir in
/// Faraid. Declaration order is the presentation order of a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeirClass {
    Husband,
    Wife,
    Son,
    Daughter,
    Father,
    Mother,
    PaternalGrandfather,
    PaternalGrandmother,
    MaternalGrandmother,
    FullBrother,
    FullSister,
    PaternalHalfBrother,
    PaternalHalfSister,
    MaternalHalfBrother,
    MaternalHalfSister,
}

impl HeirClass {
    /// All canonical classes in presentation order
    pub const ALL: [HeirClass; 15] = [
        HeirClass::Husband,
        HeirClass::Wife,
        HeirClass::Son,
        HeirClass::Daughter,
        HeirClass::Father,
        HeirClass::Mother,
        HeirClass::PaternalGrandfather,
        HeirClass::PaternalGrandmother,
        HeirClass::MaternalGrandmother,
        HeirClass::FullBrother,
        HeirClass::FullSister,
        HeirClass::PaternalHalfBrother,
        HeirClass::PaternalHalfSister,
        HeirClass::MaternalHalfBrother,
        HeirClass::MaternalHalfSister,
    ];

    /// Classes that admit at most one living person
    ///
    /// The Husband is singular; multiple wives are represented as a count
    /// on the Wife class sharing one fraction.
    pub fn is_singular(&self) -> bool {
        matches!(
            self,
            HeirClass::Husband
                | HeirClass::Father
                | HeirClass::Mother
                | HeirClass::PaternalGrandfather
                | HeirClass::PaternalGrandmother
                | HeirClass::MaternalGrandmother
        )
    }

    /// Spouse classes
    pub fn is_spouse(&self) -> bool {
        matches!(self, HeirClass::Husband | HeirClass::Wife)
    }

    /// Direct descendants of the deceased
    pub fn is_descendant(&self) -> bool {
        matches!(self, HeirClass::Son | HeirClass::Daughter)
    }

    /// Sibling classes of every kind
    pub fn is_sibling(&self) -> bool {
        matches!(
            self,
            HeirClass::FullBrother
                | HeirClass::FullSister
                | HeirClass::PaternalHalfBrother
                | HeirClass::PaternalHalfSister
                | HeirClass::MaternalHalfBrother
                | HeirClass::MaternalHalfSister
        )
    }

    /// Siblings through the mother only; fixed-share heirs, never residuary
    pub fn is_maternal_sibling(&self) -> bool {
        matches!(
            self,
            HeirClass::MaternalHalfBrother | HeirClass::MaternalHalfSister
        )
    }

    /// Grandmother classes
    pub fn is_grandmother(&self) -> bool {
        matches!(
            self,
            HeirClass::PaternalGrandmother | HeirClass::MaternalGrandmother
        )
    }

    /// Human-readable label for audit notes and API responses
    pub fn label(&self) -> &'static str {
        match self {
            HeirClass::Husband => "Husband",
            HeirClass::Wife => "Wife",
            HeirClass::Son => "Son",
            HeirClass::Daughter => "Daughter",
            HeirClass::Father => "Father",
            HeirClass::Mother => "Mother",
            HeirClass::PaternalGrandfather => "Paternal grandfather",
            HeirClass::PaternalGrandmother => "Paternal grandmother",
            HeirClass::MaternalGrandmother => "Maternal grandmother",
            HeirClass::FullBrother => "Full brother",
            HeirClass::FullSister => "Full sister",
            HeirClass::PaternalHalfBrother => "Paternal half-brother",
            HeirClass::PaternalHalfSister => "Paternal half-sister",
            HeirClass::MaternalHalfBrother => "Maternal half-brother",
            HeirClass::MaternalHalfSister => "Maternal half-sister",
        }
    }
}

impl fmt::Display for HeirClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
