//! Blocking resolver (Hajb bi'l-Hirman)
//!
//! Determines which otherwise-eligible heirs are totally excluded by the
//! presence of closer relatives. The rules live in one declarative table
//! (heir class × condition → excluded) so school variants are data, not
//! duplicated control flow; the canonical classes are consensus across
//! schools except for the grandfather/sibling interaction, which is
//! parameterized by Madhhab.
//!
//! A relative excluded by a closer one never re-excludes anyone through
//! this table: every trigger below is itself the closest of its line, so
//! chained exclusions collapse to the same outcomes.

use std::collections::BTreeMap;

use crate::composition::FamilyComposition;
use crate::heir::{HeirClass, Madhhab};

/// One entry of the exclusion table
pub struct ExclusionRule {
    /// The class this rule excludes
    pub blocked: HeirClass,
    /// Stable rule identifier for audit notes
    pub rule: &'static str,
    /// Human-readable statement of the exclusion
    pub description: &'static str,
    applies: fn(&FamilyComposition, Madhhab) -> bool,
}

/// Why a present heir class receives nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exclusion {
    pub rule: &'static str,
    pub description: &'static str,
}

fn father_present(c: &FamilyComposition, _: Madhhab) -> bool {
    c.has(HeirClass::Father)
}

fn mother_present(c: &FamilyComposition, _: Madhhab) -> bool {
    c.has(HeirClass::Mother)
}

fn son_present(c: &FamilyComposition, _: Madhhab) -> bool {
    c.has(HeirClass::Son)
}

fn descendant_present(c: &FamilyComposition, _: Madhhab) -> bool {
    c.has_descendant()
}

fn full_brother_present(c: &FamilyComposition, _: Madhhab) -> bool {
    c.has(HeirClass::FullBrother)
}

fn grandfather_present(c: &FamilyComposition, _: Madhhab) -> bool {
    c.has(HeirClass::PaternalGrandfather)
}

/// Grandfather exclusion of full/paternal siblings: Hanafi doctrine always;
/// the other schools only when a descendant pushes the grandfather into the
/// father's role (otherwise they share the residue with him, see the
/// residuary distributor).
fn grandfather_excludes_sibling(c: &FamilyComposition, madhhab: Madhhab) -> bool {
    c.has(HeirClass::PaternalGrandfather)
        && (madhhab.grandfather_excludes_siblings() || c.has_descendant())
}

/// A full sister alongside a daughter becomes an accompanying residuary
/// and stands in a full brother's rank against paternal half-siblings.
fn full_sister_with_daughter(c: &FamilyComposition, _: Madhhab) -> bool {
    c.has(HeirClass::FullSister) && c.has(HeirClass::Daughter) && !c.has(HeirClass::Son)
}

/// Two or more full sisters exhaust the sisters' 2/3, leaving nothing for
/// a paternal half-sister unless a paternal half-brother converts her to
/// residuary.
fn two_full_sisters_unconverted(c: &FamilyComposition, _: Madhhab) -> bool {
    c.count(HeirClass::FullSister) >= 2 && !c.has(HeirClass::PaternalHalfBrother)
}

static EXCLUSION_TABLE: &[ExclusionRule] = &[
    ExclusionRule {
        blocked: HeirClass::PaternalGrandfather,
        rule: "HJB-GF-FATHER",
        description: "Excluded by the father, the nearer male ascendant",
        applies: father_present,
    },
    ExclusionRule {
        blocked: HeirClass::PaternalGrandmother,
        rule: "HJB-PGM-FATHER",
        description: "Excluded by the father through whom she relates",
        applies: father_present,
    },
    ExclusionRule {
        blocked: HeirClass::PaternalGrandmother,
        rule: "HJB-PGM-MOTHER",
        description: "Excluded by the mother, the nearer female ascendant",
        applies: mother_present,
    },
    ExclusionRule {
        blocked: HeirClass::MaternalGrandmother,
        rule: "HJB-MGM-MOTHER",
        description: "Excluded by the mother, the nearer female ascendant",
        applies: mother_present,
    },
    ExclusionRule {
        blocked: HeirClass::FullBrother,
        rule: "HJB-FB-SON",
        description: "Excluded by the son",
        applies: son_present,
    },
    ExclusionRule {
        blocked: HeirClass::FullBrother,
        rule: "HJB-FB-FATHER",
        description: "Excluded by the father",
        applies: father_present,
    },
    ExclusionRule {
        blocked: HeirClass::FullBrother,
        rule: "HJB-FB-GF",
        description: "Excluded by the paternal grandfather",
        applies: grandfather_excludes_sibling,
    },
    ExclusionRule {
        blocked: HeirClass::FullSister,
        rule: "HJB-FS-SON",
        description: "Excluded by the son",
        applies: son_present,
    },
    ExclusionRule {
        blocked: HeirClass::FullSister,
        rule: "HJB-FS-FATHER",
        description: "Excluded by the father",
        applies: father_present,
    },
    ExclusionRule {
        blocked: HeirClass::FullSister,
        rule: "HJB-FS-GF",
        description: "Excluded by the paternal grandfather",
        applies: grandfather_excludes_sibling,
    },
    ExclusionRule {
        blocked: HeirClass::PaternalHalfBrother,
        rule: "HJB-PHB-SON",
        description: "Excluded by the son",
        applies: son_present,
    },
    ExclusionRule {
        blocked: HeirClass::PaternalHalfBrother,
        rule: "HJB-PHB-FATHER",
        description: "Excluded by the father",
        applies: father_present,
    },
    ExclusionRule {
        blocked: HeirClass::PaternalHalfBrother,
        rule: "HJB-PHB-GF",
        description: "Excluded by the paternal grandfather",
        applies: grandfather_excludes_sibling,
    },
    ExclusionRule {
        blocked: HeirClass::PaternalHalfBrother,
        rule: "HJB-PHB-FB",
        description: "Excluded by the full brother, the stronger sibling tie",
        applies: full_brother_present,
    },
    ExclusionRule {
        blocked: HeirClass::PaternalHalfBrother,
        rule: "HJB-PHB-FS-DAUGHTER",
        description: "Excluded by a full sister ranked as residuary alongside a daughter",
        applies: full_sister_with_daughter,
    },
    ExclusionRule {
        blocked: HeirClass::PaternalHalfSister,
        rule: "HJB-PHS-SON",
        description: "Excluded by the son",
        applies: son_present,
    },
    ExclusionRule {
        blocked: HeirClass::PaternalHalfSister,
        rule: "HJB-PHS-FATHER",
        description: "Excluded by the father",
        applies: father_present,
    },
    ExclusionRule {
        blocked: HeirClass::PaternalHalfSister,
        rule: "HJB-PHS-GF",
        description: "Excluded by the paternal grandfather",
        applies: grandfather_excludes_sibling,
    },
    ExclusionRule {
        blocked: HeirClass::PaternalHalfSister,
        rule: "HJB-PHS-FB",
        description: "Excluded by the full brother, the stronger sibling tie",
        applies: full_brother_present,
    },
    ExclusionRule {
        blocked: HeirClass::PaternalHalfSister,
        rule: "HJB-PHS-FS-DAUGHTER",
        description: "Excluded by a full sister ranked as residuary alongside a daughter",
        applies: full_sister_with_daughter,
    },
    ExclusionRule {
        blocked: HeirClass::PaternalHalfSister,
        rule: "HJB-PHS-TWO-FS",
        description: "Excluded by two or more full sisters exhausting the sisters' two thirds",
        applies: two_full_sisters_unconverted,
    },
    ExclusionRule {
        blocked: HeirClass::MaternalHalfBrother,
        rule: "HJB-MHB-DESC",
        description: "Excluded by any descendant of the deceased",
        applies: descendant_present,
    },
    ExclusionRule {
        blocked: HeirClass::MaternalHalfBrother,
        rule: "HJB-MHB-FATHER",
        description: "Excluded by the father",
        applies: father_present,
    },
    ExclusionRule {
        blocked: HeirClass::MaternalHalfBrother,
        rule: "HJB-MHB-GF",
        description: "Excluded by the paternal grandfather",
        applies: grandfather_present,
    },
    ExclusionRule {
        blocked: HeirClass::MaternalHalfSister,
        rule: "HJB-MHS-DESC",
        description: "Excluded by any descendant of the deceased",
        applies: descendant_present,
    },
    ExclusionRule {
        blocked: HeirClass::MaternalHalfSister,
        rule: "HJB-MHS-FATHER",
        description: "Excluded by the father",
        applies: father_present,
    },
    ExclusionRule {
        blocked: HeirClass::MaternalHalfSister,
        rule: "HJB-MHS-GF",
        description: "Excluded by the paternal grandfather",
        applies: grandfather_present,
    },
];

/// Resolves total exclusion for a composition under the given school
pub struct BlockingResolver;

impl BlockingResolver {
    /// Marks every present heir class excluded by a closer relative
    ///
    /// Returns the excluded classes with the first matching rule, which is
    /// the note shown in the audit trail. Absent classes are never marked;
    /// exclusion is a statement about heirs who exist and receive nothing.
    pub fn resolve(
        composition: &FamilyComposition,
        madhhab: Madhhab,
    ) -> BTreeMap<HeirClass, Exclusion> {
        let mut blocked = BTreeMap::new();

        for class in composition.present_classes() {
            // First hit policy: the earliest matching rule names the
            // nearest excluding relative.
            if let Some(rule) = EXCLUSION_TABLE
                .iter()
                .find(|r| r.blocked == class && (r.applies)(composition, madhhab))
            {
                blocked.insert(
                    class,
                    Exclusion {
                        rule: rule.rule,
                        description: rule.description,
                    },
                );
            }
        }

        blocked
    }

    /// The full exclusion table, exposed for audit tooling and tests
    pub fn table() -> &'static [ExclusionRule] {
        EXCLUSION_TABLE
    }
}
