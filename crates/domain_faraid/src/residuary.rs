//! Residuary distribution (Asabah)
//!
//! Distributes whatever fraction remains after the fixed shares, walking a
//! strict priority ladder: descendants, then the father's line, then full
//! siblings, then paternal half-siblings. Full siblings always outrank
//! half-siblings, and maternal half-siblings are never residuary; they are
//! fixed-share heirs only, or excluded.

use std::collections::BTreeMap;

use core_kernel::{frac, Fraction, FractionError};

use crate::blocking::Exclusion;
use crate::composition::FamilyComposition;
use crate::distribution::{AssignedShare, ShareBasis};
use crate::heir::{HeirClass, Madhhab};

/// Distributes the residue among the highest-priority residuary tier
pub struct ResiduaryDistributor;

impl ResiduaryDistributor {
    /// Consumes the residue, or returns no shares when no residuary heir
    /// exists (the Radd path)
    ///
    /// A non-positive residue also yields no shares: a residuary heir takes
    /// what is left, and when the fixed shares already cover or exceed the
    /// estate there is nothing to take.
    pub fn distribute(
        residue: Fraction,
        composition: &FamilyComposition,
        blocked: &BTreeMap<HeirClass, Exclusion>,
        madhhab: Madhhab,
    ) -> Result<Vec<AssignedShare>, FractionError> {
        if !residue.is_positive() {
            return Ok(Vec::new());
        }

        let eligible = |class: HeirClass| composition.has(class) && !blocked.contains_key(&class);

        // Descendants: sons absorb the residue, daughters alongside them
        // at half a son's weight.
        if composition.has(HeirClass::Son) {
            return weighted_split(
                residue,
                composition,
                HeirClass::Son,
                Some(HeirClass::Daughter),
                "ASB-SON",
                "Sons take the residue, daughters alongside at half a son's weight",
            );
        }

        // Father, whether pure residuary or topping up his 1/6.
        if eligible(HeirClass::Father) {
            let note = if composition.has_descendant() {
                "Father takes the residue left by the daughters' shares"
            } else {
                "Father takes the entire residue as nearest male ascendant"
            };
            return Ok(vec![whole_residue(HeirClass::Father, residue, "ASB-FATHER", note)]);
        }

        // Grandfather in the father's role, including the school-dependent
        // sharing with full/paternal siblings.
        if eligible(HeirClass::PaternalGrandfather) {
            let sharing_siblings = sibling_tier(composition, &eligible);
            if let Some((brother, sister)) = sharing_siblings {
                if !composition.has_descendant() && !madhhab.grandfather_excludes_siblings() {
                    return muqasamah(residue, composition, brother, sister);
                }
            }
            let note = if composition.has_descendant() {
                "Grandfather, in the father's role, takes the residue left by the daughters"
            } else {
                "Grandfather takes the entire residue in the father's role"
            };
            return Ok(vec![whole_residue(
                HeirClass::PaternalGrandfather,
                residue,
                "ASB-GF",
                note,
            )]);
        }

        // Full siblings.
        if eligible(HeirClass::FullBrother) {
            return weighted_split(
                residue,
                composition,
                HeirClass::FullBrother,
                Some(HeirClass::FullSister),
                "ASB-FB",
                "Full brothers take the residue, full sisters alongside at half weight",
            );
        }
        if eligible(HeirClass::FullSister) && composition.has(HeirClass::Daughter) {
            return Ok(vec![whole_residue(
                HeirClass::FullSister,
                residue,
                "ASB-FS-DAUGHTER",
                "Full sisters become residuary alongside the daughters and take what remains",
            )]);
        }

        // Paternal half-siblings.
        if eligible(HeirClass::PaternalHalfBrother) {
            return weighted_split(
                residue,
                composition,
                HeirClass::PaternalHalfBrother,
                Some(HeirClass::PaternalHalfSister),
                "ASB-PHB",
                "Paternal half-brothers take the residue, their sisters alongside at half weight",
            );
        }
        if eligible(HeirClass::PaternalHalfSister) && composition.has(HeirClass::Daughter) {
            return Ok(vec![whole_residue(
                HeirClass::PaternalHalfSister,
                residue,
                "ASB-PHS-DAUGHTER",
                "Paternal half-sisters become residuary alongside the daughters",
            )]);
        }

        // No residuary heir: the residue goes to Radd.
        Ok(Vec::new())
    }
}

/// The sibling tier a sharing grandfather would join: full siblings first,
/// else paternal half-siblings
fn sibling_tier(
    composition: &FamilyComposition,
    eligible: &impl Fn(HeirClass) -> bool,
) -> Option<(HeirClass, HeirClass)> {
    if eligible(HeirClass::FullBrother) || eligible(HeirClass::FullSister) {
        Some((HeirClass::FullBrother, HeirClass::FullSister))
    } else if eligible(HeirClass::PaternalHalfBrother) || eligible(HeirClass::PaternalHalfSister) {
        Some((HeirClass::PaternalHalfBrother, HeirClass::PaternalHalfSister))
    } else {
        None
    }
}

fn whole_residue(
    class: HeirClass,
    residue: Fraction,
    rule: &'static str,
    note: &str,
) -> AssignedShare {
    AssignedShare {
        class,
        fraction: residue,
        basis: ShareBasis::Residuary,
        rule,
        note: note.to_string(),
    }
}

/// Splits the residue between a male class and an optional female class at
/// the canonical 2:1 weighting
fn weighted_split(
    residue: Fraction,
    composition: &FamilyComposition,
    male: HeirClass,
    female: Option<HeirClass>,
    rule: &'static str,
    note: &str,
) -> Result<Vec<AssignedShare>, FractionError> {
    let males = i128::from(composition.count(male));
    let females = female.map_or(0, |f| i128::from(composition.count(f)));
    let weights = males * 2 + females;

    let mut shares = Vec::new();
    if males > 0 {
        let fraction = residue
            .checked_mul(&Fraction::new(males * 2, weights)?)?;
        shares.push(AssignedShare {
            class: male,
            fraction,
            basis: ShareBasis::Residuary,
            rule,
            note: note.to_string(),
        });
    }
    if let Some(female_class) = female {
        if females > 0 {
            let fraction = residue.checked_mul(&Fraction::new(females, weights)?)?;
            shares.push(AssignedShare {
                class: female_class,
                fraction,
                basis: ShareBasis::Residuary,
                rule,
                note: note.to_string(),
            });
        }
    }
    Ok(shares)
}

/// Muqasamah: the grandfather shares the residue with full or paternal
/// siblings as if he were a brother, floored at 1/6 of the estate
/// (Maliki, Shafi'i, and Hanbali doctrine when no descendant survives)
fn muqasamah(
    residue: Fraction,
    composition: &FamilyComposition,
    brother: HeirClass,
    sister: HeirClass,
) -> Result<Vec<AssignedShare>, FractionError> {
    let brothers = i128::from(composition.count(brother));
    let sisters = i128::from(composition.count(sister));
    let weights = 2 + brothers * 2 + sisters;

    let head_share = residue.checked_mul(&Fraction::new(2, weights)?)?;
    let floor = frac(1, 6).min(residue);
    let (grandfather_share, rule, note) = if head_share < floor {
        (
            floor,
            "ASB-GF-MUQASAMAH-FLOOR",
            "Grandfather shares with the siblings but never below 1/6 of the estate",
        )
    } else {
        (
            head_share,
            "ASB-GF-MUQASAMAH",
            "Grandfather shares the residue with the siblings at a brother's weight",
        )
    };

    let mut shares = vec![AssignedShare {
        class: HeirClass::PaternalGrandfather,
        fraction: grandfather_share,
        basis: ShareBasis::Residuary,
        rule,
        note: note.to_string(),
    }];

    let sibling_residue = residue.checked_sub(&grandfather_share)?;
    let sibling_weights = brothers * 2 + sisters;
    for (class, weight) in [(brother, brothers * 2), (sister, sisters)] {
        if weight == 0 {
            continue;
        }
        let fraction =
            sibling_residue.checked_mul(&Fraction::new(weight, sibling_weights)?)?;
        shares.push(AssignedShare {
            class,
            fraction,
            basis: ShareBasis::Residuary,
            rule: "ASB-SIBLING-MUQASAMAH",
            note: "Siblings share the remainder with the grandfather at 2:1".to_string(),
        });
    }

    Ok(shares)
}
