//! Fixed share assignment (Ashab al-Furud)
//!
//! Assigns the canonical Quranic fractions to the sharers that remain
//! after exclusion. Every fraction here is conditional on who else
//! survives, and every assignment carries the identifier of the rule that
//! produced it so the result can be audited back to the rule text.

use std::collections::BTreeMap;

use core_kernel::{frac, Fraction, FractionError};

use crate::blocking::Exclusion;
use crate::composition::FamilyComposition;
use crate::distribution::{AssignedShare, ShareBasis};
use crate::heir::{HeirClass, Madhhab};

/// Assigns canonical fixed shares to unblocked sharers
pub struct FixedShareAssigner;

impl FixedShareAssigner {
    /// Computes the fixed share of every eligible sharer
    ///
    /// Classes that inherit as residuaries in this composition (sons,
    /// brothers, the father without descendants, sisters converted by a
    /// brother or accompanying a daughter) are not assigned here; the
    /// residuary distributor picks them up.
    pub fn assign(
        composition: &FamilyComposition,
        blocked: &BTreeMap<HeirClass, Exclusion>,
        madhhab: Madhhab,
    ) -> Result<Vec<AssignedShare>, FractionError> {
        let ctx = Context::new(composition, blocked, madhhab);
        let mut shares = Vec::new();

        ctx.assign_spouse(&mut shares);
        ctx.assign_daughters(&mut shares);
        ctx.assign_father_line(&mut shares);
        ctx.assign_mother(&mut shares)?;
        ctx.assign_grandmothers(&mut shares)?;
        ctx.assign_full_sisters(&mut shares);
        ctx.assign_paternal_half_sisters(&mut shares);
        ctx.assign_maternal_half_siblings(&mut shares)?;

        Ok(shares)
    }
}

/// Snapshot of the facts the share rules keep asking about
struct Context<'a> {
    composition: &'a FamilyComposition,
    blocked: &'a BTreeMap<HeirClass, Exclusion>,
    madhhab: Madhhab,
    has_descendant: bool,
}

impl<'a> Context<'a> {
    fn new(
        composition: &'a FamilyComposition,
        blocked: &'a BTreeMap<HeirClass, Exclusion>,
        madhhab: Madhhab,
    ) -> Self {
        Self {
            composition,
            blocked,
            madhhab,
            has_descendant: composition.has_descendant(),
        }
    }

    fn eligible(&self, class: HeirClass) -> bool {
        self.composition.has(class) && !self.blocked.contains_key(&class)
    }

    fn push(
        &self,
        shares: &mut Vec<AssignedShare>,
        class: HeirClass,
        fraction: Fraction,
        rule: &'static str,
        note: impl Into<String>,
    ) {
        shares.push(AssignedShare {
            class,
            fraction,
            basis: ShareBasis::Fixed,
            rule,
            note: note.into(),
        });
    }

    /// The spouse's fixed fraction for this composition, used both for the
    /// spouse's own share and for the Umariyyatayn computation
    fn spouse_fraction(&self) -> Option<(HeirClass, Fraction)> {
        match self.composition.spouse()? {
            HeirClass::Husband => {
                let f = if self.has_descendant {
                    frac(1, 4)
                } else {
                    frac(1, 2)
                };
                Some((HeirClass::Husband, f))
            }
            HeirClass::Wife => {
                let f = if self.has_descendant {
                    frac(1, 8)
                } else {
                    frac(1, 4)
                };
                Some((HeirClass::Wife, f))
            }
            _ => None,
        }
    }

    fn assign_spouse(&self, shares: &mut Vec<AssignedShare>) {
        let Some((class, fraction)) = self.spouse_fraction() else {
            return;
        };

        match class {
            HeirClass::Husband => {
                let (rule, note) = if self.has_descendant {
                    (
                        "FRD-HUSBAND-QUARTER",
                        "Husband takes 1/4 in the presence of descendants",
                    )
                } else {
                    ("FRD-HUSBAND-HALF", "Husband takes 1/2 with no descendants")
                };
                self.push(shares, class, fraction, rule, note);
            }
            HeirClass::Wife => {
                let count = self.composition.count(HeirClass::Wife);
                let (rule, base_note) = if self.has_descendant {
                    (
                        "FRD-WIFE-EIGHTH",
                        "Wife takes 1/8 in the presence of descendants",
                    )
                } else {
                    ("FRD-WIFE-QUARTER", "Wife takes 1/4 with no descendants")
                };
                let note = if count > 1 {
                    format!("{}, shared equally by the {} wives", base_note, count)
                } else {
                    base_note.to_string()
                };
                self.push(shares, class, fraction, rule, note);
            }
            _ => {}
        }
    }

    fn assign_daughters(&self, shares: &mut Vec<AssignedShare>) {
        // With a son, daughters are residuary co-sharers, not sharers.
        if !self.eligible(HeirClass::Daughter) || self.composition.has(HeirClass::Son) {
            return;
        }
        let count = self.composition.count(HeirClass::Daughter);
        if count == 1 {
            self.push(
                shares,
                HeirClass::Daughter,
                frac(1, 2),
                "FRD-DAUGHTER-HALF",
                "A single daughter takes 1/2",
            );
        } else {
            self.push(
                shares,
                HeirClass::Daughter,
                frac(2, 3),
                "FRD-DAUGHTERS-TWO-THIRDS",
                format!("The {} daughters share 2/3 equally", count),
            );
        }
    }

    /// Father and, in his absence, the grandfather standing in his role
    fn assign_father_line(&self, shares: &mut Vec<AssignedShare>) {
        if self.eligible(HeirClass::Father) {
            if self.has_descendant {
                let note = if self.composition.has_male_descendant() {
                    "Father takes 1/6 alongside a son"
                } else {
                    "Father takes 1/6 alongside daughters, plus any residue"
                };
                self.push(shares, HeirClass::Father, frac(1, 6), "FRD-FATHER-SIXTH", note);
            }
            // Without descendants the father inherits as pure residuary.
            return;
        }

        if self.eligible(HeirClass::PaternalGrandfather) && self.has_descendant {
            let note = if self.composition.has_male_descendant() {
                "Grandfather stands in the father's role: 1/6 alongside a son"
            } else {
                "Grandfather stands in the father's role: 1/6 alongside daughters, plus any residue"
            };
            self.push(
                shares,
                HeirClass::PaternalGrandfather,
                frac(1, 6),
                "FRD-GF-SIXTH",
                note,
            );
        }
    }

    fn assign_mother(&self, shares: &mut Vec<AssignedShare>) -> Result<(), FractionError> {
        if !self.eligible(HeirClass::Mother) {
            return Ok(());
        }
        let siblings = self.composition.sibling_count();

        if self.has_descendant || siblings >= 2 {
            let note = if self.has_descendant {
                "Mother takes 1/6 in the presence of descendants"
            } else {
                "Mother takes 1/6: two or more siblings exist, inheriting or not"
            };
            self.push(shares, HeirClass::Mother, frac(1, 6), "FRD-MOTHER-SIXTH", note);
            return Ok(());
        }

        // Umariyyatayn: spouse and both parents, no descendants, fewer than
        // two siblings. The mother's third is computed on what remains
        // after the spouse, never on the whole estate.
        if self.composition.has(HeirClass::Father) {
            if let Some((_, spouse_fraction)) = self.spouse_fraction() {
                let remainder = Fraction::one().checked_sub(&spouse_fraction)?;
                let fraction = remainder.checked_mul(&frac(1, 3))?;
                self.push(
                    shares,
                    HeirClass::Mother,
                    fraction,
                    "FRD-MOTHER-UMARIYYATAYN",
                    format!(
                        "Umariyyatayn: mother takes 1/3 of the remainder after the spouse ({})",
                        fraction
                    ),
                );
                return Ok(());
            }
        }

        self.push(
            shares,
            HeirClass::Mother,
            frac(1, 3),
            "FRD-MOTHER-THIRD",
            "Mother takes 1/3: no descendants and fewer than two siblings",
        );
        Ok(())
    }

    fn assign_grandmothers(&self, shares: &mut Vec<AssignedShare>) -> Result<(), FractionError> {
        let grandmothers: Vec<HeirClass> = [
            HeirClass::PaternalGrandmother,
            HeirClass::MaternalGrandmother,
        ]
        .into_iter()
        .filter(|c| self.eligible(*c))
        .collect();

        if grandmothers.is_empty() {
            return Ok(());
        }

        let per_class =
            frac(1, 6).checked_div(&Fraction::from_int(grandmothers.len() as i128))?;
        let shared = grandmothers.len() > 1;
        for class in grandmothers {
            let note = if shared {
                "The grandmothers share 1/6 equally"
            } else {
                "The surviving grandmother takes 1/6"
            };
            self.push(shares, class, per_class, "FRD-GM-SIXTH", note);
        }
        Ok(())
    }

    /// True when the grandfather shares the residue with full or paternal
    /// siblings instead of excluding them (non-Hanafi, no descendants)
    fn grandfather_shares_with_siblings(&self) -> bool {
        self.eligible(HeirClass::PaternalGrandfather)
            && !self.has_descendant
            && !self.madhhab.grandfather_excludes_siblings()
    }

    fn assign_full_sisters(&self, shares: &mut Vec<AssignedShare>) {
        if !self.eligible(HeirClass::FullSister) {
            return;
        }
        // A full brother converts them to residuary; a daughter makes them
        // accompanying residuaries; a sharing grandfather pulls them into
        // the joint residue.
        if self.composition.has(HeirClass::FullBrother)
            || self.composition.has(HeirClass::Daughter)
            || self.grandfather_shares_with_siblings()
        {
            return;
        }
        let count = self.composition.count(HeirClass::FullSister);
        if count == 1 {
            self.push(
                shares,
                HeirClass::FullSister,
                frac(1, 2),
                "FRD-FS-HALF",
                "A single full sister takes 1/2",
            );
        } else {
            self.push(
                shares,
                HeirClass::FullSister,
                frac(2, 3),
                "FRD-FS-TWO-THIRDS",
                format!("The {} full sisters share 2/3 equally", count),
            );
        }
    }

    fn assign_paternal_half_sisters(&self, shares: &mut Vec<AssignedShare>) {
        if !self.eligible(HeirClass::PaternalHalfSister) {
            return;
        }
        if self.composition.has(HeirClass::PaternalHalfBrother)
            || self.composition.has(HeirClass::Daughter)
            || self.grandfather_shares_with_siblings()
        {
            return;
        }

        match self.composition.count(HeirClass::FullSister) {
            0 => {
                let count = self.composition.count(HeirClass::PaternalHalfSister);
                if count == 1 {
                    self.push(
                        shares,
                        HeirClass::PaternalHalfSister,
                        frac(1, 2),
                        "FRD-PHS-HALF",
                        "A single paternal half-sister takes 1/2 with no full sisters",
                    );
                } else {
                    self.push(
                        shares,
                        HeirClass::PaternalHalfSister,
                        frac(2, 3),
                        "FRD-PHS-TWO-THIRDS",
                        format!("The {} paternal half-sisters share 2/3 equally", count),
                    );
                }
            }
            1 => {
                self.push(
                    shares,
                    HeirClass::PaternalHalfSister,
                    frac(1, 6),
                    "FRD-PHS-SIXTH",
                    "Paternal half-sisters take 1/6, completing the sisters' 2/3",
                );
            }
            // Two or more full sisters: excluded by the blocking table.
            _ => {}
        }
    }

    fn assign_maternal_half_siblings(
        &self,
        shares: &mut Vec<AssignedShare>,
    ) -> Result<(), FractionError> {
        let brothers = if self.eligible(HeirClass::MaternalHalfBrother) {
            self.composition.count(HeirClass::MaternalHalfBrother)
        } else {
            0
        };
        let sisters = if self.eligible(HeirClass::MaternalHalfSister) {
            self.composition.count(HeirClass::MaternalHalfSister)
        } else {
            0
        };
        let total = brothers + sisters;
        if total == 0 {
            return Ok(());
        }

        if total == 1 {
            let class = if brothers == 1 {
                HeirClass::MaternalHalfBrother
            } else {
                HeirClass::MaternalHalfSister
            };
            self.push(
                shares,
                class,
                frac(1, 6),
                "FRD-MH-SIXTH",
                "A single maternal half-sibling takes 1/6",
            );
            return Ok(());
        }

        // Two or more share 1/3 per head, males and females alike.
        let third = frac(1, 3);
        for (class, count) in [
            (HeirClass::MaternalHalfBrother, brothers),
            (HeirClass::MaternalHalfSister, sisters),
        ] {
            if count == 0 {
                continue;
            }
            let fraction = third
                .checked_mul_int(i128::from(count))?
                .checked_div(&Fraction::from_int(i128::from(total)))?;
            self.push(
                shares,
                class,
                fraction,
                "FRD-MH-THIRD",
                format!(
                    "The {} maternal half-siblings share 1/3 per head, males and females equal",
                    total
                ),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocking::BlockingResolver;

    fn assign(
        composition: &FamilyComposition,
        madhhab: Madhhab,
    ) -> Vec<AssignedShare> {
        let blocked = BlockingResolver::resolve(composition, madhhab);
        FixedShareAssigner::assign(composition, &blocked, madhhab).unwrap()
    }

    fn fraction_of(shares: &[AssignedShare], class: HeirClass) -> Option<Fraction> {
        shares.iter().find(|s| s.class == class).map(|s| s.fraction)
    }

    #[test]
    fn test_wife_eighth_with_descendants() {
        let c = FamilyComposition::new()
            .with(HeirClass::Wife, 1)
            .with(HeirClass::Son, 1);
        let shares = assign(&c, Madhhab::Shafii);
        assert_eq!(fraction_of(&shares, HeirClass::Wife), Some(frac(1, 8)));
        // The son is residuary, never fixed.
        assert_eq!(fraction_of(&shares, HeirClass::Son), None);
    }

    #[test]
    fn test_husband_half_without_descendants() {
        let c = FamilyComposition::new()
            .with(HeirClass::Husband, 1)
            .with(HeirClass::Mother, 1);
        let shares = assign(&c, Madhhab::Hanafi);
        assert_eq!(fraction_of(&shares, HeirClass::Husband), Some(frac(1, 2)));
    }

    #[test]
    fn test_two_daughters_share_two_thirds() {
        let c = FamilyComposition::new().with(HeirClass::Daughter, 2);
        let shares = assign(&c, Madhhab::Maliki);
        assert_eq!(fraction_of(&shares, HeirClass::Daughter), Some(frac(2, 3)));
    }

    #[test]
    fn test_daughters_with_son_are_not_fixed() {
        let c = FamilyComposition::new()
            .with(HeirClass::Daughter, 2)
            .with(HeirClass::Son, 1);
        let shares = assign(&c, Madhhab::Maliki);
        assert_eq!(fraction_of(&shares, HeirClass::Daughter), None);
    }

    #[test]
    fn test_father_sixth_only_with_descendants() {
        let with_son = FamilyComposition::new()
            .with(HeirClass::Father, 1)
            .with(HeirClass::Son, 1);
        assert_eq!(
            fraction_of(&assign(&with_son, Madhhab::Hanbali), HeirClass::Father),
            Some(frac(1, 6))
        );

        let without = FamilyComposition::new()
            .with(HeirClass::Father, 1)
            .with(HeirClass::Mother, 1);
        assert_eq!(
            fraction_of(&assign(&without, Madhhab::Hanbali), HeirClass::Father),
            None
        );
    }

    #[test]
    fn test_mother_sixth_with_two_siblings_even_when_blocked() {
        // The father excludes the brothers, yet they still reduce the mother.
        let c = FamilyComposition::new()
            .with(HeirClass::Mother, 1)
            .with(HeirClass::Father, 1)
            .with(HeirClass::FullBrother, 2)
            .with(HeirClass::Wife, 1);
        let shares = assign(&c, Madhhab::Shafii);
        assert_eq!(fraction_of(&shares, HeirClass::Mother), Some(frac(1, 6)));
    }

    #[test]
    fn test_umariyyatayn_with_husband() {
        let c = FamilyComposition::new()
            .with(HeirClass::Husband, 1)
            .with(HeirClass::Father, 1)
            .with(HeirClass::Mother, 1);
        let shares = assign(&c, Madhhab::Hanafi);
        // 1/3 of (1 - 1/2), not 1/3 of the whole.
        assert_eq!(fraction_of(&shares, HeirClass::Mother), Some(frac(1, 6)));
        let mother = shares
            .iter()
            .find(|s| s.class == HeirClass::Mother)
            .unwrap();
        assert_eq!(mother.rule, "FRD-MOTHER-UMARIYYATAYN");
    }

    #[test]
    fn test_umariyyatayn_with_wife() {
        let c = FamilyComposition::new()
            .with(HeirClass::Wife, 1)
            .with(HeirClass::Father, 1)
            .with(HeirClass::Mother, 1);
        let shares = assign(&c, Madhhab::Hanafi);
        // 1/3 of (1 - 1/4) = 1/4.
        assert_eq!(fraction_of(&shares, HeirClass::Mother), Some(frac(1, 4)));
    }

    #[test]
    fn test_mother_third_without_umariyyatayn_trigger() {
        // Spouse present but father absent: the ordinary 1/3 applies.
        let c = FamilyComposition::new()
            .with(HeirClass::Husband, 1)
            .with(HeirClass::Mother, 1);
        let shares = assign(&c, Madhhab::Shafii);
        assert_eq!(fraction_of(&shares, HeirClass::Mother), Some(frac(1, 3)));
    }

    #[test]
    fn test_grandmothers_share_a_sixth() {
        let c = FamilyComposition::new()
            .with(HeirClass::PaternalGrandmother, 1)
            .with(HeirClass::MaternalGrandmother, 1)
            .with(HeirClass::Son, 1);
        let shares = assign(&c, Madhhab::Maliki);
        assert_eq!(
            fraction_of(&shares, HeirClass::PaternalGrandmother),
            Some(frac(1, 12))
        );
        assert_eq!(
            fraction_of(&shares, HeirClass::MaternalGrandmother),
            Some(frac(1, 12))
        );
    }

    #[test]
    fn test_single_full_sister_takes_half() {
        let c = FamilyComposition::new()
            .with(HeirClass::FullSister, 1)
            .with(HeirClass::Mother, 1);
        let shares = assign(&c, Madhhab::Shafii);
        assert_eq!(fraction_of(&shares, HeirClass::FullSister), Some(frac(1, 2)));
    }

    #[test]
    fn test_full_sister_with_daughter_is_not_fixed() {
        let c = FamilyComposition::new()
            .with(HeirClass::FullSister, 1)
            .with(HeirClass::Daughter, 1);
        let shares = assign(&c, Madhhab::Shafii);
        assert_eq!(fraction_of(&shares, HeirClass::FullSister), None);
    }

    #[test]
    fn test_paternal_half_sister_completion_share() {
        let c = FamilyComposition::new()
            .with(HeirClass::FullSister, 1)
            .with(HeirClass::PaternalHalfSister, 2)
            .with(HeirClass::Mother, 1);
        let shares = assign(&c, Madhhab::Hanbali);
        assert_eq!(fraction_of(&shares, HeirClass::FullSister), Some(frac(1, 2)));
        assert_eq!(
            fraction_of(&shares, HeirClass::PaternalHalfSister),
            Some(frac(1, 6))
        );
    }

    #[test]
    fn test_maternal_half_siblings_split_third_per_head() {
        let c = FamilyComposition::new()
            .with(HeirClass::MaternalHalfBrother, 1)
            .with(HeirClass::MaternalHalfSister, 1)
            .with(HeirClass::Mother, 1);
        let shares = assign(&c, Madhhab::Maliki);
        assert_eq!(
            fraction_of(&shares, HeirClass::MaternalHalfBrother),
            Some(frac(1, 6))
        );
        assert_eq!(
            fraction_of(&shares, HeirClass::MaternalHalfSister),
            Some(frac(1, 6))
        );
    }

    #[test]
    fn test_single_maternal_half_sibling_takes_sixth() {
        let c = FamilyComposition::new()
            .with(HeirClass::MaternalHalfSister, 1)
            .with(HeirClass::Mother, 1);
        let shares = assign(&c, Madhhab::Hanafi);
        assert_eq!(
            fraction_of(&shares, HeirClass::MaternalHalfSister),
            Some(frac(1, 6))
        );
    }

    #[test]
    fn test_sisters_with_sharing_grandfather_are_not_fixed() {
        let c = FamilyComposition::new()
            .with(HeirClass::PaternalGrandfather, 1)
            .with(HeirClass::FullSister, 2);
        let shares = assign(&c, Madhhab::Shafii);
        assert_eq!(fraction_of(&shares, HeirClass::FullSister), None);
    }
}
