//! Distribution output types
//!
//! The engine's result: an ordered list of per-class shares with exact
//! fractions, audit notes, and resolved monetary amounts. Blocked classes
//! appear with a zero fraction instead of being omitted, so an audit can
//! always show why a class received nothing.

use core_kernel::{Fraction, FractionError, Money};
use serde::Serialize;

use crate::composition::FamilyComposition;
use crate::heir::{HeirClass, Madhhab};

/// How a class came by its fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareBasis {
    /// A canonical fixed share (Ashab al-Furud)
    Fixed,
    /// A residuary share (Asabah)
    Residuary,
    /// Present but totally excluded (Hajb)
    Blocked,
}

/// A share as it moves through the pipeline, before monetary resolution
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedShare {
    pub class: HeirClass,
    pub fraction: Fraction,
    pub basis: ShareBasis,
    pub rule: &'static str,
    pub note: String,
}

/// The correction applied to restore the sum-to-one invariant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Correction {
    /// Shares already summed to one
    None,
    /// Awl: fixed shares exceeded the estate and every share shrank
    Awl { factor: Fraction },
    /// Radd: the unabsorbed residue returned to the eligible sharers
    Radd { factor: Fraction },
}

/// One class's final share of the estate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeirShare {
    pub heir_class: HeirClass,
    /// Living heirs of the class sharing the fraction
    pub count: u32,
    /// Class-total fraction of the net estate
    pub fraction: Fraction,
    /// Class-total monetary amount
    pub amount: Money,
    pub basis: ShareBasis,
    /// Identifier of the rule that produced the share
    pub rule: &'static str,
    /// Human-readable audit note
    pub note: String,
}

impl HeirShare {
    /// The fraction owed to each individual heir of this class
    ///
    /// Sons and daughters inside one residuary pool split by weight rather
    /// than equally, but within a single class the split is always equal.
    pub fn per_capita_fraction(&self) -> Result<Fraction, FractionError> {
        self.fraction
            .checked_div(&Fraction::from_int(i128::from(self.count.max(1))))
    }
}

/// The complete result of one Faraid calculation
///
/// Immutable once returned. Covers every heir class present in the input,
/// in canonical presentation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub madhhab: Madhhab,
    pub shares: Vec<HeirShare>,
    /// Must be exactly one after correction
    pub total_assigned: Fraction,
    /// Signed pre-correction imbalance, kept for diagnostics
    pub residue_before_correction: Fraction,
    pub correction: Correction,
    pub net_estate: Money,
}

impl Distribution {
    /// Builds the final distribution from corrected shares
    ///
    /// Monetary amounts are each share's fraction of the net estate,
    /// rounded to the currency; the largest share absorbs the rounding
    /// remainder so the amounts sum exactly to the net estate.
    pub(crate) fn assemble(
        composition: &FamilyComposition,
        madhhab: Madhhab,
        assigned: Vec<AssignedShare>,
        total_assigned: Fraction,
        residue_before_correction: Fraction,
        correction: Correction,
        net_estate: Money,
    ) -> Result<Self, FractionError> {
        let mut shares: Vec<HeirShare> = assigned
            .into_iter()
            .map(|a| {
                let amount = net_estate
                    .multiply_fraction(&a.fraction)
                    .round_to_currency();
                HeirShare {
                    heir_class: a.class,
                    count: composition.count(a.class),
                    fraction: a.fraction,
                    amount,
                    basis: a.basis,
                    rule: a.rule,
                    note: a.note,
                }
            })
            .collect();

        shares.sort_by_key(|s| s.heir_class);

        // Largest share absorbs the rounding remainder.
        if let Some(largest) = shares
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.fraction.is_zero())
            .max_by(|(_, a), (_, b)| a.fraction.cmp(&b.fraction))
            .map(|(i, _)| i)
        {
            let others = shares
                .iter()
                .enumerate()
                .filter(|(i, s)| *i != largest && !s.fraction.is_zero())
                .fold(Money::zero(net_estate.currency()), |acc, (_, s)| {
                    acc + s.amount
                });
            shares[largest].amount = net_estate.round_to_currency() - others;
        }

        Ok(Self {
            madhhab,
            shares,
            total_assigned,
            residue_before_correction,
            correction,
            net_estate,
        })
    }

    /// Looks up the share of one class
    pub fn share(&self, class: HeirClass) -> Option<&HeirShare> {
        self.shares.iter().find(|s| s.heir_class == class)
    }

    /// The classes excluded in this distribution
    pub fn blocked_classes(&self) -> impl Iterator<Item = HeirClass> + '_ {
        self.shares
            .iter()
            .filter(|s| s.basis == ShareBasis::Blocked)
            .map(|s| s.heir_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{frac, Currency};
    use rust_decimal_macros::dec;

    fn assembled() -> Distribution {
        let composition = FamilyComposition::new()
            .with(HeirClass::Wife, 1)
            .with(HeirClass::Son, 1)
            .with(HeirClass::Daughter, 1);
        let assigned = vec![
            AssignedShare {
                class: HeirClass::Wife,
                fraction: frac(1, 8),
                basis: ShareBasis::Fixed,
                rule: "FRD-WIFE-EIGHTH",
                note: "Wife takes 1/8 in the presence of descendants".to_string(),
            },
            AssignedShare {
                class: HeirClass::Son,
                fraction: frac(7, 12),
                basis: ShareBasis::Residuary,
                rule: "ASB-SON",
                note: "Son takes the residue at double a daughter's weight".to_string(),
            },
            AssignedShare {
                class: HeirClass::Daughter,
                fraction: frac(7, 24),
                basis: ShareBasis::Residuary,
                rule: "ASB-DAUGHTER",
                note: "Daughter shares the residue with the son".to_string(),
            },
        ];
        Distribution::assemble(
            &composition,
            Madhhab::Shafii,
            assigned,
            Fraction::one(),
            Fraction::zero(),
            Correction::None,
            Money::new(dec!(800), Currency::MYR),
        )
        .unwrap()
    }

    #[test]
    fn test_shares_come_out_in_presentation_order() {
        let d = assembled();
        let order: Vec<HeirClass> = d.shares.iter().map(|s| s.heir_class).collect();
        assert_eq!(
            order,
            vec![HeirClass::Wife, HeirClass::Son, HeirClass::Daughter]
        );
    }

    #[test]
    fn test_amounts_sum_exactly_to_net_estate() {
        let d = assembled();
        let total = d
            .shares
            .iter()
            .fold(Money::zero(Currency::MYR), |acc, s| acc + s.amount);
        assert_eq!(total.amount(), dec!(800));
    }

    #[test]
    fn test_largest_share_absorbs_rounding_remainder() {
        let d = assembled();
        // 7/12 of 800 is 466.666...; the son is the largest share and takes
        // what the rounded others leave.
        assert_eq!(d.share(HeirClass::Wife).unwrap().amount.amount(), dec!(100));
        assert_eq!(
            d.share(HeirClass::Daughter).unwrap().amount.amount(),
            dec!(233.33)
        );
        assert_eq!(
            d.share(HeirClass::Son).unwrap().amount.amount(),
            dec!(466.67)
        );
    }

    #[test]
    fn test_per_capita_fraction() {
        let share = HeirShare {
            heir_class: HeirClass::Wife,
            count: 2,
            fraction: frac(1, 8),
            amount: Money::new(dec!(100), Currency::MYR),
            basis: ShareBasis::Fixed,
            rule: "FRD-WIFE-EIGHTH",
            note: String::new(),
        };
        assert_eq!(share.per_capita_fraction().unwrap(), frac(1, 16));
    }
}
