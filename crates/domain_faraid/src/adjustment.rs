//! Awl and Radd correction
//!
//! Restores the sum-to-one invariant after fixed and residuary assignment.
//! Awl shrinks every share proportionally when the sharers oversubscribe
//! the estate; Radd returns an unabsorbed residue to the eligible sharers
//! (every fixed-share heir except the spouse). All arithmetic is exact;
//! the corrected total is asserted to equal one before returning.

use core_kernel::Fraction;

use crate::distribution::{AssignedShare, Correction};
use crate::error::FaraidError;

/// Outcome of the correction pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub correction: Correction,
    /// Sum of shares before correction
    pub total_before: Fraction,
    /// Sum of shares after correction; exactly one
    pub total_after: Fraction,
}

/// Applies Awl or Radd to a worked set of shares
pub struct AwlRaddAdjuster;

impl AwlRaddAdjuster {
    /// Corrects the shares in place so they sum to exactly one
    ///
    /// `residuary_consumed` states whether the residuary distributor
    /// assigned anything. A short total alongside a consumed residue is an
    /// internal contradiction and fails loudly instead of being patched.
    pub fn adjust(
        shares: &mut [AssignedShare],
        residuary_consumed: bool,
    ) -> Result<Adjustment, FaraidError> {
        let total_before = Fraction::total(shares.iter().map(|s| &s.fraction))?;
        let one = Fraction::one();

        let correction = match total_before.cmp(&one) {
            std::cmp::Ordering::Equal => Correction::None,
            std::cmp::Ordering::Greater => {
                // Awl: shrink everything by 1/S; relative shares are
                // untouched, only absolute ones.
                let factor = total_before.reciprocal()?;
                for share in shares.iter_mut() {
                    share.fraction = share.fraction.checked_mul(&factor)?;
                }
                Correction::Awl { factor }
            }
            std::cmp::Ordering::Less => {
                if residuary_consumed {
                    // The distributor was supposed to absorb the residue.
                    return Err(FaraidError::invariant(
                        "residuary distribution",
                        total_before,
                    ));
                }
                Self::apply_radd(shares, total_before)?
            }
        };

        let total_after = Fraction::total(shares.iter().map(|s| &s.fraction))?;
        if total_after != one {
            return Err(FaraidError::invariant("awl/radd correction", total_after));
        }

        Ok(Adjustment {
            correction,
            total_before,
            total_after,
        })
    }

    /// Returns the unabsorbed residue to the non-spouse sharers
    ///
    /// The spouse never receives Radd; their fixed share stands and the
    /// others scale up to absorb exactly the rest. When the spouse is the
    /// only sharer at all, the whole estate reverts to them.
    fn apply_radd(
        shares: &mut [AssignedShare],
        total_before: Fraction,
    ) -> Result<Correction, FaraidError> {
        let spouse_total = Fraction::total(
            shares
                .iter()
                .filter(|s| s.class.is_spouse())
                .map(|s| &s.fraction),
        )?;
        let eligible_total = total_before.checked_sub(&spouse_total)?;

        if eligible_total.is_zero() {
            // Sole surviving spouse: the residue reverts to them.
            let factor = spouse_total.reciprocal()?;
            for share in shares.iter_mut().filter(|s| s.class.is_spouse()) {
                share.fraction = Fraction::one();
                share.rule = "RDD-SPOUSE-REVERSION";
                share.note =
                    "No other sharer survives; the residue reverts to the spouse".to_string();
            }
            return Ok(Correction::Radd { factor });
        }

        let target = Fraction::one().checked_sub(&spouse_total)?;
        let factor = target.checked_div(&eligible_total)?;
        for share in shares.iter_mut().filter(|s| !s.class.is_spouse()) {
            share.fraction = share.fraction.checked_mul(&factor)?;
        }
        Ok(Correction::Radd { factor })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::ShareBasis;
    use crate::heir::HeirClass;
    use core_kernel::frac;

    fn fixed(class: HeirClass, fraction: Fraction) -> AssignedShare {
        AssignedShare {
            class,
            fraction,
            basis: ShareBasis::Fixed,
            rule: "TEST",
            note: String::new(),
        }
    }

    #[test]
    fn test_exact_total_needs_no_correction() {
        let mut shares = vec![
            fixed(HeirClass::Wife, frac(1, 8)),
            fixed(HeirClass::Son, frac(7, 8)),
        ];
        let adj = AwlRaddAdjuster::adjust(&mut shares, true).unwrap();
        assert_eq!(adj.correction, Correction::None);
        assert_eq!(adj.total_after, Fraction::one());
    }

    #[test]
    fn test_awl_shrinks_proportionally() {
        // Husband 1/2 + two full sisters 2/3 = 7/6, the classic increase.
        let mut shares = vec![
            fixed(HeirClass::Husband, frac(1, 2)),
            fixed(HeirClass::FullSister, frac(2, 3)),
        ];
        let adj = AwlRaddAdjuster::adjust(&mut shares, false).unwrap();

        assert_eq!(adj.correction, Correction::Awl { factor: frac(6, 7) });
        assert_eq!(shares[0].fraction, frac(3, 7));
        assert_eq!(shares[1].fraction, frac(4, 7));
        assert_eq!(adj.total_after, Fraction::one());
    }

    #[test]
    fn test_awl_preserves_ratios() {
        let mut shares = vec![
            fixed(HeirClass::Wife, frac(1, 4)),
            fixed(HeirClass::FullSister, frac(2, 3)),
            fixed(HeirClass::Mother, frac(1, 6)),
        ];
        let before_ratio = shares[0]
            .fraction
            .checked_div(&shares[1].fraction)
            .unwrap();
        AwlRaddAdjuster::adjust(&mut shares, false).unwrap();
        let after_ratio = shares[0]
            .fraction
            .checked_div(&shares[1].fraction)
            .unwrap();
        assert_eq!(before_ratio, after_ratio);
    }

    #[test]
    fn test_radd_scales_up_without_spouse() {
        // Mother 1/3 + daughter 1/2 = 5/6, scaled by 6/5.
        let mut shares = vec![
            fixed(HeirClass::Mother, frac(1, 3)),
            fixed(HeirClass::Daughter, frac(1, 2)),
        ];
        let adj = AwlRaddAdjuster::adjust(&mut shares, false).unwrap();

        assert_eq!(adj.correction, Correction::Radd { factor: frac(6, 5) });
        assert_eq!(shares[0].fraction, frac(2, 5));
        assert_eq!(shares[1].fraction, frac(3, 5));
    }

    #[test]
    fn test_radd_never_grows_the_spouse() {
        // Husband 1/2 + mother 1/3: the extra 1/6 goes to the mother alone.
        let mut shares = vec![
            fixed(HeirClass::Husband, frac(1, 2)),
            fixed(HeirClass::Mother, frac(1, 3)),
        ];
        let adj = AwlRaddAdjuster::adjust(&mut shares, false).unwrap();

        assert_eq!(shares[0].fraction, frac(1, 2));
        assert_eq!(shares[1].fraction, frac(1, 2));
        assert!(matches!(adj.correction, Correction::Radd { .. }));
    }

    #[test]
    fn test_sole_spouse_takes_reversion() {
        let mut shares = vec![fixed(HeirClass::Wife, frac(1, 4))];
        let adj = AwlRaddAdjuster::adjust(&mut shares, false).unwrap();

        assert_eq!(shares[0].fraction, Fraction::one());
        assert_eq!(shares[0].rule, "RDD-SPOUSE-REVERSION");
        assert_eq!(adj.total_after, Fraction::one());
    }

    #[test]
    fn test_short_total_with_consumed_residue_is_an_invariant_error() {
        let mut shares = vec![fixed(HeirClass::Mother, frac(1, 3))];
        let err = AwlRaddAdjuster::adjust(&mut shares, true).unwrap_err();
        assert!(matches!(err, FaraidError::Invariant { .. }));
    }
}
