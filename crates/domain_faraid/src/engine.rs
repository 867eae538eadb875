//! Faraid engine orchestration
//!
//! Sequences estate resolution, composition validation, exclusion, fixed
//! shares, residuary distribution, and Awl/Radd correction into one pure
//! computation. The engine holds no state: every request constructs fresh
//! values and two identical requests produce bit-identical distributions.
//! Loud failure over silent wrongness: any internal postcondition failure
//! surfaces as an invariant error, never as a plausible-looking number.

use core_kernel::{Fraction, Money};
use serde::Serialize;

use crate::adjustment::AwlRaddAdjuster;
use crate::blocking::BlockingResolver;
use crate::composition::FamilyComposition;
use crate::distribution::{AssignedShare, Distribution, ShareBasis};
use crate::error::FaraidError;
use crate::estate::{EstateLedger, EstateResolution, WasiyyahRequest};
use crate::heir::Madhhab;
use crate::residuary::ResiduaryDistributor;
use crate::shares::FixedShareAssigner;

/// A completed calculation: the resolved estate plus the distribution
#[derive(Debug, Clone, Serialize)]
pub struct Calculation {
    pub estate: EstateResolution,
    pub distribution: Distribution,
}

/// The stateless Faraid calculation engine
pub struct FaraidEngine;

impl FaraidEngine {
    /// Runs a full calculation from raw estate figures
    ///
    /// Fails fast on composition or estate errors; both are recoverable by
    /// correcting the input. Invariant errors are defects and fatal to the
    /// request.
    pub fn compute(
        composition: &FamilyComposition,
        madhhab: Madhhab,
        gross_estate: Money,
        debts: Money,
        funeral_costs: Money,
        wasiyyah: Option<WasiyyahRequest>,
    ) -> Result<Calculation, FaraidError> {
        let estate = EstateLedger::resolve(gross_estate, debts, funeral_costs, wasiyyah)?;
        tracing::debug!(
            net_estate = %estate.net_estate,
            wasiyyah_applied = %estate.wasiyyah_applied,
            "Estate resolved"
        );

        let distribution = Self::distribute(composition, madhhab, estate.net_estate)?;
        Ok(Calculation {
            estate,
            distribution,
        })
    }

    /// Computes the distribution of an already-resolved net estate
    pub fn distribute(
        composition: &FamilyComposition,
        madhhab: Madhhab,
        net_estate: Money,
    ) -> Result<Distribution, FaraidError> {
        composition.validate()?;

        let blocked = BlockingResolver::resolve(composition, madhhab);
        tracing::debug!(blocked = blocked.len(), %madhhab, "Exclusion resolved");

        let mut working = FixedShareAssigner::assign(composition, &blocked, madhhab)?;
        let fixed_total = Fraction::total(working.iter().map(|s| &s.fraction))?;
        let residue = Fraction::one().checked_sub(&fixed_total)?;
        tracing::debug!(%fixed_total, %residue, "Fixed shares assigned");

        let residuary =
            ResiduaryDistributor::distribute(residue, composition, &blocked, madhhab)?;
        let residuary_consumed = !residuary.is_empty();
        working.extend(residuary);

        let adjustment = AwlRaddAdjuster::adjust(&mut working, residuary_consumed)?;
        tracing::debug!(
            total_before = %adjustment.total_before,
            correction = ?adjustment.correction,
            "Correction applied"
        );

        // A father or grandfather alongside daughters holds both a fixed
        // 1/6 and the residue (fard plus ta'sib); fold the two entries
        // into one auditable share per class.
        let mut working = merge_duplicate_classes(working)?;

        // Every present class appears in the output: excluded classes with
        // their exclusion note, and present residuaries that found an
        // exhausted residue with an explicit zero.
        for class in composition.present_classes() {
            if working.iter().any(|s| s.class == class) {
                continue;
            }
            if let Some(exclusion) = blocked.get(&class) {
                working.push(AssignedShare {
                    class,
                    fraction: Fraction::zero(),
                    basis: ShareBasis::Blocked,
                    rule: exclusion.rule,
                    note: exclusion.description.to_string(),
                });
            } else {
                working.push(AssignedShare {
                    class,
                    fraction: Fraction::zero(),
                    basis: ShareBasis::Residuary,
                    rule: "ASB-EXHAUSTED",
                    note: "Residuary heir, but the fixed shares exhausted the estate".to_string(),
                });
            }
        }

        let residue_before_correction =
            Fraction::one().checked_sub(&adjustment.total_before)?;
        let distribution = Distribution::assemble(
            composition,
            madhhab,
            working,
            adjustment.total_after,
            residue_before_correction,
            adjustment.correction,
            net_estate,
        )?;

        // Belt and braces: the assembled distribution must still sum to one.
        let final_total = Fraction::total(
            distribution.shares.iter().map(|s| &s.fraction),
        )?;
        if final_total != Fraction::one() {
            tracing::error!(%final_total, "Distribution total diverged after assembly");
            return Err(FaraidError::invariant("assembly", final_total));
        }

        Ok(distribution)
    }
}

/// Folds multiple entries for one class into a single share
///
/// The fixed entry leads; the absorbed entry's fraction is added and its
/// note appended so the audit trail still shows both bases.
fn merge_duplicate_classes(
    working: Vec<AssignedShare>,
) -> Result<Vec<AssignedShare>, FaraidError> {
    let mut merged: Vec<AssignedShare> = Vec::with_capacity(working.len());
    for share in working {
        match merged.iter_mut().find(|s| s.class == share.class) {
            Some(existing) => {
                existing.fraction = existing.fraction.checked_add(&share.fraction)?;
                existing.note = format!("{}; {}", existing.note, share.note);
            }
            None => merged.push(share),
        }
    }
    Ok(merged)
}
