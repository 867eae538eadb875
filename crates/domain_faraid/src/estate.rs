//! Estate ledger
//!
//! Resolves gross estate, debts, funeral costs, and the Wasiyyah bequest
//! into the net distributable estate. The order of operations is
//! load-bearing and must not change: debts and funeral costs come out
//! first, and the 1/3 Wasiyyah cap is computed on what remains.

use core_kernel::{frac, Fraction, Money, MoneyError};
use serde::{Deserialize, Serialize};

use crate::error::EstateError;

/// A requested bequest, expressed either as an absolute amount or as a
/// fraction of the post-debt estate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WasiyyahRequest {
    Amount { amount: Money },
    FractionOfEstate { fraction: Fraction },
}

/// Outcome of resolving the estate figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstateResolution {
    /// What remains for the heirs
    pub net_estate: Money,
    /// The bequest actually honored, after the 1/3 cap
    pub wasiyyah_applied: Money,
    /// The cap itself, kept for audit
    pub wasiyyah_cap: Money,
}

/// Resolves estate figures into a net distributable value
pub struct EstateLedger;

impl EstateLedger {
    /// Resolves `gross − debts − funeral − wasiyyah` with the 1/3 cap
    ///
    /// # Errors
    ///
    /// - [`EstateError::NegativeAmount`] if any input is negative
    /// - [`EstateError::Insolvent`] if debts plus funeral costs exceed the
    ///   gross estate; signaled rather than clamped because the downstream
    ///   legal handling differs
    /// - [`EstateError::Money`] if the figures mix currencies
    pub fn resolve(
        gross: Money,
        debts: Money,
        funeral: Money,
        wasiyyah: Option<WasiyyahRequest>,
    ) -> Result<EstateResolution, EstateError> {
        for (field, value) in [("gross estate", gross), ("debts", debts), ("funeral costs", funeral)]
        {
            if value.is_negative() {
                return Err(EstateError::NegativeAmount {
                    field,
                    amount: value.to_string(),
                });
            }
        }

        let obligations = debts.checked_add(&funeral)?;
        let after_obligations = gross.checked_sub(&obligations)?;
        if after_obligations.is_negative() {
            let shortfall = obligations.checked_sub(&gross)?;
            return Err(EstateError::Insolvent {
                shortfall: shortfall.to_string(),
            });
        }

        // The cap is one third of the estate after debts and funeral costs,
        // regardless of what was requested.
        let cap = after_obligations.multiply_fraction(&frac(1, 3));

        let requested = match wasiyyah {
            None => Money::zero(gross.currency()),
            Some(WasiyyahRequest::Amount { amount }) => {
                if amount.is_negative() {
                    return Err(EstateError::NegativeAmount {
                        field: "wasiyyah",
                        amount: amount.to_string(),
                    });
                }
                if amount.currency() != gross.currency() {
                    return Err(EstateError::Money(MoneyError::CurrencyMismatch(
                        gross.currency().to_string(),
                        amount.currency().to_string(),
                    )));
                }
                amount
            }
            Some(WasiyyahRequest::FractionOfEstate { fraction }) => {
                if fraction.is_negative() || fraction > Fraction::one() {
                    return Err(EstateError::InvalidWasiyyahFraction(fraction));
                }
                after_obligations.multiply_fraction(&fraction)
            }
        };

        let applied = if requested.amount() > cap.amount() {
            cap
        } else {
            requested
        };

        let net_estate = after_obligations.checked_sub(&applied)?;
        Ok(EstateResolution {
            net_estate,
            wasiyyah_applied: applied,
            wasiyyah_cap: cap,
        })
    }
}
