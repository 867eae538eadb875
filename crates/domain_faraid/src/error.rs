//! Faraid domain errors
//!
//! This module defines all error types that can occur within the
//! inheritance calculation domain. Every error carries enough context to
//! reproduce the failing case in a test.

use core_kernel::{Fraction, FractionError, MoneyError};
use thiserror::Error;

/// Errors that can occur in the Faraid domain
#[derive(Debug, Error)]
pub enum FaraidError {
    /// The family composition violates one or more structural constraints.
    /// All violations are reported together so the caller can present them
    /// at once.
    #[error("Invalid family composition: {}", violations.join("; "))]
    InvalidComposition { violations: Vec<String> },

    /// Estate figures cannot be resolved into a net estate
    #[error(transparent)]
    Estate(#[from] EstateError),

    /// Exact arithmetic failed; unreachable for validated input and treated
    /// as a defect if seen
    #[error("Arithmetic error: {0}")]
    Arithmetic(#[from] FractionError),

    /// Monetary resolution failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// An internal postcondition did not hold. Always fatal to the request;
    /// the engine surfaces this instead of returning a plausible-looking
    /// but wrong distribution.
    #[error("Engine invariant violated in {stage}: total assigned {total} != 1")]
    Invariant { stage: &'static str, total: Fraction },
}

impl FaraidError {
    /// Creates a composition error from accumulated violations
    pub fn invalid_composition(violations: Vec<String>) -> Self {
        FaraidError::InvalidComposition { violations }
    }

    /// Creates an invariant violation for the given pipeline stage
    pub fn invariant(stage: &'static str, total: Fraction) -> Self {
        FaraidError::Invariant { stage, total }
    }

    /// Returns true if the error is recoverable by correcting the input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FaraidError::InvalidComposition { .. } | FaraidError::Estate(_)
        )
    }
}

/// Errors raised while resolving the distributable estate
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstateError {
    /// Debts and funeral costs exceed the gross estate. Signaled, not
    /// clamped: an insolvent estate follows a different legal path.
    #[error("Estate is insolvent: debts and funeral costs exceed gross estate by {shortfall}")]
    Insolvent { shortfall: String },

    /// A monetary input was negative
    #[error("Negative {field}: {amount}")]
    NegativeAmount { field: &'static str, amount: String },

    /// Estate figures are not all in one currency
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// A wasiyyah fraction outside [0, 1] was requested
    #[error("Wasiyyah fraction {0} is not between 0 and 1")]
    InvalidWasiyyahFraction(Fraction),
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::frac;

    #[test]
    fn test_composition_error_lists_all_violations() {
        let err = FaraidError::invalid_composition(vec![
            "Husband and Wife are mutually exclusive".to_string(),
            "Father count must be 0 or 1".to_string(),
        ]);
        let text = err.to_string();
        assert!(text.contains("mutually exclusive"));
        assert!(text.contains("Father"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_invariant_error_is_not_recoverable() {
        let err = FaraidError::invariant("adjustment", frac(13, 12));
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("13/12"));
    }
}
