//! Custom Test Assertions
//!
//! Specialized assertion helpers for distributions that give more
//! meaningful error messages than standard assertions.

use core_kernel::{Fraction, Money};
use domain_faraid::{Distribution, HeirClass, ShareBasis};

/// Asserts that a class received exactly the given fraction
///
/// # Panics
///
/// Panics if the class is absent from the distribution or its fraction
/// differs
pub fn assert_fraction(distribution: &Distribution, class: HeirClass, num: i128, den: i128) {
    let expected = Fraction::new(num, den).expect("Bad expected fraction in test");
    let share = distribution
        .share(class)
        .unwrap_or_else(|| panic!("{} missing from distribution", class));
    assert_eq!(
        share.fraction, expected,
        "{} received {}, expected {}",
        class, share.fraction, expected
    );
}

/// Asserts the sum-to-one invariant over the final fractions
pub fn assert_sums_to_one(distribution: &Distribution) {
    let total = Fraction::total(distribution.shares.iter().map(|s| &s.fraction))
        .expect("Overflow summing distribution");
    assert_eq!(
        total,
        Fraction::one(),
        "Distribution sums to {}, not 1",
        total
    );
    assert_eq!(distribution.total_assigned, Fraction::one());
}

/// Asserts that a class is present, excluded, and zeroed
pub fn assert_blocked(distribution: &Distribution, class: HeirClass) {
    let share = distribution
        .share(class)
        .unwrap_or_else(|| panic!("{} missing from distribution", class));
    assert_eq!(
        share.basis,
        ShareBasis::Blocked,
        "{} has basis {:?}, expected Blocked",
        class,
        share.basis
    );
    assert!(
        share.fraction.is_zero(),
        "{} is blocked but holds {}",
        class,
        share.fraction
    );
    assert!(share.amount.is_zero());
}

/// Asserts that the monetary amounts sum exactly to the net estate
pub fn assert_amounts_total(distribution: &Distribution) {
    let currency = distribution.net_estate.currency();
    let total = distribution
        .shares
        .iter()
        .fold(Money::zero(currency), |acc, s| {
            acc.checked_add(&s.amount).expect("Currency mismatch in distribution")
        });
    assert_eq!(
        total.amount(),
        distribution.net_estate.round_to_currency().amount(),
        "Amounts sum to {}, net estate is {}",
        total,
        distribution.net_estate
    );
}
