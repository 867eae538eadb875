//! Engine Property Tests
//!
//! Invariants that must hold for every valid composition, school, and
//! estate: the corrected shares sum to exactly one, repeated runs are
//! bit-identical, monetary amounts reconcile against the net estate, and
//! the wasiyyah cap is never exceeded.

use core_kernel::{frac, Currency, Fraction, Money};
use domain_faraid::{FaraidEngine, HeirClass, Madhhab, ShareBasis, WasiyyahRequest};
use proptest::prelude::*;
use test_utils::{composition_strategy, madhhab_strategy, net_estate_strategy};

proptest! {
    /// The sum invariant: post-correction fractions always total one
    #[test]
    fn shares_always_sum_to_one(
        composition in composition_strategy(),
        madhhab in madhhab_strategy(),
        net_estate in net_estate_strategy()
    ) {
        let d = FaraidEngine::distribute(&composition, madhhab, net_estate).unwrap();
        let total = Fraction::total(d.shares.iter().map(|s| &s.fraction)).unwrap();
        prop_assert_eq!(total, Fraction::one());
        prop_assert_eq!(d.total_assigned, Fraction::one());
    }

    /// Determinism: identical input, bit-identical distribution
    #[test]
    fn computation_is_idempotent(
        composition in composition_strategy(),
        madhhab in madhhab_strategy(),
        net_estate in net_estate_strategy()
    ) {
        let first = FaraidEngine::distribute(&composition, madhhab, net_estate).unwrap();
        let second = FaraidEngine::distribute(&composition, madhhab, net_estate).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Monetary reconciliation: rounded amounts sum to the net estate
    #[test]
    fn amounts_reconcile(
        composition in composition_strategy(),
        madhhab in madhhab_strategy(),
        net_estate in net_estate_strategy()
    ) {
        let d = FaraidEngine::distribute(&composition, madhhab, net_estate).unwrap();
        let total = d.shares.iter().fold(Money::zero(Currency::MYR), |acc, s| {
            acc.checked_add(&s.amount).unwrap()
        });
        prop_assert_eq!(total.amount(), net_estate.round_to_currency().amount());
    }

    /// Every present class appears exactly once in the output
    #[test]
    fn output_covers_the_composition(
        composition in composition_strategy(),
        madhhab in madhhab_strategy(),
        net_estate in net_estate_strategy()
    ) {
        let d = FaraidEngine::distribute(&composition, madhhab, net_estate).unwrap();
        for class in HeirClass::ALL {
            let entries = d.shares.iter().filter(|s| s.heir_class == class).count();
            if composition.has(class) {
                prop_assert_eq!(entries, 1, "{} should appear once", class);
            } else {
                prop_assert_eq!(entries, 0, "{} is absent from the input", class);
            }
        }
    }

    /// Blocked classes hold exactly zero
    #[test]
    fn blocked_classes_hold_zero(
        composition in composition_strategy(),
        madhhab in madhhab_strategy(),
        net_estate in net_estate_strategy()
    ) {
        let d = FaraidEngine::distribute(&composition, madhhab, net_estate).unwrap();
        for share in &d.shares {
            if share.basis == ShareBasis::Blocked {
                prop_assert!(share.fraction.is_zero());
                prop_assert!(share.amount.is_zero());
            }
        }
    }

    /// Adding a son drives every sibling share to exactly zero
    #[test]
    fn a_son_silences_the_siblings(
        composition in composition_strategy(),
        madhhab in madhhab_strategy(),
        net_estate in net_estate_strategy()
    ) {
        let with_son = composition.clone().with(HeirClass::Son, 1);
        let d = FaraidEngine::distribute(&with_son, madhhab, net_estate).unwrap();
        for share in &d.shares {
            if share.heir_class.is_sibling() {
                prop_assert!(
                    share.fraction.is_zero(),
                    "{} holds {} despite the son",
                    share.heir_class,
                    share.fraction
                );
            }
        }
    }

    /// The wasiyyah applied never exceeds a third of the post-debt estate
    #[test]
    fn wasiyyah_cap_is_absolute(
        gross_minor in 1_000i64..1_000_000_000i64,
        requested_minor in 0i64..2_000_000_000i64
    ) {
        let gross = Money::from_minor(gross_minor, Currency::MYR);
        let requested = Money::from_minor(requested_minor, Currency::MYR);
        let composition = domain_faraid::FamilyComposition::new().with(HeirClass::Son, 1);

        let calc = FaraidEngine::compute(
            &composition,
            Madhhab::Shafii,
            gross,
            Money::zero(Currency::MYR),
            Money::zero(Currency::MYR),
            Some(WasiyyahRequest::Amount { amount: requested }),
        )
        .unwrap();

        let cap = gross.multiply_fraction(&frac(1, 3));
        prop_assert!(calc.estate.wasiyyah_applied.amount() <= cap.amount());
        if requested.amount() > cap.amount() {
            prop_assert_eq!(calc.estate.wasiyyah_applied.amount(), cap.amount());
        } else {
            prop_assert_eq!(calc.estate.wasiyyah_applied, requested);
        }
    }
}
