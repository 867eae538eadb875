//! Pre-built Test Fixtures
//!
//! Ready-to-use compositions and money values for the classical households
//! that recur throughout the suite. Fixtures are consistent and
//! predictable; builders are for everything else.

use core_kernel::{Currency, Money};
use domain_faraid::{FamilyComposition, HeirClass};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The 800-unit estate of the classic 2:1 scenario
    pub fn estate_800() -> Money {
        Money::new(dec!(800), Currency::MYR)
    }

    /// A round six-figure estate
    pub fn estate_120k() -> Money {
        Money::new(dec!(120000), Currency::MYR)
    }

    /// A zero amount
    pub fn zero() -> Money {
        Money::zero(Currency::MYR)
    }

    /// An arbitrary MYR amount
    pub fn myr(amount: Decimal) -> Money {
        Money::new(amount, Currency::MYR)
    }
}

/// Fixture for family compositions
pub struct CompositionFixtures;

impl CompositionFixtures {
    /// Wife, one son, one daughter: the classic 2:1 residuary case
    pub fn classic_two_to_one() -> FamilyComposition {
        FamilyComposition::new()
            .with(HeirClass::Wife, 1)
            .with(HeirClass::Son, 1)
            .with(HeirClass::Daughter, 1)
    }

    /// Husband and two full sisters: the classic Awl to 7/6
    pub fn awl_household() -> FamilyComposition {
        FamilyComposition::new()
            .with(HeirClass::Husband, 1)
            .with(HeirClass::FullSister, 2)
    }

    /// Mother and a single daughter: the classic Radd at 5/6
    pub fn radd_household() -> FamilyComposition {
        FamilyComposition::new()
            .with(HeirClass::Mother, 1)
            .with(HeirClass::Daughter, 1)
    }

    /// Husband and both parents: the first case of Umar
    pub fn umariyyatayn_with_husband() -> FamilyComposition {
        FamilyComposition::new()
            .with(HeirClass::Husband, 1)
            .with(HeirClass::Father, 1)
            .with(HeirClass::Mother, 1)
    }

    /// Wife and both parents: the second case of Umar
    pub fn umariyyatayn_with_wife() -> FamilyComposition {
        FamilyComposition::new()
            .with(HeirClass::Wife, 1)
            .with(HeirClass::Father, 1)
            .with(HeirClass::Mother, 1)
    }

    /// Every sibling type alongside a son, for exclusion sweeps
    pub fn son_with_all_siblings() -> FamilyComposition {
        FamilyComposition::new()
            .with(HeirClass::Son, 1)
            .with(HeirClass::FullBrother, 1)
            .with(HeirClass::FullSister, 1)
            .with(HeirClass::PaternalHalfBrother, 1)
            .with(HeirClass::PaternalHalfSister, 1)
            .with(HeirClass::MaternalHalfBrother, 1)
            .with(HeirClass::MaternalHalfSister, 1)
    }
}
