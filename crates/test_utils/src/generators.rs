//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants: every generated composition passes validation.

use core_kernel::{Currency, Money};
use domain_faraid::{FamilyComposition, HeirClass, Madhhab};
use proptest::prelude::*;

/// Strategy for generating any school
pub fn madhhab_strategy() -> impl Strategy<Value = Madhhab> {
    prop_oneof![
        Just(Madhhab::Hanafi),
        Just(Madhhab::Maliki),
        Just(Madhhab::Shafii),
        Just(Madhhab::Hanbali),
    ]
}

/// Strategy for a spouse slot: no spouse, a husband, or up to four wives
fn spouse_strategy() -> impl Strategy<Value = (u32, u32)> {
    prop_oneof![Just((0u32, 0u32)), Just((1, 0)), (0u32..=0, 1u32..=4)]
}

/// Strategy for valid family compositions
///
/// Generated compositions always satisfy `validate`: singular classes stay
/// at most one, spouses never conflict, and at least one heir exists.
pub fn composition_strategy() -> impl Strategy<Value = FamilyComposition> {
    (
        spouse_strategy(),
        0u32..=3, // sons
        0u32..=3, // daughters
        proptest::bool::ANY,
        proptest::bool::ANY,
        0u32..=1, // paternal grandfather
        0u32..=1, // paternal grandmother
        0u32..=1, // maternal grandmother
        0u32..=2, // full brothers
        0u32..=2, // full sisters
        (0u32..=2, 0u32..=2, 0u32..=2, 0u32..=2), // half-sibling counts
    )
        .prop_map(
            |(
                (husband, wives),
                sons,
                daughters,
                father,
                mother,
                pgf,
                pgm,
                mgm,
                full_brothers,
                full_sisters,
                (phb, phs, mhb, mhs),
            )| {
                FamilyComposition::new()
                    .with(HeirClass::Husband, husband)
                    .with(HeirClass::Wife, wives)
                    .with(HeirClass::Son, sons)
                    .with(HeirClass::Daughter, daughters)
                    .with(HeirClass::Father, u32::from(father))
                    .with(HeirClass::Mother, u32::from(mother))
                    .with(HeirClass::PaternalGrandfather, pgf)
                    .with(HeirClass::PaternalGrandmother, pgm)
                    .with(HeirClass::MaternalGrandmother, mgm)
                    .with(HeirClass::FullBrother, full_brothers)
                    .with(HeirClass::FullSister, full_sisters)
                    .with(HeirClass::PaternalHalfBrother, phb)
                    .with(HeirClass::PaternalHalfSister, phs)
                    .with(HeirClass::MaternalHalfBrother, mhb)
                    .with(HeirClass::MaternalHalfSister, mhs)
            },
        )
        .prop_filter("at least one heir", |c| {
            HeirClass::ALL.iter().any(|class| c.has(*class))
        })
}

/// Strategy for positive net estates in whole ringgit
pub fn net_estate_strategy() -> impl Strategy<Value = Money> {
    (1i64..10_000_000i64).prop_map(|n| Money::from_minor(n * 100, Currency::MYR))
}
