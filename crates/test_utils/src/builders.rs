//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant fields and take defaults for the rest.

use core_kernel::{Currency, Money};
use domain_faraid::{FamilyComposition, HeirClass, WasiyyahRequest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builder for family compositions with named relative setters
pub struct TestCompositionBuilder {
    composition: FamilyComposition,
}

impl Default for TestCompositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCompositionBuilder {
    /// Starts from an empty composition
    pub fn new() -> Self {
        Self {
            composition: FamilyComposition::new(),
        }
    }

    /// Adds a surviving husband
    pub fn with_husband(mut self) -> Self {
        self.composition = self.composition.with(HeirClass::Husband, 1);
        self
    }

    /// Adds surviving wives
    pub fn with_wives(mut self, count: u32) -> Self {
        self.composition = self.composition.with(HeirClass::Wife, count);
        self
    }

    /// Adds surviving sons
    pub fn with_sons(mut self, count: u32) -> Self {
        self.composition = self.composition.with(HeirClass::Son, count);
        self
    }

    /// Adds surviving daughters
    pub fn with_daughters(mut self, count: u32) -> Self {
        self.composition = self.composition.with(HeirClass::Daughter, count);
        self
    }

    /// Adds both parents
    pub fn with_parents(mut self) -> Self {
        self.composition = self
            .composition
            .with(HeirClass::Father, 1)
            .with(HeirClass::Mother, 1);
        self
    }

    /// Adds an arbitrary class count
    pub fn with_class(mut self, class: HeirClass, count: u32) -> Self {
        self.composition = self.composition.with(class, count);
        self
    }

    /// Returns the finished composition
    pub fn build(self) -> FamilyComposition {
        self.composition
    }
}

/// Builder for estate figures fed to the engine
pub struct TestEstateBuilder {
    gross: Money,
    debts: Money,
    funeral: Money,
    wasiyyah: Option<WasiyyahRequest>,
}

impl Default for TestEstateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEstateBuilder {
    /// Starts from a debt-free 120,000 MYR estate
    pub fn new() -> Self {
        Self {
            gross: Money::new(dec!(120000), Currency::MYR),
            debts: Money::zero(Currency::MYR),
            funeral: Money::zero(Currency::MYR),
            wasiyyah: None,
        }
    }

    /// Sets the gross estate
    pub fn with_gross(mut self, amount: Decimal) -> Self {
        self.gross = Money::new(amount, Currency::MYR);
        self
    }

    /// Sets outstanding debts
    pub fn with_debts(mut self, amount: Decimal) -> Self {
        self.debts = Money::new(amount, Currency::MYR);
        self
    }

    /// Sets funeral costs
    pub fn with_funeral(mut self, amount: Decimal) -> Self {
        self.funeral = Money::new(amount, Currency::MYR);
        self
    }

    /// Requests a bequest of an absolute amount
    pub fn with_wasiyyah_amount(mut self, amount: Decimal) -> Self {
        self.wasiyyah = Some(WasiyyahRequest::Amount {
            amount: Money::new(amount, Currency::MYR),
        });
        self
    }

    /// Requests a bequest as a fraction of the post-debt estate
    pub fn with_wasiyyah_fraction(mut self, numerator: i128, denominator: i128) -> Self {
        self.wasiyyah = Some(WasiyyahRequest::FractionOfEstate {
            fraction: core_kernel::frac(numerator, denominator),
        });
        self
    }

    /// Returns (gross, debts, funeral, wasiyyah) ready for the engine
    pub fn build(self) -> (Money, Money, Money, Option<WasiyyahRequest>) {
        (self.gross, self.debts, self.funeral, self.wasiyyah)
    }
}
