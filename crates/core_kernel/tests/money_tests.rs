//! Money Behavioral Tests
//!
//! Exercises Money through the estate-resolution paths: fraction
//! application, currency safety, and rounding at the currency boundary.

use core_kernel::{frac, Currency, Money, MoneyError};
use rust_decimal_macros::dec;

mod fraction_resolution_tests {
    use super::*;

    /// The classic 2:1 household resolved against an 800 estate
    #[test]
    fn classic_household_amounts() {
        let net_estate = Money::new(dec!(800), Currency::MYR);

        let wife = net_estate.multiply_fraction(&frac(1, 8));
        let son = net_estate.multiply_fraction(&frac(7, 12));
        let daughter = net_estate.multiply_fraction(&frac(7, 24));

        assert_eq!(wife.amount(), dec!(100));
        assert_eq!(son.amount(), dec!(466.6667));
        assert_eq!(daughter.amount(), dec!(233.3333));
    }

    /// One third of a post-debt estate, the wasiyyah ceiling
    #[test]
    fn one_third_cap() {
        let base = Money::new(dec!(90000), Currency::SGD);
        assert_eq!(base.multiply_fraction(&frac(1, 3)).amount(), dec!(30000));
    }

    #[test]
    fn zero_fraction_resolves_to_zero() {
        let estate = Money::new(dec!(12345.67), Currency::USD);
        assert!(estate
            .multiply_fraction(&core_kernel::Fraction::zero())
            .is_zero());
    }
}

mod currency_tests {
    use super::*;

    #[test]
    fn mixed_currency_arithmetic_is_rejected() {
        let myr = Money::new(dec!(10), Currency::MYR);
        let sar = Money::new(dec!(10), Currency::SAR);

        assert!(matches!(
            myr.checked_sub(&sar),
            Err(MoneyError::CurrencyMismatch(_, _))
        ));
    }

    #[test]
    fn zero_decimal_currency_rounds_whole() {
        let rupiah = Money::new(dec!(1000.4), Currency::IDR);
        assert_eq!(rupiah.round_to_currency().amount(), dec!(1000));
    }

    #[test]
    fn display_uses_currency_symbol() {
        let m = Money::new(dec!(250.5), Currency::MYR);
        assert_eq!(m.to_string(), "RM 250.50");
    }
}

mod division_tests {
    use super::*;

    #[test]
    fn division_by_zero_is_a_typed_error() {
        let m = Money::new(dec!(100), Currency::MYR);
        assert_eq!(m.divide(dec!(0)), Err(MoneyError::DivisionByZero));
    }

    /// Per-head amounts for co-wives splitting one class share
    #[test]
    fn per_head_division() {
        let class_share = Money::new(dec!(100), Currency::MYR);
        let per_wife = class_share.divide(dec!(2)).unwrap();
        assert_eq!(per_wife.amount(), dec!(50));
    }
}
