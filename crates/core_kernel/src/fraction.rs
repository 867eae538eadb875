//! Exact fraction arithmetic
//!
//! This module provides the exact rational type used for every inheritance
//! share computation. Shares in Faraid are canonically fractions (1/2, 1/3,
//! 1/6, 2/3, 1/8, ...) and any floating-point approximation silently
//! corrupts legal correctness, so all intermediate arithmetic stays in
//! lowest-terms integer fractions. Two runs over identical input produce
//! bit-identical fractions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Sub};
use thiserror::Error;

/// Errors that can occur during fraction arithmetic
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum FractionError {
    #[error("Denominator must be non-zero")]
    ZeroDenominator,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Overflow during calculation")]
    Overflow,
}

/// An exact rational number
///
/// Invariants, maintained by every constructor and operation:
/// - the denominator is always positive (sign lives on the numerator)
/// - numerator and denominator are always coprime (reduced via GCD)
///
/// Arithmetic is checked: overflow surfaces as [`FractionError::Overflow`]
/// instead of wrapping or panicking. Equality is structural, which is the
/// same as value equality because both sides are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFraction", into = "RawFraction")]
pub struct Fraction {
    numerator: i128,
    denominator: i128,
}

/// Wire form of a [`Fraction`]; deserialization re-validates the invariants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFraction {
    pub numerator: i128,
    pub denominator: i128,
}

impl TryFrom<RawFraction> for Fraction {
    type Error = FractionError;

    fn try_from(raw: RawFraction) -> Result<Self, Self::Error> {
        Fraction::new(raw.numerator, raw.denominator)
    }
}

impl From<Fraction> for RawFraction {
    fn from(f: Fraction) -> Self {
        RawFraction {
            numerator: f.numerator,
            denominator: f.denominator,
        }
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

impl Fraction {
    /// Creates a fraction, reducing to lowest terms and normalizing the
    /// denominator to be positive
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::ZeroDenominator`] if `denominator` is zero
    pub fn new(numerator: i128, denominator: i128) -> Result<Self, FractionError> {
        if denominator == 0 {
            return Err(FractionError::ZeroDenominator);
        }

        let (mut n, mut d) = (numerator, denominator);
        if d < 0 {
            n = n.checked_neg().ok_or(FractionError::Overflow)?;
            d = d.checked_neg().ok_or(FractionError::Overflow)?;
        }

        if n == 0 {
            return Ok(Self {
                numerator: 0,
                denominator: 1,
            });
        }

        let g = gcd(n.unsigned_abs(), d.unsigned_abs()) as i128;
        Ok(Self {
            numerator: n / g,
            denominator: d / g,
        })
    }

    /// The fraction 0/1
    pub const fn zero() -> Self {
        Self {
            numerator: 0,
            denominator: 1,
        }
    }

    /// The fraction 1/1
    pub const fn one() -> Self {
        Self {
            numerator: 1,
            denominator: 1,
        }
    }

    /// Creates a fraction from a whole number
    pub fn from_int(value: i128) -> Self {
        Self {
            numerator: value,
            denominator: 1,
        }
    }

    /// Returns the numerator (sign carrier)
    pub fn numerator(&self) -> i128 {
        self.numerator
    }

    /// Returns the denominator (always positive)
    pub fn denominator(&self) -> i128 {
        self.denominator
    }

    /// Returns true if the fraction is exactly zero
    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Returns true if the fraction is strictly negative
    pub fn is_negative(&self) -> bool {
        self.numerator < 0
    }

    /// Returns true if the fraction is strictly positive
    pub fn is_positive(&self) -> bool {
        self.numerator > 0
    }

    /// Checked addition
    pub fn checked_add(&self, other: &Fraction) -> Result<Fraction, FractionError> {
        let left = self
            .numerator
            .checked_mul(other.denominator)
            .ok_or(FractionError::Overflow)?;
        let right = other
            .numerator
            .checked_mul(self.denominator)
            .ok_or(FractionError::Overflow)?;
        let numerator = left.checked_add(right).ok_or(FractionError::Overflow)?;
        let denominator = self
            .denominator
            .checked_mul(other.denominator)
            .ok_or(FractionError::Overflow)?;
        Fraction::new(numerator, denominator)
    }

    /// Checked subtraction
    pub fn checked_sub(&self, other: &Fraction) -> Result<Fraction, FractionError> {
        let negated = Fraction {
            numerator: other.numerator.checked_neg().ok_or(FractionError::Overflow)?,
            denominator: other.denominator,
        };
        self.checked_add(&negated)
    }

    /// Checked multiplication
    pub fn checked_mul(&self, other: &Fraction) -> Result<Fraction, FractionError> {
        let numerator = self
            .numerator
            .checked_mul(other.numerator)
            .ok_or(FractionError::Overflow)?;
        let denominator = self
            .denominator
            .checked_mul(other.denominator)
            .ok_or(FractionError::Overflow)?;
        Fraction::new(numerator, denominator)
    }

    /// Checked multiplication by a whole number
    pub fn checked_mul_int(&self, factor: i128) -> Result<Fraction, FractionError> {
        let numerator = self
            .numerator
            .checked_mul(factor)
            .ok_or(FractionError::Overflow)?;
        Fraction::new(numerator, self.denominator)
    }

    /// Checked division
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::DivisionByZero`] if `other` is zero
    pub fn checked_div(&self, other: &Fraction) -> Result<Fraction, FractionError> {
        self.checked_mul(&other.reciprocal()?)
    }

    /// Returns the multiplicative inverse
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::DivisionByZero`] if the fraction is zero
    pub fn reciprocal(&self) -> Result<Fraction, FractionError> {
        if self.numerator == 0 {
            return Err(FractionError::DivisionByZero);
        }
        Fraction::new(self.denominator, self.numerator)
    }

    /// Sums an iterator of fractions with checked arithmetic
    pub fn total<'a, I>(fractions: I) -> Result<Fraction, FractionError>
    where
        I: IntoIterator<Item = &'a Fraction>,
    {
        let mut sum = Fraction::zero();
        for f in fractions {
            sum = sum.checked_add(f)?;
        }
        Ok(sum)
    }

    /// Converts to a `Decimal` for monetary resolution and display
    ///
    /// This is a boundary conversion only. Share arithmetic never goes
    /// through `Decimal`; the exact fraction remains the canonical value.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from_i128_with_scale(self.numerator, 0)
            / Decimal::from_i128_with_scale(self.denominator, 0)
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    // Cross-multiplication is exact here: reduced share fractions keep
    // numerators and denominators far below 2^63, so the products fit i128.
    fn cmp(&self, other: &Self) -> Ordering {
        let left = self.numerator * other.denominator;
        let right = other.numerator * self.denominator;
        left.cmp(&right)
    }
}

impl Add for Fraction {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("Overflow in Fraction::add")
    }
}

impl Sub for Fraction {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(&other)
            .expect("Overflow in Fraction::sub")
    }
}

impl Mul for Fraction {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.checked_mul(&other)
            .expect("Overflow in Fraction::mul")
    }
}

/// Shorthand constructor for the well-known share fractions
///
/// Panics on a zero denominator, so it is only for literals.
pub fn frac(numerator: i128, denominator: i128) -> Fraction {
    Fraction::new(numerator, denominator).expect("Literal fraction with zero denominator")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reduction_on_construction() {
        let f = Fraction::new(4, 8).unwrap();
        assert_eq!(f.numerator(), 1);
        assert_eq!(f.denominator(), 2);
    }

    #[test]
    fn test_sign_normalization() {
        let f = Fraction::new(1, -3).unwrap();
        assert_eq!(f.numerator(), -1);
        assert_eq!(f.denominator(), 3);

        let g = Fraction::new(-2, -4).unwrap();
        assert_eq!(g.numerator(), 1);
        assert_eq!(g.denominator(), 2);
    }

    #[test]
    fn test_zero_denominator_rejected() {
        assert_eq!(Fraction::new(1, 0), Err(FractionError::ZeroDenominator));
    }

    #[test]
    fn test_zero_is_canonical() {
        let f = Fraction::new(0, 7).unwrap();
        assert_eq!(f, Fraction::zero());
        assert_eq!(f.denominator(), 1);
    }

    #[test]
    fn test_addition() {
        let half = frac(1, 2);
        let third = frac(1, 3);
        assert_eq!(half.checked_add(&third).unwrap(), frac(5, 6));
    }

    #[test]
    fn test_subtraction_goes_negative() {
        let result = frac(1, 4).checked_sub(&frac(1, 2)).unwrap();
        assert_eq!(result, frac(-1, 4));
        assert!(result.is_negative());
    }

    #[test]
    fn test_multiplication() {
        // son's 2/3 of the 7/8 residue in the classic 2:1 case
        assert_eq!(frac(2, 3).checked_mul(&frac(7, 8)).unwrap(), frac(7, 12));
    }

    #[test]
    fn test_division() {
        assert_eq!(frac(1, 2).checked_div(&frac(3, 2)).unwrap(), frac(1, 3));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            frac(1, 2).checked_div(&Fraction::zero()),
            Err(FractionError::DivisionByZero)
        );
        assert_eq!(Fraction::zero().reciprocal(), Err(FractionError::DivisionByZero));
    }

    #[test]
    fn test_mul_int() {
        assert_eq!(frac(1, 8).checked_mul_int(2).unwrap(), frac(1, 4));
    }

    #[test]
    fn test_overflow_detected() {
        let huge = Fraction::new(i128::MAX, 1).unwrap();
        assert_eq!(huge.checked_add(&huge), Err(FractionError::Overflow));
        assert_eq!(huge.checked_mul(&huge), Err(FractionError::Overflow));
    }

    #[test]
    fn test_ordering() {
        assert!(frac(1, 3) < frac(1, 2));
        assert!(frac(2, 3) > frac(1, 2));
        assert_eq!(frac(2, 4).cmp(&frac(1, 2)), Ordering::Equal);
    }

    #[test]
    fn test_total() {
        let shares = [frac(1, 8), frac(7, 12), frac(7, 24)];
        assert_eq!(Fraction::total(shares.iter()).unwrap(), Fraction::one());
    }

    #[test]
    fn test_display() {
        assert_eq!(frac(7, 24).to_string(), "7/24");
        assert_eq!(Fraction::from_int(3).to_string(), "3");
        assert_eq!(frac(-1, 6).to_string(), "-1/6");
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(frac(1, 8).to_decimal(), dec!(0.125));
    }

    #[test]
    fn test_serde_round_trip() {
        let f = frac(7, 24);
        let json = serde_json::to_string(&f).unwrap();
        let back: Fraction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }

    #[test]
    fn test_serde_rejects_zero_denominator() {
        let result: Result<Fraction, _> =
            serde_json::from_str(r#"{"numerator":1,"denominator":0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_reduces_on_deserialize() {
        let f: Fraction = serde_json::from_str(r#"{"numerator":4,"denominator":8}"#).unwrap();
        assert_eq!(f, frac(1, 2));
    }
}
