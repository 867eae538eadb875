//! Inheritance calculation DTOs
//!
//! The wire shapes for the calculation endpoint. Counts are unsigned at
//! the type level; the deeper structural rules (spouse exclusivity,
//! singular classes) are enforced by the domain validator, which reports
//! every violation at once.

use chrono::{DateTime, Utc};
use core_kernel::{CalculationId, Currency, Fraction, Money};
use domain_faraid::{
    AssetClassification, Calculation, ClassifiedAsset, Correction, HeirClass, Madhhab,
    ShareBasis, WasiyyahRequest,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for a calculation
#[derive(Debug, Deserialize)]
pub struct CalculationRequest {
    pub madhhab: Madhhab,
    pub family: FamilyDto,
    pub estate: EstateDto,
}

/// Family composition by named relative
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FamilyDto {
    pub husband: bool,
    pub wives: u32,
    pub sons: u32,
    pub daughters: u32,
    pub father: bool,
    pub mother: bool,
    pub paternal_grandfather: bool,
    pub paternal_grandmother: bool,
    pub maternal_grandmother: bool,
    pub full_brothers: u32,
    pub full_sisters: u32,
    pub paternal_half_brothers: u32,
    pub paternal_half_sisters: u32,
    pub maternal_half_brothers: u32,
    pub maternal_half_sisters: u32,
}

impl FamilyDto {
    /// Converts the wire shape into the domain composition
    pub fn to_composition(&self) -> domain_faraid::FamilyComposition {
        domain_faraid::FamilyComposition::new()
            .with(HeirClass::Husband, u32::from(self.husband))
            .with(HeirClass::Wife, self.wives)
            .with(HeirClass::Son, self.sons)
            .with(HeirClass::Daughter, self.daughters)
            .with(HeirClass::Father, u32::from(self.father))
            .with(HeirClass::Mother, u32::from(self.mother))
            .with(
                HeirClass::PaternalGrandfather,
                u32::from(self.paternal_grandfather),
            )
            .with(
                HeirClass::PaternalGrandmother,
                u32::from(self.paternal_grandmother),
            )
            .with(
                HeirClass::MaternalGrandmother,
                u32::from(self.maternal_grandmother),
            )
            .with(HeirClass::FullBrother, self.full_brothers)
            .with(HeirClass::FullSister, self.full_sisters)
            .with(HeirClass::PaternalHalfBrother, self.paternal_half_brothers)
            .with(HeirClass::PaternalHalfSister, self.paternal_half_sisters)
            .with(HeirClass::MaternalHalfBrother, self.maternal_half_brothers)
            .with(HeirClass::MaternalHalfSister, self.maternal_half_sisters)
    }
}

/// Estate figures in one base currency
///
/// Either `gross_estate` or a list of classified `assets` must be given;
/// with assets, only the `inheritable` ones contribute to the gross figure.
#[derive(Debug, Deserialize)]
pub struct EstateDto {
    pub currency: Currency,
    pub gross_estate: Option<Decimal>,
    #[serde(default)]
    pub assets: Vec<AssetDto>,
    #[serde(default)]
    pub debts: Decimal,
    #[serde(default)]
    pub funeral_costs: Decimal,
    pub wasiyyah: Option<WasiyyahDto>,
}

/// One pre-classified asset from the upstream classifier
#[derive(Debug, Deserialize)]
pub struct AssetDto {
    pub asset_id: Option<Uuid>,
    pub classification: AssetClassification,
    pub value: Decimal,
    pub reason: Option<String>,
}

impl AssetDto {
    /// Converts into the domain's classified-asset shape
    pub fn to_classified(&self, currency: Currency) -> ClassifiedAsset {
        ClassifiedAsset {
            asset_id: self
                .asset_id
                .map(core_kernel::AssetId::from_uuid)
                .unwrap_or_default(),
            classification: self.classification,
            value: Money::new(self.value, currency),
            reason: self.reason.clone(),
        }
    }
}

/// A requested bequest
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WasiyyahDto {
    /// An absolute amount in the estate currency
    Amount { amount: Decimal },
    /// A percentage of the post-debt estate, e.g. 12.5
    Percentage { percent: Decimal },
}

impl WasiyyahDto {
    /// Converts into the domain request, turning percentages into exact
    /// fractions (12.5% becomes 125/1000 before reduction)
    pub fn to_request(&self, currency: Currency) -> Result<WasiyyahRequest, String> {
        match self {
            WasiyyahDto::Amount { amount } => Ok(WasiyyahRequest::Amount {
                amount: Money::new(*amount, currency),
            }),
            WasiyyahDto::Percentage { percent } => {
                let scale = percent.scale();
                let mantissa = percent.mantissa();
                let denominator = 10i128
                    .checked_pow(scale)
                    .and_then(|p| p.checked_mul(100))
                    .ok_or_else(|| format!("Percentage {} is out of range", percent))?;
                let fraction = Fraction::new(mantissa, denominator)
                    .map_err(|e| format!("Percentage {}: {}", percent, e))?;
                Ok(WasiyyahRequest::FractionOfEstate { fraction })
            }
        }
    }
}

/// Exact fraction on the wire, with a readable rendering
#[derive(Debug, Serialize)]
pub struct FractionDto {
    pub numerator: i128,
    pub denominator: i128,
    pub display: String,
}

impl From<Fraction> for FractionDto {
    fn from(f: Fraction) -> Self {
        Self {
            numerator: f.numerator(),
            denominator: f.denominator(),
            display: f.to_string(),
        }
    }
}

/// One heir class's final share
#[derive(Debug, Serialize)]
pub struct HeirShareDto {
    pub heir_class: HeirClass,
    pub count: u32,
    pub fraction: FractionDto,
    pub amount: Decimal,
    pub basis: ShareBasis,
    pub rule: String,
    pub note: String,
}

/// The applied correction, if any
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CorrectionDto {
    None,
    Awl { factor: FractionDto },
    Radd { factor: FractionDto },
}

impl From<Correction> for CorrectionDto {
    fn from(c: Correction) -> Self {
        match c {
            Correction::None => CorrectionDto::None,
            Correction::Awl { factor } => CorrectionDto::Awl {
                factor: factor.into(),
            },
            Correction::Radd { factor } => CorrectionDto::Radd {
                factor: factor.into(),
            },
        }
    }
}

/// Response body for a completed calculation
#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub calculation_id: CalculationId,
    pub madhhab: Madhhab,
    pub currency: Currency,
    pub net_estate: Decimal,
    pub wasiyyah_applied: Decimal,
    pub total_assigned: FractionDto,
    pub residue_before_correction: FractionDto,
    pub correction: CorrectionDto,
    pub shares: Vec<HeirShareDto>,
    pub computed_at: DateTime<Utc>,
}

impl CalculationResponse {
    /// Builds the response from a finished calculation
    pub fn from_calculation(calculation: Calculation) -> Self {
        let Calculation {
            estate,
            distribution,
        } = calculation;

        let shares = distribution
            .shares
            .iter()
            .map(|s| HeirShareDto {
                heir_class: s.heir_class,
                count: s.count,
                fraction: s.fraction.into(),
                amount: s.amount.amount(),
                basis: s.basis,
                rule: s.rule.to_string(),
                note: s.note.clone(),
            })
            .collect();

        Self {
            calculation_id: CalculationId::new_v7(),
            madhhab: distribution.madhhab,
            currency: distribution.net_estate.currency(),
            net_estate: estate.net_estate.amount(),
            wasiyyah_applied: estate.wasiyyah_applied.amount(),
            total_assigned: distribution.total_assigned.into(),
            residue_before_correction: distribution.residue_before_correction.into(),
            correction: distribution.correction.into(),
            shares,
            computed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_family_dto_round_trips_counts() {
        let dto = FamilyDto {
            wives: 2,
            sons: 1,
            mother: true,
            ..Default::default()
        };
        let composition = dto.to_composition();
        assert_eq!(composition.count(HeirClass::Wife), 2);
        assert_eq!(composition.count(HeirClass::Son), 1);
        assert_eq!(composition.count(HeirClass::Mother), 1);
        assert!(!composition.has(HeirClass::Husband));
    }

    #[test]
    fn test_percentage_becomes_exact_fraction() {
        let dto = WasiyyahDto::Percentage {
            percent: dec!(12.5),
        };
        match dto.to_request(Currency::MYR).unwrap() {
            WasiyyahRequest::FractionOfEstate { fraction } => {
                assert_eq!(fraction, core_kernel::frac(1, 8));
            }
            other => panic!("Expected fraction, got {:?}", other),
        }
    }

    #[test]
    fn test_whole_percentage() {
        let dto = WasiyyahDto::Percentage { percent: dec!(10) };
        match dto.to_request(Currency::MYR).unwrap() {
            WasiyyahRequest::FractionOfEstate { fraction } => {
                assert_eq!(fraction, core_kernel::frac(1, 10));
            }
            other => panic!("Expected fraction, got {:?}", other),
        }
    }
}
