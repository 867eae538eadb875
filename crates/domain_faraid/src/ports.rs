//! Ports to the surrounding application
//!
//! The engine consumes the asset-classification flow as an opaque
//! collaborator: something upstream decides which assets are inheritable
//! and what they are worth, and the engine only ever sees the aggregated
//! inheritable total as its gross estate input.

use async_trait::async_trait;
use core_kernel::{AssetId, Currency, Money, MoneyError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Verdict of the upstream classifier for one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClassification {
    /// Part of the distributable estate
    Inheritable,
    /// Outside the estate (e.g., assets held in trust for others)
    Excluded,
    /// The classifier could not decide; a human must review
    NeedsReview,
}

/// One asset as returned by the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedAsset {
    pub asset_id: AssetId,
    pub classification: AssetClassification,
    pub value: Money,
    /// The classifier's stated reason, passed through for audit
    pub reason: Option<String>,
}

/// Errors surfaced by classifier adapters
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),

    #[error("Asset {0} was rejected by the classifier: {1}")]
    Rejected(AssetId, String),
}

/// The opaque asset classifier the surrounding application implements
///
/// Adapters wrap whatever the application uses for classification; the
/// domain only depends on this trait and on [`inheritable_total`].
#[async_trait]
pub trait AssetClassifier: Send + Sync {
    /// Classifies a single asset by identifier
    async fn classify(&self, asset_id: AssetId) -> Result<ClassifiedAsset, ClassifierError>;
}

/// Sums the inheritable assets into the engine's gross estate input
///
/// `Excluded` and `NeedsReview` assets contribute nothing; callers are
/// expected to resolve reviews before asking for a binding distribution.
///
/// # Errors
///
/// Returns a currency mismatch if any inheritable asset is not valued in
/// `currency`.
pub fn inheritable_total(
    assets: &[ClassifiedAsset],
    currency: Currency,
) -> Result<Money, MoneyError> {
    let mut total = Money::zero(currency);
    for asset in assets {
        if asset.classification == AssetClassification::Inheritable {
            total = total.checked_add(&asset.value)?;
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn asset(classification: AssetClassification, amount: rust_decimal::Decimal) -> ClassifiedAsset {
        ClassifiedAsset {
            asset_id: AssetId::new_v7(),
            classification,
            value: Money::new(amount, Currency::MYR),
            reason: None,
        }
    }

    #[test]
    fn test_only_inheritable_assets_are_summed() {
        let assets = vec![
            asset(AssetClassification::Inheritable, dec!(1000)),
            asset(AssetClassification::Excluded, dec!(500)),
            asset(AssetClassification::NeedsReview, dec!(250)),
            asset(AssetClassification::Inheritable, dec!(2000)),
        ];
        let total = inheritable_total(&assets, Currency::MYR).unwrap();
        assert_eq!(total.amount(), dec!(3000));
    }

    #[test]
    fn test_empty_asset_list_sums_to_zero() {
        let total = inheritable_total(&[], Currency::SGD).unwrap();
        assert!(total.is_zero());
    }

    #[test]
    fn test_mixed_currency_is_rejected() {
        let assets = vec![ClassifiedAsset {
            asset_id: AssetId::new(),
            classification: AssetClassification::Inheritable,
            value: Money::new(dec!(10), Currency::USD),
            reason: None,
        }];
        assert!(inheritable_total(&assets, Currency::MYR).is_err());
    }

    #[tokio::test]
    async fn test_classifier_port_round_trip() {
        struct FixedClassifier;

        #[async_trait]
        impl AssetClassifier for FixedClassifier {
            async fn classify(
                &self,
                asset_id: AssetId,
            ) -> Result<ClassifiedAsset, ClassifierError> {
                Ok(ClassifiedAsset {
                    asset_id,
                    classification: AssetClassification::Inheritable,
                    value: Money::new(dec!(100), Currency::MYR),
                    reason: Some("liquid account".to_string()),
                })
            }
        }

        let classifier = FixedClassifier;
        let id = AssetId::new_v7();
        let classified = classifier.classify(id).await.unwrap();
        assert_eq!(classified.asset_id, id);
        assert_eq!(classified.classification, AssetClassification::Inheritable);
    }
}
