//! Inheritance calculation handlers

use axum::{http::StatusCode, Json};
use core_kernel::Money;
use domain_faraid::{inheritable_total, FaraidEngine};

use crate::dto::{CalculationRequest, CalculationResponse};
use crate::error::ApiError;

/// POST /api/v1/inheritance/calculations
///
/// Runs one Faraid calculation. The request either carries a gross estate
/// figure or a list of classified assets from the upstream classifier, in
/// which case only inheritable assets are aggregated.
pub async fn create_calculation(
    Json(request): Json<CalculationRequest>,
) -> Result<(StatusCode, Json<CalculationResponse>), ApiError> {
    let currency = request.estate.currency;

    let gross = match (request.estate.gross_estate, request.estate.assets.is_empty()) {
        (Some(_), false) => {
            return Err(ApiError::BadRequest(
                "Provide either gross_estate or assets, not both".to_string(),
            ));
        }
        (Some(amount), true) => Money::new(amount, currency),
        (None, false) => {
            let classified: Vec<_> = request
                .estate
                .assets
                .iter()
                .map(|a| a.to_classified(currency))
                .collect();
            inheritable_total(&classified, currency)
                .map_err(|e| ApiError::BadRequest(e.to_string()))?
        }
        (None, true) => {
            return Err(ApiError::BadRequest(
                "Provide gross_estate or a list of classified assets".to_string(),
            ));
        }
    };

    let wasiyyah = request
        .estate
        .wasiyyah
        .as_ref()
        .map(|w| w.to_request(currency))
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let composition = request.family.to_composition();
    let debts = Money::new(request.estate.debts, currency);
    let funeral = Money::new(request.estate.funeral_costs, currency);

    tracing::info!(
        madhhab = %request.madhhab,
        heirs = composition.present_classes().count(),
        "Running inheritance calculation"
    );

    let calculation = FaraidEngine::compute(
        &composition,
        request.madhhab,
        gross,
        debts,
        funeral,
        wasiyyah,
    )?;

    Ok((
        StatusCode::OK,
        Json(CalculationResponse::from_calculation(calculation)),
    ))
}
