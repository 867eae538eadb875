//! API error handling
//!
//! Maps domain errors onto HTTP responses. Recoverable input errors carry
//! actionable detail; internal defects are logged in full and surfaced
//! only as "calculation unavailable", never as a plausible wrong number.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain_faraid::FaraidError;
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid family composition")]
    CompositionInvalid { violations: Vec<String> },

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg, None)
            }
            ApiError::CompositionInvalid { violations } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Family composition is invalid".to_string(),
                Some(violations),
            ),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Calculation unavailable, please contact support".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<FaraidError> for ApiError {
    fn from(err: FaraidError) -> Self {
        match err {
            FaraidError::InvalidComposition { violations } => {
                ApiError::CompositionInvalid { violations }
            }
            FaraidError::Estate(estate) => ApiError::BadRequest(estate.to_string()),
            // Arithmetic and invariant failures are defects, not input
            // problems; hide the detail from the caller.
            other => ApiError::Internal(other.to_string()),
        }
    }
}
