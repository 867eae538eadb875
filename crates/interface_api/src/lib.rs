//! HTTP API Layer
//!
//! This crate provides the REST API for the inheritance engine using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: the calculation endpoint and health checks
//! - **Middleware**: request identifiers and structured request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: consistent error responses; internal defects are
//!   never surfaced as plausible numbers
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router();
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{faraid, health};

/// Creates the main API router
///
/// The engine is a pure function, so the router carries no shared state;
/// configuration concerns the binary (address, log level) only.
pub fn create_router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route(
            "/api/v1/inheritance/calculations",
            post(faraid::create_calculation),
        )
        .layer(axum_middleware::from_fn(middleware::request_context))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
