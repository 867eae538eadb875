//! Request middleware
//!
//! Attaches a request identifier and emits one structured log line per
//! request with method, path, status, and latency.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use uuid::Uuid;

/// Header carrying the request identifier
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags each request with an id and logs its outcome
pub async fn request_context(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(request).await;

    let latency_ms = started.elapsed().as_millis();
    tracing::info!(
        %method,
        path,
        status = response.status().as_u16(),
        latency_ms,
        request_id,
        "Request handled"
    );

    if let Ok(value) = request_id.parse() {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
