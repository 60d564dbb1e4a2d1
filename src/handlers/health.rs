//! Health check endpoint
//!
//! Provides a simple health check for monitoring and load balancers.

use axum::{Json, http::StatusCode};
use serde::Serialize;

use crate::handlers::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,
    /// Timing records folded into metrics so far
    pub timings_observed: u64,
}

/// Health check handler
///
/// Always 200 OK while the process is serving. `timings_observed` staying
/// flat under traffic means the metrics consumer has stopped draining.
pub async fn handler(state: AppState) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "OK",
            timings_observed: state.metrics().observed_requests(),
        }),
    )
}
