//! HTTP request handlers for the segroute server
//!
//! Handlers are plain async functions; [`register_all`] binds them into a
//! [`Router`] during startup.

use crate::error::AppResult;
use crate::metrics::Metrics;
use crate::router::Router;
use axum::http::Method;
use std::sync::Arc;

pub mod demo;
pub mod health;
pub mod metrics;

/// Application state shared across handlers
///
/// Cheap to clone; each registered closure keeps its own copy.
#[derive(Clone)]
pub struct AppState {
    metrics: Arc<Metrics>,
}

impl AppState {
    /// Create a new AppState around a shared metrics registry
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self { metrics }
    }

    /// Get reference to the metrics registry
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

/// Register the demo endpoints plus `/health` and `/metrics`
///
/// # Errors
///
/// Returns [`crate::error::AppError::DuplicateRoute`] if any of these paths
/// is already registered on `router`.
pub fn register_all(router: &mut Router, state: AppState) -> AppResult<()> {
    router.route(Method::GET, "/ping", demo::ping)?;
    router.route(Method::GET, "/api/v1/data", demo::data)?;
    router.route(Method::POST, "/api/v1/process", demo::process)?;

    let health_state = state.clone();
    router.route(Method::GET, "/health", move |_req| {
        health::handler(health_state.clone())
    })?;

    router.route(Method::GET, "/metrics", move |_req| {
        metrics::handler(state.clone())
    })?;

    Ok(())
}
