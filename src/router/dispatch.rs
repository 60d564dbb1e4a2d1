//! Request dispatch
//!
//! Looks a request's path up in the trie, runs the bound handler, and
//! records how long each step took.

use super::{Handler, RouteNode, segment};
use crate::config::MetricsConfig;
use crate::error::{AppError, AppResult};
use crate::metrics::{self, Metrics, MetricsReceiver, MetricsSender, RecordPool};
use axum::{
    extract::Request,
    http::Method,
    response::{IntoResponse, Response},
};
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

/// Segment-trie router with per-request timing
///
/// Routing ignores the HTTP method: a path maps to one handler whatever
/// method the request uses, and registering the same path under two methods
/// is a duplicate.
pub struct Router {
    root: RouteNode<Handler>,
    pool: RecordPool,
    metrics_tx: MetricsSender,
    metrics: Option<Arc<Metrics>>,
}

impl Router {
    /// Create an empty router and the receiving end of its timing channel
    ///
    /// The receiver should be handed to [`metrics::spawn_consumer`] (or
    /// drained some other way); while nobody reads it, timing records are
    /// dropped once the channel fills.
    pub fn new(config: &MetricsConfig) -> (Self, MetricsReceiver) {
        let (metrics_tx, metrics_rx) = metrics::channel(config.channel_capacity());
        let router = Self {
            root: RouteNode::root(),
            pool: RecordPool::new(config.pool_max_idle()),
            metrics_tx,
            metrics: None,
        };
        (router, metrics_rx)
    }

    /// Attach Prometheus counters for matched and unmatched requests
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Bind `handler` to `path`
    ///
    /// `method` is logged but does not take part in the route key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateRoute`] if `path` already has a handler.
    /// The existing handler stays bound.
    pub fn register(&mut self, method: Method, path: &str, handler: Handler) -> AppResult<()> {
        let segments = segment(path);

        if self.root.insert(&segments, handler).is_err() {
            tracing::error!(method = %method, path, "Route already registered");
            return Err(AppError::DuplicateRoute {
                method: method.to_string(),
                path: path.to_string(),
            });
        }

        tracing::debug!(method = %method, path, segments = ?segments, "Registered route");
        Ok(())
    }

    /// Bind an async function to `path`
    ///
    /// Convenience wrapper over [`Router::register`] that boxes `handler`.
    pub fn route<F, Fut, R>(&mut self, method: Method, path: &str, handler: F) -> AppResult<()>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        let boxed: Handler = Arc::new(move |req: Request| {
            handler(req).map(IntoResponse::into_response).boxed()
        });
        self.register(method, path, boxed)
    }

    /// Find the handler registered for exactly `path`
    pub fn lookup(&self, path: &str) -> Option<&Handler> {
        self.root.lookup(&segment(path))
    }

    /// Number of registered routes
    pub fn route_count(&self) -> usize {
        self.root.terminal_count()
    }

    /// Route `req` to its handler and return the handler's response
    ///
    /// Unmatched paths get a 404 built from [`AppError::RouteNotFound`] and
    /// emit no timing record. Matched requests enqueue one record; if the
    /// channel is full the record is dropped without waiting.
    pub async fn dispatch(&self, req: Request) -> Response {
        let start = Instant::now();
        let mut record = self.pool.acquire();

        let match_start = Instant::now();
        let handler = self.lookup(req.uri().path());
        record.route_match_duration = match_start.elapsed();

        let Some(handler) = handler else {
            if let Some(metrics) = &self.metrics {
                metrics.record_not_found();
            }
            tracing::debug!(
                method = %req.method(),
                path = %req.uri().path(),
                "No route matched"
            );
            return AppError::RouteNotFound {
                path: req.uri().path().to_string(),
            }
            .into_response();
        };

        if let Some(metrics) = &self.metrics {
            metrics.record_request(req.uri().path());
        }

        record.handler_start_time = Some(Instant::now());
        let response = handler(req).await;
        let end = Instant::now();
        record.handler_end_time = Some(end);
        record.total_request_duration = end.duration_since(start);

        // Full or closed channel: the snapshot is simply lost.
        self.metrics_tx.try_record(record.snapshot());

        response
    }

    /// Wrap the router in an axum app that sends every request to
    /// [`Router::dispatch`]
    pub fn into_app(self) -> axum::Router {
        let router = Arc::new(self);
        axum::Router::new().fallback(move |req: Request| {
            let router = Arc::clone(&router);
            async move { router.dispatch(req).await }
        })
    }
}
