//! Request metrics for segroute
//!
//! Two layers:
//! - a lossy pipeline carrying one [`MetricsRecord`] per matched request
//!   from the dispatcher to a background consumer ([`channel`],
//!   [`spawn_consumer`]), with records recycled through a [`RecordPool`]
//! - a Prometheus registry ([`Metrics`]) that the consumer folds records
//!   into, plus request counters the dispatcher bumps directly
//!
//! The registry is exposed via the `/metrics` endpoint in Prometheus text
//! format.

pub mod channel;
pub mod pool;
pub mod record;

pub use channel::{MetricsReceiver, MetricsSender, channel, spawn_consumer};
pub use pool::{PooledRecord, RecordPool};
pub use record::MetricsRecord;

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Latency buckets in seconds, from 1µs up to 1s
const LATENCY_BUCKETS: &[f64] = &[
    0.000_001, 0.000_005, 0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05, 0.1,
    0.5, 1.0,
];

/// Prometheus collector for routing and dispatch timings
#[derive(Clone)]
pub struct Metrics {
    pub registry: Arc<Registry>,
    requests_total: IntCounterVec,
    requests_not_found: IntCounter,
    route_match_duration: Histogram,
    handler_duration: Histogram,
    request_duration: Histogram,
}

impl Metrics {
    /// Create a new Metrics instance
    ///
    /// Registers all metrics with a new Prometheus registry.
    ///
    /// # Errors
    ///
    /// Returns an error if metric registration fails (e.g., duplicate names).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        // Labelled by registered path only. Unmatched paths are counted
        // without a label so arbitrary client input never becomes a series.
        let requests_total = IntCounterVec::new(
            Opts::new(
                "segroute_requests_total",
                "Total number of dispatched requests by matched route",
            ),
            &["route"],
        )?;

        let requests_not_found = IntCounter::new(
            "segroute_requests_not_found_total",
            "Total number of requests that matched no registered route",
        )?;

        let route_match_duration = Histogram::with_opts(
            HistogramOpts::new(
                "segroute_route_match_duration_seconds",
                "Time spent segmenting the path and walking the route trie",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
        )?;

        let handler_duration = Histogram::with_opts(
            HistogramOpts::new(
                "segroute_handler_duration_seconds",
                "Time spent inside route handlers",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
        )?;

        let request_duration = Histogram::with_opts(
            HistogramOpts::new(
                "segroute_request_duration_seconds",
                "Total dispatch time from entry to handler return",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(requests_not_found.clone()))?;
        registry.register(Box::new(route_match_duration.clone()))?;
        registry.register(Box::new(handler_duration.clone()))?;
        registry.register(Box::new(request_duration.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            requests_total,
            requests_not_found,
            route_match_duration,
            handler_duration,
            request_duration,
        })
    }

    /// Count a request that matched `route`
    pub fn record_request(&self, route: &str) {
        self.requests_total.with_label_values(&[route]).inc();
    }

    /// Count a request that matched no route
    pub fn record_not_found(&self) {
        self.requests_not_found.inc();
    }

    /// Fold one timing record into the histograms
    pub fn observe(&self, record: &MetricsRecord) {
        self.route_match_duration
            .observe(record.route_match_duration.as_secs_f64());
        self.handler_duration
            .observe(record.handler_duration().as_secs_f64());
        self.request_duration
            .observe(record.total_request_duration.as_secs_f64());
    }

    /// Requests counted for `route` since startup
    pub fn requests_count(&self, route: &str) -> u64 {
        self.requests_total.with_label_values(&[route]).get()
    }

    /// Unmatched requests since startup
    pub fn not_found_count(&self) -> u64 {
        self.requests_not_found.get()
    }

    /// Timing records folded in by the consumer since startup
    pub fn observed_requests(&self) -> u64 {
        self.request_duration.get_sample_count()
    }

    /// Render all metrics in Prometheus text exposition format
    ///
    /// # Errors
    ///
    /// Returns an error if metric encoding fails.
    pub fn gather(&self) -> Result<String, prometheus::Error> {
        let metric_families = self.registry.gather();

        tracing::debug!(
            metric_family_count = metric_families.len(),
            "Encoding metrics to Prometheus text format"
        );

        let mut buffer = Vec::new();
        TextEncoder::new().encode(&metric_families, &mut buffer)?;

        String::from_utf8(buffer).map_err(|e| {
            tracing::error!(
                invalid_byte_index = e.utf8_error().valid_up_to(),
                "Prometheus encoder produced invalid UTF-8"
            );
            prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_metrics_new_registers_families() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.record_request("/ping");
        metrics.record_not_found();
        metrics.observe(&MetricsRecord::default());

        let names: Vec<String> = metrics
            .registry
            .gather()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        assert_eq!(names.len(), 5, "Expected 5 metric families");
        assert!(names.contains(&"segroute_requests_total".to_string()));
        assert!(names.contains(&"segroute_requests_not_found_total".to_string()));
        assert!(names.contains(&"segroute_route_match_duration_seconds".to_string()));
        assert!(names.contains(&"segroute_handler_duration_seconds".to_string()));
        assert!(names.contains(&"segroute_request_duration_seconds".to_string()));
    }

    #[test]
    fn test_record_request_counts_per_route() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.record_request("/ping");
        metrics.record_request("/ping");
        metrics.record_request("/api/v1/data");

        assert_eq!(metrics.requests_count("/ping"), 2);
        assert_eq!(metrics.requests_count("/api/v1/data"), 1);
        assert_eq!(metrics.not_found_count(), 0);
    }

    #[test]
    fn test_observe_updates_all_histograms() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        let start = Instant::now();
        metrics.observe(&MetricsRecord {
            route_match_duration: Duration::from_micros(3),
            handler_start_time: Some(start),
            handler_end_time: Some(start + Duration::from_millis(10)),
            total_request_duration: Duration::from_millis(11),
        });

        assert_eq!(metrics.observed_requests(), 1);
        assert_eq!(metrics.route_match_duration.get_sample_count(), 1);
        assert_eq!(metrics.handler_duration.get_sample_count(), 1);
        assert!((metrics.handler_duration.get_sample_sum() - 0.010).abs() < 1e-9);
    }

    #[test]
    fn test_gather_produces_prometheus_text_format() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.record_request("/ping");

        let output = metrics.gather().expect("Failed to gather metrics");
        assert!(output.contains("# TYPE segroute_requests_total counter"));
        assert!(output.contains("segroute_requests_total{route=\"/ping\"} 1"));
        assert!(output.contains("# TYPE segroute_request_duration_seconds histogram"));
    }

    #[test]
    fn test_metrics_is_clonable_and_shares_registry() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        let clone = metrics.clone();
        clone.record_not_found();
        assert_eq!(metrics.not_found_count(), 1);
    }

    #[test]
    fn test_concurrent_metric_recording() {
        let metrics = Arc::new(Metrics::new().expect("Failed to create metrics"));

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        metrics.record_request("/ping");
                        metrics.observe(&MetricsRecord::default());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("thread should not panic");
        }

        assert_eq!(metrics.requests_count("/ping"), 1000);
        assert_eq!(metrics.observed_requests(), 1000);
    }
}
