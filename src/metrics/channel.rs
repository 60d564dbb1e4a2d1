//! Lossy metrics delivery
//!
//! A bounded multi-producer, single-consumer queue of [`MetricsRecord`]
//! snapshots. Producers never wait: when the queue is full the snapshot is
//! discarded on the spot, with no retry and no log line. Dispatch latency
//! wins over telemetry completeness.

use super::Metrics;
use super::record::MetricsRecord;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default number of in-flight snapshots the channel holds
pub const DEFAULT_CHANNEL_CAPACITY: usize = 10_000;

/// Create a bounded metrics channel
///
/// # Panics
///
/// Panics if `capacity` is zero. Configured capacities are validated
/// before they reach this point.
pub fn channel(capacity: usize) -> (MetricsSender, MetricsReceiver) {
    let (tx, rx) = mpsc::channel(capacity);
    (MetricsSender { tx }, MetricsReceiver { rx })
}

/// Producer half, cloned into every request-handling context
#[derive(Debug, Clone)]
pub struct MetricsSender {
    tx: mpsc::Sender<MetricsRecord>,
}

impl MetricsSender {
    /// Try to enqueue a snapshot without waiting
    ///
    /// Returns `false` if the snapshot was dropped because the channel is
    /// full or the consumer is gone.
    pub fn try_record(&self, record: MetricsRecord) -> bool {
        self.tx.try_send(record).is_ok()
    }

    /// Total capacity of the channel
    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}

/// Consumer half; exactly one exists per channel
#[derive(Debug)]
pub struct MetricsReceiver {
    rx: mpsc::Receiver<MetricsRecord>,
}

impl MetricsReceiver {
    /// Wait for the next snapshot
    ///
    /// Returns `None` only once every sender has been dropped.
    pub async fn recv(&mut self) -> Option<MetricsRecord> {
        self.rx.recv().await
    }

    /// Take a snapshot if one is immediately available
    pub fn try_recv(&mut self) -> Option<MetricsRecord> {
        self.rx.try_recv().ok()
    }

    /// Number of snapshots currently queued
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Whether no snapshots are queued
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

/// Spawn the background task that drains `receiver` for the life of the
/// process
///
/// Every snapshot is logged at debug level and folded into the Prometheus
/// histograms on `metrics`. The task ends only if all senders are dropped.
pub fn spawn_consumer(mut receiver: MetricsReceiver, metrics: Arc<Metrics>) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::debug!("Metrics consumer started");

        while let Some(record) = receiver.recv().await {
            tracing::debug!(
                route_match_us = record.route_match_duration.as_micros() as u64,
                handler_us = record.handler_duration().as_micros() as u64,
                total_us = record.total_request_duration.as_micros() as u64,
                "Request timing"
            );
            metrics.observe(&record);
        }

        tracing::debug!("Metrics channel closed, consumer exiting");
    })
}
