//! Per-request timing record

use std::time::{Duration, Instant};

/// Timing snapshot for one dispatched request
///
/// `Default` is the zero value every pooled record is reset to. Timestamps
/// stay `None` until the handler actually runs, so a zeroed record is never
/// mistaken for a measured one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsRecord {
    /// Time spent segmenting the path and walking the trie
    pub route_match_duration: Duration,
    /// Instant just before the handler was invoked
    pub handler_start_time: Option<Instant>,
    /// Instant just after the handler returned
    pub handler_end_time: Option<Instant>,
    /// Time from dispatch entry to handler return
    pub total_request_duration: Duration,
}

impl MetricsRecord {
    /// Time spent inside the handler
    ///
    /// Zero when either timestamp is unset.
    pub fn handler_duration(&self) -> Duration {
        match (self.handler_start_time, self.handler_end_time) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            _ => Duration::ZERO,
        }
    }

    /// Reset every field to the zero value
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
