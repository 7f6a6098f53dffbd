//! Per-stream counters.
//!
//! Counters are atomics so a CLI thread can read them while the stream
//! owner keeps ingesting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters for one accelerometer stream.
#[derive(Debug)]
pub struct StreamStats {
    /// Samples accumulated into an interval
    samples_ingested: AtomicU64,
    /// Samples that arrived while the stream was stopped
    samples_ignored: AtomicU64,
    /// Samples older than the last reading
    samples_out_of_order: AtomicU64,
    /// Events from sensors other than the accelerometer
    foreign_events: AtomicU64,
    /// Intervals closed and handed to the sink
    intervals_emitted: AtomicU64,
    /// Intervals the sink refused
    emissions_dropped: AtomicU64,
    created_at: DateTime<Utc>,
}

impl StreamStats {
    pub fn new() -> Self {
        Self {
            samples_ingested: AtomicU64::new(0),
            samples_ignored: AtomicU64::new(0),
            samples_out_of_order: AtomicU64::new(0),
            foreign_events: AtomicU64::new(0),
            intervals_emitted: AtomicU64::new(0),
            emissions_dropped: AtomicU64::new(0),
            created_at: Utc::now(),
        }
    }

    pub fn record_sample_ingested(&self) {
        self.samples_ingested.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sample_ignored(&self) {
        self.samples_ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sample_out_of_order(&self) {
        self.samples_out_of_order.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_foreign_event(&self) {
        self.foreign_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_interval_emitted(&self) {
        self.intervals_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_emission_dropped(&self) {
        self.emissions_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a point-in-time copy of the counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            samples_ingested: self.samples_ingested.load(Ordering::Relaxed),
            samples_ignored: self.samples_ignored.load(Ordering::Relaxed),
            samples_out_of_order: self.samples_out_of_order.load(Ordering::Relaxed),
            foreign_events: self.foreign_events.load(Ordering::Relaxed),
            intervals_emitted: self.intervals_emitted.load(Ordering::Relaxed),
            emissions_dropped: self.emissions_dropped.load(Ordering::Relaxed),
            created_at: self.created_at,
            uptime_secs: (Utc::now() - self.created_at).num_seconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.snapshot();
        format!(
            "Stream Statistics:\n\
             - Samples ingested: {}\n\
             - Samples ignored (stopped): {}\n\
             - Samples out of order: {}\n\
             - Non-accelerometer events: {}\n\
             - Intervals emitted: {}\n\
             - Emissions dropped: {}\n\
             - Uptime: {} seconds",
            stats.samples_ingested,
            stats.samples_ignored,
            stats.samples_out_of_order,
            stats.foreign_events,
            stats.intervals_emitted,
            stats.emissions_dropped,
            stats.uptime_secs
        )
    }
}

impl Default for StreamStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of [`StreamStats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub samples_ingested: u64,
    pub samples_ignored: u64,
    pub samples_out_of_order: u64,
    pub foreign_events: u64,
    pub intervals_emitted: u64,
    pub emissions_dropped: u64,
    pub created_at: DateTime<Utc>,
    pub uptime_secs: u64,
}

/// Stats handle shared between the stream and its observers.
pub type SharedStreamStats = Arc<StreamStats>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting() {
        let stats = StreamStats::new();

        stats.record_sample_ingested();
        stats.record_sample_ingested();
        stats.record_sample_ignored();
        stats.record_interval_emitted();
        stats.record_emission_dropped();

        let snap = stats.snapshot();
        assert_eq!(snap.samples_ingested, 2);
        assert_eq!(snap.samples_ignored, 1);
        assert_eq!(snap.intervals_emitted, 1);
        assert_eq!(snap.emissions_dropped, 1);
        assert_eq!(snap.samples_out_of_order, 0);
    }

    #[test]
    fn test_summary_format() {
        let summary = StreamStats::new().summary();
        assert!(summary.contains("Samples ingested: 0"));
        assert!(summary.contains("Intervals emitted: 0"));
        assert!(summary.contains("Emissions dropped"));
    }
}
