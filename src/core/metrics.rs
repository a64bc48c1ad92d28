//! Router metrics for observability
//!
//! Counters shared by every logger of a registry: how many records were routed,
//! how many were filtered by a logger threshold, and how sink writes went.

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use birdlog::RouterMetrics;
///
/// let metrics = RouterMetrics::new();
/// metrics.record_routed();
/// metrics.record_sink_failure();
///
/// assert_eq!(metrics.records_routed(), 1);
/// assert_eq!(metrics.sink_failures(), 1);
/// ```
#[derive(Debug)]
pub struct RouterMetrics {
    /// Records that passed a logger threshold and were handed to the router
    records_routed: AtomicU64,

    /// Records rejected by a logger's effective threshold
    records_filtered: AtomicU64,

    /// Successful sink writes
    sink_writes: AtomicU64,

    /// Failed sink writes
    sink_failures: AtomicU64,
}

impl RouterMetrics {
    pub const fn new() -> Self {
        Self {
            records_routed: AtomicU64::new(0),
            records_filtered: AtomicU64::new(0),
            sink_writes: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_routed(&self) -> u64 {
        self.records_routed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn records_filtered(&self) -> u64 {
        self.records_filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_writes(&self) -> u64 {
        self.sink_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_routed(&self) -> u64 {
        self.records_routed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.records_filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_write(&self) -> u64 {
        self.sink_writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed sink writes as a percentage of all attempted writes (0.0 - 100.0)
    pub fn failure_rate(&self) -> f64 {
        let failed = self.sink_failures() as f64;
        let total = self.sink_writes() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.records_routed.store(0, Ordering::Relaxed);
        self.records_filtered.store(0, Ordering::Relaxed);
        self.sink_writes.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for RouterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RouterMetrics {
    /// Snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            records_routed: AtomicU64::new(self.records_routed()),
            records_filtered: AtomicU64::new(self.records_filtered()),
            sink_writes: AtomicU64::new(self.sink_writes()),
            sink_failures: AtomicU64::new(self.sink_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = RouterMetrics::new();
        assert_eq!(metrics.records_routed(), 0);
        assert_eq!(metrics.records_filtered(), 0);
        assert_eq!(metrics.sink_writes(), 0);
        assert_eq!(metrics.sink_failures(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = RouterMetrics::new();
        assert_eq!(metrics.record_filtered(), 0);
        assert_eq!(metrics.record_filtered(), 1);
        assert_eq!(metrics.records_filtered(), 2);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = RouterMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_sink_write();
        }
        for _ in 0..10 {
            metrics.record_sink_failure();
        }

        let rate = metrics.failure_rate();
        assert!((9.9..=10.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = RouterMetrics::new();
        metrics.record_routed();
        metrics.record_sink_write();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.records_routed(), 0);
        assert_eq!(snapshot.records_routed(), 1);
        assert_eq!(snapshot.sink_writes(), 1);
    }
}
