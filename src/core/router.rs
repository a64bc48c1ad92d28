//! Delivery of one record to a set of sinks
//!
//! Every sink gets its chance: a failing (or panicking) sink never stops
//! delivery to the ones after it, and every failure ends up in the returned
//! [`EmitOutcome`].

use super::error::{LoggerError, Result};
use super::metrics::RouterMetrics;
use super::record::LogRecord;
use crate::sinks::{Sink, SinkStatus};
use std::sync::Arc;

/// Result of offering a record to one sink
#[derive(Debug)]
pub struct Delivery {
    sink_id: String,
    result: Result<SinkStatus>,
}

impl Delivery {
    pub fn sink_id(&self) -> &str {
        &self.sink_id
    }

    pub fn result(&self) -> &Result<SinkStatus> {
        &self.result
    }

    pub fn is_written(&self) -> bool {
        matches!(self.result, Ok(SinkStatus::Written))
    }
}

/// Per-sink outcome of an emit call
#[derive(Debug, Default)]
pub struct EmitOutcome {
    filtered: bool,
    deliveries: Vec<Delivery>,
}

impl EmitOutcome {
    /// The record was rejected by the logger threshold; no sink saw it
    pub fn filtered() -> Self {
        Self {
            filtered: true,
            deliveries: Vec::new(),
        }
    }

    pub fn was_filtered(&self) -> bool {
        self.filtered
    }

    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn written_count(&self) -> usize {
        self.deliveries.iter().filter(|d| d.is_written()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &LoggerError> {
        self.deliveries.iter().filter_map(|d| d.result.as_ref().err())
    }

    pub fn is_ok(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Collapse into a single `Result`, keeping every failure
    pub fn into_result(self) -> Result<()> {
        let mut failures: Vec<LoggerError> = self
            .deliveries
            .into_iter()
            .filter_map(|d| d.result.err())
            .collect();
        match failures.len() {
            0 => Ok(()),
            1 => Err(failures.remove(0)),
            _ => Err(LoggerError::DeliveryFailed { failures }),
        }
    }
}

/// Write `record` to each sink in order
pub fn route(record: &LogRecord, sinks: &[Arc<Sink>], metrics: &RouterMetrics) -> EmitOutcome {
    metrics.record_routed();

    let deliveries = sinks
        .iter()
        .map(|sink| {
            let result = write_isolated(sink, record);
            match result {
                Ok(SinkStatus::Written) => {
                    metrics.record_sink_write();
                }
                Ok(SinkStatus::BelowThreshold) => {}
                Err(_) => {
                    metrics.record_sink_failure();
                }
            }
            Delivery {
                sink_id: sink.id().to_string(),
                result,
            }
        })
        .collect();

    EmitOutcome {
        filtered: false,
        deliveries,
    }
}

/// A panicking custom layout is turned into an error for that sink only
fn write_isolated(sink: &Sink, record: &LogRecord) -> Result<SinkStatus> {
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.write(record))).unwrap_or_else(
        |panic_info| {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            Err(LoggerError::SinkPanicked {
                sink_id: sink.id().to_string(),
                message: panic_msg,
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Layout, LogLevel};
    use crate::sinks::CaptureBuffer;
    use tempfile::TempDir;

    fn record(level: LogLevel, message: &str) -> LogRecord {
        LogRecord::new("", level, message, None)
    }

    #[test]
    fn test_route_writes_every_passing_sink() {
        let low = CaptureBuffer::new();
        let high = CaptureBuffer::new();
        let sinks = vec![
            Arc::new(Sink::console_writer("low", LogLevel::Trace, low.clone())),
            Arc::new(Sink::console_writer("high", LogLevel::Warn, high.clone())),
        ];
        let metrics = RouterMetrics::new();

        let outcome = route(&record(LogLevel::Info, "ibis"), &sinks, &metrics);

        assert!(outcome.is_ok());
        assert!(!outcome.was_filtered());
        assert_eq!(outcome.written_count(), 1);
        assert_eq!(outcome.deliveries()[1].result().as_ref().ok(), Some(&SinkStatus::BelowThreshold));
        assert_eq!(low.lines(), vec!["ibis"]);
        assert!(high.lines().is_empty());
        assert_eq!(metrics.sink_writes(), 1);
    }

    #[test]
    fn test_failing_sink_does_not_stop_delivery() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let closed = Sink::file("closed", LogLevel::Trace, temp_dir.path().join("a.log")).unwrap();
        closed.close().unwrap();

        let capture = CaptureBuffer::new();
        let sinks = vec![
            Arc::new(closed),
            Arc::new(Sink::console_writer("console", LogLevel::Trace, capture.clone())),
        ];
        let metrics = RouterMetrics::new();

        let outcome = route(&record(LogLevel::Warn, "wren"), &sinks, &metrics);

        assert!(!outcome.is_ok());
        assert_eq!(outcome.failures().count(), 1);
        assert_eq!(outcome.written_count(), 1);
        assert_eq!(capture.lines(), vec!["wren"]);
        assert_eq!(metrics.sink_failures(), 1);

        let err = outcome.into_result().unwrap_err();
        assert!(matches!(err, LoggerError::SinkClosed { .. }));
    }

    #[test]
    fn test_panicking_layout_is_isolated() {
        let capture = CaptureBuffer::new();
        let sinks = vec![
            Arc::new(
                Sink::console_writer("broken", LogLevel::Trace, CaptureBuffer::new())
                    .with_layout(Layout::custom(|_| panic!("layout exploded"))),
            ),
            Arc::new(Sink::console_writer("console", LogLevel::Trace, capture.clone())),
        ];

        let outcome = route(&record(LogLevel::Error, "egret"), &sinks, &RouterMetrics::new());

        let failure = outcome.failures().next().expect("one failure");
        assert!(
            matches!(failure, LoggerError::SinkPanicked { sink_id, message } if sink_id == "broken" && message == "layout exploded")
        );
        assert_eq!(capture.lines(), vec!["egret"]);
    }

    #[test]
    fn test_multiple_failures_are_aggregated() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let a = Sink::file("a", LogLevel::Trace, temp_dir.path().join("a.log")).unwrap();
        let b = Sink::file("b", LogLevel::Trace, temp_dir.path().join("b.log")).unwrap();
        a.close().unwrap();
        b.close().unwrap();

        let outcome = route(
            &record(LogLevel::Fatal, "finch"),
            &[Arc::new(a), Arc::new(b)],
            &RouterMetrics::new(),
        );

        match outcome.into_result() {
            Err(LoggerError::DeliveryFailed { failures }) => assert_eq!(failures.len(), 2),
            other => panic!("expected aggregated failure, got {:?}", other),
        }
    }
}
