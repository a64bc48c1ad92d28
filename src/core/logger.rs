//! Named loggers
//!
//! A [`Logger`] owns an optional explicit threshold and its own sinks, and
//! holds a weak link to its parent. Records that pass the effective threshold
//! are routed to the logger's own sinks first, then to each ancestor's sinks,
//! nearest ancestor first and root last. A logger that is not additive ends
//! that walk: its ancestors' sinks never see its records.

use super::{
    cause::Cause,
    log_level::LogLevel,
    metrics::RouterMetrics,
    record::LogRecord,
    router::{self, EmitOutcome},
};
use crate::sinks::Sink;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

pub struct Logger {
    name: String,
    explicit_threshold: RwLock<Option<LogLevel>>,
    sinks: RwLock<Vec<Arc<Sink>>>,
    additive: AtomicBool,
    parent: Option<Weak<Logger>>,
    metrics: Arc<RouterMetrics>,
}

impl Logger {
    pub(crate) fn root(sinks: Vec<Arc<Sink>>, metrics: Arc<RouterMetrics>) -> Self {
        Self {
            name: String::new(),
            explicit_threshold: RwLock::new(None),
            sinks: RwLock::new(sinks),
            additive: AtomicBool::new(true),
            parent: None,
            metrics,
        }
    }

    pub(crate) fn child(
        name: impl Into<String>,
        parent: &Arc<Logger>,
        threshold: Option<LogLevel>,
    ) -> Self {
        Self {
            name: name.into(),
            explicit_threshold: RwLock::new(threshold),
            sinks: RwLock::new(Vec::new()),
            additive: AtomicBool::new(true),
            parent: Some(Arc::downgrade(parent)),
            metrics: Arc::clone(&parent.metrics),
        }
    }

    /// Logger name; `""` for the root logger
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn parent(&self) -> Option<Arc<Logger>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    pub fn explicit_threshold(&self) -> Option<LogLevel> {
        *self.explicit_threshold.read()
    }

    /// Set or clear this logger's own threshold; `None` inherits from ancestors
    pub fn set_threshold(&self, threshold: Option<LogLevel>) {
        *self.explicit_threshold.write() = threshold;
    }

    /// First explicit threshold found walking from this logger towards root,
    /// `Trace` when none is set
    pub fn effective_threshold(&self) -> LogLevel {
        if let Some(level) = self.explicit_threshold() {
            return level;
        }
        self.ancestors()
            .find_map(|ancestor| ancestor.explicit_threshold())
            .unwrap_or(LogLevel::Trace)
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.passes(self.effective_threshold())
    }

    /// Attach a sink after the ones already attached
    pub fn add_sink(&self, sink: Arc<Sink>) {
        self.sinks.write().push(sink);
    }

    /// This logger's own sinks, in declaration order
    pub fn sinks(&self) -> Vec<Arc<Sink>> {
        self.sinks.read().clone()
    }

    pub fn is_additive(&self) -> bool {
        self.additive.load(Ordering::Acquire)
    }

    /// `false` keeps this logger's records (and its descendants') away from
    /// ancestor sinks
    pub fn set_additive(&self, additive: bool) {
        self.additive.store(additive, Ordering::Release);
    }

    /// Own sinks followed by ancestor sinks, up to and including the first
    /// non-additive logger; a sink reachable twice appears once
    pub fn reachable_sinks(&self) -> Vec<Arc<Sink>> {
        let mut reachable: Vec<Arc<Sink>> = Vec::new();
        let mut push_all = |sinks: &[Arc<Sink>]| {
            for sink in sinks {
                if !reachable.iter().any(|seen| Arc::ptr_eq(seen, sink)) {
                    reachable.push(Arc::clone(sink));
                }
            }
        };

        push_all(self.sinks.read().as_slice());
        if self.is_additive() {
            for ancestor in self.ancestors() {
                push_all(ancestor.sinks.read().as_slice());
                if !ancestor.is_additive() {
                    break;
                }
            }
        }
        reachable
    }

    fn ancestors(&self) -> impl Iterator<Item = Arc<Logger>> {
        std::iter::successors(self.parent(), |logger| logger.parent())
    }

    /// Route one record if `level` passes the effective threshold
    ///
    /// Never panics and never returns `Err`; the outcome lists what happened at
    /// every sink.
    pub fn emit(&self, level: LogLevel, message: impl AsRef<str>, cause: Option<Cause>) -> EmitOutcome {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return EmitOutcome::filtered();
        }

        let record = LogRecord::new(self.name.as_str(), level, message, cause);
        self.dispatch(&record)
    }

    /// Log a caught error; renders as `Catching <cause message>`
    pub fn catching(&self, level: LogLevel, cause: impl Into<Cause>) -> EmitOutcome {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return EmitOutcome::filtered();
        }

        let record = LogRecord::catching(self.name.as_str(), level, cause.into());
        self.dispatch(&record)
    }

    fn dispatch(&self, record: &LogRecord) -> EmitOutcome {
        router::route(record, &self.reachable_sinks(), &self.metrics)
    }

    #[inline]
    pub fn trace(&self, message: impl AsRef<str>) -> EmitOutcome {
        self.emit(LogLevel::Trace, message, None)
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) -> EmitOutcome {
        self.emit(LogLevel::Debug, message, None)
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) -> EmitOutcome {
        self.emit(LogLevel::Info, message, None)
    }

    #[inline]
    pub fn warn(&self, message: impl AsRef<str>) -> EmitOutcome {
        self.emit(LogLevel::Warn, message, None)
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) -> EmitOutcome {
        self.emit(LogLevel::Error, message, None)
    }

    #[inline]
    pub fn fatal(&self, message: impl AsRef<str>) -> EmitOutcome {
        self.emit(LogLevel::Fatal, message, None)
    }

    pub fn trace_with_cause(&self, message: impl AsRef<str>, cause: impl Into<Cause>) -> EmitOutcome {
        self.emit(LogLevel::Trace, message, Some(cause.into()))
    }

    pub fn debug_with_cause(&self, message: impl AsRef<str>, cause: impl Into<Cause>) -> EmitOutcome {
        self.emit(LogLevel::Debug, message, Some(cause.into()))
    }

    pub fn info_with_cause(&self, message: impl AsRef<str>, cause: impl Into<Cause>) -> EmitOutcome {
        self.emit(LogLevel::Info, message, Some(cause.into()))
    }

    pub fn warn_with_cause(&self, message: impl AsRef<str>, cause: impl Into<Cause>) -> EmitOutcome {
        self.emit(LogLevel::Warn, message, Some(cause.into()))
    }

    pub fn error_with_cause(&self, message: impl AsRef<str>, cause: impl Into<Cause>) -> EmitOutcome {
        self.emit(LogLevel::Error, message, Some(cause.into()))
    }

    pub fn fatal_with_cause(&self, message: impl AsRef<str>, cause: impl Into<Cause>) -> EmitOutcome {
        self.emit(LogLevel::Fatal, message, Some(cause.into()))
    }

    pub fn metrics(&self) -> &RouterMetrics {
        &self.metrics
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("explicit_threshold", &self.explicit_threshold())
            .field("sinks", &self.sinks.read().len())
            .field("additive", &self.is_additive())
            .field("is_root", &self.is_root())
            .finish()
    }
}
