//! Logger registry
//!
//! The registry is an explicit context object: create it once with
//! [`LoggerRegistry::new`], hand it (or an `Arc` of it) to whatever needs
//! loggers, and call [`shutdown`](LoggerRegistry::shutdown) when done. It
//! guarantees one [`Logger`] instance per name, even under concurrent lookups.

use super::{
    config::LoggingConfig,
    error::{LoggerError, Result},
    layout::Layout,
    log_level::LogLevel,
    logger::Logger,
    metrics::RouterMetrics,
};
use crate::sinks::Sink;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const CONSOLE_SINK_ID: &str = "console";
pub const FILE_SINK_ID: &str = "file";

pub struct LoggerRegistry {
    root: Arc<Logger>,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    overrides: HashMap<String, LogLevel>,
    additivity: HashMap<String, bool>,
    metrics: Arc<RouterMetrics>,
    shut_down: AtomicBool,
}

impl LoggerRegistry {
    /// Root gets a stdout console sink and a file sink as configured
    ///
    /// ```no_run
    /// use birdlog::{LoggerRegistry, LoggingConfig};
    ///
    /// let registry = LoggerRegistry::new(LoggingConfig::default()).unwrap();
    /// let log = registry.get_logger("birds").unwrap();
    /// log.warn("wren");
    /// registry.shutdown().unwrap();
    /// ```
    pub fn new(config: LoggingConfig) -> Result<Self> {
        let console = Sink::console(CONSOLE_SINK_ID, config.root_console_threshold)
            .with_colors(config.console_colors);
        Self::with_console_sink(config, console)
    }

    /// Like [`new`](Self::new) but the console sink writes to `writer`
    pub fn with_console(config: LoggingConfig, writer: impl Write + Send + 'static) -> Result<Self> {
        let console = Sink::console_writer(CONSOLE_SINK_ID, config.root_console_threshold, writer)
            .with_colors(config.console_colors);
        Self::with_console_sink(config, console)
    }

    fn with_console_sink(config: LoggingConfig, console: Sink) -> Result<Self> {
        config.validate()?;

        let file = Sink::file(FILE_SINK_ID, config.root_file_threshold, &config.file_path)?
            .with_layout(Layout::Text(config.timestamp_format.clone()));

        let mut registry = Self::build(vec![console, file]);
        registry.overrides = config.loggers.into_iter().collect();
        registry.additivity = config.additivity.into_iter().collect();
        registry.root.set_threshold(config.root_level);
        Ok(registry)
    }

    /// Registry whose root logger writes to exactly `sinks`
    pub fn with_root_sinks(sinks: Vec<Sink>) -> Self {
        Self::build(sinks)
    }

    fn build(sinks: Vec<Sink>) -> Self {
        let metrics = Arc::new(RouterMetrics::new());
        let root = Arc::new(Logger::root(
            sinks.into_iter().map(Arc::new).collect(),
            Arc::clone(&metrics),
        ));

        Self {
            root,
            loggers: RwLock::new(HashMap::new()),
            overrides: HashMap::new(),
            additivity: HashMap::new(),
            metrics,
            shut_down: AtomicBool::new(false),
        }
    }

    pub fn root_logger(&self) -> Arc<Logger> {
        Arc::clone(&self.root)
    }

    /// Existing logger for `name`, or a new one inheriting from its parent
    ///
    /// `""` is the root logger. Dotted names nest: `birds.raptors` has parent
    /// `birds`, created on demand, whose parent is root.
    pub fn get_logger(&self, name: &str) -> Result<Arc<Logger>> {
        if self.is_shut_down() {
            return Err(LoggerError::RegistryShutdown);
        }
        if name.is_empty() {
            return Ok(self.root_logger());
        }

        if let Some(logger) = self.loggers.read().get(name) {
            return Ok(Arc::clone(logger));
        }

        let mut loggers = self.loggers.write();
        Ok(self.get_or_create(&mut loggers, name))
    }

    fn get_or_create(&self, loggers: &mut HashMap<String, Arc<Logger>>, name: &str) -> Arc<Logger> {
        if name.is_empty() {
            return self.root_logger();
        }
        if let Some(logger) = loggers.get(name) {
            return Arc::clone(logger);
        }

        let parent = match name.rfind('.') {
            Some(idx) => self.get_or_create(loggers, &name[..idx]),
            None => self.root_logger(),
        };
        let logger = Arc::new(Logger::child(name, &parent, self.overrides.get(name).copied()));
        if let Some(&additive) = self.additivity.get(name) {
            logger.set_additive(additive);
        }
        loggers.insert(name.to_string(), Arc::clone(&logger));
        logger
    }

    /// Names of every logger created so far, sorted; root not included
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn metrics(&self) -> &RouterMetrics {
        &self.metrics
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }

    /// Flush and close every sink reachable from any logger, exactly once
    ///
    /// Keeps going after a failing sink and reports all failures together.
    /// Calling it again is a no-op.
    pub fn shutdown(&self) -> Result<()> {
        if self.shut_down.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        let mut sinks: Vec<Arc<Sink>> = self.root.sinks();
        for logger in self.loggers.read().values() {
            for sink in logger.sinks() {
                if !sinks.iter().any(|seen| Arc::ptr_eq(seen, &sink)) {
                    sinks.push(sink);
                }
            }
        }

        let failures: Vec<LoggerError> = sinks
            .iter()
            .filter_map(|sink| sink.close().err())
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LoggerError::ShutdownFailed { failures })
        }
    }
}

impl Drop for LoggerRegistry {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            eprintln!("[LOGGER ERROR] Failed to close sinks during shutdown: {}", e);
        }

        let failures = self.metrics.sink_failures();
        if failures > 0 {
            eprintln!(
                "[LOGGER WARNING] Registry shutting down after {} failed sink writes (failure rate: {:.2}%)",
                failures,
                self.metrics.failure_rate()
            );
        }
    }
}
