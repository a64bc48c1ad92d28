//! Registry configuration
//!
//! Supplied once when a [`LoggerRegistry`](super::LoggerRegistry) is created.
//! Every field has a default, so a JSON document only needs the keys it
//! changes:
//!
//! ```
//! use birdlog::{LoggingConfig, LogLevel};
//!
//! let config = LoggingConfig::from_json_str(r#"{
//!     "root_console_threshold": "info",
//!     "file_path": "logs/debug.log",
//!     "loggers": { "birds.raptors": "warn" }
//! }"#).unwrap();
//!
//! assert_eq!(config.root_console_threshold, LogLevel::Info);
//! assert_eq!(config.root_file_threshold, LogLevel::Trace);
//! ```

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_FILE: &str = "debug.log";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Threshold of the root console sink
    pub root_console_threshold: LogLevel,

    /// Threshold of the root file sink
    pub root_file_threshold: LogLevel,

    /// Path the root file sink appends to
    pub file_path: PathBuf,

    /// Explicit threshold of the root logger itself; unset lets everything through
    pub root_level: Option<LogLevel>,

    /// Color console lines by level
    pub console_colors: bool,

    /// Timestamp rendering of the root file sink
    pub timestamp_format: TimestampFormat,

    /// Explicit thresholds for named loggers, applied when they are created
    pub loggers: BTreeMap<String, LogLevel>,

    /// Loggers listed as `false` keep records away from their ancestors' sinks
    pub additivity: BTreeMap<String, bool>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            root_console_threshold: LogLevel::Warn,
            root_file_threshold: LogLevel::Trace,
            file_path: PathBuf::from(DEFAULT_LOG_FILE),
            root_level: None,
            console_colors: false,
            timestamp_format: TimestampFormat::default(),
            loggers: BTreeMap::new(),
            additivity: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logging configuration",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.file_path.as_os_str().is_empty() {
            return Err(LoggerError::config("LoggingConfig", "file_path must not be empty"));
        }
        if let Some(name) = self.loggers.keys().find(|name| name.trim().is_empty()) {
            return Err(LoggerError::config(
                "LoggingConfig",
                format!("logger name '{}' is empty; use root_level for the root logger", name),
            ));
        }
        if self.additivity.keys().any(|name| name.trim().is_empty()) {
            return Err(LoggerError::config(
                "LoggingConfig",
                "the root logger has no ancestors to be additive to",
            ));
        }
        self.timestamp_format.validate()
    }

    #[must_use = "builder methods return a new value"]
    pub fn root_console_threshold(mut self, level: LogLevel) -> Self {
        self.root_console_threshold = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn root_file_threshold(mut self, level: LogLevel) -> Self {
        self.root_file_threshold = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = path.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn root_level(mut self, level: LogLevel) -> Self {
        self.root_level = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_colors(mut self, enabled: bool) -> Self {
        self.console_colors = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Give the logger `name` an explicit threshold
    #[must_use = "builder methods return a new value"]
    pub fn logger(mut self, name: impl Into<String>, level: LogLevel) -> Self {
        self.loggers.insert(name.into(), level);
        self
    }

    /// Set whether records of logger `name` also go to its ancestors' sinks
    #[must_use = "builder methods return a new value"]
    pub fn additivity(mut self, name: impl Into<String>, additive: bool) -> Self {
        self.additivity.insert(name.into(), additive);
        self
    }
}
