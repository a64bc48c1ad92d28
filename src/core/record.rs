//! Log record structure

use super::cause::Cause;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cell::RefCell;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// Escape line breaks and tabs so one record can never forge extra lines
pub(crate) fn sanitize(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// One log event. Fields are fixed at construction.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    logger_name: String,
    level: LogLevel,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<Cause>,
    catching: bool,
    timestamp: DateTime<Utc>,
    thread_id: String,
    thread_name: Option<String>,
}

impl LogRecord {
    pub fn new(
        logger_name: impl Into<String>,
        level: LogLevel,
        message: impl AsRef<str>,
        cause: Option<Cause>,
    ) -> Self {
        Self {
            logger_name: logger_name.into(),
            level,
            message: sanitize(message.as_ref()),
            cause: cause.map(|c| c.sanitized()),
            catching: false,
            timestamp: Utc::now(),
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
        }
    }

    /// A record for a caught error; renders as `Catching <cause message>`
    pub fn catching(logger_name: impl Into<String>, level: LogLevel, cause: Cause) -> Self {
        let mut record = Self::new(logger_name, level, "Catching", Some(cause));
        record.catching = true;
        record
    }

    #[cfg(test)]
    pub(crate) fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    /// Logger name as shown in output; the root logger shows as `root`
    pub fn display_logger_name(&self) -> &str {
        if self.logger_name.is_empty() {
            "root"
        } else {
            &self.logger_name
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    pub fn is_catching(&self) -> bool {
        self.catching
    }

    /// Message text as rendered on the record's first line
    pub fn rendered_message(&self) -> String {
        match (&self.cause, self.catching) {
            (Some(cause), true) => format!("Catching {}", cause.message()),
            _ => self.message.clone(),
        }
    }

    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn thread_name(&self) -> Option<&str> {
        self.thread_name.as_deref()
    }

    /// Thread name when set, otherwise the thread id
    pub fn thread_label(&self) -> &str {
        self.thread_name.as_deref().unwrap_or(&self.thread_id)
    }
}
