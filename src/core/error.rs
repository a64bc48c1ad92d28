//! Error types for the logging core

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Unknown level name
    #[error("Invalid log level: '{name}'")]
    InvalidLevel { name: String },

    /// Sink could not be opened, written or flushed
    #[error("Sink '{sink_id}' I/O error: {source}")]
    SinkIo {
        sink_id: String,
        #[source]
        source: std::io::Error,
    },

    /// Write attempted on a sink that was already closed
    #[error("Sink '{sink_id}' is closed")]
    SinkClosed { sink_id: String },

    /// A custom layout panicked while formatting for this sink
    #[error("Sink '{sink_id}' panicked: {message}")]
    SinkPanicked { sink_id: String, message: String },

    /// More than one sink failed for the same record
    #[error("Delivery failed for {} sink(s): {}", .failures.len(), join_failures(.failures))]
    DeliveryFailed { failures: Vec<LoggerError> },

    /// Logger lookup after the registry was shut down
    #[error("Logger registry has been shut down")]
    RegistryShutdown,

    /// One or more sinks failed to close during shutdown
    #[error("Shutdown failed for {} sink(s): {}", .failures.len(), join_failures(.failures))]
    ShutdownFailed { failures: Vec<LoggerError> },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

fn join_failures(failures: &[LoggerError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(name: impl Into<String>) -> Self {
        LoggerError::InvalidLevel { name: name.into() }
    }

    /// Create a sink I/O error carrying the underlying cause
    pub fn sink_io(sink_id: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkIo {
            sink_id: sink_id.into(),
            source,
        }
    }

    /// Create a sink closed error
    pub fn sink_closed(sink_id: impl Into<String>) -> Self {
        LoggerError::SinkClosed {
            sink_id: sink_id.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Id of the sink this error originated from, if any
    pub fn sink_id(&self) -> Option<&str> {
        match self {
            LoggerError::SinkIo { sink_id, .. }
            | LoggerError::SinkClosed { sink_id }
            | LoggerError::SinkPanicked { sink_id, .. } => Some(sink_id),
            _ => None,
        }
    }
}
