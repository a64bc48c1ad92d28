//! # birdlog
//!
//! A severity-filtered, multi-sink logging core.
//!
//! ## Features
//!
//! - **Named loggers**: one instance per name, dotted names nest under root
//! - **Per-sink thresholds**: console and file sinks each filter on their own
//! - **Durable file output**: every append is flushed before the call returns
//! - **Structured causes**: errors render inline on the console and as a
//!   tab-indented trace in files
//!
//! ```no_run
//! use birdlog::prelude::*;
//!
//! let registry = LoggerRegistry::new(LoggingConfig::default())?;
//! let log = registry.get_logger("birds")?;
//!
//! log.warn("wren");
//! log.error_with_cause("egret", "eagle");
//! log.catching(LogLevel::Fatal, "finch");
//!
//! registry.shutdown()?;
//! # Ok::<(), birdlog::LoggerError>(())
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Cause, EmitOutcome, Layout, LogLevel, LogRecord, Logger, LoggerError, LoggerRegistry,
        LoggingConfig, Result, TimestampFormat,
    };
    pub use crate::sinks::{CaptureBuffer, Sink};
}

pub use core::{
    Cause, Delivery, EmitOutcome, Layout, LogLevel, LogRecord, Logger, LoggerError,
    LoggerRegistry, LoggingConfig, Result, RouterMetrics, TimestampFormat,
};
pub use sinks::{CaptureBuffer, Sink, SinkKind, SinkStatus};
