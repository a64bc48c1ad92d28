//! Logging macros with `format!`-style arguments.
//!
//! Each macro expands to a [`Logger::emit`](crate::Logger::emit) call and
//! evaluates to its [`EmitOutcome`](crate::EmitOutcome). A cause can be passed
//! ahead of the message with `cause: <expr>,`.
//!
//! # Examples
//!
//! ```
//! use birdlog::prelude::*;
//! use birdlog::{error, info};
//!
//! let registry = LoggerRegistry::with_root_sinks(vec![
//!     Sink::console_writer("console", LogLevel::Trace, CaptureBuffer::new()),
//! ]);
//! let log = registry.get_logger("birds").unwrap();
//!
//! info!(log, "{} herons counted", 3);
//! error!(log, cause: "eagle", "lost {}", "egret");
//! ```

/// Log at an explicit level.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, cause: $cause:expr, $($arg:tt)+) => {
        $logger.emit($level, format!($($arg)+), Some($crate::Cause::from($cause)))
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.emit($level, format!($($arg)+), None)
    };
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
