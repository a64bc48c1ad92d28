//! Core logger types

pub mod cause;
pub mod config;
pub mod error;
pub mod layout;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod registry;
pub mod router;
pub mod timestamp;

pub use cause::Cause;
pub use config::LoggingConfig;
pub use error::{LoggerError, Result};
pub use layout::Layout;
pub use log_level::LogLevel;
pub use logger::Logger;
pub use metrics::RouterMetrics;
pub use record::LogRecord;
pub use registry::LoggerRegistry;
pub use router::{Delivery, EmitOutcome};
pub use timestamp::TimestampFormat;
