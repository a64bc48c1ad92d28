//! Named loggers sharing root's sinks, with per-name thresholds
//!
//! Run with: cargo run --example named_loggers

use birdlog::prelude::*;
use birdlog::{info, warn};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== birdlog - Named Loggers Example ===\n");

    let config = LoggingConfig::new()
        .root_console_threshold(LogLevel::Trace)
        .file_path("named_loggers.log")
        .logger("birds.raptors", LogLevel::Warn);
    let registry = LoggerRegistry::new(config)?;

    let songbirds = registry.get_logger("birds.songbirds")?;
    let raptors = registry.get_logger("birds.raptors")?;

    println!("1. Each logger inherits root's sinks:");
    info!(songbirds, "{} wrens at the feeder", 3);
    info!(raptors, "eagle circling (hidden, raptors are WARN+)");
    warn!(raptors, "eagle diving");

    println!("\n2. A sink attached to one logger only:");
    let capture = CaptureBuffer::new();
    songbirds.add_sink(Arc::new(
        Sink::console_writer("songbird-capture", LogLevel::Trace, capture.clone())
            .with_layout(Layout::Json(TimestampFormat::Rfc3339)),
    ));
    songbirds.debug("finch");
    raptors.error("hawk");
    for line in capture.lines() {
        println!("   captured: {}", line);
    }

    println!("\n3. Delivery outcome:");
    let outcome = songbirds.warn("robin");
    println!("   written to {} sink(s), ok = {}", outcome.written_count(), outcome.is_ok());

    println!("\nLoggers: {:?}", registry.logger_names());
    registry.shutdown()?;
    Ok(())
}
