//! Root logger with the default console and file sinks
//!
//! Console shows WARN and above; `debug.log` in the working directory gets
//! everything, with timestamps and cause blocks.
//!
//! Run with: cargo run --example bird_levels

use birdlog::prelude::*;

fn output_messages(log: &Logger) {
    log.trace("tucan");
    log.debug("duck");
    log.info("ibis");
    log.warn("wren");
    log.error_with_cause(
        "egret",
        Cause::new("eagle").with_frame("bird_levels::output_messages"),
    );
    log.catching(LogLevel::Fatal, Cause::new("owl").with_frame("bird_levels::output_messages"));
}

fn main() -> Result<()> {
    println!("=== birdlog - Bird Levels Example ===\n");

    let config = LoggingConfig::new().console_colors(true);
    let registry = LoggerRegistry::new(config)?;

    println!("1. Root logger (console WARN+, file TRACE+):");
    output_messages(&registry.root_logger());

    println!("\n2. Root logger raised to ERROR:");
    registry.root_logger().set_threshold(Some(LogLevel::Error));
    output_messages(&registry.root_logger());

    registry.shutdown()?;
    println!("\nFull output written to {}", birdlog::core::config::DEFAULT_LOG_FILE);
    Ok(())
}
