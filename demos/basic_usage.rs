//! Basic logger usage example
//!
//! Demonstrates the console handler, the per-level methods and the macros.
//!
//! Run with: cargo run --example basic_usage

use rust_log_facade::prelude::*;
use rust_log_facade::{info, info_w, warn};

fn main() -> Result<()> {
    println!("=== Rust Log Facade - Basic Usage Example ===\n");

    // No configuration selects the console handler
    let logger = Logger::new(None);

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message", &[]);
    logger.info("This is an info message", &[]);
    logger.warn("This is a warning message", &[]);
    logger.error("This is an error message", &[]);

    println!("\n2. printf-style formatting:");
    logger.info("user %s logged in from %s", &["alice".into(), "10.0.0.7".into()]);
    logger.info(
        "%d%% of %d jobs done in %.2fs",
        &[FieldValue::from(75), FieldValue::from(8), FieldValue::from(1.5)],
    );
    logger.info("", &["arguments ".into(), "are ".into(), "concatenated".into()]);

    println!("\n3. Messages with fields:");
    logger.info_w(
        "order placed",
        Fields::new().with_field("order_id", 1042).with_field("total", 99.5),
    );

    println!("\n4. Macros:");
    let port = 8080;
    info!(logger, "listening on port %d", port);
    warn!(logger, "cache miss ratio %.1f%%", 12.5);
    info_w!(logger, "cache warmed", Fields::new().with_field("entries", 512));

    logger.sync()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
