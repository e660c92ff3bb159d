//! File logging example
//!
//! Writes JSON records to `./log/info.log`, with Error and above also in
//! `./log/error.log`. Files rotate at 10 MB and keep 3 gzip backups.
//!
//! Run with: cargo run --example file_logging

use rust_log_facade::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Log Facade - File Logging Example ===\n");

    let config = Config::from_json_str(
        r#"{
            "fileConfig": {
                "logFilePath": "./log/",
                "maxSize": 10,
                "maxBackups": 3,
                "maxAge": 7,
                "compress": true,
                "levelString": "info",
                "serviceName": "file-demo"
            }
        }"#,
    )?;
    let logger = Logger::new(Some(&config));

    println!("1. Logging to the severity-split files:");

    logger.info("Application started", &[]);
    logger.debug("Loading configuration... (below the configured level)", &[]);
    logger.info("Configuration loaded successfully", &[]);
    logger.warn("Using default settings for some options", &[]);
    logger.error("Failed to load optional plugin", &[]);

    println!("\n2. Performing some operations:");

    for i in 1..=5 {
        logger.info("Processing item %d/5", &[FieldValue::from(i)]);
        if i == 3 {
            logger.warn_w(
                "Item took longer than expected",
                Fields::new().with_field("item", i).with_field("elapsed_ms", 1250),
            );
        }
    }

    logger.info("All operations completed", &[]);

    // Flush and release the files
    logger.close()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check './log/info.log' and './log/error.log' for the output");

    Ok(())
}
