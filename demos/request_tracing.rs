//! Request tracing example
//!
//! Initializes the process-wide logger and tags records from concurrent
//! "requests" with their trace IDs.
//!
//! Run with: cargo run --example request_tracing

use rust_log_facade::core::{Config, FieldValue, Fields, FileConfig, RequestContext, Result};
use rust_log_facade::global;
use std::thread;

fn handle_request(ctx: &RequestContext, user: &str) {
    global::info_c(ctx, "handling request for %s", &[user.into()]);

    if user == "mallory" {
        global::error_cw(
            ctx,
            "permission denied",
            Fields::new().with_field("user", user).with_field("status", 403),
        );
        return;
    }

    global::info_cw(
        ctx,
        "request complete",
        Fields::new().with_field("user", user).with_field("status", 200),
    );
}

fn main() -> Result<()> {
    println!("=== Rust Log Facade - Request Tracing Example ===\n");

    // Start-up only: swap the default handlers before any traffic
    global::init(Some(&Config {
        file_config: Some(
            FileConfig::default()
                .with_log_file_path("./log/tracing-")
                .with_level("info")
                .with_service_name("gateway"),
        ),
    }));

    let handles: Vec<_> = ["alice", "bob", "mallory"]
        .into_iter()
        .enumerate()
        .map(|(i, user)| {
            thread::spawn(move || {
                let ctx = RequestContext::background().with_trace_id(format!("req-{:04}", i + 1));
                handle_request(&ctx, user);
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            global::error("request thread panicked", &[]);
        }
    }

    global::info("served %d requests", &[FieldValue::from(3)]);
    global::close()?;

    println!("Check './log/tracing-info.log' and './log/tracing-error.log' for the output");

    Ok(())
}
