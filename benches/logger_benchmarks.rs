//! Criterion benchmarks for rust_log_facade

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_log_facade::core::{format_message, Encoder, Record};
use rust_log_facade::prelude::*;
use std::sync::Arc;
use tempfile::TempDir;

fn file_logger(dir: &TempDir, level: &str) -> Logger {
    Logger::new(Some(&Config {
        file_config: Some(
            FileConfig::default()
                .with_log_file_path(format!("{}/", dir.path().display()))
                .with_level(level)
                .with_service_name("bench"),
        ),
    }))
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("console", |b| {
        b.iter(|| {
            let logger = Logger::new(None);
            black_box(logger)
        });
    });

    let dir = TempDir::new().unwrap();
    group.bench_function("file", |b| {
        b.iter(|| {
            let logger = file_logger(&dir, "debug");
            black_box(logger)
        });
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_file_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_logging");
    group.throughput(Throughput::Elements(1));

    let dir = TempDir::new().unwrap();
    let logger = file_logger(&dir, "debug");
    let ctx = RequestContext::background().with_trace_id("bench-trace");

    group.bench_function("info", |b| {
        b.iter(|| {
            logger.info(black_box("Info message"), &[]);
        });
    });

    group.bench_function("info_formatted", |b| {
        b.iter(|| {
            logger.info(
                black_box("user %s processed %d items"),
                &["alice".into(), FieldValue::from(42)],
            );
        });
    });

    group.bench_function("info_with_context", |b| {
        b.iter(|| {
            logger.info_c(&ctx, black_box("Context message"), &[]);
        });
    });

    group.bench_function("info_with_fields", |b| {
        b.iter(|| {
            logger.info_w(
                black_box("Fields message"),
                Fields::new()
                    .with_field("user_id", 12345)
                    .with_field("action", "login"),
            );
        });
    });

    group.bench_function("error_split", |b| {
        b.iter(|| {
            logger.error(black_box("Error message"), &[]);
        });
    });

    group.finish();
    let _ = logger.sync();
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let dir = TempDir::new().unwrap();
    let logger = Arc::new(file_logger(&dir, "debug"));

    group.bench_function("single_thread", |b| {
        let logger = Arc::clone(&logger);
        b.iter(|| {
            logger.info(black_box("Concurrent message"), &[]);
        });
    });

    group.bench_function("multi_thread_4", |b| {
        let logger = Arc::clone(&logger);
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        logger.info(black_box("Concurrent message"), &[]);
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

// ============================================================================
// Formatting and Encoding Benchmarks
// ============================================================================

fn bench_message_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("message_formatting");
    group.throughput(Throughput::Elements(1));

    let args = [FieldValue::from("alice"), FieldValue::from(42), FieldValue::from(3.75)];

    group.bench_function("template_only", |b| {
        b.iter(|| black_box(format_message(black_box("Plain message"), &[])));
    });

    group.bench_function("printf", |b| {
        b.iter(|| black_box(format_message(black_box("user %s id=%05d ratio=%.2f"), &args)));
    });

    group.bench_function("args_only", |b| {
        b.iter(|| black_box(format_message("", black_box(&args))));
    });

    group.finish();
}

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");
    group.throughput(Throughput::Elements(1));

    let record = Record::new(
        LogLevel::Info,
        "",
        Fields::new()
            .with_field("path", "main.rs:42(app::main)")
            .with_field("serviceName", "bench")
            .with_field("traceID", "abc-123")
            .with_field("msg", "Test message"),
    );

    group.bench_function("json", |b| {
        b.iter(|| black_box(Encoder::Json.encode(black_box(&record))));
    });

    group.bench_function("console", |b| {
        b.iter(|| black_box(Encoder::Console.encode(black_box(&record))));
    });

    group.finish();
}

// ============================================================================
// Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let dir = TempDir::new().unwrap();
    let logger = file_logger(&dir, "warn");

    group.bench_function("below_threshold", |b| {
        b.iter(|| {
            logger.debug(black_box("This should be filtered %d"), &[FieldValue::from(1)]);
        });
    });

    group.bench_function("above_threshold", |b| {
        b.iter(|| {
            logger.error(black_box("This should be logged"), &[]);
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_logger_creation,
    bench_file_logging,
    bench_concurrent_logging,
    bench_message_formatting,
    bench_encoding,
    bench_level_filtering
);

criterion_main!(benches);
