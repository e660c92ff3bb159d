//! Integration tests for the logging facade
//!
//! These tests verify:
//! - Severity routing into info.log / error.log
//! - Record shape and context injection
//! - Field-map merging
//! - Message formatting rules
//! - Aggregator fan-out
//! - Console handler behaviour
//! - Close, panic and unwritable-path behaviour

use rust_log_facade::appenders::ConsoleAppender;
use rust_log_facade::core::{
    CallSite, Config, FieldValue, Fields, FileConfig, Handler, Handlers, LogLevel, Logger,
    RequestContext, Result,
};
use rust_log_facade::handlers::{ConsoleHandler, FileHandler};
use parking_lot::Mutex;
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn file_config(dir: &TempDir, level: &str, service: &str) -> FileConfig {
    FileConfig::default()
        .with_log_file_path(format!("{}/", dir.path().display()))
        .with_level(level)
        .with_service_name(service)
}

fn file_logger(config: FileConfig) -> Logger {
    Logger::new(Some(&Config {
        file_config: Some(config),
    }))
}

fn read_records(path: &Path) -> Vec<Value> {
    let content = fs::read_to_string(path).unwrap_or_default();
    content
        .lines()
        .map(|line| serde_json::from_str(line).expect("Each line should be a JSON object"))
        .collect()
}

fn messages(records: &[Value]) -> Vec<String> {
    records
        .iter()
        .map(|r| r["msg"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).unwrap()
    }
}

struct CountingHandler {
    logs: Arc<AtomicUsize>,
}

impl Handler for CountingHandler {
    fn log(&self, _: &RequestContext, _: LogLevel, _: &CallSite, _: &str, _: &[FieldValue]) {
        self.logs.fetch_add(1, Ordering::SeqCst);
    }

    fn log_with_fields(&self, _: &RequestContext, _: LogLevel, _: &CallSite, _: &str, _: Fields) {
        self.logs.fetch_add(1, Ordering::SeqCst);
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

#[test]
fn test_severity_routing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = file_logger(file_config(&temp_dir, "info", "orders"));

    logger.debug("debug record", &[]);
    logger.info("info record", &[]);
    logger.warn("warn record", &[]);
    logger.error("error record", &[]);
    logger.sync().expect("Failed to sync");

    let info = read_records(&temp_dir.path().join("info.log"));
    let error = read_records(&temp_dir.path().join("error.log"));

    assert_eq!(
        messages(&info),
        vec!["info record", "warn record", "error record"]
    );
    assert_eq!(messages(&error), vec!["error record"]);
}

#[test]
fn test_error_stream_ignores_min_level() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = file_logger(file_config(&temp_dir, "debug", ""));

    for level in [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error] {
        logger.log(&RequestContext::background(), level, level.as_str(), &[]);
    }
    logger.sync().expect("Failed to sync");

    assert_eq!(read_records(&temp_dir.path().join("info.log")).len(), 4);
    assert_eq!(
        messages(&read_records(&temp_dir.path().join("error.log"))),
        vec!["error"]
    );
}

#[test]
fn test_path_is_a_file_name_prefix() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = FileConfig::default()
        .with_log_file_path(format!("{}/nested/app-", temp_dir.path().display()));
    let logger = file_logger(config);

    logger.error("prefixed", &[]);
    logger.sync().expect("Failed to sync");

    assert!(temp_dir.path().join("nested/app-info.log").exists());
    assert!(temp_dir.path().join("nested/app-error.log").exists());
}

#[test]
fn test_record_shape() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = file_logger(file_config(&temp_dir, "debug", "orders"));
    let ctx = RequestContext::background().with_trace_id("trace-123");

    let line = line!() + 1;
    logger.info_c(&ctx, "user %s bought %d items", &["alice".into(), FieldValue::from(3)]);
    logger.sync().expect("Failed to sync");

    let records = read_records(&temp_dir.path().join("info.log"));
    assert_eq!(records.len(), 1);
    let record = records[0].as_object().unwrap();

    let keys: Vec<&str> = record.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["level", "time", "path", "serviceName", "traceID", "msg"]
    );
    assert_eq!(record["level"], "info");
    assert_eq!(
        record["path"],
        format!("integration_tests.rs:{}(???)", line).as_str()
    );
    assert_eq!(record["serviceName"], "orders");
    assert_eq!(record["traceID"], "trace-123");
    assert_eq!(record["msg"], "user alice bought 3 items");

    let time = record["time"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok());
}

#[test]
fn test_missing_trace_id_is_null() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = file_logger(file_config(&temp_dir, "debug", "orders"));

    logger.warn("no context", &[]);
    logger.sync().expect("Failed to sync");

    let records = read_records(&temp_dir.path().join("info.log"));
    assert!(records[0]["traceID"].is_null());
}

#[test]
fn test_log_with_fields_record() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = file_logger(file_config(&temp_dir, "debug", "svc"));

    logger.info_w("hi", Fields::new().with_field("a", 1));
    logger.sync().expect("Failed to sync");

    let records = read_records(&temp_dir.path().join("info.log"));
    let record = records[0].as_object().unwrap();

    let mut keys: Vec<&str> = record
        .keys()
        .map(String::as_str)
        .filter(|k| !matches!(*k, "level" | "time" | "path"))
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["a", "msg", "serviceName"]);
    assert_eq!(record["a"], 1);
    assert_eq!(record["msg"], "hi");
    assert_eq!(record["serviceName"], "svc");
}

#[test]
fn test_log_with_fields_without_service_or_message() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = file_logger(file_config(&temp_dir, "debug", ""));
    let ctx = RequestContext::background().with_trace_id("t-9");

    logger.error_cw(&ctx, "", Fields::new().with_field("code", 503));
    logger.sync().expect("Failed to sync");

    let records = read_records(&temp_dir.path().join("error.log"));
    let record = records[0].as_object().unwrap();
    assert!(!record.contains_key("msg"));
    assert!(!record.contains_key("serviceName"));
    assert_eq!(record["traceID"], "t-9");
    assert_eq!(record["code"], 503);
}

#[test]
fn test_message_formatting_rules() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = file_logger(file_config(&temp_dir, "debug", ""));

    logger.info("", &["x".into(), "y".into()]);
    logger.info("count=%d", &[FieldValue::from(3)]);
    logger.info("100% verbatim", &[]);
    logger.info("", &[FieldValue::from(1), FieldValue::from(2)]);
    logger.info("%d", &["text".into()]);
    logger.sync().expect("Failed to sync");

    let records = read_records(&temp_dir.path().join("info.log"));
    assert_eq!(
        messages(&records),
        vec!["xy", "count=3", "100% verbatim", "1 2", "%!d(string=text)"]
    );
}

#[test]
fn test_aggregator_delivers_to_each_handler() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let logger = Logger::with_handlers(
        Handlers::new()
            .with_handler(CountingHandler {
                logs: Arc::clone(&first),
            })
            .with_handler(CountingHandler {
                logs: Arc::clone(&second),
            }),
    );

    logger.info("one record", &[]);

    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn test_console_handler_always_emits() {
    let buffer = SharedBuffer::default();
    let console =
        ConsoleHandler::with_appender(Box::new(ConsoleAppender::with_writer(buffer.clone())));
    let logger = Logger::with_handlers(Handlers::new().with_handler(console));

    logger.debug("debug %d", &[FieldValue::from(1)]);
    logger.info_w("with fields", Fields::new().with_field("k", "v"));
    logger.sync().expect("Failed to sync");

    assert_eq!(buffer.contents(), "debug 1\nwith fields\t{\"k\":\"v\"}\n");
}

#[test]
fn test_file_and_console_topology() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = file_config(&temp_dir, "debug", "both").with_console(true);
    let handler = FileHandler::new(&config);
    assert_eq!(handler.sink_count(), 3);

    let logger = Logger::with_handlers(Handlers::new().with_handler(handler));
    logger.info("to file and stdout", &[]);
    logger.sync().expect("Failed to sync");

    let records = read_records(&temp_dir.path().join("info.log"));
    assert_eq!(messages(&records), vec!["to file and stdout"]);
}

#[test]
fn test_unwritable_path_degrades_silently() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let config = FileConfig::default().with_log_file_path(format!("{}/", blocker.display()));
    let logger = file_logger(config);

    logger.error("lost record", &[]);
    assert!(logger.sync().is_ok());
    assert!(logger.close().is_ok());
}

#[test]
fn test_close_stops_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = file_logger(file_config(&temp_dir, "debug", ""));

    logger.info("before close", &[]);
    logger.close().expect("Failed to close");
    logger.close().expect("Second close should be a no-op");
    logger.info("after close", &[]);

    let records = read_records(&temp_dir.path().join("info.log"));
    assert_eq!(messages(&records), vec!["before close"]);
}

#[test]
fn test_panic_record_is_written_before_panicking() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = file_logger(file_config(&temp_dir, "debug", ""));

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        logger.panic("invariant broken: %s", &["queue empty".into()]);
    }));

    let payload = result.expect_err("Panic level should panic");
    assert_eq!(
        payload.downcast_ref::<String>().map(String::as_str),
        Some("invariant broken: queue empty")
    );

    let records = read_records(&temp_dir.path().join("error.log"));
    assert_eq!(records[0]["level"], "panic");
    assert_eq!(records[0]["msg"], "invariant broken: queue empty");
}

#[test]
fn test_config_loaded_from_json_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("logger.json");
    let json = serde_json::json!({
        "fileConfig": {
            "logFilePath": format!("{}/", temp_dir.path().display()),
            "maxSize": 1,
            "maxBackups": 2,
            "maxAge": 1,
            "levelString": "warn",
            "serviceName": "from-json"
        }
    });
    fs::write(&config_path, json.to_string()).unwrap();

    let config = Config::from_json_file(&config_path).expect("Failed to load config");
    let logger = Logger::new(Some(&config));
    logger.info("filtered", &[]);
    logger.warn("kept", &[]);
    logger.sync().expect("Failed to sync");

    let records = read_records(&temp_dir.path().join("info.log"));
    assert_eq!(messages(&records), vec!["kept"]);
    assert_eq!(records[0]["serviceName"], "from-json");
}
