//! Record encoders shared by the sink cores
//!
//! - Json: one machine-readable object per line, used by the file handler
//! - Console: human-readable message text, used by the console-only handler

use super::record::Record;
use chrono::SecondsFormat;

pub const LEVEL_KEY: &str = "level";
pub const TIME_KEY: &str = "time";
/// Key for a free-text record message in JSON output
pub const RECORD_MESSAGE_KEY: &str = "message";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoder {
    /// Structured, field-preserving encoding
    ///
    /// Example: `{"level":"info","time":"2025-01-08T10:30:45+08:00","path":"main.rs:12(???)","msg":"started"}`
    #[default]
    Json,

    /// Human-readable encoding without time or level keys
    ///
    /// Example: `Request processed\t{"user_id":42}`
    Console,
}

impl Encoder {
    /// Encode a record as one line (without the trailing newline)
    pub fn encode(&self, record: &Record) -> String {
        match self {
            Encoder::Json => Self::encode_json(record),
            Encoder::Console => Self::encode_console(record),
        }
    }

    fn encode_json(record: &Record) -> String {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            LEVEL_KEY.to_string(),
            serde_json::Value::String(record.level.as_str().to_string()),
        );
        json_obj.insert(
            TIME_KEY.to_string(),
            serde_json::Value::String(record.time.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );

        if !record.message.is_empty() {
            json_obj.insert(
                RECORD_MESSAGE_KEY.to_string(),
                serde_json::Value::String(record.message.clone()),
            );
        }

        // Record keys win over same-named fields
        for (key, value) in record.fields.iter() {
            json_obj
                .entry(key)
                .or_insert_with(|| value.to_json_value());
        }

        serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
    }

    fn encode_console(record: &Record) -> String {
        let message = record.sanitized_message();
        if record.fields.is_empty() {
            return message;
        }

        let fields = serde_json::Value::Object(record.fields.to_json_object());
        format!("{}\t{}", message, fields)
    }
}
