//! Log record handed from handlers to the sink cores

use super::fields::Fields;
use super::log_level::LogLevel;
use chrono::{DateTime, Local};

#[derive(Debug, Clone)]
pub struct Record {
    pub level: LogLevel,
    pub time: DateTime<Local>,
    /// Free-text message; structured handlers leave it empty and carry `msg` as a field
    pub message: String,
    pub fields: Fields,
}

impl Record {
    pub fn new(level: LogLevel, message: impl Into<String>, fields: Fields) -> Self {
        Self {
            level,
            time: Local::now(),
            message: message.into(),
            fields,
        }
    }

    /// Replace newlines, carriage returns and tabs with escape sequences so
    /// one record never spans several lines of a text sink.
    pub fn sanitized_message(&self) -> String {
        self.message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }
}
