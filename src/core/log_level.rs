//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered severity: `Debug < Info < Warn < Error < Panic < Fatal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Panic = 5,
    Fatal = 6,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Panic,
        LogLevel::Fatal,
    ];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Panic => "panic",
            LogLevel::Fatal => "fatal",
        }
    }

    /// Look up a level by its canonical name.
    ///
    /// The match is case-exact and anything unrecognized resolves to
    /// [`LogLevel::Debug`]. This is a permissive default, not an error signal;
    /// use `str::parse` when an unknown name must be rejected.
    ///
    /// ```
    /// use rust_log_facade::LogLevel;
    ///
    /// assert_eq!(LogLevel::from_name("warn"), LogLevel::Warn);
    /// assert_eq!(LogLevel::from_name("WARN"), LogLevel::Debug);
    /// ```
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == name)
            .unwrap_or(LogLevel::Debug)
    }

    /// Panic and Fatal terminate the caller after the record is emitted
    pub fn is_terminal(&self) -> bool {
        matches!(self, LogLevel::Panic | LogLevel::Fatal)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| LoggerError::InvalidLevel(s.to_string()))
    }
}
