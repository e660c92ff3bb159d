//! Logger configuration
//!
//! Configuration is a plain value: build it in code or load it from JSON with
//! camelCase keys.
//!
//! ```
//! use rust_log_facade::core::{Config, LogLevel};
//!
//! let config = Config::from_json_str(
//!     r#"{"fileConfig":{"logFilePath":"./log/","maxSize":10,"levelString":"warn","serviceName":"billing"}}"#,
//! ).unwrap();
//! let file = config.file_config.unwrap();
//! assert_eq!(file.min_level(), LogLevel::Warn);
//! assert_eq!(file.info_log_path(), "./log/info.log");
//! ```

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use crate::appenders::RotationPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const INFO_LOG_FILE: &str = "info.log";
pub const ERROR_LOG_FILE: &str = "error.log";

/// Top-level configuration handed to [`Logger::new`](crate::core::Logger::new)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub file_config: Option<FileConfig>,
}

/// Sink, rotation and tagging settings for the handlers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileConfig {
    /// Prefix for log file names; empty disables file output
    pub log_file_path: String,
    /// Megabytes per file before rotation (0 selects 100 MB)
    pub max_size: u64,
    /// Rotated files to keep (0 keeps all)
    pub max_backups: usize,
    /// Days to keep rotated files (0 keeps them forever)
    pub max_age: u64,
    /// Gzip rotated files
    pub compress: bool,
    pub console: bool,
    /// Minimum severity name; unrecognized names select debug
    pub level_string: String,
    pub service_name: String,
}

impl Config {
    /// Configuration used when none is supplied: console output only
    pub fn console() -> Self {
        Self {
            file_config: Some(FileConfig {
                console: true,
                ..FileConfig::default()
            }),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading configuration",
                format!("Failed to read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&content)
    }
}

impl FileConfig {
    #[must_use]
    pub fn with_log_file_path(mut self, path: impl Into<String>) -> Self {
        self.log_file_path = path.into();
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level_string = level.into();
        self
    }

    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    #[must_use]
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, max_size_mb: u64, max_backups: usize, max_age_days: u64) -> Self {
        self.max_size = max_size_mb;
        self.max_backups = max_backups;
        self.max_age = max_age_days;
        self
    }

    #[must_use]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    pub fn min_level(&self) -> LogLevel {
        LogLevel::from_name(&self.level_string)
    }

    pub fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::new()
            .with_max_size_mb(self.max_size)
            .with_max_backups(self.max_backups)
            .with_max_age_days(self.max_age)
            .with_compression(self.compress)
    }

    pub fn has_file_output(&self) -> bool {
        !self.log_file_path.is_empty()
    }

    /// `<logFilePath>info.log`; the path is a prefix, not a directory
    pub fn info_log_path(&self) -> String {
        format!("{}{}", self.log_file_path, INFO_LOG_FILE)
    }

    /// `<logFilePath>error.log`
    pub fn error_log_path(&self) -> String {
        format!("{}{}", self.log_file_path, ERROR_LOG_FILE)
    }
}
