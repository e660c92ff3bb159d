//! Rotating file appender with size-triggered rotation and retention
//!
//! The active file keeps its configured name. When a write would push it past
//! `max_bytes` it is renamed to `<stem>-<UTC timestamp>.<ext>` (optionally
//! gzip-compressed) and a fresh file is opened. Backups beyond `max_backups`
//! or older than `max_age` are removed after each rotation.

use crate::core::appender::Appender;
use crate::core::error::{LoggerError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default size limit when none is configured (100 MB)
pub const DEFAULT_MAX_BYTES: u64 = 100 * 1024 * 1024;

const MEGABYTE: u64 = 1024 * 1024;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";
const MAX_DELETION_FAILURES: usize = 5;

/// Retention and rotation thresholds
///
/// # Examples
///
/// ```
/// use rust_log_facade::appenders::RotationPolicy;
/// use std::time::Duration;
///
/// let policy = RotationPolicy::new()
///     .with_max_size_mb(50)
///     .with_max_backups(7)
///     .with_max_age(Duration::from_secs(30 * 24 * 3600))
///     .with_compression(true);
/// assert_eq!(policy.max_bytes, 50 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RotationPolicy {
    /// Size that triggers rotation
    pub max_bytes: u64,
    /// Maximum number of rotated files to keep (0 keeps all)
    pub max_backups: usize,
    /// Maximum age of rotated files (`None` keeps them forever)
    pub max_age: Option<Duration>,
    /// Whether to gzip rotated files
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_backups: 0,
            max_age: None,
            compress: false,
        }
    }
}

impl RotationPolicy {
    /// Create a new rotation policy with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum file size in bytes
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Set maximum file size in megabytes; zero selects [`DEFAULT_MAX_BYTES`]
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size_mb(mut self, megabytes: u64) -> Self {
        self.max_bytes = if megabytes == 0 {
            DEFAULT_MAX_BYTES
        } else {
            megabytes.saturating_mul(MEGABYTE)
        };
        self
    }

    /// Set maximum backup files
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    /// Set maximum backup age
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age(mut self, age: Duration) -> Self {
        self.max_age = Some(age);
        self
    }

    /// Set maximum backup age in days; zero disables age-based removal
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age_days(mut self, days: u64) -> Self {
        self.max_age = (days > 0).then(|| Duration::from_secs(days.saturating_mul(SECONDS_PER_DAY)));
        self
    }

    /// Enable compression
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }
}

/// Size-rotated log file.
///
/// The file is opened lazily on the first write, creating missing parent
/// directories, so constructing the appender never fails. An unwritable
/// location surfaces as an error from [`Appender::append`].
///
/// # Examples
///
/// ```no_run
/// use rust_log_facade::appenders::{RotatingFileAppender, RotationPolicy};
/// use rust_log_facade::core::Appender;
///
/// let policy = RotationPolicy::new().with_max_size_mb(10).with_max_backups(3);
/// let mut appender = RotatingFileAppender::with_policy("/var/log/app/info.log", policy);
/// appender.append(r#"{"msg":"hello"}"#).unwrap();
/// ```
pub struct RotatingFileAppender {
    base_path: PathBuf,
    policy: RotationPolicy,
    writer: Option<BufWriter<File>>,
    current_size: u64,
    /// Counter for consecutive deletion failures (reset on successful deletion)
    deletion_failure_count: usize,
}

impl RotatingFileAppender {
    /// Create a rotating file appender with the default policy
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_policy(path, RotationPolicy::default())
    }

    /// Create a rotating file appender with a custom policy
    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Self {
        Self {
            base_path: path.as_ref().to_path_buf(),
            policy,
            writer: None,
            current_size: 0,
            deletion_failure_count: 0,
        }
    }

    fn open(&mut self) -> Result<()> {
        if let Some(parent) = self.base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.base_path)
            .map_err(|e| {
                LoggerError::file_appender(
                    self.base_path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })?;

        let metadata = file.metadata().map_err(|e| {
            LoggerError::file_appender(
                self.base_path.display().to_string(),
                format!("Cannot access file metadata: {}", e),
            )
        })?;

        self.current_size = metadata.len();
        self.writer = Some(BufWriter::new(file));
        Ok(())
    }

    /// Perform log rotation
    fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        if self.base_path.exists() {
            let backup_path = self.next_backup_path();
            fs::rename(&self.base_path, &backup_path).map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })?;

            if self.policy.compress {
                self.compress_file(&backup_path)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.base_path)
            .map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to create new log file: {}", e),
                )
            })?;
        self.writer = Some(BufWriter::new(file));
        self.current_size = 0;

        self.remove_expired_backups()
    }

    fn stem_and_extension(&self) -> (String, Option<String>) {
        let stem = self
            .base_path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or("app")
            .to_string();
        let extension = self
            .base_path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_string);
        (stem, extension)
    }

    fn backup_path(&self, time: DateTime<Utc>) -> PathBuf {
        let (stem, extension) = self.stem_and_extension();
        let stamp = time.format(BACKUP_TIME_FORMAT);
        let name = match extension {
            Some(ext) => format!("{}-{}.{}", stem, stamp, ext),
            None => format!("{}-{}", stem, stamp),
        };
        self.base_path.with_file_name(name)
    }

    /// Backup path for "now", kept newer than every existing backup and
    /// nudged forward a millisecond at a time until unused
    fn next_backup_path(&self) -> PathBuf {
        let mut time = Utc::now();
        if let Some((newest, _)) = self.backup_files().first() {
            time = time.max(*newest + chrono::Duration::milliseconds(1));
        }
        loop {
            let candidate = self.backup_path(time);
            if !candidate.exists() && !gz_path(&candidate).exists() {
                return candidate;
            }
            time += chrono::Duration::milliseconds(1);
        }
    }

    fn directory(&self) -> PathBuf {
        match self.base_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Rotated files for this appender, newest first
    pub fn backup_files(&self) -> Vec<(DateTime<Utc>, PathBuf)> {
        let (stem, extension) = self.stem_and_extension();
        let prefix = format!("{}-", stem);
        let suffix = extension.map(|ext| format!(".{}", ext)).unwrap_or_default();

        let Ok(entries) = fs::read_dir(self.directory()) else {
            return Vec::new();
        };

        let mut backups: Vec<(DateTime<Utc>, PathBuf)> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                let rest = name.strip_prefix(&prefix)?;
                let rest = rest.strip_suffix(".gz").unwrap_or(rest);
                let stamp = rest.strip_suffix(suffix.as_str())?;
                let time = NaiveDateTime::parse_from_str(stamp, BACKUP_TIME_FORMAT).ok()?;
                Some((time.and_utc(), entry.path()))
            })
            .collect();

        backups.sort_by(|a, b| b.0.cmp(&a.0));
        backups
    }

    /// Remove backups beyond `max_backups` or older than `max_age`
    fn remove_expired_backups(&mut self) -> Result<()> {
        if self.policy.max_backups == 0 && self.policy.max_age.is_none() {
            return Ok(());
        }

        let cutoff = self
            .policy
            .max_age
            .and_then(|age| chrono::Duration::from_std(age).ok())
            .map(|age| Utc::now() - age);

        let mut deletion_failed = false;
        for (idx, (time, path)) in self.backup_files().into_iter().enumerate() {
            let over_count = self.policy.max_backups > 0 && idx >= self.policy.max_backups;
            let too_old = cutoff.is_some_and(|cutoff| time < cutoff);
            if !over_count && !too_old {
                continue;
            }

            if let Err(e) = fs::remove_file(&path) {
                deletion_failed = true;
                eprintln!(
                    "[WARN] Failed to remove old backup {}: {} (failure #{}/{})",
                    path.display(),
                    e,
                    self.deletion_failure_count + 1,
                    MAX_DELETION_FAILURES
                );
            }
        }

        if deletion_failed {
            self.deletion_failure_count += 1;
            if self.deletion_failure_count >= MAX_DELETION_FAILURES {
                return Err(LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!(
                        "Failed to delete old backup files {} consecutive times. \
                         This may indicate insufficient disk space or permission issues.",
                        self.deletion_failure_count
                    ),
                ));
            }
        } else {
            self.deletion_failure_count = 0;
        }

        Ok(())
    }

    /// Compress a rotated file, replacing it only once the archive is complete
    fn compress_file(&self, path: &Path) -> Result<()> {
        use std::io::{BufReader, Read};

        let gz = gz_path(path);
        let mut temp_name = gz.clone().into_os_string();
        temp_name.push(".tmp");
        let temp_gz = PathBuf::from(temp_name);

        let input = File::open(path).map_err(|e| {
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to open file for compression: {}", path.display()),
                e,
            )
        })?;
        let mut reader = BufReader::with_capacity(64 * 1024, input);

        let output = File::create(&temp_gz).map_err(|e| {
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to create temporary compressed file: {}", temp_gz.display()),
                e,
            )
        })?;
        let mut encoder = flate2::write::GzEncoder::new(
            BufWriter::with_capacity(64 * 1024, output),
            flate2::Compression::default(),
        );

        let mut buffer = vec![0u8; 64 * 1024];
        loop {
            let bytes_read = reader.read(&mut buffer).map_err(|e| {
                let _ = fs::remove_file(&temp_gz);
                LoggerError::io_operation(
                    "compress log file",
                    format!("Failed to read from file: {}", path.display()),
                    e,
                )
            })?;
            if bytes_read == 0 {
                break;
            }
            encoder.write_all(&buffer[..bytes_read]).map_err(|e| {
                let _ = fs::remove_file(&temp_gz);
                LoggerError::io_operation("compress log file", "Failed to compress data chunk", e)
            })?;
        }

        encoder
            .finish()
            .and_then(|mut writer| writer.flush())
            .map_err(|e| {
                let _ = fs::remove_file(&temp_gz);
                LoggerError::io_operation("compress log file", "Failed to finish compression", e)
            })?;

        fs::rename(&temp_gz, &gz).map_err(|e| {
            let _ = fs::remove_file(&temp_gz);
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to rename compressed file to: {}", gz.display()),
                e,
            )
        })?;

        if let Err(e) = fs::remove_file(path) {
            eprintln!(
                "[WARN] Compression succeeded but failed to remove original file {}: {}. \
                Both compressed and uncompressed versions exist.",
                path.display(),
                e
            );
        }

        Ok(())
    }

    /// Get current file size
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    /// Get base path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    /// Get rotation policy
    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }
}

fn gz_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".gz");
    PathBuf::from(name)
}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "rotating_file"
    }

    fn append(&mut self, line: &str) -> Result<()> {
        if self.writer.is_none() {
            self.open()?;
        }

        let bytes_written = line.len() as u64 + 1;
        if self.current_size > 0 && self.current_size + bytes_written > self.policy.max_bytes {
            if let Err(e) = self.rotate() {
                eprintln!(
                    "[WARN] Log rotation failed: {}. Continuing with current file.",
                    e
                );
                if self.writer.is_none() {
                    self.open()?;
                }
                // Retry once another max_bytes has been written
                self.current_size = 0;
            }
        }

        let path = self.base_path.display().to_string();
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::file_appender(path.clone(), "Writer not initialized"))?;
        // Each line reaches the file before append returns
        writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .and_then(|()| writer.flush())
            .map_err(|e| {
                LoggerError::file_appender(path, format!("Failed to write log entry: {}", e))
            })?;
        self.current_size += bytes_written;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
