//! Structured file handler
//!
//! Writes JSON records to two rotated files built from the configured path
//! prefix: `<prefix>error.log` receives Error and above, `<prefix>info.log`
//! receives everything that passes the severity gate. With `console` set, the
//! same records are also written to standard output.

use crate::appenders::{ConsoleAppender, RotatingFileAppender};
use crate::core::{
    format_message, CallSite, Encoder, FieldValue, FileConfig, Fields, Handler, LevelFilter,
    LogLevel, LoggerError, Record, RequestContext, Result, SinkCore, Tee, MESSAGE_KEY, PATH_KEY,
    SERVICE_NAME_KEY, TRACE_ID_KEY,
};
use std::sync::atomic::{AtomicBool, Ordering};

pub struct FileHandler {
    tee: Tee,
    level: LogLevel,
    service_name: String,
    closed: AtomicBool,
}

impl FileHandler {
    /// Build the sink topology described by `config`.
    ///
    /// Files are opened on first write. An unwritable location is reported
    /// on stderr for each dropped record and never fails construction.
    pub fn new(config: &FileConfig) -> Self {
        let mut cores = Vec::with_capacity(3);

        if config.has_file_output() {
            let policy = config.rotation_policy();
            cores.push(SinkCore::new(
                LevelFilter::AtLeast(LogLevel::Error),
                Box::new(RotatingFileAppender::with_policy(
                    config.error_log_path(),
                    policy.clone(),
                )),
            ));
            cores.push(SinkCore::new(
                LevelFilter::All,
                Box::new(RotatingFileAppender::with_policy(config.info_log_path(), policy)),
            ));
        }

        if config.console {
            cores.push(SinkCore::new(
                LevelFilter::All,
                Box::new(ConsoleAppender::new().with_name("stdout")),
            ));
        }

        Self::with_cores(config, cores)
    }

    /// Use caller-supplied sink cores with the gate and tagging from `config`
    pub fn with_cores(config: &FileConfig, cores: Vec<SinkCore>) -> Self {
        Self {
            tee: Tee::new(Encoder::Json, cores),
            level: config.min_level(),
            service_name: config.service_name.clone(),
            closed: AtomicBool::new(false),
        }
    }

    pub fn min_level(&self) -> LogLevel {
        self.level
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn sink_count(&self) -> usize {
        self.tee.len()
    }

    #[inline]
    fn accepts(&self, level: LogLevel) -> bool {
        level >= self.level && !self.closed.load(Ordering::Acquire)
    }
}

impl Handler for FileHandler {
    fn log(
        &self,
        ctx: &RequestContext,
        level: LogLevel,
        site: &CallSite,
        format: &str,
        args: &[FieldValue],
    ) {
        if !self.accepts(level) {
            return;
        }

        let trace_id = ctx.trace_id().cloned().unwrap_or(FieldValue::Null);
        let fields = Fields::new()
            .with_field(PATH_KEY, site.to_string())
            .with_field(SERVICE_NAME_KEY, self.service_name.as_str())
            .with_field(TRACE_ID_KEY, trace_id)
            .with_field(MESSAGE_KEY, format_message(format, args));

        self.tee.write(&Record::new(level, "", fields));
    }

    fn log_with_fields(
        &self,
        ctx: &RequestContext,
        level: LogLevel,
        site: &CallSite,
        message: &str,
        fields: Fields,
    ) {
        if !self.accepts(level) {
            return;
        }

        let mut merged = Fields::new().with_field(PATH_KEY, site.to_string());
        merged.extend(fields);
        if !message.is_empty() {
            merged.insert(MESSAGE_KEY, message);
        }
        if !self.service_name.is_empty() {
            merged.insert(SERVICE_NAME_KEY, self.service_name.as_str());
        }
        if let Some(trace_id) = ctx.trace_id() {
            merged.insert(TRACE_ID_KEY, trace_id.clone());
        }

        self.tee.write(&Record::new(level, "", merged));
    }

    fn sync(&self) -> Result<()> {
        self.tee.sync()
    }

    fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.tee
            .sync()
            .map_err(|e| LoggerError::handler_close(self.name(), e.to_string()))
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileHandler {
    fn drop(&mut self) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        if let Err(e) = self.tee.sync() {
            eprintln!("[LOGGER ERROR] Failed to flush file handler on drop: {}", e);
        }
    }
}
