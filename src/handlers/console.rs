//! Human-readable console handler

use crate::appenders::ConsoleAppender;
use crate::core::{
    format_message, Appender, CallSite, Encoder, FieldValue, Fields, Handler, LevelFilter,
    LogLevel, LoggerError, Record, RequestContext, Result, SinkCore, Tee,
};
use std::sync::atomic::{AtomicBool, Ordering};

/// Single-stream handler for interactive use.
///
/// Every level is written; there is no severity gate and no service,
/// trace or caller tagging. Lines carry the message followed by the
/// caller's fields, if any, as a JSON object.
pub struct ConsoleHandler {
    tee: Tee,
    closed: AtomicBool,
}

impl ConsoleHandler {
    /// Write to standard output
    pub fn new() -> Self {
        Self::with_appender(Box::new(ConsoleAppender::new()))
    }

    /// Write through any appender
    ///
    /// # Example
    ///
    /// ```
    /// use rust_log_facade::appenders::ConsoleAppender;
    /// use rust_log_facade::handlers::ConsoleHandler;
    ///
    /// let handler = ConsoleHandler::with_appender(Box::new(ConsoleAppender::with_writer(std::io::sink())));
    /// ```
    pub fn with_appender(appender: Box<dyn Appender>) -> Self {
        Self {
            tee: Tee::new(Encoder::Console, vec![SinkCore::new(LevelFilter::All, appender)]),
            closed: AtomicBool::new(false),
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn log(
        &self,
        _ctx: &RequestContext,
        level: LogLevel,
        _site: &CallSite,
        format: &str,
        args: &[FieldValue],
    ) {
        if self.is_closed() {
            return;
        }
        self.tee
            .write(&Record::new(level, format_message(format, args), Fields::new()));
    }

    fn log_with_fields(
        &self,
        _ctx: &RequestContext,
        level: LogLevel,
        _site: &CallSite,
        message: &str,
        fields: Fields,
    ) {
        if self.is_closed() {
            return;
        }
        self.tee.write(&Record::new(level, message, fields));
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
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use std::sync::Arc;

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
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn buffered() -> (ConsoleHandler, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let handler =
            ConsoleHandler::with_appender(Box::new(ConsoleAppender::with_writer(buffer.clone())));
        (handler, buffer)
    }

    #[test]
    fn test_emits_every_level_without_tagging() {
        let (handler, buffer) = buffered();
        let ctx = RequestContext::background().with_trace_id("hidden");
        let site = CallSite::caller();

        for level in LogLevel::ALL.into_iter().filter(|l| !l.is_terminal()) {
            handler.log(&ctx, level, &site, "level %s", &[FieldValue::from(level.as_str())]);
        }

        assert_eq!(
            buffer.lines(),
            vec!["level debug", "level info", "level warn", "level error"]
        );
    }

    #[test]
    fn test_fields_follow_message() {
        let (handler, buffer) = buffered();
        handler.log_with_fields(
            &RequestContext::background(),
            LogLevel::Info,
            &CallSite::caller(),
            "order placed",
            Fields::new().with_field("id", 7),
        );
        handler.log_with_fields(
            &RequestContext::background(),
            LogLevel::Info,
            &CallSite::caller(),
            "bare",
            Fields::new(),
        );

        assert_eq!(buffer.lines(), vec!["order placed\t{\"id\":7}", "bare"]);
    }

    #[test]
    fn test_close_is_idempotent() {
        let (handler, buffer) = buffered();
        assert!(handler.close().is_ok());
        assert!(handler.close().is_ok());
        handler.log(
            &RequestContext::background(),
            LogLevel::Error,
            &CallSite::caller(),
            "dropped",
            &[],
        );
        assert!(buffer.lines().is_empty());
    }
}
