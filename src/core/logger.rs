//! Logger facade over a handler aggregator

use super::{
    call_site::CallSite,
    config::{Config, FileConfig},
    error::Result,
    fields::{FieldValue, Fields},
    handler::Handler,
    handlers::Handlers,
    log_level::LogLevel,
    message::format_message,
    request_context::RequestContext,
};
use crate::handlers::{ConsoleHandler, FileHandler};
use std::sync::Arc;

/// Build the handler set described by `config`.
///
/// No configuration means console output only. Otherwise the `console`
/// flag picks the console handler and its absence picks the file handler.
pub fn build_handlers(config: Option<&Config>) -> Handlers {
    let file_config = config
        .and_then(|c| c.file_config.clone())
        .unwrap_or_else(|| FileConfig::default().with_console(true));

    let handler: Box<dyn Handler> = if file_config.console {
        Box::new(ConsoleHandler::new())
    } else {
        Box::new(FileHandler::new(&file_config))
    };

    let mut handlers = Handlers::new();
    handlers.push(handler);
    handlers
}

/// Generates the per-level entry points.
///
/// For each level: `name(format, args)`, `name_c(ctx, format, args)`,
/// `name_w(message, fields)` and `name_cw(ctx, message, fields)`.
macro_rules! level_methods {
    ($($level:ident => $plain:ident, $ctx:ident, $with:ident, $ctx_with:ident;)+) => {
        $(
            #[doc = concat!("Log a formatted message at ", stringify!($level), " level")]
            #[track_caller]
            pub fn $plain(&self, format: &str, args: &[FieldValue]) {
                self.log(&RequestContext::background(), LogLevel::$level, format, args);
            }

            #[track_caller]
            pub fn $ctx(&self, ctx: &RequestContext, format: &str, args: &[FieldValue]) {
                self.log(ctx, LogLevel::$level, format, args);
            }

            #[doc = concat!("Log a message with fields at ", stringify!($level), " level")]
            #[track_caller]
            pub fn $with(&self, message: &str, fields: Fields) {
                self.log_with_fields(&RequestContext::background(), LogLevel::$level, message, fields);
            }

            #[track_caller]
            pub fn $ctx_with(&self, ctx: &RequestContext, message: &str, fields: Fields) {
                self.log_with_fields(ctx, LogLevel::$level, message, fields);
            }
        )+
    };
}

/// Application-facing logger.
///
/// Clones share the same handlers. Level filtering is left to each handler;
/// Panic and Fatal calls terminate after every handler has received the record.
///
/// # Examples
///
/// ```
/// use rust_log_facade::core::{Config, FieldValue, FileConfig, Fields, Logger};
///
/// let dir = tempfile::tempdir().unwrap();
/// let prefix = format!("{}/", dir.path().display());
/// let config = Config {
///     file_config: Some(FileConfig::default().with_log_file_path(prefix).with_service_name("api")),
/// };
///
/// let logger = Logger::new(Some(&config));
/// logger.info("listening on %s:%d", &["0.0.0.0".into(), FieldValue::from(8080)]);
/// logger.warn_w("slow request", Fields::new().with_field("elapsed_ms", 1200));
/// logger.sync().unwrap();
/// ```
#[derive(Clone)]
pub struct Logger {
    handlers: Arc<Handlers>,
}

impl Logger {
    pub fn new(config: Option<&Config>) -> Self {
        Self::with_handlers(build_handlers(config))
    }

    pub fn with_handlers(handlers: Handlers) -> Self {
        Self::from_shared(Arc::new(handlers))
    }

    pub(crate) fn from_shared(handlers: Arc<Handlers>) -> Self {
        Self { handlers }
    }

    pub fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    /// Replace the handler set of this logger; clones made earlier keep theirs
    pub fn set_handlers(&mut self, handlers: Handlers) {
        self.handlers = Arc::new(handlers);
    }

    #[track_caller]
    pub fn log(&self, ctx: &RequestContext, level: LogLevel, format: &str, args: &[FieldValue]) {
        self.log_at(ctx, level, CallSite::caller(), format, args);
    }

    /// Log with an explicit call site (used by the logging macros)
    pub fn log_at(
        &self,
        ctx: &RequestContext,
        level: LogLevel,
        site: CallSite,
        format: &str,
        args: &[FieldValue],
    ) {
        self.handlers.log(ctx, level, &site, format, args);
        if level.is_terminal() {
            self.terminate(level, format_message(format, args));
        }
    }

    #[track_caller]
    pub fn log_with_fields(
        &self,
        ctx: &RequestContext,
        level: LogLevel,
        message: &str,
        fields: Fields,
    ) {
        self.log_with_fields_at(ctx, level, CallSite::caller(), message, fields);
    }

    pub fn log_with_fields_at(
        &self,
        ctx: &RequestContext,
        level: LogLevel,
        site: CallSite,
        message: &str,
        fields: Fields,
    ) {
        self.handlers.log_with_fields(ctx, level, &site, message, &fields);
        if level.is_terminal() {
            self.terminate(level, message.to_string());
        }
    }

    level_methods! {
        Debug => debug, debug_c, debug_w, debug_cw;
        Info => info, info_c, info_w, info_cw;
        Warn => warn, warn_c, warn_w, warn_cw;
        Error => error, error_c, error_w, error_cw;
        Panic => panic, panic_c, panic_w, panic_cw;
        Fatal => fatal, fatal_c, fatal_w, fatal_cw;
    }

    /// Flush every handler
    pub fn sync(&self) -> Result<()> {
        self.handlers.sync()
    }

    /// Close every handler; records logged afterwards are dropped
    pub fn close(&self) -> Result<()> {
        self.handlers.close()
    }

    fn terminate(&self, level: LogLevel, message: String) {
        match level {
            LogLevel::Panic => panic!("{}", message),
            LogLevel::Fatal => {
                if let Err(e) = self.handlers.sync() {
                    eprintln!("[LOGGER ERROR] Failed to flush before exit: {}", e);
                }
                std::process::exit(1);
            }
            _ => {}
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").field("handlers", &self.handlers).finish()
    }
}
