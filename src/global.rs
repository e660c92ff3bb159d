//! Process-wide default logger
//!
//! The free functions in this module log through a shared handler set. It is
//! built lazily with console output if [`init`] was never called.
//!
//! [`init`] and [`set_handlers`] swap the shared set and are meant for
//! start-up. Calls already running keep the previous set until they return,
//! and nothing drains or closes it.
//!
//! ```no_run
//! use rust_log_facade::global;
//! use rust_log_facade::core::{Config, FileConfig, RequestContext};
//!
//! global::init(Some(&Config {
//!     file_config: Some(FileConfig::default().with_log_file_path("./log/").with_service_name("api")),
//! }));
//!
//! let ctx = RequestContext::background().with_trace_id("req-1");
//! global::info_c(&ctx, "user %s logged in", &["alice".into()]);
//! global::sync().unwrap();
//! ```

use crate::core::{
    build_handlers, Config, FieldValue, Fields, Handlers, LogLevel, Logger, RequestContext, Result,
};
use parking_lot::RwLock;
use std::sync::Arc;

static DEFAULT_HANDLERS: RwLock<Option<Arc<Handlers>>> = parking_lot::const_rwlock(None);

fn current() -> Arc<Handlers> {
    if let Some(handlers) = DEFAULT_HANDLERS.read().as_ref() {
        return Arc::clone(handlers);
    }
    let mut slot = DEFAULT_HANDLERS.write();
    Arc::clone(slot.get_or_insert_with(|| Arc::new(build_handlers(None))))
}

/// (Re)build the default handlers from `config`; `None` selects console output
pub fn init(config: Option<&Config>) {
    set_handlers(build_handlers(config));
}

pub fn set_handlers(handlers: Handlers) {
    *DEFAULT_HANDLERS.write() = Some(Arc::new(handlers));
}

/// A logger bound to the current default handlers
pub fn default_logger() -> Logger {
    Logger::from_shared(current())
}

#[track_caller]
pub fn log(ctx: &RequestContext, level: LogLevel, format: &str, args: &[FieldValue]) {
    default_logger().log(ctx, level, format, args);
}

#[track_caller]
pub fn log_with_fields(ctx: &RequestContext, level: LogLevel, message: &str, fields: Fields) {
    default_logger().log_with_fields(ctx, level, message, fields);
}

pub fn sync() -> Result<()> {
    current().sync()
}

pub fn close() -> Result<()> {
    current().close()
}

macro_rules! level_functions {
    ($($level:ident => $plain:ident, $ctx:ident, $with:ident, $ctx_with:ident;)+) => {
        $(
            #[track_caller]
            pub fn $plain(format: &str, args: &[FieldValue]) {
                log(&RequestContext::background(), LogLevel::$level, format, args);
            }

            #[track_caller]
            pub fn $ctx(ctx: &RequestContext, format: &str, args: &[FieldValue]) {
                log(ctx, LogLevel::$level, format, args);
            }

            #[track_caller]
            pub fn $with(message: &str, fields: Fields) {
                log_with_fields(&RequestContext::background(), LogLevel::$level, message, fields);
            }

            #[track_caller]
            pub fn $ctx_with(ctx: &RequestContext, message: &str, fields: Fields) {
                log_with_fields(ctx, LogLevel::$level, message, fields);
            }
        )+
    };
}

level_functions! {
    Debug => debug, debug_c, debug_w, debug_cw;
    Info => info, info_c, info_w, info_cw;
    Warn => warn, warn_c, warn_w, warn_cw;
    Error => error, error_c, error_w, error_cw;
    Panic => panic, panic_c, panic_w, panic_cw;
    Fatal => fatal, fatal_c, fatal_w, fatal_cw;
}
