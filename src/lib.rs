//! # Rust Log Facade
//!
//! A structured application-logging facade. Application code logs through a
//! [`Logger`] (or the process-wide functions in [`global`]), which hands each
//! call to a set of handlers built from configuration.
//!
//! ## Features
//!
//! - **Severity-split files**: JSON records in `<prefix>info.log`, with Error
//!   and above also in `<prefix>error.log`, both size-rotated
//! - **Console output**: human-readable lines on standard output
//! - **Request context**: trace IDs read from a per-call [`RequestContext`]
//! - **Caller location**: `file:line(function)` of the application's call site
//! - **printf-style formatting**: `logger.info("user %s id=%d", &[...])`
//!
//! ## Example
//!
//! ```
//! use rust_log_facade::prelude::*;
//!
//! let logger = Logger::new(None);
//! let ctx = RequestContext::background().with_trace_id("req-1");
//! logger.info_c(&ctx, "processed %d items", &[FieldValue::from(3)]);
//! logger.info_w("checkout", Fields::new().with_field("cart_id", 42));
//! ```

pub mod appenders;
pub mod core;
pub mod global;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
    pub use crate::core::{
        Appender, CallSite, Config, FieldValue, Fields, FileConfig, Handler, Handlers, LogLevel,
        Logger, LoggerError, RequestContext, Result,
    };
    pub use crate::handlers::{ConsoleHandler, FileHandler};
}

pub use appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
pub use core::{
    Appender, CallSite, Config, FieldValue, Fields, FileConfig, Handler, Handlers, LogLevel,
    Logger, LoggerError, RequestContext, Result,
};
pub use global::{default_logger, init, set_handlers};
pub use handlers::{ConsoleHandler, FileHandler};
