//! Logging macros that record the caller's file, line and module path.
//!
//! Arguments are converted with `FieldValue::from` and substituted into the
//! printf-style template, exactly as the [`Logger`](crate::core::Logger)
//! methods do. An optional `ctx:` argument supplies the request context.
//!
//! # Examples
//!
//! ```
//! use rust_log_facade::prelude::*;
//! use rust_log_facade::{error, info};
//!
//! let logger = Logger::with_handlers(Handlers::new());
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port %d", port);
//!
//! // With a request context
//! let ctx = RequestContext::background().with_trace_id("req-7");
//! error!(logger, ctx: ctx, "User %s failed action %q", "alice", "login");
//! ```

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = Logger::with_handlers(Handlers::new());
/// use rust_log_facade::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: %d", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, ctx: $ctx:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $logger.log_at(
            &$ctx,
            $level,
            $crate::core::CallSite::new(file!(), line!(), Some(module_path!())),
            $fmt,
            &[$($crate::core::FieldValue::from($arg)),*],
        )
    };
    ($logger:expr, $level:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $level, ctx: $crate::core::RequestContext::background(), $fmt $(, $arg)*)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = Logger::with_handlers(Handlers::new());
/// use rust_log_facade::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: %d", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = Logger::with_handlers(Handlers::new());
/// use rust_log_facade::warn;
/// warn!(logger, "Disk usage at %d%%", 85);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message, then exit the process with status 1.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Fatal, $($arg)+)
    };
}

/// Log a message with structured fields at an explicit level.
///
/// The fields argument is anything that converts into [`Fields`](crate::core::Fields).
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = Logger::with_handlers(Handlers::new());
/// use rust_log_facade::log_w;
/// log_w!(logger, LogLevel::Info, "order placed", Fields::new().with_field("order_id", 42));
///
/// let ctx = RequestContext::background().with_trace_id("req-7");
/// log_w!(logger, LogLevel::Warn, ctx: ctx, "slow order", Fields::new());
/// ```
#[macro_export]
macro_rules! log_w {
    ($logger:expr, $level:expr, ctx: $ctx:expr, $msg:expr, $fields:expr $(,)?) => {
        $logger.log_with_fields_at(
            &$ctx,
            $level,
            $crate::core::CallSite::new(file!(), line!(), Some(module_path!())),
            $msg,
            $crate::core::Fields::from($fields),
        )
    };
    ($logger:expr, $level:expr, $msg:expr, $fields:expr $(,)?) => {
        $crate::log_w!($logger, $level, ctx: $crate::core::RequestContext::background(), $msg, $fields)
    };
}

/// Log a debug-level message with fields.
#[macro_export]
macro_rules! debug_w {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_w!($logger, $crate::core::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message with fields.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = Logger::with_handlers(Handlers::new());
/// use rust_log_facade::info_w;
/// info_w!(logger, "request complete", Fields::new().with_field("status", 200));
/// ```
#[macro_export]
macro_rules! info_w {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_w!($logger, $crate::core::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message with fields.
#[macro_export]
macro_rules! warn_w {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_w!($logger, $crate::core::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message with fields.
#[macro_export]
macro_rules! error_w {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_w!($logger, $crate::core::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message with fields, then exit the process with status 1.
#[macro_export]
macro_rules! fatal_w {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_w!($logger, $crate::core::LogLevel::Fatal, $($arg)+)
    };
}
