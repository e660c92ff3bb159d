//! Core logger types and traits

pub mod appender;
pub mod call_site;
pub mod config;
pub mod encoder;
pub mod error;
pub mod fields;
pub mod handler;
pub mod handlers;
pub mod log_level;
pub mod logger;
pub mod message;
pub mod record;
pub mod request_context;
pub mod tee;

pub use appender::Appender;
pub use call_site::CallSite;
pub use config::{Config, FileConfig, ERROR_LOG_FILE, INFO_LOG_FILE};
pub use encoder::Encoder;
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use handler::Handler;
pub use handlers::Handlers;
pub use log_level::LogLevel;
pub use logger::{build_handlers, Logger};
pub use message::{format_message, sprint, sprintf};
pub use record::Record;
pub use request_context::{
    RequestContext, MESSAGE_KEY, PATH_KEY, SERVICE_NAME_KEY, TRACE_ID_KEY,
};
pub use tee::{LevelFilter, SinkCore, Tee};
