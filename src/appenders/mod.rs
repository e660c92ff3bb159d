//! Appender implementations

pub mod console;
pub mod rotating_file;

pub use console::ConsoleAppender;
pub use rotating_file::{RotatingFileAppender, RotationPolicy, DEFAULT_MAX_BYTES};

// Re-export trait for convenience
pub use crate::core::Appender;
