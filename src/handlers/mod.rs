//! Concrete handlers selected from configuration

pub mod console;
pub mod file;

pub use console::ConsoleHandler;
pub use file::FileHandler;

// Re-export the trait alongside its implementations
pub use crate::core::Handler;
