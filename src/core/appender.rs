//! Appender trait for encoded log output destinations

use super::error::Result;

pub trait Appender: Send {
    /// Write one encoded record; the appender terminates the line
    fn append(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
