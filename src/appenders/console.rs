//! Console appender implementation

use crate::core::{Appender, Result};
use std::io::{self, Write};

/// Writes encoded records to standard output, or to any injected writer.
///
/// The sink core that owns the appender serializes access, so lines from
/// concurrent callers never interleave.
pub struct ConsoleAppender {
    writer: Box<dyn Write + Send>,
    name: String,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            writer: Box::new(io::stdout()),
            name: "console".to_string(),
        }
    }

    /// Write to a custom destination instead of stdout
    ///
    /// # Example
    ///
    /// ```
    /// use rust_log_facade::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::with_writer(std::io::sink());
    /// ```
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Box::new(writer),
            name: "console".to_string(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
