//! Severity-routed sink cores and the tee that fans records out to them

use super::{
    appender::Appender,
    encoder::Encoder,
    error::{LoggerError, Result},
    log_level::LogLevel,
    record::Record,
};
use parking_lot::Mutex;

/// Which severities a sink core accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelFilter {
    /// Every level
    All,
    /// The given level and above
    AtLeast(LogLevel),
}

impl LevelFilter {
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::AtLeast(min) => level >= *min,
        }
    }
}

/// One appender behind a lock, paired with its severity filter
pub struct SinkCore {
    filter: LevelFilter,
    appender: Mutex<Box<dyn Appender>>,
}

impl SinkCore {
    pub fn new(filter: LevelFilter, appender: Box<dyn Appender>) -> Self {
        Self {
            filter,
            appender: Mutex::new(appender),
        }
    }

    pub fn filter(&self) -> LevelFilter {
        self.filter
    }
}

/// Fan-out over sink cores sharing one encoder.
///
/// A record is encoded once and written to every core whose filter accepts
/// its level. Write failures are reported on stderr and swallowed so a
/// broken sink never reaches the caller. Records above Error are flushed
/// immediately.
pub struct Tee {
    encoder: Encoder,
    cores: Vec<SinkCore>,
}

impl Tee {
    pub fn new(encoder: Encoder, cores: Vec<SinkCore>) -> Self {
        Self { encoder, cores }
    }

    pub fn encoder(&self) -> Encoder {
        self.encoder
    }

    pub fn len(&self) -> usize {
        self.cores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.cores.iter().any(|core| core.filter.enabled(level))
    }

    pub fn write(&self, record: &Record) {
        if !self.enabled(record.level) {
            return;
        }

        let line = self.encoder.encode(record);
        for (idx, core) in self.cores.iter().enumerate() {
            if !core.filter.enabled(record.level) {
                continue;
            }

            let mut appender = core.appender.lock();
            if let Err(e) = appender.append(&line) {
                eprintln!(
                    "[LOGGER ERROR] Sink #{} ({}) failed: {}",
                    idx,
                    appender.name(),
                    e
                );
                continue;
            }

            if record.level > LogLevel::Error {
                if let Err(e) = appender.flush() {
                    eprintln!(
                        "[LOGGER ERROR] Sink #{} ({}) flush failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                }
            }
        }
    }

    /// Flush every core, reporting the first failure after trying all of them
    pub fn sync(&self) -> Result<()> {
        let mut first_error: Option<LoggerError> = None;
        for core in &self.cores {
            if let Err(e) = core.appender.lock().flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
