//! Handler trait: a sink-backed logging backend

use super::{
    call_site::CallSite, error::Result, fields::FieldValue, fields::Fields,
    log_level::LogLevel, request_context::RequestContext,
};

/// A sink-backed backend the [`Handlers`](super::Handlers) aggregator fans out to.
///
/// Logging methods never return errors. Each handler applies its own
/// severity gate and reports sink failures on stderr.
pub trait Handler: Send + Sync {
    /// Format `format` with `args` and emit one record
    fn log(
        &self,
        ctx: &RequestContext,
        level: LogLevel,
        site: &CallSite,
        format: &str,
        args: &[FieldValue],
    );

    /// Emit one record carrying `fields`, plus `msg` when `message` is non-empty
    fn log_with_fields(
        &self,
        ctx: &RequestContext,
        level: LogLevel,
        site: &CallSite,
        message: &str,
        fields: Fields,
    );

    /// Flush buffered output
    fn sync(&self) -> Result<()> {
        Ok(())
    }

    /// Flush and stop accepting records; closing twice is a no-op
    fn close(&self) -> Result<()>;

    fn name(&self) -> &str;
}
