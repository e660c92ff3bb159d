//! Handler aggregator

use super::{
    call_site::CallSite,
    error::{LoggerError, Result},
    fields::{FieldValue, Fields},
    handler::Handler,
    log_level::LogLevel,
    request_context::RequestContext,
};

/// Ordered set of handlers; every call is forwarded to each of them in
/// registration order.
#[derive(Default)]
pub struct Handlers {
    handlers: Vec<Box<dyn Handler>>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler (builder style)
    #[must_use]
    pub fn with_handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn push(&mut self, handler: Box<dyn Handler>) {
        self.handlers.push(handler);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn log(
        &self,
        ctx: &RequestContext,
        level: LogLevel,
        site: &CallSite,
        format: &str,
        args: &[FieldValue],
    ) {
        for handler in &self.handlers {
            handler.log(ctx, level, site, format, args);
        }
    }

    /// Each handler receives its own copy of `fields`
    pub fn log_with_fields(
        &self,
        ctx: &RequestContext,
        level: LogLevel,
        site: &CallSite,
        message: &str,
        fields: &Fields,
    ) {
        for handler in &self.handlers {
            handler.log_with_fields(ctx, level, site, message, fields.clone());
        }
    }

    pub fn sync(&self) -> Result<()> {
        self.each(|handler| handler.sync())
    }

    pub fn close(&self) -> Result<()> {
        self.each(|handler| handler.close())
    }

    /// Run `op` on every handler and return the first failure
    fn each<F>(&self, op: F) -> Result<()>
    where
        F: Fn(&dyn Handler) -> Result<()>,
    {
        let mut first_error: Option<LoggerError> = None;
        for handler in &self.handlers {
            if let Err(e) = op(handler.as_ref()) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl From<Vec<Box<dyn Handler>>> for Handlers {
    fn from(handlers: Vec<Box<dyn Handler>>) -> Self {
        Self { handlers }
    }
}

impl std::fmt::Debug for Handlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handlers").field("handlers", &self.names()).finish()
    }
}
