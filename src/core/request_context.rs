//! Request-scoped key/value carrier read by context-qualified log calls

use super::fields::FieldValue;
use std::collections::HashMap;
use std::sync::Arc;

/// Key under which callers store the correlation identifier
pub const TRACE_ID_KEY: &str = "traceID";
/// Key carrying the configured service name in every record
pub const SERVICE_NAME_KEY: &str = "serviceName";
/// Key carrying the formatted message in structured records
pub const MESSAGE_KEY: &str = "msg";
/// Key carrying the `file:line(function)` call site
pub const PATH_KEY: &str = "path";

/// Immutable request context.
///
/// Cloning is cheap; deriving a child with [`RequestContext::with_value`]
/// copies the parent's entries and leaves the parent untouched. The logger
/// only ever reads [`TRACE_ID_KEY`] from it.
///
/// # Example
///
/// ```
/// use rust_log_facade::{FieldValue, RequestContext};
///
/// let ctx = RequestContext::background().with_trace_id("req-42");
/// assert_eq!(ctx.trace_id(), Some(&FieldValue::from("req-42")));
/// assert!(RequestContext::background().trace_id().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    values: Arc<HashMap<String, FieldValue>>,
}

impl RequestContext {
    /// Empty context used by the context-free entry points
    pub fn background() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut values = (*self.values).clone();
        values.insert(key.into(), value.into());
        Self {
            values: Arc::new(values),
        }
    }

    #[must_use]
    pub fn with_trace_id(&self, trace_id: impl Into<FieldValue>) -> Self {
        self.with_value(TRACE_ID_KEY, trace_id)
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn trace_id(&self) -> Option<&FieldValue> {
        self.value(TRACE_ID_KEY)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
