use anyhow::Result;
use serde_json::Value;

pub const QUESTION_ASKED: &str = "question_asked";
pub const CONVERSATION_CREATED: &str = "conversation_created";
pub const CONVERSATION_DELETED: &str = "conversation_deleted";
pub const SOURCES_EXPANDED: &str = "sources_expanded";

/// Destination for product analytics events
///
/// Tracking is fire-and-forget: callers ignore the result beyond logging it.
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: &str, params: Value) -> Result<()>;
}

/// Writes events to the log at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track(&self, event: &str, params: Value) -> Result<()> {
        tracing::debug!(event, %params, "analytics event");
        Ok(())
    }
}

/// Drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn track(&self, _event: &str, _params: Value) -> Result<()> {
        Ok(())
    }
}

pub(crate) fn fire(sink: &dyn AnalyticsSink, event: &str, params: Value) {
    if let Err(e) = sink.track(event, params) {
        tracing::debug!("Analytics event {} dropped: {}", event, e);
    }
}
