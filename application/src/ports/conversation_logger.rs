//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording chat turns
//! (input, guardrail verdicts, answers, failures) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the transcript in a
//! machine-readable format (JSONL).

use serde_json::Value;

/// A structured conversation event for logging.
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    /// Event type identifier (e.g. "turn_started", "guardrail_blocked").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events.
///
/// `log` is synchronous and infallible; implementations swallow their own
/// write errors so a broken log never breaks a turn.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
