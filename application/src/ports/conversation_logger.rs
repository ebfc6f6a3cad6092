//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording workflow events
//! (plans, executed steps, replanning verdicts, review decisions, synthesis)
//! to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! workflow transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// Event type identifiers.
pub mod event_types {
    pub const WORKFLOW_STARTED: &str = "workflow_started";
    pub const PLAN_CREATED: &str = "plan_created";
    pub const STEP_EXECUTED: &str = "step_executed";
    pub const REPLAN_DECIDED: &str = "replan_decided";
    pub const REVIEW_OPENED: &str = "review_opened";
    pub const HUMAN_DECISION: &str = "human_decision";
    pub const PLAN_EDITED: &str = "plan_edited";
    pub const SYNTHESIS_COMPLETED: &str = "synthesis_completed";
    pub const TURN_RECORDED: &str = "turn_recorded";
}

/// A structured conversation event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The adapter adds the timestamp.
pub struct ConversationEvent {
    /// Event type identifier (see [`event_types`]).
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

/// Port for logging conversation events to a structured log.
///
/// The `log` method is synchronous and non-fallible; logging failures are
/// ignored by implementations.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
