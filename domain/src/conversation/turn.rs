//! A completed query/response cycle.

use crate::workflow::outcome::TurnOutcome;
use crate::workflow::step::PastStep;
use serde::{Deserialize, Serialize};

/// Durable record of one turn. Never mutated after it is appended to memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub user_query: String,
    pub diagnostic_steps: Vec<PastStep>,
    pub final_response: String,
    /// Key findings, injected into later planning context.
    pub context_summary: String,
    pub outcome: TurnOutcome,
}

impl ConversationTurn {
    pub fn new(
        user_query: impl Into<String>,
        diagnostic_steps: Vec<PastStep>,
        final_response: impl Into<String>,
        context_summary: impl Into<String>,
        outcome: TurnOutcome,
    ) -> Self {
        Self {
            timestamp: current_timestamp(),
            user_query: user_query.into(),
            diagnostic_steps,
            final_response: final_response.into(),
            context_summary: context_summary.into(),
            outcome,
        }
    }
}

fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
