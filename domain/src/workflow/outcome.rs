//! How a turn ended, and the fixed texts for the non-synthesized endings.

use serde::{Deserialize, Serialize};

/// Response when the planner failed outright.
pub const PLANNING_FAILED_RESPONSE: &str =
    "The planner could not create a valid plan. Please try a different query.";

/// Response when the reviewer quit.
pub const ABORTED_RESPONSE: &str = "Workflow aborted by human.";

/// Response when the loop ended with neither a synthesis nor an answer.
pub const UNRESOLVED_RESPONSE: &str =
    "The diagnostic process completed without a final synthesized response.";

/// Summary stored when the summary oracle fails.
pub const DEFAULT_TURN_SUMMARY: &str = "Key findings from diagnostic analysis";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    Synthesized,
    SynthesisFallback,
    DirectResponse,
    Aborted,
    Unresolved,
    PlanningFailed,
}

impl TurnOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnOutcome::Synthesized => "synthesized",
            TurnOutcome::SynthesisFallback => "synthesis_fallback",
            TurnOutcome::DirectResponse => "direct_response",
            TurnOutcome::Aborted => "aborted",
            TurnOutcome::Unresolved => "unresolved",
            TurnOutcome::PlanningFailed => "planning_failed",
        }
    }
}

impl std::fmt::Display for TurnOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deterministic answer used when the synthesizer fails.
pub fn fallback_summary(query: &str, completed_steps: usize) -> String {
    format!(
        "🔧 DIAGNOSTIC SUMMARY\nQuestion: {}\n\nCompleted {} diagnostic steps. \
         The synthesizer was unavailable; review the step results above for details.",
        query, completed_steps
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_summary_names_step_count() {
        let text = fallback_summary("Why is pump 3 hot?", 2);
        assert!(text.contains("Question: Why is pump 3 hot?"));
        assert!(text.contains("Completed 2 diagnostic steps"));
    }

    #[test]
    fn test_outcome_serde_name() {
        let json = serde_json::to_string(&TurnOutcome::PlanningFailed).unwrap();
        assert_eq!(json, "\"planning_failed\"");
    }
}
