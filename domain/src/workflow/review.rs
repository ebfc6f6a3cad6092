//! What the reviewer sees at a human checkpoint.

use super::state::WorkflowState;
use super::step::{PastStep, Step};
use super::warning::ReviewWarning;
use crate::core::string::preview;
use serde::Serialize;

/// Characters of each step result shown on the review screen.
pub const RESULT_PREVIEW_CHARS: usize = 100;

/// Read-only view of the workflow handed to a reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSnapshot {
    pub query: String,
    pub turn_number: usize,
    pub iteration: usize,
    pub completed: Vec<PastStep>,
    pub remaining: Vec<Step>,
    pub warnings: Vec<ReviewWarning>,
}

impl ReviewSnapshot {
    pub fn capture(state: &WorkflowState, warnings: &[ReviewWarning]) -> Self {
        Self {
            query: state.input.clone(),
            turn_number: state.turn_number,
            iteration: state.iteration,
            completed: state.past_steps().to_vec(),
            remaining: state.plan.to_vec(),
            warnings: warnings.to_vec(),
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Plain-text rendering.
    ///
    /// Remaining steps are numbered after the completed ones.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Query: {}\n", self.query));
        out.push_str(&format!("Turn: {}\n", self.turn_number));

        if !self.completed.is_empty() {
            out.push_str("\nCompleted steps:\n");
            for (i, past) in self.completed.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, past.step));
                out.push_str(&format!(
                    "     Result: {}\n",
                    preview(&past.result, RESULT_PREVIEW_CHARS)
                ));
            }
        }

        if !self.remaining.is_empty() {
            out.push_str("\nNext planned steps:\n");
            let offset = self.completed.len();
            for (i, step) in self.remaining.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", offset + i + 1, step));
            }
        }

        if self.has_warnings() {
            out.push_str("\nWarnings:\n");
            for warning in &self.warnings {
                out.push_str(&format!("  ! {}\n", warning));
            }
            out.push_str("Consider choosing 'synthesize' to get a final answer now.\n");
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::ConversationMemory;

    #[test]
    fn test_render_numbers_remaining_after_completed() {
        let mut state = WorkflowState::new("Why is pump 3 hot?", ConversationMemory::new().snapshot(), 3);
        state.record_step(Step::scada("Get temperature"), "x".repeat(150));
        state.plan.replace(vec![Step::manual("Find cooling procedure")]);

        let snapshot = ReviewSnapshot::capture(&state, &[ReviewWarning::DuplicateResults]);
        let text = snapshot.render();

        assert!(text.contains("Query: Why is pump 3 hot?"));
        assert!(text.contains("1. SCADA: Get temperature"));
        assert!(text.contains(&format!("Result: {}...", "x".repeat(100))));
        assert!(text.contains("2. MANUAL: Find cooling procedure"));
        assert!(text.contains("Consider choosing 'synthesize'"));
    }

    #[test]
    fn test_render_without_warnings() {
        let state = WorkflowState::new("q", ConversationMemory::new().snapshot(), 3);
        let text = ReviewSnapshot::capture(&state, &[]).render();
        assert!(!text.contains("Warnings"));
    }
}
