//! Workflow parameters - control loop limits.
//!
//! [`WorkflowParams`] groups the static parameters of
//! [`RunWorkflowUseCase`](crate::use_cases::run_workflow::RunWorkflowUseCase).
//! Defaults match the bounded diagnostic loop: 5 iterations, a 3/5 step
//! budget, and a 300 second review timeout.

use gridwatch_domain::{DUPLICATE_PREFIX_CHARS, StepBudget, conversation::DEFAULT_RECENT_TURNS};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct WorkflowParams {
    /// Maximum loop iterations per query.
    pub max_iterations: usize,
    /// Soft/hard limits on completed + proposed steps.
    pub budget: StepBudget,
    /// Leading characters compared by duplicate detection.
    pub duplicate_prefix_chars: usize,
    /// Maximum steps kept from a feedback-driven plan modification.
    pub modify_plan_cap: usize,
    /// How long a review waits before continuing unchanged.
    pub review_timeout: Duration,
    /// Past turns rendered into planning context.
    pub recent_turns: usize,
}

impl Default for WorkflowParams {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            budget: StepBudget::default(),
            duplicate_prefix_chars: DUPLICATE_PREFIX_CHARS,
            modify_plan_cap: 3,
            review_timeout: Duration::from_secs(300),
            recent_turns: DEFAULT_RECENT_TURNS,
        }
    }
}

impl WorkflowParams {
    // ==================== Builder Methods ====================

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_budget(mut self, budget: StepBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_duplicate_prefix_chars(mut self, chars: usize) -> Self {
        self.duplicate_prefix_chars = chars;
        self
    }

    pub fn with_modify_plan_cap(mut self, cap: usize) -> Self {
        self.modify_plan_cap = cap;
        self
    }

    pub fn with_review_timeout(mut self, timeout: Duration) -> Self {
        self.review_timeout = timeout;
        self
    }

    pub fn with_recent_turns(mut self, turns: usize) -> Self {
        self.recent_turns = turns;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = WorkflowParams::default();
        assert_eq!(params.max_iterations, 5);
        assert_eq!(params.budget.soft(), 3);
        assert_eq!(params.budget.hard(), 5);
        assert_eq!(params.duplicate_prefix_chars, 200);
        assert_eq!(params.modify_plan_cap, 3);
        assert_eq!(params.review_timeout, Duration::from_secs(300));
        assert_eq!(params.recent_turns, 3);
    }

    #[test]
    fn test_builder() {
        let params = WorkflowParams::default()
            .with_max_iterations(2)
            .with_review_timeout(Duration::from_secs(5))
            .with_modify_plan_cap(1);
        assert_eq!(params.max_iterations, 2);
        assert_eq!(params.review_timeout, Duration::from_secs(5));
        assert_eq!(params.modify_plan_cap, 1);
    }
}
