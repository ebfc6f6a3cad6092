//! Workflow configuration from TOML (`[workflow]` section)

use gridwatch_application::WorkflowParams;
use gridwatch_domain::{DUPLICATE_PREFIX_CHARS, StepBudget, conversation::DEFAULT_RECENT_TURNS};
use serde::{Deserialize, Serialize};

/// Raw control-loop limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkflowConfig {
    pub max_iterations: usize,
    pub soft_step_limit: usize,
    pub hard_step_limit: usize,
    pub duplicate_prefix_chars: usize,
    pub modify_plan_cap: usize,
    pub recent_turns_in_context: usize,
}

impl Default for FileWorkflowConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            soft_step_limit: 3,
            hard_step_limit: 5,
            duplicate_prefix_chars: DUPLICATE_PREFIX_CHARS,
            modify_plan_cap: 3,
            recent_turns_in_context: DEFAULT_RECENT_TURNS,
        }
    }
}

impl FileWorkflowConfig {
    /// Convert to application params.
    ///
    /// Inverted step limits fall back to the default budget; validation
    /// reports them separately.
    pub fn to_params(&self) -> WorkflowParams {
        let budget =
            StepBudget::new(self.soft_step_limit, self.hard_step_limit).unwrap_or_default();
        WorkflowParams::default()
            .with_max_iterations(self.max_iterations)
            .with_budget(budget)
            .with_duplicate_prefix_chars(self.duplicate_prefix_chars)
            .with_modify_plan_cap(self.modify_plan_cap)
            .with_recent_turns(self.recent_turns_in_context)
    }
}
