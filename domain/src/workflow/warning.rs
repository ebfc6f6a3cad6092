//! Advisory warnings surfaced to the reviewer.

use super::budget::BudgetDecision;
use serde::{Deserialize, Serialize};

/// A non-fatal condition the reviewer should know about.
///
/// Warnings never terminate the workflow on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReviewWarning {
    /// The last two step results were identical.
    DuplicateResults,
    /// A proposal would exceed the step budget.
    TooManySteps { total: usize, limit: usize, hard: bool },
    /// The replanner failed or returned something unusable.
    ReplanFailed { reason: String },
    /// Edit was chosen without feedback; the plan was left unchanged.
    EditWithoutFeedback,
}

impl ReviewWarning {
    /// Build a warning from a rejected budget decision.
    pub fn from_budget(decision: BudgetDecision, soft: usize, hard: usize) -> Option<Self> {
        match decision {
            BudgetDecision::Allowed => None,
            BudgetDecision::SoftLimitExceeded { total } => Some(ReviewWarning::TooManySteps {
                total,
                limit: soft,
                hard: false,
            }),
            BudgetDecision::HardLimitExceeded { total } => Some(ReviewWarning::TooManySteps {
                total,
                limit: hard,
                hard: true,
            }),
        }
    }

    pub fn message(&self) -> String {
        match self {
            ReviewWarning::DuplicateResults => {
                "The last step returned identical results to the previous step.".to_string()
            }
            ReviewWarning::TooManySteps { total, limit, hard } => format!(
                "Too many steps planned ({} > {}{}).",
                total,
                limit,
                if *hard { ", hard limit" } else { "" }
            ),
            ReviewWarning::ReplanFailed { reason } => format!("Replanning failed: {}", reason),
            ReviewWarning::EditWithoutFeedback => {
                "Edit requested without feedback; plan unchanged.".to_string()
            }
        }
    }
}

impl std::fmt::Display for ReviewWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
