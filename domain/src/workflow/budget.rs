//! Step budget enforcement.
//!
//! Totals count completed steps plus the newly proposed ones:
//!
//! | total            | decision                                      |
//! |------------------|-----------------------------------------------|
//! | `<= soft`        | allowed                                       |
//! | `soft < t <= hard` | allowed only for consolidated proposals     |
//! | `> hard`         | rejected                                      |

use super::step::Step;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Description length above which a step counts as consolidated.
const CONSOLIDATED_LENGTH: usize = 80;

/// Soft/hard limits on steps per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepBudget {
    soft: usize,
    hard: usize,
}

impl Default for StepBudget {
    fn default() -> Self {
        Self { soft: 3, hard: 5 }
    }
}

/// Outcome of a budget check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetDecision {
    Allowed,
    SoftLimitExceeded { total: usize },
    HardLimitExceeded { total: usize },
}

impl BudgetDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, BudgetDecision::Allowed)
    }
}

impl StepBudget {
    pub fn new(soft: usize, hard: usize) -> Result<Self, DomainError> {
        if soft > hard {
            return Err(DomainError::InvalidBudget { soft, hard });
        }
        Ok(Self { soft, hard })
    }

    pub fn soft(&self) -> usize {
        self.soft
    }

    pub fn hard(&self) -> usize {
        self.hard
    }

    /// Check a proposal of new steps against the budget.
    pub fn evaluate(&self, completed: usize, proposed: &[Step]) -> BudgetDecision {
        let total = completed + proposed.len();
        if total > self.hard {
            BudgetDecision::HardLimitExceeded { total }
        } else if total > self.soft && !is_consolidated(proposed) {
            BudgetDecision::SoftLimitExceeded { total }
        } else {
            BudgetDecision::Allowed
        }
    }

    /// Number of steps still allowed before the hard limit, never below 1.
    pub fn hard_headroom(&self, completed: usize) -> usize {
        self.hard.saturating_sub(completed).max(1)
    }
}

/// Proposals that fold several lookups into broad steps are let through
/// the soft limit.
pub fn is_consolidated(proposed: &[Step]) -> bool {
    proposed.iter().any(|step| {
        let text = step.description().to_lowercase();
        text.chars().count() > CONSOLIDATED_LENGTH
            || text.contains("correlations")
            || text.split(|c: char| !c.is_alphanumeric()).any(|w| w == "and")
    })
}
