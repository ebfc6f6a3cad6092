//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Step has no recognized tool tag: {0}")]
    UntaggedStep(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown review decision: {0}")]
    UnknownDecision(String),

    #[error("Invalid step budget: soft limit {soft} must not exceed hard limit {hard}")]
    InvalidBudget { soft: usize, hard: usize },

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}
