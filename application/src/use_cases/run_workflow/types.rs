//! Type definitions for the RunWorkflow use case.

use crate::ports::oracles::{PlanEditorOracle, PlannerOracle, ReplannerOracle, SynthesizerOracle};
use gridwatch_domain::{PastStep, ReviewWarning, TurnOutcome};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can escape a workflow run.
///
/// Oracle, tool and review failures are absorbed into warnings or fallback
/// text; only cooperative cancellation stops a run.
#[derive(Error, Debug)]
pub enum RunWorkflowError {
    #[error("Operation cancelled")]
    Cancelled,
}

impl RunWorkflowError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunWorkflowError::Cancelled)
    }
}

/// The decision oracles a workflow consults.
#[derive(Clone)]
pub struct WorkflowOracles {
    pub planner: Arc<dyn PlannerOracle>,
    pub replanner: Arc<dyn ReplannerOracle>,
    pub synthesizer: Arc<dyn SynthesizerOracle>,
    pub editor: Arc<dyn PlanEditorOracle>,
}

/// Result of one workflow run.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowOutput {
    pub query: String,
    pub response: String,
    pub turn_number: usize,
    pub steps: Vec<PastStep>,
    pub outcome: TurnOutcome,
    /// Every warning raised during the run, in order.
    pub warnings: Vec<ReviewWarning>,
}
