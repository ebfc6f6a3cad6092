//! Replanning phase for the RunWorkflow use case.
//!
//! Runs after every executed step: duplicate check, replanner call, budget
//! check, plan merge. Anything that goes wrong becomes a [`ReviewWarning`]
//! for the next review.

use super::RunWorkflowUseCase;
use crate::ports::conversation_logger::event_types;
use crate::ports::oracles::ReplanRequest;
use crate::ports::workflow_progress::WorkflowProgressNotifier;
use gridwatch_domain::{
    ReplanOutcome, ReviewWarning, TurnOutcome, WorkflowState, detect_duplicate_with,
};
use tracing::{debug, info, warn};

impl RunWorkflowUseCase {
    /// Decide what follows the step that just ran.
    ///
    /// Returns the warnings raised in this iteration.
    pub(super) async fn replan(
        &self,
        state: &mut WorkflowState,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Vec<ReviewWarning> {
        if detect_duplicate_with(state.past_steps(), self.params.duplicate_prefix_chars) {
            warn!("Last two steps returned identical results");
            self.log(
                event_types::REPLAN_DECIDED,
                serde_json::json!({ "outcome": "duplicate", "iteration": state.iteration }),
            );
            return vec![ReviewWarning::DuplicateResults];
        }

        let feedback = state.human_feedback.take();
        let remaining = state.plan.to_vec();
        let request = ReplanRequest {
            query: &state.input,
            past_steps: state.past_steps(),
            remaining: &remaining,
            feedback: feedback.as_deref(),
        };

        let outcome = match self.oracles.replanner.replan(request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Replanner failed: {}", e);
                self.log(
                    event_types::REPLAN_DECIDED,
                    serde_json::json!({ "outcome": "failed", "error": e.to_string() }),
                );
                return vec![ReviewWarning::ReplanFailed {
                    reason: e.to_string(),
                }];
            }
        };
        progress.on_replan(&outcome);

        let mut warnings = Vec::new();
        let mut added = 0;
        match &outcome {
            ReplanOutcome::Synthesize => {
                info!("Replanner signalled synthesis");
                state.mark_ready();
            }
            ReplanOutcome::DirectResponse(text) if text.trim().is_empty() => {
                warn!("Replanner returned an empty response");
                warnings.push(ReviewWarning::ReplanFailed {
                    reason: "empty response".to_string(),
                });
            }
            ReplanOutcome::DirectResponse(text) => {
                info!("Replanner answered directly");
                state.respond(text.trim(), TurnOutcome::DirectResponse);
            }
            ReplanOutcome::NewSteps(steps) if steps.is_empty() => {
                info!("Replanner proposed no further steps");
                state.mark_ready();
            }
            ReplanOutcome::NewSteps(steps) => {
                let budget = self.params.budget;
                let decision = budget.evaluate(state.completed(), steps);
                match ReviewWarning::from_budget(decision, budget.soft(), budget.hard()) {
                    Some(warning) => {
                        warn!("Rejected replan: {}", warning);
                        warnings.push(warning);
                    }
                    None => {
                        added = state.plan.append_unique(steps.clone());
                        debug!("Appended {} of {} proposed steps", added, steps.len());
                        if added == 0 {
                            info!("All proposed steps already planned; moving to synthesis");
                            state.mark_ready();
                        }
                    }
                }
            }
        }

        self.log(
            event_types::REPLAN_DECIDED,
            serde_json::json!({
                "outcome": outcome.kind(),
                "iteration": state.iteration,
                "added": added,
                "warnings": warnings,
            }),
        );

        warnings
    }
}
