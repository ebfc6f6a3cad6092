//! Human review for the RunWorkflow use case.
//!
//! Opens the review gate and applies the decision it resolves to.

use super::RunWorkflowUseCase;
use super::types::RunWorkflowError;
use crate::ports::conversation_logger::event_types;
use crate::ports::decision_channel::DecisionChannel;
use crate::ports::human_review::GateResolution;
use crate::ports::workflow_progress::WorkflowProgressNotifier;
use crate::use_cases::plan_editor::{EditSource, PlanEdit};
use gridwatch_domain::{HumanAction, ReviewSnapshot, ReviewWarning, WorkflowPhase, WorkflowState};
use std::sync::Arc;
use tracing::{info, warn};

impl RunWorkflowUseCase {
    /// Run one review cycle with the warnings of the current iteration.
    ///
    /// Fails with `Cancelled` when the run is cancelled during the wait.
    pub(super) async fn review(
        &self,
        state: &mut WorkflowState,
        warnings: &[ReviewWarning],
        channel: &Arc<DecisionChannel>,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<GateResolution, RunWorkflowError> {
        self.enter(state, WorkflowPhase::AwaitingHuman, progress);
        let snapshot = ReviewSnapshot::capture(state, warnings);
        self.log(
            event_types::REVIEW_OPENED,
            serde_json::json!({
                "iteration": snapshot.iteration,
                "completed": snapshot.completed.len(),
                "remaining": snapshot.remaining.len(),
                "warnings": snapshot.warnings,
            }),
        );
        match self
            .gate
            .review(&snapshot, channel, self.cancellation_token.as_ref())
            .await
        {
            GateResolution::Cancelled => Err(RunWorkflowError::Cancelled),
            resolution => Ok(resolution),
        }
    }

    /// Apply a resolved review decision to the state.
    pub(super) async fn apply_decision(
        &self,
        state: &mut WorkflowState,
        resolution: GateResolution,
        progress: &dyn WorkflowProgressNotifier,
        warnings: &mut Vec<ReviewWarning>,
    ) {
        let timed_out = resolution.timed_out();
        let decision = resolution.decision();
        progress.on_decision(&decision, timed_out);
        self.log(
            event_types::HUMAN_DECISION,
            serde_json::json!({
                "action": decision.action,
                "feedback": decision.feedback(),
                "timed_out": timed_out,
            }),
        );

        match (decision.action, decision.feedback()) {
            (HumanAction::Quit, _) => {
                info!("Reviewer aborted the workflow");
                state.abort();
            }
            (HumanAction::Synthesize, feedback) => {
                info!("Reviewer requested synthesis");
                state.synthesis_feedback = feedback.map(String::from);
                state.mark_ready();
            }
            (HumanAction::Edit, None) => {
                warn!("Edit requested without feedback; plan unchanged");
                let warning = ReviewWarning::EditWithoutFeedback;
                progress.on_warning(&warning);
                warnings.push(warning);
            }
            (HumanAction::Edit, Some(feedback)) => {
                let edit = self
                    .editor
                    .replace(&state.input, state.past_steps(), feedback)
                    .await;
                self.apply_edit(state, edit, feedback, "replace", progress, warnings);
            }
            (HumanAction::Continue, Some(feedback)) => {
                let remaining = state.plan.to_vec();
                let edit = self
                    .editor
                    .modify(&state.input, state.past_steps(), &remaining, feedback)
                    .await;
                self.apply_edit(state, edit, feedback, "modify", progress, warnings);
            }
            (HumanAction::Continue, None) => {}
        }
    }

    fn apply_edit(
        &self,
        state: &mut WorkflowState,
        edit: PlanEdit,
        feedback: &str,
        mode: &'static str,
        progress: &dyn WorkflowProgressNotifier,
        warnings: &mut Vec<ReviewWarning>,
    ) {
        if let Some(warning) = edit.warning {
            progress.on_warning(&warning);
            warnings.push(warning);
        }
        info!("Plan edited from feedback ({}): {} steps", mode, edit.steps.len());
        progress.on_plan_edited(&edit.steps);
        self.log(
            event_types::PLAN_EDITED,
            serde_json::json!({
                "mode": mode,
                "fallback": edit.source == EditSource::Fallback,
                "steps": edit.steps.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            }),
        );
        state.plan.replace(edit.steps);
        state.human_feedback = Some(feedback.to_string());
    }
}
