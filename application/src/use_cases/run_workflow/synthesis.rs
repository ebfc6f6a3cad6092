//! Synthesis and turn archiving for the RunWorkflow use case.

use super::RunWorkflowUseCase;
use super::types::{RunWorkflowError, WorkflowOutput};
use crate::ports::conversation_logger::event_types;
use crate::ports::decision_channel::DecisionChannel;
use crate::ports::oracles::SynthesisRequest;
use crate::ports::workflow_progress::WorkflowProgressNotifier;
use crate::use_cases::shared::check_cancelled;
use gridwatch_domain::{
    ConversationTurn, DEFAULT_TURN_SUMMARY, HumanAction, ReviewWarning, TurnOutcome,
    UNRESOLVED_RESPONSE, WorkflowPhase, WorkflowState, fallback_summary,
};
use std::sync::Arc;
use tracing::{info, warn};

impl RunWorkflowUseCase {
    /// Close the loop: one last review if the iteration cap was reached,
    /// then synthesis or the unresolved notice.
    pub(super) async fn finish(
        &self,
        state: &mut WorkflowState,
        channel: &Arc<DecisionChannel>,
        progress: &dyn WorkflowProgressNotifier,
        warnings: &mut Vec<ReviewWarning>,
    ) -> Result<(), RunWorkflowError> {
        if state.should_continue() && state.iteration > 0 {
            info!(
                "Iteration cap ({}) reached; final review",
                self.params.max_iterations
            );
            let resolution = self.review(state, &[], channel, progress).await?;
            match resolution.decision().action {
                HumanAction::Synthesize | HumanAction::Quit => {
                    self.apply_decision(state, resolution, progress, warnings)
                        .await;
                }
                HumanAction::Continue | HumanAction::Edit => {
                    // No iterations left to act on an edit.
                    let decision = resolution.decision();
                    progress.on_decision(&decision, resolution.timed_out());
                    self.log(
                        event_types::HUMAN_DECISION,
                        serde_json::json!({
                            "action": decision.action,
                            "feedback": decision.feedback(),
                            "timed_out": resolution.timed_out(),
                            "final": true,
                        }),
                    );
                }
            }
        }

        check_cancelled(&self.cancellation_token)?;

        if state.needs_synthesis() {
            self.synthesize(state, progress).await;
        } else if !state.has_response() {
            warn!("Workflow ended without a response");
            state.respond(UNRESOLVED_RESPONSE, TurnOutcome::Unresolved);
        }
        Ok(())
    }

    async fn synthesize(&self, state: &mut WorkflowState, progress: &dyn WorkflowProgressNotifier) {
        self.enter(state, WorkflowPhase::Synthesizing, progress);
        let request = SynthesisRequest {
            query: &state.input,
            past_steps: state.past_steps(),
            guidance: state.synthesis_feedback.as_deref(),
        };

        let (response, outcome) = match self.oracles.synthesizer.synthesize(request).await {
            Ok(text) if !text.trim().is_empty() => (text.trim().to_string(), TurnOutcome::Synthesized),
            Ok(_) => {
                warn!("Synthesizer returned an empty answer; using summary fallback");
                (
                    fallback_summary(&state.input, state.completed()),
                    TurnOutcome::SynthesisFallback,
                )
            }
            Err(e) => {
                warn!("Synthesizer failed: {}; using summary fallback", e);
                (
                    fallback_summary(&state.input, state.completed()),
                    TurnOutcome::SynthesisFallback,
                )
            }
        };

        self.log(
            event_types::SYNTHESIS_COMPLETED,
            serde_json::json!({
                "outcome": outcome,
                "steps": state.completed(),
                "response_len": response.len(),
            }),
        );
        state.respond(response, outcome);
    }

    /// Archive the finished turn and build the caller's output.
    pub(super) async fn record_turn(
        &mut self,
        state: WorkflowState,
        progress: &dyn WorkflowProgressNotifier,
        warnings: Vec<ReviewWarning>,
    ) -> WorkflowOutput {
        let outcome = state.outcome.unwrap_or(TurnOutcome::Unresolved);

        let summary = match self
            .oracles
            .synthesizer
            .summarize_turn(&state.input, state.completed(), &state.response)
            .await
        {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => DEFAULT_TURN_SUMMARY.to_string(),
            Err(e) => {
                warn!("Turn summary failed: {}", e);
                DEFAULT_TURN_SUMMARY.to_string()
            }
        };

        let turn_number = state.turn_number;
        let query = state.input.clone();
        let response = state.response.clone();
        let final_phase = if state.phase == WorkflowPhase::Aborted {
            WorkflowPhase::Aborted
        } else {
            WorkflowPhase::Done
        };
        let steps = state.into_past_steps();

        self.memory.append(ConversationTurn::new(
            query.clone(),
            steps.clone(),
            response.clone(),
            summary,
            outcome,
        ));
        info!(
            "Turn {} recorded ({}, {} steps)",
            turn_number,
            outcome,
            steps.len()
        );
        self.log(
            event_types::TURN_RECORDED,
            serde_json::json!({
                "turn_number": turn_number,
                "outcome": outcome,
                "steps": steps.len(),
                "warnings": warnings.len(),
            }),
        );

        progress.on_phase_change(final_phase);
        progress.on_complete(outcome);

        WorkflowOutput {
            query,
            response,
            turn_number,
            steps,
            outcome,
            warnings,
        }
    }
}
