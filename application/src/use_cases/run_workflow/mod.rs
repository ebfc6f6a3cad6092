//! Run Workflow use case
//!
//! Orchestrates one diagnostic query through the bounded control loop:
//!
//! | Phase              | Component                         | On failure                 |
//! |--------------------|-----------------------------------|----------------------------|
//! | 1. Planning        | Planner oracle + step validator   | apology, loop skipped      |
//! | 2. Executing       | Tool dispatcher                   | error text as step result  |
//! | 3. Replanning      | Duplicate detector, replanner, budget | warning for the reviewer |
//! | 4. Awaiting human  | Review gate + plan editor         | timeout continues          |
//! | 5. Synthesizing    | Synthesizer oracle                | deterministic summary      |
//! | 6. Done            | Conversation memory               | default turn summary       |
//!
//! Steps 2–4 repeat at most `max_iterations` times. Every run ends with a
//! response and exactly one recorded turn, unless it is cancelled.

mod decisions;
mod planning;
mod replanning;
mod synthesis;
mod types;

pub use types::{RunWorkflowError, WorkflowOracles, WorkflowOutput};

use crate::config::WorkflowParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, event_types,
};
use crate::ports::decision_channel::DecisionChannel;
use crate::ports::human_review::HumanReviewPort;
use crate::ports::workflow_progress::{NoWorkflowProgress, WorkflowProgressNotifier};
use crate::use_cases::dispatch_step::DispatchStepUseCase;
use crate::use_cases::plan_editor::PlanEditor;
use crate::use_cases::review_gate::HumanReviewGate;
use crate::use_cases::shared::check_cancelled;
use gridwatch_domain::{
    ConversationMemory, PLANNING_FAILED_RESPONSE, ReviewWarning, TurnOutcome, WorkflowPhase,
    WorkflowState,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Use case for running diagnostic workflows.
///
/// Owns the session's [`ConversationMemory`]; one instance serves one
/// conversation.
pub struct RunWorkflowUseCase {
    pub(super) oracles: WorkflowOracles,
    pub(super) dispatcher: DispatchStepUseCase,
    pub(super) editor: PlanEditor,
    pub(super) gate: HumanReviewGate,
    pub(super) params: WorkflowParams,
    pub(super) memory: ConversationMemory,
    pub(super) logger: Arc<dyn ConversationLogger>,
    pub(super) cancellation_token: Option<CancellationToken>,
}

impl RunWorkflowUseCase {
    pub fn new(
        oracles: WorkflowOracles,
        dispatcher: DispatchStepUseCase,
        reviewer: Arc<dyn HumanReviewPort>,
        params: WorkflowParams,
    ) -> Self {
        let editor = PlanEditor::new(
            Arc::clone(&oracles.editor),
            params.budget,
            params.modify_plan_cap,
        );
        let gate = HumanReviewGate::new(reviewer, params.review_timeout);
        Self {
            oracles,
            dispatcher,
            editor,
            gate,
            params,
            memory: ConversationMemory::new(),
            logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    /// Set a structured conversation logger
    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn params(&self) -> &WorkflowParams {
        &self.params
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn clear_memory(&mut self) {
        info!("Clearing conversation memory ({} turns)", self.memory.len());
        self.memory.clear();
    }

    /// Run a query without progress reporting.
    pub async fn run(&mut self, query: &str) -> Result<WorkflowOutput, RunWorkflowError> {
        self.run_with_progress(query, &NoWorkflowProgress).await
    }

    /// Run a query with a fresh decision channel.
    pub async fn run_with_progress(
        &mut self,
        query: &str,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<WorkflowOutput, RunWorkflowError> {
        let channel = Arc::new(DecisionChannel::new());
        self.run_with_channel(query, channel, progress).await
    }

    /// Run a query whose review decisions arrive on `channel`.
    ///
    /// Callers that submit decisions from elsewhere (another task, a request
    /// handler) keep a clone of the channel.
    pub async fn run_with_channel(
        &mut self,
        query: &str,
        channel: Arc<DecisionChannel>,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<WorkflowOutput, RunWorkflowError> {
        let mut state = WorkflowState::new(
            query.trim(),
            self.memory.snapshot(),
            self.params.recent_turns,
        );
        let mut warnings = Vec::new();

        info!(
            "Starting diagnostic workflow (turn {}): {}",
            state.turn_number, state.input
        );
        self.log(
            event_types::WORKFLOW_STARTED,
            serde_json::json!({
                "query": state.input,
                "turn_number": state.turn_number,
                "has_context": !state.current_turn_context.is_empty(),
            }),
        );

        check_cancelled(&self.cancellation_token)?;

        // Phase 1: Planning
        self.enter(&mut state, WorkflowPhase::Planning, progress);
        match self.create_plan(&state).await {
            Some(steps) => {
                progress.on_plan_created(&steps);
                state.plan.replace(steps);
            }
            None => {
                state.respond(PLANNING_FAILED_RESPONSE, TurnOutcome::PlanningFailed);
            }
        }

        if !state.has_response() {
            // Phases 2-4: bounded loop
            self.run_loop(&mut state, &channel, progress, &mut warnings)
                .await?;

            // Phase 5: final review if the cap was hit, then synthesis
            self.finish(&mut state, &channel, progress, &mut warnings)
                .await?;
        }

        // Phase 6: archive the turn
        Ok(self.record_turn(state, progress, warnings).await)
    }

    async fn run_loop(
        &self,
        state: &mut WorkflowState,
        channel: &Arc<DecisionChannel>,
        progress: &dyn WorkflowProgressNotifier,
        warnings: &mut Vec<ReviewWarning>,
    ) -> Result<(), RunWorkflowError> {
        let max = self.params.max_iterations;

        while state.should_continue() && state.iteration < max {
            check_cancelled(&self.cancellation_token)?;
            state.iteration += 1;
            info!("Iteration {}/{}", state.iteration, max);
            progress.on_iteration(state.iteration, max);

            let Some(step) = state.plan.pop_front() else {
                info!("Plan is empty; moving to synthesis");
                state.mark_ready();
                break;
            };

            // Executing
            self.enter(state, WorkflowPhase::Executing, progress);
            progress.on_step_start(&step);
            let result = self.dispatcher.execute(&step, &state.input).await;
            progress.on_step_complete(&step, &result);
            self.log(
                event_types::STEP_EXECUTED,
                serde_json::json!({
                    "iteration": state.iteration,
                    "tool": step.tool(),
                    "description": step.description(),
                    "result": result,
                }),
            );
            state.record_step(step, result);

            // Replanning
            check_cancelled(&self.cancellation_token)?;
            self.enter(state, WorkflowPhase::Replanning, progress);
            let active = self.replan(state, progress).await;
            for warning in &active {
                progress.on_warning(warning);
            }
            warnings.extend(active.iter().cloned());

            // Awaiting human
            if state.should_continue() {
                let resolution = self.review(state, &active, channel, progress).await?;
                self.apply_decision(state, resolution, progress, warnings)
                    .await;
            }
        }

        Ok(())
    }

    pub(super) fn enter(
        &self,
        state: &mut WorkflowState,
        phase: WorkflowPhase,
        progress: &dyn WorkflowProgressNotifier,
    ) {
        if state.phase != phase {
            debug!("Phase: {} -> {}", state.phase.as_str(), phase.as_str());
        }
        state.phase = phase;
        progress.on_phase_change(phase);
    }

    pub(super) fn log(&self, event_type: &'static str, payload: serde_json::Value) {
        self.logger.log(ConversationEvent::new(event_type, payload));
    }
}
