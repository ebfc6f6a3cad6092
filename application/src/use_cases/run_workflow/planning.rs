//! Planning phase for the RunWorkflow use case.

use super::RunWorkflowUseCase;
use crate::ports::conversation_logger::event_types;
use crate::ports::oracles::PlanRequest;
use gridwatch_domain::{Step, WorkflowState, validate_steps};
use tracing::{debug, info, warn};

impl RunWorkflowUseCase {
    /// Ask the planner for a first plan and validate it.
    ///
    /// Returns `None` only when the planner itself failed. An unusable plan
    /// still yields the default data-gathering step.
    pub(super) async fn create_plan(&self, state: &WorkflowState) -> Option<Vec<Step>> {
        let request = PlanRequest {
            query: &state.input,
            context: &state.current_turn_context,
            turn_number: state.turn_number,
        };

        let raw = match self.oracles.planner.plan(request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Planner failed: {}", e);
                return None;
            }
        };
        debug!("Planner proposed {} steps", raw.len());

        let validation = validate_steps(raw.as_slice());
        for rejected in &validation.rejected {
            debug!("Dropped step '{}': {}", rejected.raw, rejected.reason.as_str());
        }
        if validation.used_default {
            warn!("No valid steps in plan; using default step");
        }

        info!("Plan created with {} steps", validation.steps.len());
        self.log(
            event_types::PLAN_CREATED,
            serde_json::json!({
                "steps": validation.steps.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
                "rejected": validation.rejected.len(),
                "used_default": validation.used_default,
            }),
        );

        Some(validation.into_steps())
    }
}
