//! Workflow progress port.
//!
//! [`WorkflowProgressNotifier`] is an **output port** that the presentation
//! layer implements to show the control loop's progress. All callback
//! argument types come from the domain layer.
//!
//! All methods have default no-op implementations, so implementers only
//! need to override the callbacks they care about.

use gridwatch_domain::{
    HumanDecision, ReplanOutcome, ReviewWarning, Step, TurnOutcome, WorkflowPhase,
};

pub trait WorkflowProgressNotifier: Send + Sync {
    /// Called when the workflow enters a new phase
    fn on_phase_change(&self, _phase: WorkflowPhase) {}

    /// Called after planning with the validated plan
    fn on_plan_created(&self, _steps: &[Step]) {}

    /// Called at the start of each loop iteration
    fn on_iteration(&self, _iteration: usize, _max: usize) {}

    /// Called before a step is dispatched
    fn on_step_start(&self, _step: &Step) {}

    /// Called after a step returned
    fn on_step_complete(&self, _step: &Step, _result: &str) {}

    /// Called with the replanner's verdict
    fn on_replan(&self, _outcome: &ReplanOutcome) {}

    /// Called for every warning raised during the loop
    fn on_warning(&self, _warning: &ReviewWarning) {}

    /// Called when a review decision is applied
    fn on_decision(&self, _decision: &HumanDecision, _timed_out: bool) {}

    /// Called after the plan was replaced or modified from feedback
    fn on_plan_edited(&self, _steps: &[Step]) {}

    /// Called once the turn has a response
    fn on_complete(&self, _outcome: TurnOutcome) {}
}

/// No-op implementation
pub struct NoWorkflowProgress;

impl WorkflowProgressNotifier for NoWorkflowProgress {}
