//! Workflow state - the unit of execution for one query.

use super::outcome::TurnOutcome;
use super::plan::Plan;
use super::step::{PastStep, Step};
use crate::conversation::ConversationSnapshot;
use serde::{Deserialize, Serialize};

/// Where the control loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    Planning,
    Executing,
    Replanning,
    AwaitingHuman,
    Synthesizing,
    Done,
    Aborted,
}

impl WorkflowPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowPhase::Planning => "planning",
            WorkflowPhase::Executing => "executing",
            WorkflowPhase::Replanning => "replanning",
            WorkflowPhase::AwaitingHuman => "awaiting_human",
            WorkflowPhase::Synthesizing => "synthesizing",
            WorkflowPhase::Done => "done",
            WorkflowPhase::Aborted => "aborted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowPhase::Done | WorkflowPhase::Aborted)
    }
}

/// State for one query, created fresh per call and discarded once the turn
/// is archived.
///
/// `past_steps` is append-only: the only way in is [`record_step`](Self::record_step).
#[derive(Debug, Clone)]
pub struct WorkflowState {
    pub input: String,
    pub plan: Plan,
    past_steps: Vec<PastStep>,
    pub response: String,
    pub ready_for_synthesis: bool,
    pub turn_number: usize,
    pub conversation_history: ConversationSnapshot,
    pub current_turn_context: String,
    pub phase: WorkflowPhase,
    /// Loop iterations started so far.
    pub iteration: usize,
    /// Latest Continue/Edit feedback, handed to the next replanner call.
    pub human_feedback: Option<String>,
    /// Feedback given together with a Synthesize decision.
    pub synthesis_feedback: Option<String>,
    pub outcome: Option<TurnOutcome>,
}

impl WorkflowState {
    pub fn new(input: impl Into<String>, history: ConversationSnapshot, recent_turns: usize) -> Self {
        let input = input.into();
        let current_turn_context = history.context_for(&input, recent_turns);
        let turn_number = history.next_turn_number();
        Self {
            input,
            plan: Plan::default(),
            past_steps: Vec::new(),
            response: String::new(),
            ready_for_synthesis: false,
            turn_number,
            conversation_history: history,
            current_turn_context,
            phase: WorkflowPhase::Planning,
            iteration: 0,
            human_feedback: None,
            synthesis_feedback: None,
            outcome: None,
        }
    }

    pub fn past_steps(&self) -> &[PastStep] {
        &self.past_steps
    }

    pub fn into_past_steps(self) -> Vec<PastStep> {
        self.past_steps
    }

    pub fn completed(&self) -> usize {
        self.past_steps.len()
    }

    pub fn record_step(&mut self, step: Step, result: impl Into<String>) {
        self.past_steps.push(PastStep::new(step, result));
    }

    pub fn has_response(&self) -> bool {
        !self.response.is_empty()
    }

    /// Loop condition: neither ready for synthesis nor answered.
    pub fn should_continue(&self) -> bool {
        !self.ready_for_synthesis && !self.has_response()
    }

    pub fn needs_synthesis(&self) -> bool {
        self.ready_for_synthesis && !self.has_response()
    }

    /// Set the final response and how it was reached.
    pub fn respond(&mut self, text: impl Into<String>, outcome: TurnOutcome) {
        self.response = text.into();
        self.outcome = Some(outcome);
    }

    pub fn mark_ready(&mut self) {
        self.ready_for_synthesis = true;
    }

    pub fn abort(&mut self) {
        self.respond(super::outcome::ABORTED_RESPONSE, TurnOutcome::Aborted);
        self.phase = WorkflowPhase::Aborted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{ConversationMemory, ConversationTurn};

    #[test]
    fn test_new_state_from_empty_history() {
        let memory = ConversationMemory::new();
        let state = WorkflowState::new("What is the pressure in March?", memory.snapshot(), 3);
        assert_eq!(state.turn_number, 1);
        assert!(state.current_turn_context.is_empty());
        assert!(state.should_continue());
        assert!(!state.needs_synthesis());
        assert_eq!(state.phase, WorkflowPhase::Planning);
    }

    #[test]
    fn test_turn_number_follows_history() {
        let mut memory = ConversationMemory::new();
        memory.append(ConversationTurn::new(
            "q1",
            vec![],
            "r1",
            "s1",
            TurnOutcome::Synthesized,
        ));
        let state = WorkflowState::new("q2", memory.snapshot(), 3);
        assert_eq!(state.turn_number, 2);
        assert!(state.current_turn_context.contains("Current query: q2"));
    }

    #[test]
    fn test_record_and_respond() {
        let mut state = WorkflowState::new("q", ConversationMemory::new().snapshot(), 3);
        state.record_step(Step::scada("Get readings"), "42 PSI");
        assert_eq!(state.completed(), 1);
        state.mark_ready();
        assert!(state.needs_synthesis());
        state.respond("answer", TurnOutcome::Synthesized);
        assert!(!state.should_continue());
        assert!(!state.needs_synthesis());
    }

    #[test]
    fn test_abort() {
        let mut state = WorkflowState::new("q", ConversationMemory::new().snapshot(), 3);
        state.abort();
        assert_eq!(state.response, "Workflow aborted by human.");
        assert_eq!(state.outcome, Some(TurnOutcome::Aborted));
        assert!(state.phase.is_terminal());
    }
}
