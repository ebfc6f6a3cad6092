//! Domain layer for gridwatch
//!
//! This crate contains the core business logic, entities, and value objects
//! of the diagnostic workflow. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Workflow
//!
//! One query runs through a bounded loop:
//!
//! - **Plan**: an ordered queue of tagged [`Step`]s (`SCADA:` / `MANUAL:`)
//! - **Execute**: one step per iteration, recorded as a [`PastStep`]
//! - **Replan**: continue, synthesize, or answer directly ([`ReplanOutcome`])
//! - **Review**: a human checkpoint resolving to a [`HumanDecision`]
//!
//! Pure rules guard the loop: [`validate_steps`] never yields an empty plan,
//! [`detect_duplicate`] flags repeated results, and [`StepBudget`] bounds
//! the total step count.
//!
//! ## Conversation
//!
//! Completed queries become [`ConversationTurn`]s in a [`ConversationMemory`];
//! each new workflow reads an immutable [`ConversationSnapshot`].

pub mod config;
pub mod conversation;
pub mod core;
pub mod prompt;
pub mod workflow;

pub use config::{OutputFormat, ReviewMode};
pub use conversation::{ConversationMemory, ConversationSnapshot, ConversationTurn};
pub use core::error::DomainError;
pub use prompt::DiagnosticPromptTemplate;
pub use workflow::{
    budget::{BudgetDecision, StepBudget},
    decision::{HumanAction, HumanDecision},
    duplicate::{DUPLICATE_PREFIX_CHARS, detect_duplicate, detect_duplicate_with},
    outcome::{
        ABORTED_RESPONSE, DEFAULT_TURN_SUMMARY, PLANNING_FAILED_RESPONSE, TurnOutcome,
        UNRESOLVED_RESPONSE, fallback_summary,
    },
    plan::Plan,
    replan::ReplanOutcome,
    response_parser::{ReplanReply, parse_plan_steps, parse_replan_response},
    review::ReviewSnapshot,
    state::{WorkflowPhase, WorkflowState},
    step::{PastStep, Step, ToolKind},
    validation::{StepValidation, default_step, validate_steps},
    warning::ReviewWarning,
};
