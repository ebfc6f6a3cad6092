//! Application layer for gridwatch
//!
//! This crate contains use cases, port definitions, the LLM-backed oracles
//! and application configuration. It depends only on the domain layer.

pub mod config;
pub mod oracles;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::WorkflowParams;
pub use oracles::{LlmDiagnosticOracle, ProseSettings};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    decision_channel::DecisionChannel,
    human_review::{
        AutoContinueReviewer, AutoSynthesizeReviewer, GateResolution, HumanReviewPort,
    },
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    oracles::{OracleError, PlanEditorOracle, PlannerOracle, ReplannerOracle, SynthesizerOracle},
    tool_capability::{ToolCapability, ToolError, ToolRequest, UnconfiguredCapability},
    workflow_progress::{NoWorkflowProgress, WorkflowProgressNotifier},
};
pub use use_cases::dispatch_step::DispatchStepUseCase;
pub use use_cases::run_workflow::{
    RunWorkflowError, RunWorkflowUseCase, WorkflowOracles, WorkflowOutput,
};
