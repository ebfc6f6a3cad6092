//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod conversation_logger;
pub mod decision_channel;
pub mod human_review;
pub mod llm_gateway;
pub mod oracles;
pub mod tool_capability;
pub mod workflow_progress;
