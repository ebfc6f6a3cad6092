//! Application-level configuration.
//!
//! - [`WorkflowParams`] - control loop limits, budget and review timeout

pub mod workflow_params;

pub use workflow_params::WorkflowParams;
