//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod dispatch_step;
pub mod plan_editor;
pub mod review_gate;
pub mod run_workflow;
pub(crate) mod shared;
