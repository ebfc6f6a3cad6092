//! Workflow subdomain - the diagnostic control loop's data and pure rules.
//!
//! The orchestration itself lives in the application layer; everything here
//! is deterministic and free of I/O:
//!
//! - [`step`] - [`Step`](step::Step), [`ToolKind`](step::ToolKind), [`PastStep`](step::PastStep)
//! - [`validation`] - raw proposals to typed steps, never empty
//! - [`duplicate`] - repeated-result detection
//! - [`budget`] - soft/hard step limits
//! - [`state`] - per-query [`WorkflowState`](state::WorkflowState)
//! - [`response_parser`] - tolerant JSON extraction from oracle output

pub mod budget;
pub mod decision;
pub mod duplicate;
pub mod outcome;
pub mod plan;
pub mod replan;
pub mod response_parser;
pub mod review;
pub mod state;
pub mod step;
pub mod validation;
pub mod warning;
