//! Prompt domain
//!
//! Templates for the planning, replanning, plan-editing, synthesis and
//! turn-summary oracle calls.

pub mod diagnostic;

pub use diagnostic::DiagnosticPromptTemplate;
