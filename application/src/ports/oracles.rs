//! Decision oracle ports.
//!
//! The workflow consults external oracles for planning, replanning, plan
//! edits and synthesis. Their internal logic is out of scope here; any error
//! they return is absorbed by the caller into a warning or fallback value.

use async_trait::async_trait;
use gridwatch_domain::{PastStep, ReplanOutcome, Step};
use thiserror::Error;

use super::llm_gateway::GatewayError;

/// Errors an oracle may report.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Unparseable response: {0}")]
    Unparseable(String),

    #[error("Empty response")]
    EmptyResponse,
}

/// Input to the planner.
#[derive(Debug, Clone, Copy)]
pub struct PlanRequest<'a> {
    pub query: &'a str,
    /// Rendered conversation context; empty on the first turn.
    pub context: &'a str,
    pub turn_number: usize,
}

/// Input to the replanner.
#[derive(Debug, Clone, Copy)]
pub struct ReplanRequest<'a> {
    pub query: &'a str,
    pub past_steps: &'a [PastStep],
    pub remaining: &'a [Step],
    /// Most recent reviewer feedback, if any.
    pub feedback: Option<&'a str>,
}

/// Input to the synthesizer.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisRequest<'a> {
    pub query: &'a str,
    pub past_steps: &'a [PastStep],
    /// Feedback given with the Synthesize decision.
    pub guidance: Option<&'a str>,
}

/// Produces an initial plan. Output is unvalidated.
#[async_trait]
pub trait PlannerOracle: Send + Sync {
    async fn plan(&self, request: PlanRequest<'_>) -> Result<Vec<String>, OracleError>;
}

/// Rewrites a plan around reviewer feedback. Output is unvalidated.
#[async_trait]
pub trait PlanEditorOracle: Send + Sync {
    /// Produce a replacement plan (reviewer chose Edit).
    async fn replace_plan(
        &self,
        query: &str,
        past_steps: &[PastStep],
        feedback: &str,
    ) -> Result<Vec<String>, OracleError>;

    /// Rewrite the remaining plan in place (reviewer chose Continue with feedback).
    async fn modify_plan(
        &self,
        query: &str,
        past_steps: &[PastStep],
        remaining: &[Step],
        feedback: &str,
        cap: usize,
    ) -> Result<Vec<String>, OracleError>;
}

/// Decides what happens after a step ran.
#[async_trait]
pub trait ReplannerOracle: Send + Sync {
    async fn replan(&self, request: ReplanRequest<'_>) -> Result<ReplanOutcome, OracleError>;
}

/// Writes the final answer and the per-turn summary.
#[async_trait]
pub trait SynthesizerOracle: Send + Sync {
    async fn synthesize(&self, request: SynthesisRequest<'_>) -> Result<String, OracleError>;

    /// Summarize a finished turn's key findings in a few sentences.
    async fn summarize_turn(
        &self,
        query: &str,
        step_count: usize,
        response: &str,
    ) -> Result<String, OracleError>;
}
