//! Human review port
//!
//! Presents a [`ReviewSnapshot`] to whoever decides and arranges for the
//! answer to be posted on the session's [`DecisionChannel`]. The gate waits
//! on the channel, not on this port, so a reviewer may answer at once, from
//! a background task, or never (the gate then times out to Continue).

use async_trait::async_trait;
use gridwatch_domain::{HumanDecision, ReviewSnapshot};
use std::sync::Arc;

use super::decision_channel::DecisionChannel;

/// How a review cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateResolution {
    /// A decision arrived on the channel.
    Resolved(HumanDecision),
    /// Nothing arrived in time; the workflow continues unchanged.
    TimedOut,
    /// The workflow was cancelled while waiting; no decision applies.
    Cancelled,
}

impl GateResolution {
    /// The decision the workflow applies.
    ///
    /// `Cancelled` also maps to Continue; callers stop the run before
    /// applying it.
    pub fn decision(&self) -> HumanDecision {
        match self {
            GateResolution::Resolved(decision) => decision.clone(),
            GateResolution::TimedOut | GateResolution::Cancelled => HumanDecision::continue_(),
        }
    }

    pub fn timed_out(&self) -> bool {
        matches!(self, GateResolution::TimedOut)
    }
}

#[async_trait]
pub trait HumanReviewPort: Send + Sync {
    /// Show the snapshot and start collecting a decision for `channel`.
    async fn present(&self, snapshot: &ReviewSnapshot, channel: Arc<DecisionChannel>);

    /// Called once the cycle is over; stop any pending input collection.
    async fn close(&self, _resolution: &GateResolution) {}
}

/// Answers every review with Continue.
pub struct AutoContinueReviewer;

#[async_trait]
impl HumanReviewPort for AutoContinueReviewer {
    async fn present(&self, _snapshot: &ReviewSnapshot, channel: Arc<DecisionChannel>) {
        channel.set_decision(HumanDecision::continue_());
    }
}

/// Answers every review with Synthesize.
pub struct AutoSynthesizeReviewer;

#[async_trait]
impl HumanReviewPort for AutoSynthesizeReviewer {
    async fn present(&self, _snapshot: &ReviewSnapshot, channel: Arc<DecisionChannel>) {
        channel.set_decision(HumanDecision::synthesize());
    }
}
