//! Human review gate - suspend the loop until a decision or timeout.
//!
//! One review cycle:
//!
//! 1. the snapshot is handed to the [`HumanReviewPort`]
//! 2. the gate awaits the session's [`DecisionChannel`]
//! 3. it ends as [`GateResolution::Resolved`] when a decision was taken off
//!    the channel, [`GateResolution::TimedOut`] when nothing arrived (the
//!    workflow continues), or [`GateResolution::Cancelled`] when the
//!    workflow's cancellation token fired first
//!
//! Any decision left on the channel from an earlier cycle is discarded on
//! entry, so each decision is consumed by exactly one cycle.

use crate::ports::decision_channel::DecisionChannel;
use crate::ports::human_review::{GateResolution, HumanReviewPort};
use gridwatch_domain::{HumanDecision, ReviewSnapshot};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct HumanReviewGate {
    reviewer: Arc<dyn HumanReviewPort>,
    timeout: Duration,
}

impl HumanReviewGate {
    pub fn new(reviewer: Arc<dyn HumanReviewPort>, timeout: Duration) -> Self {
        Self { reviewer, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run one review cycle against `channel`, giving up early if
    /// `cancellation` fires.
    pub async fn review(
        &self,
        snapshot: &ReviewSnapshot,
        channel: &Arc<DecisionChannel>,
        cancellation: Option<&CancellationToken>,
    ) -> GateResolution {
        if channel.take_decision().is_some() {
            debug!("Discarded stale decision before review");
        }
        info!(
            "Review gate open (turn {}, iteration {}, {} warnings)",
            snapshot.turn_number,
            snapshot.iteration,
            snapshot.warnings.len()
        );
        self.reviewer.present(snapshot, Arc::clone(channel)).await;

        let resolution = match cancellation {
            Some(token) => tokio::select! {
                _ = token.cancelled() => GateResolution::Cancelled,
                decision = channel.wait_for_decision(self.timeout) => self.resolve(decision),
            },
            None => self.resolve(channel.wait_for_decision(self.timeout).await),
        };
        if resolution == GateResolution::Cancelled {
            info!("Review cancelled");
        }

        self.reviewer.close(&resolution).await;
        resolution
    }

    fn resolve(&self, decision: Option<HumanDecision>) -> GateResolution {
        match decision {
            Some(decision) => {
                info!(
                    "Review resolved: {} (feedback: {})",
                    decision.action,
                    decision.feedback().is_some()
                );
                GateResolution::Resolved(decision)
            }
            None => {
                warn!(
                    "No review decision within {}s; continuing",
                    self.timeout.as_secs()
                );
                GateResolution::TimedOut
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::human_review::{AutoContinueReviewer, AutoSynthesizeReviewer};
    use async_trait::async_trait;
    use gridwatch_domain::HumanAction;
    use std::sync::Mutex;

    fn snapshot() -> ReviewSnapshot {
        ReviewSnapshot {
            query: "q".to_string(),
            turn_number: 1,
            iteration: 1,
            completed: vec![],
            remaining: vec![],
            warnings: vec![],
        }
    }

    /// Never answers.
    struct SilentReviewer {
        closed: Mutex<Option<GateResolution>>,
    }

    #[async_trait]
    impl HumanReviewPort for SilentReviewer {
        async fn present(&self, _snapshot: &ReviewSnapshot, _channel: Arc<DecisionChannel>) {}

        async fn close(&self, resolution: &GateResolution) {
            *self.closed.lock().unwrap() = Some(resolution.clone());
        }
    }

    /// Answers from a background task after a delay.
    struct DelayedReviewer {
        delay: Duration,
        decision: HumanDecision,
    }

    #[async_trait]
    impl HumanReviewPort for DelayedReviewer {
        async fn present(&self, _snapshot: &ReviewSnapshot, channel: Arc<DecisionChannel>) {
            let delay = self.delay;
            let decision = self.decision.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                channel.set_decision(decision);
            });
        }
    }

    #[tokio::test]
    async fn test_immediate_decision_consumed_once() {
        let gate = HumanReviewGate::new(Arc::new(AutoSynthesizeReviewer), Duration::from_secs(300));
        let channel = Arc::new(DecisionChannel::new());

        let resolution = gate.review(&snapshot(), &channel, None).await;

        assert_eq!(resolution, GateResolution::Resolved(HumanDecision::synthesize()));
        assert!(!channel.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_decision_within_timeout() {
        let reviewer = DelayedReviewer {
            delay: Duration::from_secs(30),
            decision: HumanDecision::new(HumanAction::Edit).with_feedback("last week"),
        };
        let gate = HumanReviewGate::new(Arc::new(reviewer), Duration::from_secs(300));
        let channel = Arc::new(DecisionChannel::new());

        let resolution = gate.review(&snapshot(), &channel, None).await;

        let decision = resolution.decision();
        assert_eq!(decision.action, HumanAction::Edit);
        assert_eq!(decision.feedback(), Some("last week"));
        assert!(!channel.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_defaults_to_continue() {
        let reviewer = Arc::new(SilentReviewer {
            closed: Mutex::new(None),
        });
        let gate = HumanReviewGate::new(reviewer.clone(), Duration::from_secs(300));
        let channel = Arc::new(DecisionChannel::new());

        let resolution = gate.review(&snapshot(), &channel, None).await;

        assert!(resolution.timed_out());
        assert_eq!(resolution.decision(), HumanDecision::continue_());
        assert_eq!(
            *reviewer.closed.lock().unwrap(),
            Some(GateResolution::TimedOut)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_decision_is_not_reused() {
        let reviewer = Arc::new(SilentReviewer {
            closed: Mutex::new(None),
        });
        let gate = HumanReviewGate::new(reviewer, Duration::from_secs(1));
        let channel = Arc::new(DecisionChannel::new());
        channel.set_decision(HumanDecision::quit());

        let resolution = gate.review(&snapshot(), &channel, None).await;
        assert!(resolution.timed_out());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_ends_wait_before_timeout() {
        let reviewer = Arc::new(SilentReviewer {
            closed: Mutex::new(None),
        });
        let gate = HumanReviewGate::new(reviewer.clone(), Duration::from_secs(300));
        let channel = Arc::new(DecisionChannel::new());
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            canceller.cancel();
        });

        let started = tokio::time::Instant::now();
        let resolution = gate.review(&snapshot(), &channel, Some(&token)).await;

        assert_eq!(resolution, GateResolution::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(300));
        assert_eq!(
            *reviewer.closed.lock().unwrap(),
            Some(GateResolution::Cancelled)
        );
    }

    #[tokio::test]
    async fn test_decision_wins_over_idle_token() {
        let gate = HumanReviewGate::new(Arc::new(AutoSynthesizeReviewer), Duration::from_secs(300));
        let channel = Arc::new(DecisionChannel::new());
        let token = CancellationToken::new();
        let resolution = gate.review(&snapshot(), &channel, Some(&token)).await;
        assert_eq!(resolution, GateResolution::Resolved(HumanDecision::synthesize()));
    }

    #[tokio::test]
    async fn test_auto_continue() {
        let gate = HumanReviewGate::new(Arc::new(AutoContinueReviewer), Duration::from_secs(300));
        let channel = Arc::new(DecisionChannel::new());
        let resolution = gate.review(&snapshot(), &channel, None).await;
        assert_eq!(resolution.decision().action, HumanAction::Continue);
    }
}
