//! Per-session decision channel.
//!
//! A single-slot mailbox carrying one [`HumanDecision`] from whoever answers
//! a review (terminal prompt, auto-reviewer, an API handler) to the
//! suspended workflow. Each workflow run creates its own channel, so
//! concurrent sessions never share a slot.
//!
//! Semantics:
//! - one pending decision at a time, last write wins
//! - [`take_decision`](DecisionChannel::take_decision) reads and clears atomically
//! - [`wait_for_decision`](DecisionChannel::wait_for_decision) suspends until a
//!   decision is set or the timeout elapses, without polling

use gridwatch_domain::{HumanAction, HumanDecision};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::{Instant, timeout_at};

#[derive(Debug, Default)]
pub struct DecisionChannel {
    slot: Mutex<Option<HumanDecision>>,
    notify: Notify,
}

impl DecisionChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<HumanDecision>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a decision, replacing any pending one, and wake the waiter.
    pub fn set_decision(&self, decision: HumanDecision) {
        *self.slot() = Some(decision);
        self.notify.notify_one();
    }

    /// Convenience for `set_decision` from a choice and optional feedback.
    pub fn submit(&self, action: HumanAction, feedback: Option<&str>) {
        let decision = HumanDecision::new(action);
        let decision = match feedback {
            Some(text) => decision.with_feedback(text),
            None => decision,
        };
        self.set_decision(decision);
    }

    /// Peek at the pending decision without consuming it.
    pub fn get_decision(&self) -> Option<HumanDecision> {
        self.slot().clone()
    }

    pub fn clear_decision(&self) {
        *self.slot() = None;
    }

    /// Read and clear the pending decision in one step.
    pub fn take_decision(&self) -> Option<HumanDecision> {
        self.slot().take()
    }

    pub fn is_pending(&self) -> bool {
        self.slot().is_some()
    }

    /// Wait until a decision is available or `timeout` elapses.
    ///
    /// The returned decision has been removed from the channel. `None`
    /// means the timeout elapsed with nothing posted.
    pub async fn wait_for_decision(&self, timeout: Duration) -> Option<HumanDecision> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(decision) = self.take_decision() {
                return Some(decision);
            }
            if timeout_at(deadline, self.notify.notified()).await.is_err() {
                return self.take_decision();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_last_write_wins() {
        let channel = DecisionChannel::new();
        channel.set_decision(HumanDecision::continue_());
        channel.set_decision(HumanDecision::quit());
        assert_eq!(channel.get_decision(), Some(HumanDecision::quit()));
    }

    #[test]
    fn test_take_clears() {
        let channel = DecisionChannel::new();
        channel.submit(HumanAction::Edit, Some("last 24 hours"));
        let decision = channel.take_decision().unwrap();
        assert_eq!(decision.feedback(), Some("last 24 hours"));
        assert!(!channel.is_pending());
        assert!(channel.take_decision().is_none());
    }

    #[test]
    fn test_clear() {
        let channel = DecisionChannel::new();
        channel.set_decision(HumanDecision::synthesize());
        channel.clear_decision();
        assert!(channel.get_decision().is_none());
    }

    #[tokio::test]
    async fn test_wait_returns_already_pending_decision() {
        let channel = DecisionChannel::new();
        channel.set_decision(HumanDecision::synthesize());
        let decision = channel.wait_for_decision(Duration::from_secs(1)).await;
        assert_eq!(decision, Some(HumanDecision::synthesize()));
        assert!(!channel.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_wakes_on_later_decision() {
        let channel = Arc::new(DecisionChannel::new());
        let writer = Arc::clone(&channel);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(10)).await;
            writer.submit(HumanAction::Quit, None);
        });

        let decision = channel.wait_for_decision(Duration::from_secs(300)).await;
        assert_eq!(decision, Some(HumanDecision::quit()));
        assert!(!channel.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out() {
        let channel = DecisionChannel::new();
        let decision = channel.wait_for_decision(Duration::from_secs(300)).await;
        assert!(decision.is_none());
    }
}
