//! Terminal reviewer for the human checkpoint.
//!
//! When the gate opens, the reviewer sees:
//!
//! ```text
//! ═══════════════════════════════════════════════════════════════
//!   Human Review (iteration 2)
//! ═══════════════════════════════════════════════════════════════
//!
//! Query: Why is pump 3 running hot?
//! Turn: 1
//!
//! Completed steps:
//!   1. SCADA: Get temperature for pump 3
//!      Result: 87°C, rising 2°C/hour
//!
//! Next planned steps:
//!   2. MANUAL: Find cooling procedure
//!
//! Options:
//!   c, continue [feedback]    - Run the next step
//!   e, edit <feedback>        - Rewrite the remaining plan
//!   s, synthesize [guidance]  - Answer now with what we have
//!   q, quit                   - Abort this query
//!
//! review>
//! ```
//!
//! `present` only draws the screen and starts a background read; the gate
//! owns the timeout. `close` stops a read that is still waiting.

use crate::input::{LineReader, prompt};
use async_trait::async_trait;
use colored::Colorize;
use gridwatch_application::ports::decision_channel::DecisionChannel;
use gridwatch_application::ports::human_review::{GateResolution, HumanReviewPort};
use gridwatch_domain::{HumanAction, HumanDecision, ReviewSnapshot};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const RULE: &str = "═══════════════════════════════════════════════════════════════";

pub struct InteractiveReviewer {
    input: Arc<LineReader>,
    pending: Mutex<Option<CancellationToken>>,
}

impl InteractiveReviewer {
    pub fn new(input: Arc<LineReader>) -> Self {
        Self {
            input,
            pending: Mutex::new(None),
        }
    }

    fn pending(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn display(snapshot: &ReviewSnapshot) {
        println!();
        println!("{}", RULE.yellow().bold());
        println!(
            "{}",
            format!("  Human Review (iteration {})", snapshot.iteration)
                .yellow()
                .bold()
        );
        println!("{}", RULE.yellow().bold());
        println!();

        for line in snapshot.render().lines() {
            if let Some(warning) = line.strip_prefix("  ! ") {
                println!("  {} {}", "!".yellow().bold(), warning.yellow());
            } else if line.ends_with("steps:") || line == "Warnings:" {
                println!("{}", line.cyan().bold());
            } else {
                println!("{}", line);
            }
        }

        println!();
        println!("{}", "Options:".cyan().bold());
        println!(
            "  {}    - Run the next step",
            "c, continue [feedback]".green()
        );
        println!("  {}        - Rewrite the remaining plan", "e, edit <feedback>".yellow());
        println!(
            "  {}  - Answer now with what we have",
            "s, synthesize [guidance]".cyan()
        );
        println!("  {}                   - Abort this query", "q, quit".red());
        println!();
    }

    /// Read one decision, asking again for feedback when Edit came without it.
    async fn read_decision(input: &LineReader) -> HumanDecision {
        prompt(&format!("{} ", "review>".magenta().bold()));
        let Some(line) = input.next_line().await else {
            info!("Input closed during review; continuing");
            return HumanDecision::continue_();
        };
        let decision = HumanDecision::parse_line(&line);

        if decision.action == HumanAction::Edit && decision.feedback().is_none() {
            prompt(&format!("{} ", "feedback>".magenta().bold()));
            if let Some(feedback) = input.next_line().await {
                return decision.with_feedback(feedback);
            }
        }
        decision
    }
}

#[async_trait]
impl HumanReviewPort for InteractiveReviewer {
    async fn present(&self, snapshot: &ReviewSnapshot, channel: Arc<DecisionChannel>) {
        Self::display(snapshot);

        let token = CancellationToken::new();
        if let Some(previous) = self.pending().replace(token.clone()) {
            previous.cancel();
        }

        let input = Arc::clone(&self.input);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => debug!("Review read cancelled"),
                decision = Self::read_decision(&input) => channel.set_decision(decision),
            }
        });
    }

    async fn close(&self, resolution: &GateResolution) {
        if let Some(token) = self.pending().take() {
            token.cancel();
        }

        match resolution {
            GateResolution::TimedOut => {
                println!();
                println!("{}", "No decision received in time; continuing.".yellow());
            }
            GateResolution::Cancelled => {
                println!();
                println!("{}", "Review cancelled.".yellow());
            }
            GateResolution::Resolved(decision) => {
                let label = match decision.action {
                    HumanAction::Continue => "Continuing".green(),
                    HumanAction::Edit => "Editing plan".yellow(),
                    HumanAction::Synthesize => "Synthesizing".cyan(),
                    HumanAction::Quit => "Quitting".red(),
                };
                match decision.feedback() {
                    Some(feedback) => println!("{} ({})", label, feedback.dimmed()),
                    None => println!("{}", label),
                }
            }
        }
        println!();
    }
}
