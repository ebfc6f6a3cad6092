//! Progress reporting for workflow runs
//!
//! Everything goes to stderr so `--output json` keeps stdout clean.

use colored::Colorize;
use gridwatch_application::WorkflowProgressNotifier;
use gridwatch_domain::core::string::preview;
use gridwatch_domain::{
    HumanDecision, ReplanOutcome, ReviewWarning, Step, TurnOutcome, WorkflowPhase,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Characters of a step result echoed after it completes.
const RESULT_ECHO_CHARS: usize = 120;

/// Reports workflow progress with a spinner and one line per event.
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
    verbose: bool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            verbose: false,
        }
    }

    /// Also echo step results and replanner verdicts.
    pub fn verbose() -> Self {
        Self {
            spinner: Mutex::new(None),
            verbose: true,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn phase_name(phase: WorkflowPhase) -> &'static str {
        match phase {
            WorkflowPhase::Planning => "Planning",
            WorkflowPhase::Executing => "Executing",
            WorkflowPhase::Replanning => "Replanning",
            WorkflowPhase::AwaitingHuman => "Awaiting review",
            WorkflowPhase::Synthesizing => "Synthesizing",
            WorkflowPhase::Done => "Done",
            WorkflowPhase::Aborted => "Aborted",
        }
    }

    fn spinner(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.spinner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start_spinner(&self, prefix: &str, message: &str) {
        let mut slot = self.spinner();
        let pb = slot.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        pb.set_prefix(prefix.to_string());
        pb.set_message(message.to_string());
    }

    fn clear_spinner(&self) {
        if let Some(pb) = self.spinner().take() {
            pb.finish_and_clear();
        }
    }

    /// Print a line above the spinner, or plainly when none is active.
    fn line(&self, text: String) {
        match self.spinner().as_ref() {
            Some(pb) => pb.println(text),
            None => eprintln!("{}", text),
        }
    }

    fn print_plan(&self, title: &str, steps: &[Step]) {
        self.line(format!("{} {}", "->".cyan(), title.bold()));
        for (i, step) in steps.iter().enumerate() {
            self.line(format!(
                "   {}. {} {}",
                i + 1,
                format!("[{}]", step.tool()).cyan(),
                step.description()
            ));
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowProgressNotifier for ProgressReporter {
    fn on_phase_change(&self, phase: WorkflowPhase) {
        match phase {
            WorkflowPhase::AwaitingHuman | WorkflowPhase::Done | WorkflowPhase::Aborted => {
                self.clear_spinner()
            }
            WorkflowPhase::Executing => {}
            _ => self.start_spinner(Self::phase_name(phase), "..."),
        }
    }

    fn on_plan_created(&self, steps: &[Step]) {
        self.print_plan("Plan", steps);
    }

    fn on_iteration(&self, iteration: usize, max: usize) {
        self.start_spinner(&format!("Step {}/{}", iteration, max), "");
    }

    fn on_step_start(&self, step: &Step) {
        if let Some(pb) = self.spinner().as_ref() {
            pb.set_message(format!("[{}] {}", step.tool(), step.description()));
        }
    }

    fn on_step_complete(&self, step: &Step, result: &str) {
        self.line(format!(
            "{} {} {}",
            "v".green(),
            format!("[{}]", step.tool()).cyan(),
            step.description()
        ));
        if self.verbose {
            self.line(format!(
                "    {}",
                preview(result, RESULT_ECHO_CHARS).dimmed()
            ));
        }
    }

    fn on_replan(&self, outcome: &ReplanOutcome) {
        if !self.verbose {
            return;
        }
        let verdict = match outcome {
            ReplanOutcome::Synthesize => "ready to synthesize".to_string(),
            ReplanOutcome::DirectResponse(_) => "answered directly".to_string(),
            ReplanOutcome::NewSteps(steps) => format!("proposed {} step(s)", steps.len()),
        };
        self.line(format!("  {} {}", "replanner:".dimmed(), verdict.dimmed()));
    }

    fn on_warning(&self, warning: &ReviewWarning) {
        self.line(format!("{} {}", "!".yellow().bold(), warning.to_string().yellow()));
    }

    fn on_decision(&self, decision: &HumanDecision, timed_out: bool) {
        let suffix = if timed_out { " (timed out)" } else { "" };
        self.line(format!(
            "{} review: {}{}",
            "->".cyan(),
            decision.action.as_str().bold(),
            suffix
        ));
    }

    fn on_plan_edited(&self, steps: &[Step]) {
        self.print_plan("Revised plan", steps);
    }

    fn on_complete(&self, outcome: TurnOutcome) {
        self.clear_spinner();
        let label = match outcome {
            TurnOutcome::Synthesized | TurnOutcome::DirectResponse => {
                outcome.as_str().green().bold()
            }
            TurnOutcome::SynthesisFallback | TurnOutcome::Unresolved => {
                outcome.as_str().yellow().bold()
            }
            TurnOutcome::Aborted | TurnOutcome::PlanningFailed => outcome.as_str().red().bold(),
        };
        eprintln!("{} {}", "Finished:".bold(), label);
    }
}
