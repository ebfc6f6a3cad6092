//! Plan editing from reviewer feedback.
//!
//! - **Replace** (Edit): ask the oracle for a new plan built around the
//!   feedback; on failure, fall back to one step derived from the feedback.
//! - **Modify** (Continue + feedback): ask the oracle to rewrite the
//!   remaining plan in place, capped; on failure, annotate the next step with
//!   the feedback and leave the rest untouched.
//!
//! Results never exceed the hard step limit.

use crate::ports::oracles::PlanEditorOracle;
use gridwatch_domain::core::string::preview;
use gridwatch_domain::{PastStep, ReviewWarning, Step, StepBudget, ToolKind, validate_steps};
use std::sync::Arc;
use tracing::{info, warn};

/// Characters of feedback embedded in fallback steps.
const FEEDBACK_EXCERPT_CHARS: usize = 100;

/// Where an edited plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSource {
    Oracle,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEdit {
    pub steps: Vec<Step>,
    pub source: EditSource,
    pub warning: Option<ReviewWarning>,
}

pub struct PlanEditor {
    oracle: Arc<dyn PlanEditorOracle>,
    budget: StepBudget,
    modify_cap: usize,
}

impl PlanEditor {
    pub fn new(oracle: Arc<dyn PlanEditorOracle>, budget: StepBudget, modify_cap: usize) -> Self {
        Self {
            oracle,
            budget,
            modify_cap,
        }
    }

    /// Build a replacement plan from feedback.
    pub async fn replace(&self, query: &str, past: &[PastStep], feedback: &str) -> PlanEdit {
        let (steps, source) = match self.oracle.replace_plan(query, past, feedback).await {
            Ok(raw) => {
                let validation = validate_steps(&raw);
                if validation.used_default {
                    warn!("Replacement plan had no usable steps; using feedback fallback");
                    (vec![feedback_step(feedback)], EditSource::Fallback)
                } else {
                    (validation.steps, EditSource::Oracle)
                }
            }
            Err(e) => {
                warn!("Plan replacement failed: {}", e);
                (vec![feedback_step(feedback)], EditSource::Fallback)
            }
        };
        info!("Plan replaced with {} steps ({:?})", steps.len(), source);
        self.bounded(steps, source, past.len())
    }

    /// Rewrite the remaining plan around feedback.
    pub async fn modify(
        &self,
        query: &str,
        past: &[PastStep],
        remaining: &[Step],
        feedback: &str,
    ) -> PlanEdit {
        let oracle_result = self
            .oracle
            .modify_plan(query, past, remaining, feedback, self.modify_cap)
            .await;

        let (steps, source) = match oracle_result {
            Ok(raw) => {
                let validation = validate_steps(&raw);
                if validation.used_default {
                    warn!("Modified plan had no usable steps; annotating current plan");
                    (annotate_plan(remaining, feedback), EditSource::Fallback)
                } else {
                    let mut steps = validation.steps;
                    steps.truncate(self.modify_cap.max(1));
                    (steps, EditSource::Oracle)
                }
            }
            Err(e) => {
                warn!("Plan modification failed: {}", e);
                (annotate_plan(remaining, feedback), EditSource::Fallback)
            }
        };
        info!("Plan modified to {} steps ({:?})", steps.len(), source);
        self.bounded(steps, source, past.len())
    }

    fn bounded(&self, mut steps: Vec<Step>, source: EditSource, completed: usize) -> PlanEdit {
        let headroom = self.budget.hard_headroom(completed);
        let warning = if steps.len() > headroom {
            let total = completed + steps.len();
            warn!(
                "Edited plan exceeds hard limit ({} > {}); keeping {} steps",
                total,
                self.budget.hard(),
                headroom
            );
            steps.truncate(headroom);
            Some(ReviewWarning::TooManySteps {
                total,
                limit: self.budget.hard(),
                hard: true,
            })
        } else {
            None
        };
        PlanEdit {
            steps,
            source,
            warning,
        }
    }
}

/// Minimal step carrying an excerpt of the feedback.
fn feedback_step(feedback: &str) -> Step {
    let excerpt = preview(feedback.trim(), FEEDBACK_EXCERPT_CHARS);
    match ToolKind::infer(feedback) {
        ToolKind::Scada => Step::scada(format!("Get data relevant to: {}", excerpt)),
        ToolKind::Manual => Step::manual(format!("Search procedures relevant to: {}", excerpt)),
    }
}

/// Prefix the next step with a feedback note; the rest stays as it was.
fn annotate_plan(remaining: &[Step], feedback: &str) -> Vec<Step> {
    let Some((first, rest)) = remaining.split_first() else {
        return vec![feedback_step(feedback)];
    };
    let note = format!(
        "Feedback: {}",
        preview(feedback.trim(), FEEDBACK_EXCERPT_CHARS)
    );
    let mut steps = Vec::with_capacity(remaining.len());
    steps.push(first.annotated(&note));
    steps.extend(rest.iter().cloned());
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::oracles::OracleError;
    use async_trait::async_trait;

    struct FixedEditor {
        replace: Option<Vec<&'static str>>,
        modify: Option<Vec<&'static str>>,
    }

    #[async_trait]
    impl PlanEditorOracle for FixedEditor {
        async fn replace_plan(
            &self,
            _query: &str,
            _past: &[PastStep],
            _feedback: &str,
        ) -> Result<Vec<String>, OracleError> {
            self.replace
                .as_ref()
                .map(|s| s.iter().map(|x| x.to_string()).collect())
                .ok_or(OracleError::EmptyResponse)
        }

        async fn modify_plan(
            &self,
            _query: &str,
            _past: &[PastStep],
            _remaining: &[Step],
            _feedback: &str,
            _cap: usize,
        ) -> Result<Vec<String>, OracleError> {
            self.modify
                .as_ref()
                .map(|s| s.iter().map(|x| x.to_string()).collect())
                .ok_or(OracleError::Unparseable("not json".to_string()))
        }
    }

    fn editor(replace: Option<Vec<&'static str>>, modify: Option<Vec<&'static str>>) -> PlanEditor {
        PlanEditor::new(
            Arc::new(FixedEditor { replace, modify }),
            StepBudget::default(),
            3,
        )
    }

    fn past(n: usize) -> Vec<PastStep> {
        (0..n)
            .map(|i| PastStep::new(Step::scada(format!("step {}", i)), "ok"))
            .collect()
    }

    // ==================== Replace ====================

    #[tokio::test]
    async fn test_replace_uses_validated_oracle_plan() {
        let editor = editor(
            Some(vec!["SCADA: Get last 24 hours of pressure", "Analyze it"]),
            None,
        );
        let edit = editor.replace("q", &past(1), "last 24 hours").await;
        assert_eq!(edit.source, EditSource::Oracle);
        assert_eq!(edit.steps, vec![Step::scada("Get last 24 hours of pressure")]);
        assert!(edit.warning.is_none());
    }

    #[tokio::test]
    async fn test_replace_failure_embeds_feedback() {
        let editor = editor(None, None);
        let edit = editor.replace("q", &[], "check the pressure trend").await;
        assert_eq!(edit.source, EditSource::Fallback);
        assert_eq!(
            edit.steps,
            vec![Step::scada("Get data relevant to: check the pressure trend")]
        );
    }

    #[tokio::test]
    async fn test_replace_unusable_plan_falls_back() {
        let editor = editor(Some(vec!["Determine root cause"]), None);
        let edit = editor.replace("q", &[], "look up the seal procedure").await;
        assert_eq!(edit.source, EditSource::Fallback);
        assert_eq!(edit.steps[0].tool(), ToolKind::Manual);
        assert!(edit.steps[0].description().contains("look up the seal procedure"));
    }

    #[tokio::test]
    async fn test_replace_truncated_to_hard_limit() {
        let editor = editor(Some(vec!["SCADA: a", "SCADA: b", "MANUAL: c"]), None);
        let edit = editor.replace("q", &past(4), "more").await;
        assert_eq!(edit.steps, vec![Step::scada("a")]);
        assert_eq!(
            edit.warning,
            Some(ReviewWarning::TooManySteps {
                total: 7,
                limit: 5,
                hard: true
            })
        );
    }

    // ==================== Modify ====================

    #[tokio::test]
    async fn test_modify_caps_oracle_plan() {
        let editor = editor(
            None,
            Some(vec!["SCADA: a", "SCADA: b", "MANUAL: c", "MANUAL: d"]),
        );
        let edit = editor.modify("q", &[], &[Step::scada("x")], "focus").await;
        assert_eq!(edit.source, EditSource::Oracle);
        assert_eq!(edit.steps.len(), 3);
    }

    #[tokio::test]
    async fn test_modify_failure_annotates_first_step_only() {
        let editor = editor(None, None);
        let remaining = vec![Step::scada("Get pressure"), Step::manual("Find fix")];
        let edit = editor.modify("q", &[], &remaining, "last 24 hours").await;

        assert_eq!(edit.source, EditSource::Fallback);
        assert_eq!(edit.steps.len(), 2);
        assert_eq!(
            edit.steps[0].description(),
            "[Feedback: last 24 hours] Get pressure"
        );
        assert_eq!(edit.steps[1], Step::manual("Find fix"));
    }

    #[tokio::test]
    async fn test_modify_failure_with_empty_plan() {
        let editor = editor(None, None);
        let edit = editor.modify("q", &[], &[], "check vibration data").await;
        assert_eq!(
            edit.steps,
            vec![Step::scada("Get data relevant to: check vibration data")]
        );
    }
}
