//! Step validation: raw oracle proposals → typed, tool-addressed steps.

use super::step::Step;

/// Phrases that mark a step as reasoning work rather than a tool call.
const ANALYSIS_PHRASES: &[&str] = &[
    "analyze",
    "analysis",
    "compare",
    "comparison",
    "determine",
    "conclude",
    "synthesize",
    "synthesis",
    "evaluate",
    "assess",
    "correlate",
    "interpret",
    "identify root cause",
    "make decision",
    "decide",
    "recommend",
];

/// Verbs that make an analysis-flavoured step a genuine data request,
/// with the inflections planners commonly use. Nouns such as "findings"
/// are deliberately absent.
const DATA_GATHERING_VERBS: &[&str] = &[
    "get", "gets", "getting",
    "check", "checks", "checking", "checked",
    "search", "searches", "searching", "searched",
    "find", "finds", "finding",
    "query", "queries", "querying", "queried",
    "retrieve", "retrieves", "retrieving", "retrieved",
];

/// Description of the step substituted when nothing survives validation.
pub const DEFAULT_STEP_DESCRIPTION: &str = "Get current system readings";

/// Why a raw step was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// No `SCADA:` / `MANUAL:` prefix
    MissingToolTag,
    /// Pure analysis with no data-gathering verb
    AnalysisOnly,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::MissingToolTag => "missing tool tag",
            RejectionReason::AnalysisOnly => "analysis step, not a tool operation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedStep {
    pub raw: String,
    pub reason: RejectionReason,
}

/// Result of [`validate_steps`].
///
/// `steps` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepValidation {
    pub steps: Vec<Step>,
    pub rejected: Vec<RejectedStep>,
    /// True when every proposal was dropped and the default step was used.
    pub used_default: bool,
}

impl StepValidation {
    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

/// The step used when a plan would otherwise be empty.
pub fn default_step() -> Step {
    Step::scada(DEFAULT_STEP_DESCRIPTION)
}

/// Returns true if the step body is pure analysis.
///
/// Analysis vocabulary embedded in a genuine data-gathering instruction
/// ("Get readings to compare March and April") is allowed.
pub fn is_analysis_only(body: &str) -> bool {
    let lower = body.to_lowercase();
    if !ANALYSIS_PHRASES.iter().any(|p| lower.contains(p)) {
        return false;
    }
    !lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| DATA_GATHERING_VERBS.contains(&word))
}

/// Filter raw step strings into typed steps.
///
/// Untagged and analysis-only entries are dropped; an empty result is
/// replaced by [`default_step`].
pub fn validate_steps<S: AsRef<str>>(raw: &[S]) -> StepValidation {
    let mut steps = Vec::new();
    let mut rejected = Vec::new();

    for candidate in raw {
        let candidate = candidate.as_ref();
        let Some(step) = Step::parse_tagged(candidate) else {
            rejected.push(RejectedStep {
                raw: candidate.to_string(),
                reason: RejectionReason::MissingToolTag,
            });
            continue;
        };
        if is_analysis_only(step.description()) {
            rejected.push(RejectedStep {
                raw: candidate.to_string(),
                reason: RejectionReason::AnalysisOnly,
            });
            continue;
        }
        steps.push(step);
    }

    let used_default = steps.is_empty();
    if used_default {
        steps.push(default_step());
    }

    StepValidation {
        steps,
        rejected,
        used_default,
    }
}
