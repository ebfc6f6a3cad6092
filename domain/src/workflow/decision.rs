//! Human review decisions.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What the reviewer asked the workflow to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HumanAction {
    Continue,
    Edit,
    Synthesize,
    Quit,
}

impl HumanAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            HumanAction::Continue => "continue",
            HumanAction::Edit => "edit",
            HumanAction::Synthesize => "synthesize",
            HumanAction::Quit => "quit",
        }
    }
}

impl FromStr for HumanAction {
    type Err = DomainError;

    /// Accepts full words and single-letter shortcuts, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "continue" => Ok(HumanAction::Continue),
            "e" | "edit" => Ok(HumanAction::Edit),
            "s" | "synthesize" => Ok(HumanAction::Synthesize),
            "q" | "quit" => Ok(HumanAction::Quit),
            other => Err(DomainError::UnknownDecision(other.to_string())),
        }
    }
}

impl std::fmt::Display for HumanAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A decision delivered to a suspended workflow. Consumed once.
///
/// Feedback is never blank: every constructor, including deserialization,
/// drops whitespace-only text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DecisionRecord")]
pub struct HumanDecision {
    pub action: HumanAction,
    feedback: Option<String>,
}

/// Wire form of [`HumanDecision`] before feedback is normalized.
#[derive(Deserialize)]
struct DecisionRecord {
    action: HumanAction,
    #[serde(default)]
    feedback: Option<String>,
}

impl From<DecisionRecord> for HumanDecision {
    fn from(record: DecisionRecord) -> Self {
        let decision = Self::new(record.action);
        match record.feedback {
            Some(text) => decision.with_feedback(text),
            None => decision,
        }
    }
}

impl HumanDecision {
    pub fn new(action: HumanAction) -> Self {
        Self {
            action,
            feedback: None,
        }
    }

    pub fn continue_() -> Self {
        Self::new(HumanAction::Continue)
    }

    pub fn synthesize() -> Self {
        Self::new(HumanAction::Synthesize)
    }

    pub fn quit() -> Self {
        Self::new(HumanAction::Quit)
    }

    /// Attach feedback; blank text is treated as no feedback.
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        let feedback = feedback.into();
        let trimmed = feedback.trim();
        self.feedback = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Build a decision from free-form choice text.
    ///
    /// Unknown choices resolve to `Continue`, keeping any feedback.
    pub fn from_choice(choice: &str, feedback: Option<&str>) -> Self {
        let action = choice.parse().unwrap_or(HumanAction::Continue);
        let decision = Self::new(action);
        match feedback {
            Some(text) => decision.with_feedback(text),
            None => decision,
        }
    }

    /// Parse a single input line: `choice [feedback]` or `choice: feedback`.
    pub fn parse_line(line: &str) -> Self {
        let line = line.trim();
        let (choice, rest) = match line.find(|c: char| c == ':' || c.is_whitespace()) {
            Some(idx) => (&line[..idx], line[idx..].trim_start_matches(':')),
            None => (line, ""),
        };
        Self::from_choice(choice, Some(rest))
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }
}
