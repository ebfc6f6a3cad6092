//! Review mode value object

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Who answers the human review gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewMode {
    /// A person at the terminal
    #[default]
    Interactive,
    /// Post Continue at once
    AutoContinue,
    /// Post Synthesize at once
    AutoSynthesize,
}

impl ReviewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewMode::Interactive => "interactive",
            ReviewMode::AutoContinue => "auto_continue",
            ReviewMode::AutoSynthesize => "auto_synthesize",
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, ReviewMode::Interactive)
    }
}

impl FromStr for ReviewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "interactive" => Ok(ReviewMode::Interactive),
            "auto_continue" | "continue" => Ok(ReviewMode::AutoContinue),
            "auto_synthesize" | "synthesize" => Ok(ReviewMode::AutoSynthesize),
            other => Err(format!(
                "unknown review mode '{}' (expected interactive, auto_continue or auto_synthesize)",
                other
            )),
        }
    }
}

impl std::fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
