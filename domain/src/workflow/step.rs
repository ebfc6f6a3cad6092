//! Steps - tagged, tool-addressed units of diagnostic work.
//!
//! A [`Step`] names the capability that executes it ([`ToolKind`]) and a
//! free-text description. Steps are validated at construction: the tag is
//! part of the type, not a string prefix re-parsed at every use site.
//!
//! The textual form `SCADA: Get March pressure readings` is still what
//! oracles produce and what prompts and review screens show, so
//! [`Step::parse_tagged`] and [`Display`](std::fmt::Display) convert between
//! the two.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Vocabulary that marks an untagged step as a data-source request.
const DATA_SOURCE_KEYWORDS: &[&str] = &[
    "sensor",
    "pressure",
    "temperature",
    "data",
    "reading",
    "current",
    "error code",
];

/// The capability a step is executed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ToolKind {
    /// Time-series / sensor data store
    Scada,
    /// Technical manual and procedure search
    Manual,
}

impl ToolKind {
    /// All tool kinds, in tag-matching order.
    pub const ALL: [ToolKind; 2] = [ToolKind::Scada, ToolKind::Manual];

    /// Returns the tag used in textual steps (`SCADA`, `MANUAL`).
    pub fn tag(&self) -> &'static str {
        match self {
            ToolKind::Scada => "SCADA",
            ToolKind::Manual => "MANUAL",
        }
    }

    /// Returns the prefix a tagged step string starts with.
    pub fn prefix(&self) -> &'static str {
        match self {
            ToolKind::Scada => "SCADA:",
            ToolKind::Manual => "MANUAL:",
        }
    }

    /// Human-readable capability description (used in prompts).
    pub fn capability(&self) -> &'static str {
        match self {
            ToolKind::Scada => {
                "Access real-time and historical sensor data (pressure, temperature, vibration, RPM, load, error codes)"
            }
            ToolKind::Manual => "Search technical manuals and troubleshooting procedures",
        }
    }

    /// Keyword sniffing for untagged step text.
    ///
    /// Sensor/measurement vocabulary routes to [`ToolKind::Scada`],
    /// everything else to [`ToolKind::Manual`].
    pub fn infer(text: &str) -> ToolKind {
        let lower = text.to_lowercase();
        if DATA_SOURCE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            ToolKind::Scada
        } else {
            ToolKind::Manual
        }
    }
}

impl FromStr for ToolKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SCADA" => Ok(ToolKind::Scada),
            "MANUAL" => Ok(ToolKind::Manual),
            other => Err(DomainError::UnknownTool(other.to_string())),
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A single plan step: which tool to call and what to ask it.
///
/// Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    tool: ToolKind,
    description: String,
}

impl Step {
    pub fn new(tool: ToolKind, description: impl Into<String>) -> Self {
        Self {
            tool,
            description: description.into().trim().to_string(),
        }
    }

    pub fn scada(description: impl Into<String>) -> Self {
        Self::new(ToolKind::Scada, description)
    }

    pub fn manual(description: impl Into<String>) -> Self {
        Self::new(ToolKind::Manual, description)
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Parse a `TAG: description` string.
    ///
    /// Returns `None` when the text does not start with a recognized tag.
    /// Tags are case-sensitive; surrounding whitespace is ignored.
    pub fn parse_tagged(raw: &str) -> Option<Step> {
        let raw = raw.trim();
        ToolKind::ALL.iter().find_map(|kind| {
            raw.strip_prefix(kind.prefix())
                .map(|rest| Step::new(*kind, rest))
        })
    }

    /// Parse a step, auto-detecting the tool when no tag is present.
    pub fn parse_or_infer(raw: &str) -> Step {
        Self::parse_tagged(raw).unwrap_or_else(|| Step::new(ToolKind::infer(raw), raw))
    }

    /// Derive a new step whose description carries a feedback annotation.
    pub fn annotated(&self, note: &str) -> Step {
        Step::new(self.tool, format!("[{}] {}", note, self.description))
    }
}

impl FromStr for Step {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Step::parse_tagged(s).ok_or_else(|| DomainError::UntaggedStep(s.to_string()))
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.tool.tag(), self.description)
    }
}

/// An executed step paired with its textual result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastStep {
    #[serde(flatten)]
    pub step: Step,
    pub result: String,
}

impl PastStep {
    pub fn new(step: Step, result: impl Into<String>) -> Self {
        Self {
            step,
            result: result.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_scada() {
        let step = Step::parse_tagged("SCADA: Get March pressure readings").unwrap();
        assert_eq!(step.tool(), ToolKind::Scada);
        assert_eq!(step.description(), "Get March pressure readings");
    }

    #[test]
    fn test_parse_tagged_manual_with_whitespace() {
        let step = Step::parse_tagged("  MANUAL:Find pump leak procedures ").unwrap();
        assert_eq!(step.tool(), ToolKind::Manual);
        assert_eq!(step.description(), "Find pump leak procedures");
    }

    #[test]
    fn test_parse_tagged_rejects_unknown_or_lowercase_tags() {
        assert!(Step::parse_tagged("PLC: read registers").is_none());
        assert!(Step::parse_tagged("scada: get readings").is_none());
        assert!(Step::parse_tagged("Analyze the data").is_none());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        let step = Step::manual("Look up safety protocols");
        let text = step.to_string();
        assert_eq!(text, "MANUAL: Look up safety protocols");
        assert_eq!(text.parse::<Step>().unwrap(), step);
    }

    #[test]
    fn test_from_str_untagged_error() {
        let err = "check it".parse::<Step>().unwrap_err();
        assert_eq!(err, DomainError::UntaggedStep("check it".to_string()));
    }

    #[test]
    fn test_infer_tool_from_keywords() {
        assert_eq!(ToolKind::infer("Check the pressure sensor"), ToolKind::Scada);
        assert_eq!(ToolKind::infer("Look at Error Code 503"), ToolKind::Scada);
        assert_eq!(ToolKind::infer("How to replace a seal"), ToolKind::Manual);
    }

    #[test]
    fn test_parse_or_infer() {
        let tagged = Step::parse_or_infer("MANUAL: Find data sheet");
        assert_eq!(tagged.tool(), ToolKind::Manual);

        let inferred = Step::parse_or_infer("Get temperature readings");
        assert_eq!(inferred.tool(), ToolKind::Scada);
        assert_eq!(inferred.description(), "Get temperature readings");
    }

    #[test]
    fn test_tool_kind_from_str() {
        assert_eq!("scada".parse::<ToolKind>().unwrap(), ToolKind::Scada);
        assert_eq!(" Manual ".parse::<ToolKind>().unwrap(), ToolKind::Manual);
        assert!("historian".parse::<ToolKind>().is_err());
    }

    #[test]
    fn test_annotated_keeps_tool() {
        let step = Step::scada("Get pressure readings").annotated("feedback: last 24 hours");
        assert_eq!(step.tool(), ToolKind::Scada);
        assert_eq!(
            step.description(),
            "[feedback: last 24 hours] Get pressure readings"
        );
    }
}
