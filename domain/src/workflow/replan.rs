//! Replanner verdicts.

use super::step::Step;

/// Replanner token meaning "enough information, synthesize now".
pub const SYNTHESIZE_SIGNAL: &str = "SYNTHESIZE";

/// What the replanner decided after a step ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplanOutcome {
    /// Stop gathering and synthesize.
    Synthesize,
    /// The replanner answered the query itself.
    DirectResponse(String),
    /// More steps are needed.
    NewSteps(Vec<Step>),
}

impl ReplanOutcome {
    /// Interpret a free-text replanner response.
    pub fn from_response(text: &str) -> Self {
        let text = text.trim();
        if text.eq_ignore_ascii_case(SYNTHESIZE_SIGNAL) {
            ReplanOutcome::Synthesize
        } else {
            ReplanOutcome::DirectResponse(text.to_string())
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ReplanOutcome::Synthesize => "synthesize",
            ReplanOutcome::DirectResponse(_) => "direct_response",
            ReplanOutcome::NewSteps(_) => "new_steps",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response() {
        assert_eq!(ReplanOutcome::from_response(" SYNTHESIZE "), ReplanOutcome::Synthesize);
        assert_eq!(
            ReplanOutcome::from_response("Pressure averaged 42 PSI."),
            ReplanOutcome::DirectResponse("Pressure averaged 42 PSI.".to_string())
        );
    }
}
