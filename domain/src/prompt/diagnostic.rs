//! Prompt templates for the diagnostic oracles

use crate::core::string::{char_prefix, preview};
use crate::workflow::step::{PastStep, Step, ToolKind};

/// Characters of each past result included in replanning prompts.
const REPLAN_RESULT_CHARS: usize = 200;

/// Characters of the final response fed to the turn summary prompt.
pub const SUMMARY_RESPONSE_CHARS: usize = 500;

/// Templates for generating diagnostic workflow prompts
pub struct DiagnosticPromptTemplate;

impl DiagnosticPromptTemplate {
    /// System prompt for structured (JSON-only) oracle calls
    pub fn structured_system() -> &'static str {
        "You are a helpful assistant for industrial diagnostics. Respond with valid JSON only."
    }

    /// System prompt for the synthesizer
    pub fn synthesis_system() -> &'static str {
        "You are an expert industrial diagnostics analyst. Create comprehensive, actionable diagnostic responses."
    }

    /// System prompt for turn summaries
    pub fn summary_system() -> &'static str {
        "You are a technical writer. Create concise, clear summaries of diagnostic findings."
    }

    fn tool_list() -> String {
        ToolKind::ALL
            .iter()
            .map(|t| format!("- {}: {}", t.prefix(), t.capability()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn completed_steps(past: &[PastStep], result_chars: usize) -> String {
        if past.is_empty() {
            return "(none)".to_string();
        }
        past.iter()
            .enumerate()
            .map(|(i, p)| format!("{}. {}\nResult: {}", i + 1, p.step, preview(&p.result, result_chars)))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn step_list(steps: &[Step]) -> String {
        if steps.is_empty() {
            return "(none)".to_string();
        }
        steps
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}. {}", i + 1, s))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Initial planning prompt
    pub fn plan(query: &str, context: &str, turn_number: usize) -> String {
        let history = if context.is_empty() {
            "NEW CONVERSATION: this is the first query in the session.".to_string()
        } else {
            format!("CONVERSATION CONTEXT (turn {}):\n{}", turn_number, context)
        };

        format!(
            r#"You are a diagnostics planning agent for an industrial monitoring system.

Create a step-by-step execution plan for the query below using ONLY the available tools.

{history}

CURRENT QUERY: "{query}"

Available tools (ONLY THESE):
{tools}

Rules:
1. Every step MUST start with "SCADA:" or "MANUAL:"
2. Only plan steps these tools can execute; analysis and synthesis happen later
3. At most 3 steps
4. For follow-up questions, build on what earlier turns already found

Examples:
- "What is the pressure in March?" -> ["SCADA: Get March pressure readings"]
- "Pressure is high, what should I do?" -> ["SCADA: Check current pressure readings", "MANUAL: Find high pressure troubleshooting procedures"]

Respond with ONLY a JSON object:
{{"steps": ["SCADA: ...", "MANUAL: ..."]}}"#,
            history = history,
            query = query,
            tools = Self::tool_list(),
        )
    }

    /// Replanning prompt after a step has run
    pub fn replan(
        query: &str,
        past: &[PastStep],
        remaining: &[Step],
        feedback: Option<&str>,
    ) -> String {
        let feedback_section = match feedback {
            Some(text) => format!(
                "\nHUMAN FEEDBACK: {}\nPrioritize this guidance when deciding the next steps.\n",
                text
            ),
            None => String::new(),
        };

        format!(
            r#"Decide whether more steps are needed or a final answer can be given.

USER QUESTION: {query}

COMPLETED STEPS:
{completed}

REMAINING STEPS:
{remaining}
{feedback_section}
You have completed {count} steps. Simple "What is X?" questions usually need 1-2 steps;
"X is wrong, what do I do?" questions need both SCADA data and MANUAL procedures.
If results are repeating, synthesize. Keep the total at 3 steps or fewer.

Options:
1. Enough information: {{"action": {{"response": "SYNTHESIZE"}}}}
2. Critical information missing (at most 1-2 more steps): {{"action": {{"steps": ["TOOL: specific missing info"]}}}}

Respond with JSON only."#,
            query = query,
            completed = Self::completed_steps(past, REPLAN_RESULT_CHARS),
            remaining = Self::step_list(remaining),
            feedback_section = feedback_section,
            count = past.len(),
        )
    }

    /// Prompt for a replacement plan built around reviewer feedback
    pub fn plan_from_feedback(query: &str, past: &[PastStep], feedback: &str) -> String {
        format!(
            r#"A reviewer asked for a different diagnostic plan.

USER QUESTION: {query}

COMPLETED STEPS:
{completed}

REVIEWER FEEDBACK: {feedback}

Create a NEW plan of at most 3 steps that follows the feedback and does not repeat completed work.

Available tools (ONLY THESE):
{tools}

Every step MUST start with "SCADA:" or "MANUAL:".
Respond with ONLY a JSON object: {{"steps": ["..."]}}"#,
            query = query,
            completed = Self::completed_steps(past, REPLAN_RESULT_CHARS),
            feedback = feedback,
            tools = Self::tool_list(),
        )
    }

    /// Prompt asking to rewrite the remaining plan in place
    pub fn modify_plan(
        query: &str,
        past: &[PastStep],
        remaining: &[Step],
        feedback: &str,
        cap: usize,
    ) -> String {
        format!(
            r#"Adjust the remaining diagnostic plan to reflect reviewer feedback.

USER QUESTION: {query}

COMPLETED STEPS:
{completed}

CURRENT REMAINING PLAN:
{remaining}

REVIEWER FEEDBACK: {feedback}

Rewrite the remaining steps so they incorporate the feedback. Modify the existing steps
rather than adding unrelated ones. Return at most {cap} steps; each MUST start with "SCADA:" or "MANUAL:".

Respond with ONLY a JSON object: {{"steps": ["..."]}}"#,
            query = query,
            completed = Self::completed_steps(past, REPLAN_RESULT_CHARS),
            remaining = Self::step_list(remaining),
            feedback = feedback,
            cap = cap,
        )
    }

    /// Final synthesis prompt
    pub fn synthesis(query: &str, past: &[PastStep], guidance: Option<&str>) -> String {
        let results = past
            .iter()
            .map(|p| format!("[{}] {}\nResult: {}", p.step.tool(), p.step.description(), p.result))
            .collect::<Vec<_>>()
            .join("\n\n");
        let guidance_section = match guidance {
            Some(text) => format!("\nReviewer guidance for the answer: {}\n", text),
            None => String::new(),
        };

        format!(
            r#"Analyze the gathered information and give a complete diagnostic answer.

User Question: {query}

Executed Steps and Results:
{results}
{guidance_section}
The answer must answer the question directly and end with concrete recommendations.

Format:
🔧 COMPREHENSIVE DIAGNOSTIC ANALYSIS
Question: {query}

📊 Data Analysis: [key findings from SCADA data]
📘 Procedural Guidance: [relevant manual steps]
💡 Recommendations: [specific actions]
⚠️ Priority: [most critical actions first]

Keep it thorough but concise (300-400 words)."#,
            query = query,
            results = results,
            guidance_section = guidance_section,
        )
    }

    /// Prompt for the key-findings summary stored with a turn
    pub fn turn_summary(query: &str, step_count: usize, response: &str) -> String {
        format!(
            r#"Summarize the key findings from this diagnostic session in 2-3 sentences:

User Query: {query}
Steps Executed: {step_count} diagnostic steps
Final Response: {response}...

Focus on the most important findings and recommendations."#,
            query = query,
            step_count = step_count,
            response = char_prefix(response, SUMMARY_RESPONSE_CHARS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_prompt_first_turn() {
        let prompt = DiagnosticPromptTemplate::plan("What is the pressure in March?", "", 1);
        assert!(prompt.contains("NEW CONVERSATION"));
        assert!(prompt.contains("CURRENT QUERY: \"What is the pressure in March?\""));
        assert!(prompt.contains("- SCADA:"));
        assert!(prompt.contains("- MANUAL:"));
    }

    #[test]
    fn test_plan_prompt_with_context() {
        let prompt = DiagnosticPromptTemplate::plan("And April?", "Previous conversation context:\nQuery: March", 2);
        assert!(prompt.contains("CONVERSATION CONTEXT (turn 2)"));
        assert!(prompt.contains("Query: March"));
    }

    #[test]
    fn test_replan_prompt_includes_feedback_and_truncates_results() {
        let past = vec![PastStep::new(Step::scada("Get pressure"), "p".repeat(300))];
        let prompt = DiagnosticPromptTemplate::replan("q", &past, &[], Some("check vibration"));
        assert!(prompt.contains("HUMAN FEEDBACK: check vibration"));
        assert!(prompt.contains(&format!("Result: {}...", "p".repeat(200))));
        assert!(!prompt.contains(&"p".repeat(201)));
        assert!(prompt.contains("REMAINING STEPS:\n(none)"));
    }

    #[test]
    fn test_modify_prompt_states_cap() {
        let prompt = DiagnosticPromptTemplate::modify_plan(
            "q",
            &[],
            &[Step::manual("Find fix")],
            "last 24 hours",
            3,
        );
        assert!(prompt.contains("1. MANUAL: Find fix"));
        assert!(prompt.contains("at most 3 steps"));
    }

    #[test]
    fn test_synthesis_prompt_guidance() {
        let past = vec![PastStep::new(Step::scada("Get pressure"), "42 PSI")];
        let prompt = DiagnosticPromptTemplate::synthesis("q", &past, Some("be brief"));
        assert!(prompt.contains("[SCADA] Get pressure\nResult: 42 PSI"));
        assert!(prompt.contains("Reviewer guidance for the answer: be brief"));
    }

    #[test]
    fn test_turn_summary_uses_response_prefix() {
        let response = "r".repeat(800);
        let prompt = DiagnosticPromptTemplate::turn_summary("q", 2, &response);
        assert!(prompt.contains("Steps Executed: 2 diagnostic steps"));
        assert!(prompt.contains(&"r".repeat(500)));
        assert!(!prompt.contains(&"r".repeat(501)));
    }
}
