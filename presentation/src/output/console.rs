//! Console output formatter for workflow results

use colored::Colorize;
use gridwatch_application::WorkflowOutput;
use gridwatch_domain::core::string::truncate;
use gridwatch_domain::{ConversationTurn, OutputFormat};

/// Formats workflow results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format according to the selected output format
    pub fn render(output: &WorkflowOutput, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => Self::format(output),
            OutputFormat::Json => Self::format_json(output),
        }
    }

    /// Framed final answer
    pub fn format(output: &WorkflowOutput) -> String {
        let mut text = String::new();

        text.push_str(&Self::header("Diagnostic Result"));
        text.push('\n');
        text.push_str(&format!("{} {}\n", "Query:".cyan().bold(), output.query));
        text.push_str(&format!(
            "{} {} ({} steps, {})\n",
            "Turn:".cyan().bold(),
            output.turn_number,
            output.steps.len(),
            output.outcome
        ));

        if !output.warnings.is_empty() {
            text.push_str(&format!("\n{}\n", "Warnings:".yellow().bold()));
            for warning in &output.warnings {
                text.push_str(&format!("  ! {}\n", warning));
            }
        }

        text.push('\n');
        text.push_str(&output.response);
        text.push('\n');
        text.push_str(&Self::footer());
        text
    }

    /// `{query, response, turn_number, steps, outcome, warnings}` as pretty JSON
    pub fn format_json(output: &WorkflowOutput) -> String {
        serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
    }

    /// One block per recorded turn, for the chat `/history` command
    pub fn format_history(turns: &[ConversationTurn]) -> String {
        if turns.is_empty() {
            return "No turns recorded yet.\n".to_string();
        }

        let mut text = String::new();
        for (i, turn) in turns.iter().enumerate() {
            text.push_str(&format!(
                "{} {}\n",
                format!("[{}]", i + 1).cyan().bold(),
                turn.user_query
            ));
            text.push_str(&format!(
                "    {} {} steps, {}\n",
                "ran".dimmed(),
                turn.diagnostic_steps.len(),
                turn.outcome
            ));
            text.push_str(&format!(
                "    {} {}\n",
                "findings:".dimmed(),
                truncate(&turn.context_summary, 200)
            ));
        }
        text
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwatch_domain::{PastStep, ReviewWarning, Step, TurnOutcome};

    fn output() -> WorkflowOutput {
        WorkflowOutput {
            query: "Why is pump 3 hot?".to_string(),
            response: "Bearing wear is likely.".to_string(),
            turn_number: 2,
            steps: vec![PastStep::new(Step::scada("Get temperature"), "87C")],
            outcome: TurnOutcome::Synthesized,
            warnings: vec![ReviewWarning::DuplicateResults],
        }
    }

    #[test]
    fn test_json_shape() {
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&output())).unwrap();

        assert_eq!(value["query"], "Why is pump 3 hot?");
        assert_eq!(value["turn_number"], 2);
        assert_eq!(value["outcome"], "synthesized");
        assert_eq!(value["steps"][0]["tool"], "SCADA");
        assert_eq!(value["steps"][0]["description"], "Get temperature");
        assert_eq!(value["steps"][0]["result"], "87C");
    }

    #[test]
    fn test_text_contains_answer_and_warnings() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::render(&output(), OutputFormat::Text);
        assert!(text.contains("Query: Why is pump 3 hot?"));
        assert!(text.contains("Turn: 2 (1 steps, synthesized)"));
        assert!(text.contains("! The last step returned identical results"));
        assert!(text.contains("Bearing wear is likely."));
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(
            ConsoleFormatter::format_history(&[]),
            "No turns recorded yet.\n"
        );
    }

    #[test]
    fn test_history_lists_turns() {
        colored::control::set_override(false);
        let turn = ConversationTurn::new(
            "Pressure on line 2?",
            vec![],
            "42 PSI",
            "Pressure is nominal.",
            TurnOutcome::DirectResponse,
        );
        let text = ConsoleFormatter::format_history(&[turn]);
        assert!(text.contains("[1] Pressure on line 2?"));
        assert!(text.contains("findings: Pressure is nominal."));
    }
}
