//! REPL (Read-Eval-Print Loop) for chat mode
//!
//! One [`RunWorkflowUseCase`] serves the whole session, so every query sees
//! the findings of earlier turns.

use crate::input::{LineReader, prompt};
use crate::{ConsoleFormatter, ProgressReporter};
use colored::Colorize;
use gridwatch_application::{NoWorkflowProgress, RunWorkflowUseCase};
use gridwatch_domain::OutputFormat;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// What the loop should do after a line was handled.
#[derive(Debug, PartialEq, Eq)]
enum LineAction {
    Exit,
    Continue,
    Query,
}

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: RunWorkflowUseCase,
    input: Arc<LineReader>,
    format: OutputFormat,
    show_progress: bool,
    verbose: bool,
    cancellation: CancellationToken,
}

impl ChatRepl {
    pub fn new(use_case: RunWorkflowUseCase, input: Arc<LineReader>) -> Self {
        Self {
            use_case,
            input,
            format: OutputFormat::Text,
            show_progress: true,
            verbose: false,
            cancellation: CancellationToken::new(),
        }
    }

    /// Set the output format for answers
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool, verbose: bool) -> Self {
        self.show_progress = show;
        self.verbose = verbose;
        self
    }

    /// Stop the session when this token is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Run the interactive REPL until exit, end of input or cancellation
    pub async fn run(&mut self) {
        self.print_welcome();

        loop {
            prompt(&format!("{} ", "gridwatch>".green().bold()));
            let line = tokio::select! {
                _ = self.cancellation.cancelled() => {
                    println!();
                    break;
                }
                line = self.input.next_line() => line,
            };

            let Some(line) = line else {
                println!();
                break;
            };
            let line = line.trim();

            match self.handle_line(line) {
                LineAction::Exit => break,
                LineAction::Continue => continue,
                LineAction::Query => {}
            }

            if !self.process_query(line).await {
                break;
            }
        }

        println!("Bye!");
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "╭─────────────────────────────────────────────╮".cyan());
        println!("{}", "│          gridwatch - Chat Mode              │".cyan());
        println!("{}", "╰─────────────────────────────────────────────╯".cyan());
        println!();
        println!("Ask a diagnostic question; earlier findings carry over.");
        println!();
        println!("Commands:");
        println!("  /history  - Show recorded turns");
        println!("  /clear    - Forget earlier turns");
        println!("  /help     - Show this help");
        println!("  exit      - Leave chat (also quit, stop)");
        println!();
    }

    fn handle_line(&mut self, line: &str) -> LineAction {
        if line.is_empty() {
            return LineAction::Continue;
        }
        if is_exit_word(line) {
            return LineAction::Exit;
        }
        if !line.starts_with('/') {
            return LineAction::Query;
        }

        match line {
            "/history" => {
                println!();
                print!(
                    "{}",
                    ConsoleFormatter::format_history(self.use_case.memory().turns())
                );
                println!();
            }
            "/clear" => {
                self.use_case.clear_memory();
                println!("Conversation memory cleared.");
            }
            "/help" | "/h" | "/?" => self.print_welcome(),
            "/quit" | "/exit" | "/q" => return LineAction::Exit,
            _ => {
                println!("Unknown command: {}", line);
                println!("Type /help for available commands");
            }
        }
        LineAction::Continue
    }

    /// Run one query. Returns false when the session should end.
    async fn process_query(&mut self, query: &str) -> bool {
        println!();

        let result = if self.show_progress {
            let progress = if self.verbose {
                ProgressReporter::verbose()
            } else {
                ProgressReporter::new()
            };
            self.use_case.run_with_progress(query, &progress).await
        } else {
            self.use_case
                .run_with_progress(query, &NoWorkflowProgress)
                .await
        };

        match result {
            Ok(output) => {
                println!("{}", ConsoleFormatter::render(&output, self.format));
                true
            }
            Err(e) if e.is_cancelled() => {
                info!("Chat session cancelled");
                println!("{}", "Cancelled.".yellow());
                false
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                true
            }
        }
    }
}

/// Words that end a chat session.
fn is_exit_word(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "exit" | "quit" | "stop")
}
