//! Presentation layer for gridwatch
//!
//! This crate contains the CLI definition, the terminal review prompt,
//! progress reporting, output formatting and the chat loop.

pub mod chat;
pub mod cli;
pub mod input;
pub mod output;
pub mod progress;
pub mod review;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::Cli;
pub use input::LineReader;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ProgressReporter;
pub use review::InteractiveReviewer;
