//! Interactive chat module
//!
//! Provides a line-based chat interface over one diagnostic session.

mod repl;

pub use repl::ChatRepl;
