//! Human review adapters for the terminal.

mod interactive;

pub use interactive::InteractiveReviewer;
