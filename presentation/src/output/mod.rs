//! Output formatting for workflow results

pub mod console;
