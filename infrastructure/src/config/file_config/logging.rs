//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of workflow events
    pub conversation_log: Option<PathBuf>,
    /// Copy of the operational log
    pub file: Option<PathBuf>,
}
