//! Review configuration from TOML (`[review]` section)

use gridwatch_domain::ReviewMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReviewConfig {
    pub mode: ReviewMode,
    /// Seconds a review waits before continuing unchanged
    pub timeout_seconds: u64,
}

impl Default for FileReviewConfig {
    fn default() -> Self {
        Self {
            mode: ReviewMode::Interactive,
            timeout_seconds: 300,
        }
    }
}
