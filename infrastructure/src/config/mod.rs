//! Configuration file loading for gridwatch
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `GRIDWATCH_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./gridwatch.toml` or `./.gridwatch.toml`
//! 4. Global: `$XDG_CONFIG_HOME/gridwatch/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLlmConfig, FileLoggingConfig, FileOutputConfig,
    FileReviewConfig, FileToolConfig, FileToolsConfig, FileWorkflowConfig, ToolAdapterKind,
};
pub use loader::ConfigLoader;
