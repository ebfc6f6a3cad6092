//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod llm;
mod logging;
mod output;
mod review;
mod tools;
mod workflow;

pub use llm::FileLlmConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use review::FileReviewConfig;
pub use tools::{FileToolConfig, FileToolsConfig, ToolAdapterKind};
pub use workflow::FileWorkflowConfig;

use gridwatch_application::WorkflowParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("{field} cannot be 0")]
    ZeroValue { field: &'static str },

    #[error("workflow.soft_step_limit ({soft}) exceeds workflow.hard_step_limit ({hard})")]
    InvertedStepLimits { soft: usize, hard: usize },

    #[error("llm.{field} cannot be empty")]
    EmptyLlmField { field: &'static str },

    #[error("tools.{tool}: http adapter needs a url")]
    MissingUrl { tool: &'static str },

    #[error("tools.{tool}: command adapter needs a program")]
    MissingProgram { tool: &'static str },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Control loop limits
    pub workflow: FileWorkflowConfig,
    /// Human review gate
    pub review: FileReviewConfig,
    /// Chat-completions endpoint
    pub llm: FileLlmConfig,
    /// Capability adapters
    pub tools: FileToolsConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let zero_checks = [
            ("workflow.max_iterations", self.workflow.max_iterations as u64),
            ("workflow.hard_step_limit", self.workflow.hard_step_limit as u64),
            ("workflow.modify_plan_cap", self.workflow.modify_plan_cap as u64),
            ("review.timeout_seconds", self.review.timeout_seconds),
            ("llm.timeout_seconds", self.llm.timeout_seconds),
            ("llm.max_tokens", u64::from(self.llm.max_tokens)),
        ];
        for (field, value) in zero_checks {
            if value == 0 {
                errors.push(ConfigValidationError::ZeroValue { field });
            }
        }

        if self.workflow.soft_step_limit > self.workflow.hard_step_limit {
            errors.push(ConfigValidationError::InvertedStepLimits {
                soft: self.workflow.soft_step_limit,
                hard: self.workflow.hard_step_limit,
            });
        }

        if self.llm.base_url.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyLlmField { field: "base_url" });
        }
        if self.llm.model.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyLlmField { field: "model" });
        }

        for (tool, config) in [("scada", &self.tools.scada), ("manual", &self.tools.manual)] {
            let Some(config) = config else { continue };
            match config.kind {
                ToolAdapterKind::Http
                    if config.url.as_deref().is_none_or(|u| u.trim().is_empty()) =>
                {
                    errors.push(ConfigValidationError::MissingUrl { tool });
                }
                ToolAdapterKind::Command
                    if config.program.as_deref().is_none_or(|p| p.trim().is_empty()) =>
                {
                    errors.push(ConfigValidationError::MissingProgram { tool });
                }
                _ => {}
            }
            if config.timeout_seconds == 0 {
                errors.push(ConfigValidationError::ZeroValue {
                    field: "tools.*.timeout_seconds",
                });
            }
        }

        errors
    }

    /// Workflow parameters from the `[workflow]` and `[review]` sections.
    pub fn workflow_params(&self) -> WorkflowParams {
        self.workflow
            .to_params()
            .with_review_timeout(Duration::from_secs(self.review.timeout_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwatch_domain::{OutputFormat, ReviewMode};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[workflow]
max_iterations = 4
soft_step_limit = 2

[review]
mode = "auto_synthesize"
timeout_seconds = 30

[llm]
base_url = "https://api.groq.com/openai/v1"
model = "llama-3.3-70b-versatile"
api_key_env = "GROQ_API_KEY"

[tools.scada]
kind = "http"
url = "http://localhost:8001/query"

[logging]
conversation_log = "logs/session.jsonl"

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.workflow.max_iterations, 4);
        assert_eq!(config.workflow.soft_step_limit, 2);
        assert_eq!(config.workflow.hard_step_limit, 5);
        assert_eq!(config.review.mode, ReviewMode::AutoSynthesize);
        assert_eq!(config.llm.api_key_env, "GROQ_API_KEY");
        assert!(config.tools.manual.is_none());
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.color);
        assert!(config.validate().is_empty());

        let params = config.workflow_params();
        assert_eq!(params.max_iterations, 4);
        assert_eq!(params.review_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.workflow.max_iterations, 5);
        assert_eq!(config.review.mode, ReviewMode::Interactive);
        assert_eq!(config.review.timeout_seconds, 300);
        assert!(config.tools.scada.is_none());
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let mut config = FileConfig::default();
        config.review.timeout_seconds = 0;
        config.workflow.soft_step_limit = 9;
        config.llm.model = " ".to_string();
        config.tools.manual = Some(FileToolConfig {
            kind: ToolAdapterKind::Command,
            ..Default::default()
        });

        let errors = config.validate();
        assert!(errors.contains(&ConfigValidationError::ZeroValue {
            field: "review.timeout_seconds"
        }));
        assert!(errors.contains(&ConfigValidationError::InvertedStepLimits { soft: 9, hard: 5 }));
        assert!(errors.contains(&ConfigValidationError::EmptyLlmField { field: "model" }));
        assert!(errors.contains(&ConfigValidationError::MissingProgram { tool: "manual" }));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_workflow_params_default_timeout() {
        let params = FileConfig::default().workflow_params();
        assert_eq!(params.review_timeout, Duration::from_secs(300));
        assert_eq!(params.max_iterations, 5);
    }
}
