//! External command capability.
//!
//! Runs a configured program with the step description as its last
//! argument; trimmed stdout is the result.

use async_trait::async_trait;
use gridwatch_application::ports::tool_capability::{ToolCapability, ToolError, ToolRequest};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Bytes of stdout kept as a step result (1 MB).
const MAX_OUTPUT_SIZE: usize = 1024 * 1024;

pub struct CommandCapability {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandCapability {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }
}

#[async_trait]
impl ToolCapability for CommandCapability {
    async fn query(&self, request: ToolRequest<'_>) -> Result<String, ToolError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(request.step_description)
            .env("GRIDWATCH_QUERY", request.query)
            .env("GRIDWATCH_TOOL", request.tool.tag())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Running {} for {}", self.program, request.tool);
        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| ToolError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| ToolError::Failed(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ToolError::Failed(format!(
                "{} exited with code {}: {}",
                self.program,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        let mut stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.len() > MAX_OUTPUT_SIZE {
            let mut end = MAX_OUTPUT_SIZE;
            while !stdout.is_char_boundary(end) {
                end -= 1;
            }
            stdout.truncate(end);
            stdout.push_str("\n... (output truncated)");
        }
        Ok(stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use gridwatch_domain::ToolKind;

    fn request() -> ToolRequest<'static> {
        ToolRequest {
            tool: ToolKind::Manual,
            query: "Pump leaking?",
            step_description: "Find leak procedure",
        }
    }

    #[tokio::test]
    async fn test_step_is_last_argument() {
        let capability = CommandCapability::new(
            "echo",
            vec!["manual:".to_string()],
            Duration::from_secs(5),
        );
        let result = capability.query(request()).await.unwrap();
        assert_eq!(result, "manual: Find leak procedure");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let capability = CommandCapability::new(
            "sh",
            vec!["-c".to_string(), "echo broken >&2; exit 3".to_string()],
            Duration::from_secs(5),
        );
        let err = capability.query(request()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("code 3"));
        assert!(message.contains("broken"));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let capability =
            CommandCapability::new("gridwatch-no-such-program", vec![], Duration::from_secs(5));
        assert!(matches!(
            capability.query(request()).await,
            Err(ToolError::Failed(_))
        ));
    }

    #[tokio::test]
    async fn test_timeout() {
        let capability = CommandCapability::new(
            "sh",
            vec!["-c".to_string(), "sleep 5".to_string()],
            Duration::from_millis(100),
        );
        assert!(matches!(
            capability.query(request()).await,
            Err(ToolError::Timeout(_))
        ));
    }
}
