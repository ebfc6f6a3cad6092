//! HTTP endpoint capability.
//!
//! POSTs `{"query": <step>, "tool": <TAG>, "user_query": <query>}` to a
//! configured URL. A JSON body with a string `result` field yields that
//! field; any other body is returned as text.

use async_trait::async_trait;
use gridwatch_application::ports::tool_capability::{ToolCapability, ToolError, ToolRequest};
use std::time::Duration;
use tracing::debug;

pub struct HttpCapability {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpCapability {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ToolError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ToolError::Failed(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }
}

/// Extract the result text from a response body.
fn result_text(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json.get("result").and_then(|r| r.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl ToolCapability for HttpCapability {
    async fn query(&self, request: ToolRequest<'_>) -> Result<String, ToolError> {
        let payload = serde_json::json!({
            "query": request.step_description,
            "tool": request.tool.tag(),
            "user_query": request.query,
        });
        debug!("POST {} for {}", self.url, request.tool);

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ToolError::Timeout(self.timeout.as_secs())
                } else {
                    ToolError::Failed(format!("request to {} failed: {}", self.url, e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ToolError::Failed(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ToolError::Failed(format!(
                "HTTP error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        Ok(result_text(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_field_is_preferred() {
        assert_eq!(
            result_text(r#"{"result": "pressure 42 PSI", "rows": 3}"#),
            "pressure 42 PSI"
        );
    }

    #[test]
    fn test_plain_body() {
        assert_eq!(result_text("  Tighten the seal.\n"), "Tighten the seal.");
    }

    #[test]
    fn test_json_without_result_is_returned_whole() {
        assert_eq!(result_text(r#"{"rows": []}"#), r#"{"rows": []}"#);
    }
}
