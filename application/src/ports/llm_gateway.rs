//! LLM Gateway port
//!
//! Defines the interface for communicating with a language-model service.
//! The oracles in [`crate::oracles`] are built on top of it; the adapter
//! lives in the infrastructure layer.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Timeout")]
    Timeout,
}

/// A single chat-completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the provider for a JSON object response.
    pub json_response: bool,
}

impl CompletionRequest {
    /// Deterministic JSON request (planning, replanning, plan edits).
    pub fn structured(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            temperature: 0.0,
            max_tokens: 500,
            json_response: true,
        }
    }

    /// Free-text request.
    pub fn prose(
        system: impl Into<String>,
        prompt: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            temperature,
            max_tokens,
            json_response: false,
        }
    }
}

/// Gateway for LLM communication
///
/// Implementations must apply their own timeout; the workflow does not
/// wrap oracle calls.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one request and return the assistant's text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_request_defaults() {
        let req = CompletionRequest::structured("sys", "prompt");
        assert_eq!(req.temperature, 0.0);
        assert_eq!(req.max_tokens, 500);
        assert!(req.json_response);
    }

    #[test]
    fn test_prose_request() {
        let req = CompletionRequest::prose("sys", "prompt", 0.3, 600);
        assert!(!req.json_response);
        assert_eq!(req.max_tokens, 600);
    }
}
