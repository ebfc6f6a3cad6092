//! Tool capability port
//!
//! Data-source adapters (sensor store, manual search) implement
//! [`ToolCapability`]. The dispatcher converts every [`ToolError`] into a
//! textual result, so adapters may fail freely.

use async_trait::async_trait;
use gridwatch_domain::ToolKind;
use thiserror::Error;

/// Errors a capability adapter may report.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{0}")]
    Failed(String),

    #[error("no adapter configured for {0}")]
    NotConfigured(ToolKind),

    #[error("timed out after {0}s")]
    Timeout(u64),
}

/// One call to a capability.
#[derive(Debug, Clone, Copy)]
pub struct ToolRequest<'a> {
    pub tool: ToolKind,
    /// The user's original query.
    pub query: &'a str,
    /// The step being executed.
    pub step_description: &'a str,
}

/// An external data source reachable by tag.
#[async_trait]
pub trait ToolCapability: Send + Sync {
    async fn query(&self, request: ToolRequest<'_>) -> Result<String, ToolError>;
}

/// Capability used when no adapter is configured for a tool.
pub struct UnconfiguredCapability;

#[async_trait]
impl ToolCapability for UnconfiguredCapability {
    async fn query(&self, request: ToolRequest<'_>) -> Result<String, ToolError> {
        Err(ToolError::NotConfigured(request.tool))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_capability_fails() {
        let err = UnconfiguredCapability
            .query(ToolRequest {
                tool: ToolKind::Manual,
                query: "q",
                step_description: "Find fix",
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "no adapter configured for MANUAL");
    }
}
