//! Tool dispatch - route a step to the capability it names.
//!
//! Always returns a result string. Adapter errors become
//! `"<TOOL> error: ..."` results so the step still counts as executed.

use crate::ports::tool_capability::{ToolCapability, ToolRequest};
use gridwatch_domain::{Step, ToolKind};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct DispatchStepUseCase {
    scada: Arc<dyn ToolCapability>,
    manual: Arc<dyn ToolCapability>,
}

impl DispatchStepUseCase {
    pub fn new(scada: Arc<dyn ToolCapability>, manual: Arc<dyn ToolCapability>) -> Self {
        Self { scada, manual }
    }

    fn capability(&self, tool: ToolKind) -> &Arc<dyn ToolCapability> {
        match tool {
            ToolKind::Scada => &self.scada,
            ToolKind::Manual => &self.manual,
        }
    }

    /// Execute a typed step against its capability.
    pub async fn execute(&self, step: &Step, query: &str) -> String {
        let tool = step.tool();
        debug!("Dispatching to {}: {}", tool, step.description());

        let request = ToolRequest {
            tool,
            query,
            step_description: step.description(),
        };
        match self.capability(tool).query(request).await {
            Ok(result) => result,
            Err(e) => {
                warn!("{} capability failed: {}", tool, e);
                format!("{} error: {}", tool.tag(), e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::tool_capability::{ToolError, UnconfiguredCapability};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingCapability {
        answer: &'static str,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl RecordingCapability {
        fn new(answer: &'static str) -> Arc<Self> {
            Arc::new(Self {
                answer,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ToolCapability for RecordingCapability {
        async fn query(&self, request: ToolRequest<'_>) -> Result<String, ToolError> {
            self.calls.lock().unwrap().push((
                request.query.to_string(),
                request.step_description.to_string(),
            ));
            Ok(self.answer.to_string())
        }
    }

    struct FailingCapability;

    #[async_trait]
    impl ToolCapability for FailingCapability {
        async fn query(&self, _request: ToolRequest<'_>) -> Result<String, ToolError> {
            Err(ToolError::Failed("database locked".to_string()))
        }
    }

    #[tokio::test]
    async fn test_routes_by_tag() {
        let scada = RecordingCapability::new("42 PSI");
        let manual = RecordingCapability::new("Tighten the seal");
        let dispatcher = DispatchStepUseCase::new(scada.clone(), manual.clone());

        let result = dispatcher
            .execute(&Step::manual("Find leak procedure"), "Pump leaking?")
            .await;

        assert_eq!(result, "Tighten the seal");
        assert!(scada.calls.lock().unwrap().is_empty());
        assert_eq!(
            manual.calls.lock().unwrap()[0],
            ("Pump leaking?".to_string(), "Find leak procedure".to_string())
        );
    }

    #[tokio::test]
    async fn test_failure_becomes_result() {
        let dispatcher =
            DispatchStepUseCase::new(Arc::new(FailingCapability), Arc::new(UnconfiguredCapability));

        let scada = dispatcher.execute(&Step::scada("Get pressure"), "q").await;
        assert_eq!(scada, "SCADA error: database locked");

        let manual = dispatcher.execute(&Step::manual("Find fix"), "q").await;
        assert_eq!(manual, "MANUAL error: no adapter configured for MANUAL");
    }
}
