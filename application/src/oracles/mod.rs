//! Decision oracles backed by an [`LlmGateway`].
//!
//! One [`LlmDiagnosticOracle`] serves all four oracle ports. Each call
//! renders a [`DiagnosticPromptTemplate`](gridwatch_domain::DiagnosticPromptTemplate)
//! prompt, sends it through the gateway and parses the reply. Parsing is
//! lenient; tag validation is left to the workflow.

mod editor;
mod planner;
mod replanner;
mod synthesizer;

use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use crate::ports::oracles::OracleError;
use crate::use_cases::run_workflow::WorkflowOracles;
use std::sync::Arc;
use tracing::debug;

/// Sampling settings for synthesis and turn summaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProseSettings {
    pub temperature: f32,
    pub synthesis_max_tokens: u32,
    pub summary_max_tokens: u32,
}

impl Default for ProseSettings {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            synthesis_max_tokens: 600,
            summary_max_tokens: 150,
        }
    }
}

pub struct LlmDiagnosticOracle {
    gateway: Arc<dyn LlmGateway>,
    prose: ProseSettings,
}

impl LlmDiagnosticOracle {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            prose: ProseSettings::default(),
        }
    }

    pub fn with_prose_settings(mut self, prose: ProseSettings) -> Self {
        self.prose = prose;
        self
    }

    /// Wire this oracle into every workflow oracle slot.
    pub fn into_workflow_oracles(self) -> WorkflowOracles {
        let oracle = Arc::new(self);
        WorkflowOracles {
            planner: oracle.clone(),
            replanner: oracle.clone(),
            synthesizer: oracle.clone(),
            editor: oracle,
        }
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, OracleError> {
        let text = self.gateway.complete(request).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(OracleError::EmptyResponse);
        }
        debug!("Oracle reply ({} chars)", text.len());
        Ok(text.to_string())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Gateway replying with scripted texts and recording requests.
    pub struct ScriptedGateway {
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        pub requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedGateway {
        pub fn new(replies: Vec<&str>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().map(|r| Ok(r.to_string())).collect()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                replies: Mutex::new(VecDeque::from([Err(GatewayError::Timeout)])),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(GatewayError::RequestFailed("no scripted reply".to_string())))
        }
    }
}
