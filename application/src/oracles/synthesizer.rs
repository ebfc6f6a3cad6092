use super::LlmDiagnosticOracle;
use crate::ports::llm_gateway::CompletionRequest;
use crate::ports::oracles::{OracleError, SynthesisRequest, SynthesizerOracle};
use async_trait::async_trait;
use gridwatch_domain::DiagnosticPromptTemplate;

#[async_trait]
impl SynthesizerOracle for LlmDiagnosticOracle {
    async fn synthesize(&self, request: SynthesisRequest<'_>) -> Result<String, OracleError> {
        let prompt =
            DiagnosticPromptTemplate::synthesis(request.query, request.past_steps, request.guidance);
        self.complete(CompletionRequest::prose(
            DiagnosticPromptTemplate::synthesis_system(),
            prompt,
            self.prose.temperature,
            self.prose.synthesis_max_tokens,
        ))
        .await
    }

    async fn summarize_turn(
        &self,
        query: &str,
        step_count: usize,
        response: &str,
    ) -> Result<String, OracleError> {
        let prompt = DiagnosticPromptTemplate::turn_summary(query, step_count, response);
        self.complete(CompletionRequest::prose(
            DiagnosticPromptTemplate::summary_system(),
            prompt,
            self.prose.temperature,
            self.prose.summary_max_tokens,
        ))
        .await
    }
}
