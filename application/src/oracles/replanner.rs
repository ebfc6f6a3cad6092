use super::LlmDiagnosticOracle;
use crate::ports::llm_gateway::CompletionRequest;
use crate::ports::oracles::{OracleError, ReplanRequest, ReplannerOracle};
use async_trait::async_trait;
use gridwatch_domain::{
    DiagnosticPromptTemplate, ReplanOutcome, ReplanReply, Step, parse_replan_response,
};

#[async_trait]
impl ReplannerOracle for LlmDiagnosticOracle {
    async fn replan(&self, request: ReplanRequest<'_>) -> Result<ReplanOutcome, OracleError> {
        let prompt = DiagnosticPromptTemplate::replan(
            request.query,
            request.past_steps,
            request.remaining,
            request.feedback,
        );
        let text = self
            .complete(CompletionRequest::structured(
                DiagnosticPromptTemplate::structured_system(),
                prompt,
            ))
            .await?;

        match parse_replan_response(&text) {
            Some(ReplanReply::Response(response)) => Ok(ReplanOutcome::from_response(&response)),
            Some(ReplanReply::Steps(raw)) => Ok(ReplanOutcome::NewSteps(
                raw.iter()
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(Step::parse_or_infer)
                    .collect(),
            )),
            None => Err(OracleError::Unparseable(text)),
        }
    }
}
