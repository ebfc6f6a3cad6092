use super::LlmDiagnosticOracle;
use crate::ports::llm_gateway::CompletionRequest;
use crate::ports::oracles::{OracleError, PlanRequest, PlannerOracle};
use async_trait::async_trait;
use gridwatch_domain::{DiagnosticPromptTemplate, parse_plan_steps};
use tracing::warn;

#[async_trait]
impl PlannerOracle for LlmDiagnosticOracle {
    async fn plan(&self, request: PlanRequest<'_>) -> Result<Vec<String>, OracleError> {
        let prompt =
            DiagnosticPromptTemplate::plan(request.query, request.context, request.turn_number);
        let text = self
            .complete(CompletionRequest::structured(
                DiagnosticPromptTemplate::structured_system(),
                prompt,
            ))
            .await?;

        parse_plan_steps(&text).ok_or_else(|| {
            warn!("Planner reply had no step list");
            OracleError::Unparseable(text)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracles::test_support::ScriptedGateway;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_plan_parses_fenced_json() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            "Here you go:\n```json\n{\"steps\": [\"SCADA: Get March pressure readings\"]}\n```",
        ]));
        let oracle = LlmDiagnosticOracle::new(gateway.clone());

        let steps = oracle
            .plan(PlanRequest {
                query: "What is the pressure in March?",
                context: "",
                turn_number: 1,
            })
            .await
            .unwrap();

        assert_eq!(steps, vec!["SCADA: Get March pressure readings"]);
        let requests = gateway.requests.lock().unwrap();
        assert!(requests[0].json_response);
        assert_eq!(requests[0].temperature, 0.0);
        assert!(requests[0].prompt.contains("NEW CONVERSATION"));
    }

    #[tokio::test]
    async fn test_plan_unparseable_is_error() {
        let oracle = LlmDiagnosticOracle::new(Arc::new(ScriptedGateway::new(vec![
            "I think you should check the pressure.",
        ])));
        let result = oracle
            .plan(PlanRequest {
                query: "q",
                context: "",
                turn_number: 1,
            })
            .await;
        assert!(matches!(result, Err(OracleError::Unparseable(_))));
    }

    #[tokio::test]
    async fn test_plan_gateway_failure() {
        let oracle = LlmDiagnosticOracle::new(Arc::new(ScriptedGateway::failing()));
        let result = oracle
            .plan(PlanRequest {
                query: "q",
                context: "",
                turn_number: 1,
            })
            .await;
        assert!(matches!(result, Err(OracleError::Gateway(_))));
    }
}
