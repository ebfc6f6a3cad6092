use super::LlmDiagnosticOracle;
use crate::ports::llm_gateway::CompletionRequest;
use crate::ports::oracles::{OracleError, PlanEditorOracle};
use async_trait::async_trait;
use gridwatch_domain::{DiagnosticPromptTemplate, PastStep, Step, parse_plan_steps};

#[async_trait]
impl PlanEditorOracle for LlmDiagnosticOracle {
    async fn replace_plan(
        &self,
        query: &str,
        past_steps: &[PastStep],
        feedback: &str,
    ) -> Result<Vec<String>, OracleError> {
        let prompt = DiagnosticPromptTemplate::plan_from_feedback(query, past_steps, feedback);
        self.structured_steps(prompt).await
    }

    async fn modify_plan(
        &self,
        query: &str,
        past_steps: &[PastStep],
        remaining: &[Step],
        feedback: &str,
        cap: usize,
    ) -> Result<Vec<String>, OracleError> {
        let prompt =
            DiagnosticPromptTemplate::modify_plan(query, past_steps, remaining, feedback, cap);
        self.structured_steps(prompt).await
    }
}

impl LlmDiagnosticOracle {
    async fn structured_steps(&self, prompt: String) -> Result<Vec<String>, OracleError> {
        let text = self
            .complete(CompletionRequest::structured(
                DiagnosticPromptTemplate::structured_system(),
                prompt,
            ))
            .await?;
        parse_plan_steps(&text).ok_or(OracleError::Unparseable(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracles::test_support::ScriptedGateway;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_modify_plan_prompt_carries_cap() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            r#"{"steps": ["SCADA: Get last 24 hours of pressure"]}"#,
        ]));
        let oracle = LlmDiagnosticOracle::new(gateway.clone());

        let steps = oracle
            .modify_plan("q", &[], &[Step::scada("Get pressure")], "last 24 hours", 3)
            .await
            .unwrap();

        assert_eq!(steps, vec!["SCADA: Get last 24 hours of pressure"]);
        let prompt = gateway.requests.lock().unwrap()[0].prompt.clone();
        assert!(prompt.contains("at most 3 steps"));
        assert!(prompt.contains("1. SCADA: Get pressure"));
    }

    #[tokio::test]
    async fn test_replace_plan_unparseable() {
        let oracle = LlmDiagnosticOracle::new(Arc::new(ScriptedGateway::new(vec!["sure!"])));
        let result = oracle.replace_plan("q", &[], "check vibration").await;
        assert!(matches!(result, Err(OracleError::Unparseable(_))));
    }
}
