//! Natural-language complaint agent.
//!
//! Two steps: the [`QueryParserAgent`] turns the question into search
//! parameters, then a [`SkillInvoker`] runs `search_complaints` with them.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use super::config::AgentConfig;
use super::parser::QueryParserAgent;
use super::provider::LlmProvider;
use super::skill::SkillInvoker;
use crate::a2a::SKILL_NAME;
use crate::error::AgentError;

/// Answers questions about CFPB complaints with raw search results.
pub struct ComplaintNlAgent {
    provider: Arc<dyn LlmProvider>,
    invoker: Arc<dyn SkillInvoker>,
    parser: QueryParserAgent,
}

impl ComplaintNlAgent {
    /// Creates an agent from its injected capabilities.
    #[must_use]
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        invoker: Arc<dyn SkillInvoker>,
        config: &AgentConfig,
    ) -> Self {
        Self {
            provider,
            invoker,
            parser: QueryParserAgent::new(config),
        }
    }

    /// Parses the question and runs the search.
    ///
    /// # Errors
    ///
    /// Returns the parser's error or [`AgentError::Skill`] if the search
    /// fails.
    pub async fn run(&self, question: &str) -> Result<Value, AgentError> {
        let params = self.parser.parse(self.provider.as_ref(), question).await?;
        info!(provider = self.provider.name(), ?params, "parsed question");

        self.invoker.invoke(SKILL_NAME, Value::Object(params)).await
    }
}

impl std::fmt::Debug for ComplaintNlAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplaintNlAgent")
            .field("provider", &self.provider.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::message::{ChatRequest, ChatResponse};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct ScriptedProvider {
        reply: String,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(request.clone());
            }
            Ok(ChatResponse {
                content: self.reply.clone(),
                ..ChatResponse::default()
            })
        }
    }

    #[derive(Default)]
    struct RecordingInvoker {
        calls: Mutex<Vec<(String, Value)>>,
    }

    #[async_trait]
    impl SkillInvoker for RecordingInvoker {
        async fn invoke(&self, skill: &str, input: Value) -> Result<Value, AgentError> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push((skill.to_string(), input.clone()));
            }
            Ok(json!({"hits": {"hits": []}, "echo": input}))
        }
    }

    fn config() -> AgentConfig {
        AgentConfig::builder()
            .api_key("test")
            .build()
            .unwrap_or_else(|_| unreachable!())
    }

    #[tokio::test]
    async fn test_run_parses_then_invokes() {
        let provider = Arc::new(ScriptedProvider::new(
            r#"{"company": "Wells Fargo Bank, N.A.", "size": 3}"#,
        ));
        let invoker = Arc::new(RecordingInvoker::default());
        let agent = ComplaintNlAgent::new(provider.clone(), invoker.clone(), &config());

        let result = agent
            .run("Show three complaints about Wells Fargo")
            .await
            .unwrap_or_default();
        assert_eq!(
            result["echo"],
            json!({"company": "Wells Fargo Bank, N.A.", "size": 3})
        );

        let calls = invoker.calls.lock().map(|c| c.clone()).unwrap_or_default();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, SKILL_NAME);

        let seen = provider.seen.lock().map(|s| s.clone()).unwrap_or_default();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].json_mode);
        assert_eq!(seen[0].temperature, Some(0.0));
        assert!(seen[0].messages[1].content.contains("Wells Fargo"));
    }

    #[tokio::test]
    async fn test_run_empty_completion() {
        let invoker = Arc::new(RecordingInvoker::default());
        let agent = ComplaintNlAgent::new(
            Arc::new(ScriptedProvider::new("")),
            invoker.clone(),
            &config(),
        );

        let result = agent.run("anything").await;
        assert!(matches!(result, Err(AgentError::EmptyResponse)));
        assert!(invoker.calls.lock().map(|c| c.is_empty()).unwrap_or(false));
    }

    #[tokio::test]
    async fn test_run_non_json_completion() {
        let agent = ComplaintNlAgent::new(
            Arc::new(ScriptedProvider::new("Sure! Here are some complaints.")),
            Arc::new(RecordingInvoker::default()),
            &config(),
        );

        let result = agent.run("anything").await;
        assert!(matches!(result, Err(AgentError::ResponseParse { .. })));
    }
}
