//! Query-parser agent.
//!
//! Turns a natural-language question into a JSON object of complaint-search
//! parameters.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use super::config::AgentConfig;
use super::prompt::{build_parser_prompt, load_parser_prompt};
use super::provider::LlmProvider;
use super::traits::Agent;
use crate::error::AgentError;

/// Agent that extracts search parameters from a question.
pub struct QueryParserAgent {
    model: String,
    max_tokens: u32,
    system_prompt: String,
}

impl QueryParserAgent {
    /// Creates a parser agent, loading the prompt override if configured.
    #[must_use]
    pub fn new(config: &AgentConfig) -> Self {
        Self::with_prompt(config, load_parser_prompt(config.prompt_file.as_deref()))
    }

    /// Creates a parser agent with an explicit system prompt.
    #[must_use]
    pub fn with_prompt(config: &AgentConfig, system_prompt: String) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            system_prompt,
        }
    }

    /// Asks the LLM for search parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::EmptyResponse`] when the completion is blank and
    /// [`AgentError::ResponseParse`] when it is not a JSON object.
    pub async fn parse(
        &self,
        provider: &dyn LlmProvider,
        question: &str,
    ) -> Result<Map<String, Value>, AgentError> {
        let response = self.execute(provider, &build_parser_prompt(question)).await?;
        debug!(
            tokens = response.usage.total_tokens,
            finish_reason = ?response.finish_reason,
            "query parser responded"
        );
        Self::parse_params(&response.content)
    }

    /// Parses the completion text into a parameter object.
    fn parse_params(content: &str) -> Result<Map<String, Value>, AgentError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(AgentError::EmptyResponse);
        }

        // Handle markdown code blocks
        let json_str = if trimmed.starts_with("```") {
            trimmed
                .trim_start_matches("```json")
                .trim_start_matches("```")
                .trim_end_matches("```")
                .trim()
        } else {
            trimmed
        };

        match serde_json::from_str::<Value>(json_str) {
            Ok(Value::Object(params)) => Ok(params),
            Ok(other) => Err(AgentError::ResponseParse {
                message: format!("expected a JSON object, got {other}"),
                content: content.to_string(),
            }),
            Err(e) => Err(AgentError::ResponseParse {
                message: format!("expected JSON: {e}"),
                content: content.to_string(),
            }),
        }
    }
}

#[async_trait]
impl Agent for QueryParserAgent {
    fn name(&self) -> &'static str {
        "query_parser"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn json_mode(&self) -> bool {
        true
    }

    fn temperature(&self) -> f32 {
        0.0
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_parse_params_valid() {
        let params = QueryParserAgent::parse_params(r#"{"company": "Ally Bank", "size": 5}"#)
            .unwrap_or_default();
        assert_eq!(params.get("company"), Some(&json!("Ally Bank")));
        assert_eq!(params.get("size"), Some(&json!(5)));
    }

    #[test]
    fn test_parse_params_code_block() {
        let content = "```json\n{\"state\": \"CA\"}\n```";
        let params = QueryParserAgent::parse_params(content).unwrap_or_default();
        assert_eq!(params.get("state"), Some(&json!("CA")));
    }

    #[test_case("not json" ; "prose")]
    #[test_case("[1, 2]" ; "array")]
    #[test_case("\"Ally Bank\"" ; "string")]
    fn test_parse_params_rejects(content: &str) {
        let result = QueryParserAgent::parse_params(content);
        assert!(matches!(result, Err(AgentError::ResponseParse { .. })));
    }

    #[test_case("" ; "empty")]
    #[test_case("  \n " ; "whitespace")]
    fn test_parse_params_empty(content: &str) {
        assert!(matches!(
            QueryParserAgent::parse_params(content),
            Err(AgentError::EmptyResponse)
        ));
    }

    #[test]
    fn test_agent_properties() {
        let config = AgentConfig::builder()
            .api_key("test")
            .model("llama3")
            .build()
            .unwrap_or_else(|_| unreachable!());
        let agent = QueryParserAgent::with_prompt(&config, "prompt".to_string());
        assert_eq!(agent.name(), "query_parser");
        assert_eq!(agent.model(), "llama3");
        assert_eq!(agent.system_prompt(), "prompt");
        assert!(agent.json_mode());
    }
}
