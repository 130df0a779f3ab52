//! Agent configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment
//! variables → key file → defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::AgentError;

/// Groq's OpenAI-compatible API base.
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
/// Default chat model.
pub const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";
/// Key file read when no key is configured.
pub const DEFAULT_KEY_FILE: &str = "groq_api_key.txt";
/// Value returned by [`load_api_key`] when the key file does not exist.
pub const API_KEY_PLACEHOLDER: &str = "your_api_key_here";

/// Default max tokens for the parser completion.
const DEFAULT_MAX_TOKENS: u32 = 512;
/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Reads an API key file, trimming surrounding whitespace.
///
/// A missing or unreadable file yields [`API_KEY_PLACEHOLDER`].
#[must_use]
pub fn load_api_key(path: &Path) -> String {
    std::fs::read_to_string(path).map_or_else(
        |_| API_KEY_PLACEHOLDER.to_string(),
        |content| content.trim().to_string(),
    )
}

/// Configuration for the natural-language agent.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// LLM provider name (e.g., "openai").
    pub provider: String,
    /// API key for the provider.
    pub api_key: String,
    /// OpenAI-compatible API base URL.
    pub base_url: String,
    /// Chat model identifier.
    pub model: String,
    /// Maximum tokens for the parser completion.
    pub max_tokens: u32,
    /// Request timeout.
    pub timeout: Duration,
    /// Optional file overriding the parser system prompt.
    pub prompt_file: Option<PathBuf>,
}

impl AgentConfig {
    /// Creates a new builder for `AgentConfig`.
    #[must_use]
    pub fn builder() -> AgentConfigBuilder {
        AgentConfigBuilder::default()
    }
}

/// Builder for [`AgentConfig`].
#[derive(Debug, Clone, Default)]
pub struct AgentConfigBuilder {
    provider: Option<String>,
    api_key: Option<String>,
    key_file: Option<PathBuf>,
    base_url: Option<String>,
    model: Option<String>,
    max_tokens: Option<u32>,
    timeout: Option<Duration>,
    prompt_file: Option<PathBuf>,
}

impl AgentConfigBuilder {
    /// Populates unset fields from environment variables.
    #[must_use]
    pub fn from_env(mut self) -> Self {
        if self.provider.is_none() {
            self.provider = std::env::var("CFPB_AGENT_PROVIDER").ok();
        }
        if self.api_key.is_none() {
            self.api_key = std::env::var("GROQ_API_KEY")
                .or_else(|_| std::env::var("CFPB_AGENT_API_KEY"))
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
        if self.key_file.is_none() {
            self.key_file = std::env::var("CFPB_AGENT_KEY_FILE").ok().map(PathBuf::from);
        }
        if self.base_url.is_none() {
            self.base_url = std::env::var("CFPB_AGENT_BASE_URL").ok();
        }
        if self.model.is_none() {
            self.model = std::env::var("CFPB_AGENT_MODEL").ok();
        }
        if self.max_tokens.is_none() {
            self.max_tokens = std::env::var("CFPB_AGENT_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok());
        }
        if self.timeout.is_none() {
            self.timeout = std::env::var("CFPB_AGENT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs);
        }
        if self.prompt_file.is_none() {
            self.prompt_file = std::env::var("CFPB_AGENT_PROMPT_FILE")
                .ok()
                .map(PathBuf::from);
        }
        self
    }

    /// Sets the LLM provider name.
    #[must_use]
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the file the API key is read from when none is given directly.
    #[must_use]
    pub fn key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.key_file = Some(path.into());
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the chat model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the max tokens.
    #[must_use]
    pub const fn max_tokens(mut self, n: u32) -> Self {
        self.max_tokens = Some(n);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Sets the parser prompt override file.
    #[must_use]
    pub fn prompt_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.prompt_file = Some(path.into());
        self
    }

    /// Builds the [`AgentConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiKeyMissing`] if neither a key nor a readable
    /// key file was provided.
    pub fn build(self) -> Result<AgentConfig, AgentError> {
        let key_file = self
            .key_file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KEY_FILE));
        let api_key = self
            .api_key
            .unwrap_or_else(|| load_api_key(&key_file));
        if api_key.is_empty() || api_key == API_KEY_PLACEHOLDER {
            return Err(AgentError::ApiKeyMissing);
        }

        Ok(AgentConfig {
            provider: self.provider.unwrap_or_else(|| "openai".to_string()),
            api_key,
            base_url: self.base_url.unwrap_or_else(|| GROQ_API_BASE.to_string()),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            prompt_file: self.prompt_file,
        })
    }
}
