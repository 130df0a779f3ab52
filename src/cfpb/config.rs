//! CFPB client configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment variables → defaults.

use std::time::Duration;

/// Public CCDB-5 search endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://www.consumerfinance.gov/data-research/consumer-complaints/search/api/v1/";
/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`CfpbClient`](super::CfpbClient).
#[derive(Debug, Clone)]
pub struct CfpbConfig {
    /// Search endpoint URL.
    pub endpoint: String,
    /// Timeout for the whole request, connect through body.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl CfpbConfig {
    /// Creates a new builder for `CfpbConfig`.
    #[must_use]
    pub fn builder() -> CfpbConfigBuilder {
        CfpbConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::builder().from_env().build()
    }
}

impl Default for CfpbConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`CfpbConfig`].
#[derive(Debug, Clone, Default)]
pub struct CfpbConfigBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl CfpbConfigBuilder {
    /// Populates unset fields from environment variables.
    #[must_use]
    pub fn from_env(mut self) -> Self {
        if self.endpoint.is_none() {
            self.endpoint = std::env::var("CFPB_API_URL").ok();
        }
        if self.timeout.is_none() {
            self.timeout = std::env::var("CFPB_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs);
        }
        self
    }

    /// Sets the search endpoint URL.
    #[must_use]
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Sets the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Builds the [`CfpbConfig`].
    #[must_use]
    pub fn build(self) -> CfpbConfig {
        CfpbConfig {
            endpoint: self
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| concat!("cfpb-complaints/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}
