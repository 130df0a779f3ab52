//! HTTP client for the CFPB complaint search API.
//!
//! One GET per call, no retries. Failures of any kind surface as
//! [`UpstreamError`].

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;

use super::config::CfpbConfig;
use crate::core::{CfpbParams, ResponseFormat};
use crate::error::UpstreamError;

/// Body returned by the CFPB API.
#[derive(Debug, Clone, PartialEq)]
pub enum CfpbResponse {
    /// Parsed search-hit JSON.
    Json(Value),
    /// Raw CSV export.
    Csv(String),
}

/// CFPB search API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CfpbClient {
    http: reqwest::Client,
    endpoint: String,
}

impl CfpbClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Client`] if the HTTP client cannot be built
    /// (for example, TLS backend initialization failure).
    pub fn new(config: &CfpbConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| UpstreamError::Client {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Performs one search request.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Status`] for non-2xx responses,
    /// [`UpstreamError::Transport`] for network failures and timeouts, and
    /// [`UpstreamError::InvalidBody`] when a JSON body cannot be parsed.
    pub async fn fetch(
        &self,
        params: &CfpbParams,
        format: ResponseFormat,
    ) -> Result<CfpbResponse, UpstreamError> {
        debug!(endpoint = %self.endpoint, ?params, %format, "querying CFPB");

        let response = self
            .http
            .get(&self.endpoint)
            .header(ACCEPT, format.accept())
            .query(params)
            .send()
            .await
            .map_err(|e| {
                debug!(error = %e, "CFPB request failed");
                UpstreamError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = status_detail(status, &body);
            debug!(status = status.as_u16(), %detail, "CFPB API returned an error");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response.text().await?;
        match format {
            ResponseFormat::Csv => Ok(CfpbResponse::Csv(body)),
            ResponseFormat::Json => serde_json::from_str(&body)
                .map(CfpbResponse::Json)
                .map_err(|e| UpstreamError::InvalidBody {
                    message: e.to_string(),
                }),
        }
    }
}

/// Extracts a caller-facing detail from an error response.
///
/// Uses the JSON body's `message` field (CFPB API) or `detail` field
/// (complaints proxy) when there is one, otherwise `"<code> <reason>"`.
#[must_use]
pub fn status_detail(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "detail"]
                .iter()
                .find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| {
            format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )
        })
}
