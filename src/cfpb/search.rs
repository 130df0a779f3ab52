//! Complaint search service: mapper, client and normalizer in one call.
//!
//! Every facade (CLI, MCP, HTTP proxy, in-process agent skill) goes through
//! [`ComplaintSearch`], so there is exactly one mapping path.

use serde_json::Value;
use tracing::{debug, info};

use super::client::{CfpbClient, CfpbResponse};
use super::config::CfpbConfig;
use crate::core::{CfpbParams, ComplaintQuery, ResponseFormat, SearchOutcome, normalize};
use crate::error::{Result, UpstreamError};

/// Stateless complaint search over a [`CfpbClient`].
#[derive(Debug, Clone)]
pub struct ComplaintSearch {
    client: CfpbClient,
}

impl ComplaintSearch {
    /// Wraps an existing client.
    #[must_use]
    pub const fn new(client: CfpbClient) -> Self {
        Self { client }
    }

    /// Builds the client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &CfpbConfig) -> Result<Self> {
        Ok(Self::new(CfpbClient::new(config)?))
    }

    /// Runs a search and normalizes the result.
    ///
    /// Zero hits yield [`SearchOutcome::Guidance`], CSV requests yield
    /// [`SearchOutcome::Csv`].
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request is made, or an
    /// upstream error if the CFPB call fails.
    pub async fn search(&self, query: &ComplaintQuery) -> Result<SearchOutcome> {
        let params = Self::prepare(query)?;

        let outcome = match self.client.fetch(&params, query.format).await? {
            CfpbResponse::Json(body) => normalize(&body),
            CfpbResponse::Csv(text) => SearchOutcome::Csv(text),
        };

        match &outcome {
            SearchOutcome::Complaints(list) => info!(count = list.len(), "complaint search returned results"),
            SearchOutcome::Guidance(_) => info!("complaint search returned zero results"),
            SearchOutcome::Csv(text) => info!(bytes = text.len(), "complaint search returned CSV"),
        }

        Ok(outcome)
    }

    /// Runs a JSON search and returns the upstream body unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`search`](Self::search).
    pub async fn search_raw(&self, query: &ComplaintQuery) -> Result<Value> {
        let query = ComplaintQuery {
            format: ResponseFormat::Json,
            ..query.clone()
        };
        let params = Self::prepare(&query)?;

        match self.client.fetch(&params, ResponseFormat::Json).await? {
            CfpbResponse::Json(body) => Ok(body),
            CfpbResponse::Csv(_) => Err(UpstreamError::InvalidBody {
                message: "expected JSON, got CSV".to_string(),
            }
            .into()),
        }
    }

    fn prepare(query: &ComplaintQuery) -> Result<CfpbParams> {
        let params = query.to_params()?;
        debug!(?params, "mapped complaint query");
        Ok(params)
    }
}
