//! MCP server implementation for cfpb-complaints.
//!
//! Exposes the complaint search as one MCP tool and the CFPB reference
//! lists (product categories, bank names) as MCP resources.

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    AnnotateAble, CallToolResult, Content, Implementation, ListResourcesResult,
    PaginatedRequestParams, ProtocolVersion, RawResource, ReadResourceRequestParams,
    ReadResourceResult, ResourceContents, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, tool, tool_handler, tool_router};
use tracing::debug;

use crate::cfpb::{CfpbConfig, ComplaintSearch};
use crate::core::{PRODUCT_CATEGORIES, RECOGNIZED_BANKS, SearchOutcome};
use crate::error::Error;

use super::params::SearchComplaintsParams;

const PRODUCTS_URI: &str = "cfpb://reference/products";
const BANKS_URI: &str = "cfpb://reference/banks";

/// Maps crate errors to MCP errors: bad input is the caller's fault,
/// anything else is internal.
fn to_mcp_error(err: &Error) -> McpError {
    match err {
        Error::Validation(e) => McpError::invalid_params(e.to_string(), None),
        other => McpError::internal_error(format!("Complaint search failed: {other}"), None),
    }
}

/// CFPB complaints MCP server.
#[derive(Clone)]
pub struct ComplaintsMcpServer {
    tool_router: ToolRouter<Self>,
    search: ComplaintSearch,
}

#[tool_router]
impl ComplaintsMcpServer {
    /// Searches the CFPB complaint database.
    #[tool(
        name = "search_complaints",
        description = "Search the U.S. Consumer Financial Protection Bureau public complaint database and return recent complaints as structured objects. Pass `narrative_only=true` if you need complaints that include consumer narrative text. An empty result returns a `system_message` listing valid product categories and formal bank names."
    )]
    async fn search_complaints(
        &self,
        Parameters(params): Parameters<SearchComplaintsParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(?params, "search_complaints called");

        let query = params
            .into_query()
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let outcome = self
            .search
            .search(&query)
            .await
            .map_err(|e| to_mcp_error(&e))?;

        let text = match outcome {
            SearchOutcome::Csv(text) => text,
            other => serde_json::to_string_pretty(&other)
                .map_err(|e| McpError::internal_error(format!("Serialization error: {e}"), None))?,
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for ComplaintsMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "cfpb-complaints".to_string(),
                title: Some("Banking Complaints".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Use this server whenever you need data from the CFPB Consumer Complaint \
                 Database. Tip: pass the company name exactly as it appears in the CFPB \
                 'company' field (e.g., 'PNC Bank N.A.'). Valid product categories and \
                 bank names are available as resources."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let mut products = RawResource::new(PRODUCTS_URI, "CFPB product categories".to_string());
        products.description = Some(format!(
            "{} valid values for the `product` filter",
            PRODUCT_CATEGORIES.len()
        ));
        products.mime_type = Some("application/json".to_string());

        let mut banks = RawResource::new(BANKS_URI, "CFPB bank names".to_string());
        banks.description = Some(format!(
            "{} formal company names for the `company` filter",
            RECOGNIZED_BANKS.len()
        ));
        banks.mime_type = Some("application/json".to_string());

        Ok(ListResourcesResult {
            resources: vec![products.no_annotation(), banks.no_annotation()],
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParams { uri, .. }: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let list: &[&str] = match uri.as_str() {
            PRODUCTS_URI => &PRODUCT_CATEGORIES,
            BANKS_URI => &RECOGNIZED_BANKS,
            other => {
                return Err(McpError::resource_not_found(
                    format!("Unknown resource: {other}"),
                    None,
                ));
            }
        };

        let content = serde_json::to_string_pretty(list)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {e}"), None))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(content, uri)],
        })
    }
}

impl ComplaintsMcpServer {
    /// Creates a server over an existing search service.
    #[must_use]
    pub fn new(search: ComplaintSearch) -> Self {
        Self {
            tool_router: Self::tool_router(),
            search,
        }
    }

    /// Creates a server from CFPB client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &CfpbConfig) -> Result<Self, Error> {
        Ok(Self::new(ComplaintSearch::from_config(config)?))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::{UpstreamError, ValidationError};
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn server_for(uri: &str) -> ComplaintsMcpServer {
        let config = CfpbConfig::builder()
            .endpoint(uri)
            .timeout(Duration::from_secs(2))
            .build();
        ComplaintsMcpServer::from_config(&config).unwrap_or_else(|e| unreachable!("{e}"))
    }

    fn first_text(result: &CallToolResult) -> String {
        let content = serde_json::to_value(&result.content).unwrap_or_default();
        content[0]["text"].as_str().unwrap_or_default().to_string()
    }

    #[test]
    fn test_server_info() {
        let server = server_for("http://127.0.0.1:9/");
        let info = server.get_info();
        assert_eq!(info.server_info.name, "cfpb-complaints");
        assert!(info.instructions.unwrap_or_default().contains("PNC Bank N.A."));
    }

    #[test]
    fn test_error_mapping() {
        let err = to_mcp_error(&Error::Validation(ValidationError::MutuallyExclusiveDates));
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);

        let err = to_mcp_error(&Error::Upstream(UpstreamError::Transport {
            message: "timed out".to_string(),
        }));
        assert_eq!(err.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn test_tool_returns_guidance_on_zero_results() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": {"hits": []}})))
            .mount(&mock)
            .await;

        let server = server_for(&mock.uri());
        let result = server
            .search_complaints(Parameters(SearchComplaintsParams::default()))
            .await
            .unwrap_or_else(|e| unreachable!("{e:?}"));
        let payload: serde_json::Value =
            serde_json::from_str(&first_text(&result)).unwrap_or_default();
        assert!(payload["system_message"].is_string());
        assert_eq!(payload["product_categories"].as_array().map_or(0, Vec::len), 10);
    }

    #[tokio::test]
    async fn test_tool_rejects_bad_size() {
        let server = server_for("http://127.0.0.1:9/");
        let params = SearchComplaintsParams {
            size: Some(500),
            ..SearchComplaintsParams::default()
        };
        let err = server.search_complaints(Parameters(params)).await.err();
        assert_eq!(
            err.map(|e| e.code),
            Some(rmcp::model::ErrorCode::INVALID_PARAMS)
        );
    }
}
