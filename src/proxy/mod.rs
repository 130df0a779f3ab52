//! HTTP proxy over the CFPB complaint search.
//!
//! `GET /complaints` takes short query-parameter names, runs them through
//! the shared query mapper, and returns the upstream JSON body unchanged.
//! The A2A facade delegates to this endpoint.

use std::net::SocketAddr;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::cfpb::ComplaintSearch;
use crate::core::ComplaintQuery;
use crate::error::{Error, ValidationError};

/// Page size used when the caller gives none.
pub const DEFAULT_PROXY_SIZE: u32 = 10;

/// Query parameters accepted by `GET /complaints`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyParams {
    /// Free-text search term.
    pub search: Option<String>,
    /// Exact CFPB company name.
    pub company: Option<String>,
    /// Exact CFPB product category.
    pub product: Option<String>,
    /// Earliest date received.
    pub date: Option<String>,
    /// Two-letter state code.
    pub state: Option<String>,
    /// Page size.
    pub size: Option<u32>,
}

impl From<ProxyParams> for ComplaintQuery {
    fn from(params: ProxyParams) -> Self {
        Self {
            text: params.search,
            company: params.company,
            product: params.product,
            state: params.state,
            since: params.date,
            size: params.size.unwrap_or(DEFAULT_PROXY_SIZE),
            ..Self::default()
        }
    }
}

/// Error response: 400 for rejected input, 500 for everything else.
#[derive(Debug)]
pub struct ProxyError(pub Error);

impl From<Error> for ProxyError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            Error::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Error::Upstream(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.detail()),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        warn!(status = status.as_u16(), %detail, "complaints request failed");
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_complaints(
    State(search): State<ComplaintSearch>,
    params: Result<Query<ProxyParams>, QueryRejection>,
) -> Result<Json<Value>, ProxyError> {
    let Query(params) = params.map_err(|rejection| {
        Error::from(ValidationError::InvalidParameter {
            message: rejection.body_text(),
        })
    })?;
    let query = ComplaintQuery::from(params);
    let body = search.search_raw(&query).await?;
    Ok(Json(body))
}

/// Builds the proxy router.
pub fn build_router(search: ComplaintSearch) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/complaints", get(get_complaints))
        .layer(TraceLayer::new_for_http())
        .with_state(search)
}

/// Serves the proxy until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener cannot bind.
pub async fn serve(search: ComplaintSearch, host: &str, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "complaints proxy listening on http://{addr}/complaints");

    axum::serve(listener, build_router(search))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::cfpb::CfpbConfig;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn router_for(uri: &str) -> Router {
        let config = CfpbConfig::builder()
            .endpoint(uri)
            .timeout(Duration::from_secs(2))
            .build();
        let search = ComplaintSearch::from_config(&config).unwrap_or_else(|e| unreachable!("{e}"));
        build_router(search)
    }

    async fn call(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(router_for("http://127.0.0.1:9/"), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_complaints_returns_upstream_body() {
        let upstream = MockServer::start().await;
        let body = json!({"hits": {"total": 1, "hits": [{"_source": {"company": "Test"}}]}});
        Mock::given(method("GET"))
            .and(query_param("search_term", "fee"))
            .and(query_param("company", "Ally Bank"))
            .and(query_param("state", "NY"))
            .and(query_param("date_received_min", "2024-01-01"))
            .and(query_param("size", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&upstream)
            .await;

        let (status, got) = call(
            router_for(&upstream.uri()),
            "/complaints?search=fee&company=Ally%20Bank&state=NY&date=2024-01-01&size=3",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(got, body);
    }

    #[tokio::test]
    async fn test_default_size() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("size", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": {"hits": []}})))
            .expect(1)
            .mount(&upstream)
            .await;

        let (status, _) = call(router_for(&upstream.uri()), "/complaints").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(json!({"message": "service unavailable"})),
            )
            .mount(&upstream)
            .await;

        let (status, body) = call(router_for(&upstream.uri()), "/complaints").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"detail": "service unavailable"}));
    }

    #[tokio::test]
    async fn test_non_numeric_size_is_json_400() {
        let (status, body) =
            call(router_for("http://127.0.0.1:9/"), "/complaints?size=many").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body["detail"]
                .as_str()
                .unwrap_or_default()
                .starts_with("invalid parameter:"),
            "{body}"
        );
    }

    #[tokio::test]
    async fn test_invalid_size_is_400() {
        let (status, body) = call(router_for("http://127.0.0.1:9/"), "/complaints?size=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap_or_default().starts_with("size out of range"));
    }
}
