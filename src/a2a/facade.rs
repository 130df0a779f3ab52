//! A2A server that exposes the complaints proxy as a peer-agent skill.
//!
//! Task input is forwarded verbatim as query parameters to the delegate
//! endpoint (normally the HTTP proxy's `/complaints`) and the JSON reply is
//! wrapped in a result artifact.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use super::card::AgentCard;
use super::task::{Task, TaskRequest};
use crate::cfpb::status_detail;
use crate::error::{A2aError, UpstreamError};

/// Delegate used when `CFPB_DELEGATE_URL` is unset.
pub const DEFAULT_DELEGATE_URL: &str = "http://localhost:8000/complaints";

/// A2A facade configuration.
#[derive(Debug, Clone)]
pub struct FacadeConfig {
    /// Endpoint that task input is forwarded to.
    pub delegate_url: String,
    /// Delegate request timeout.
    pub timeout: Duration,
}

#[derive(Clone)]
struct FacadeState {
    http: reqwest::Client,
    delegate_url: Arc<str>,
    card: Arc<AgentCard>,
}

/// Builds the facade router.
///
/// # Errors
///
/// Returns [`UpstreamError::Client`] if the HTTP client cannot be built.
pub fn build_router(config: &FacadeConfig) -> Result<Router, UpstreamError> {
    let http = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| UpstreamError::Client {
            message: e.to_string(),
        })?;

    let state = FacadeState {
        http,
        delegate_url: Arc::from(config.delegate_url.as_str()),
        card: Arc::new(AgentCard::complaint_search()),
    };

    Ok(Router::new()
        .route("/.well-known/agent.json", get(agent_card))
        .route("/tasks/send", post(send_task))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Serves the facade until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener cannot bind.
pub async fn serve(config: &FacadeConfig, host: &str, port: u16) -> anyhow::Result<()> {
    let router = build_router(config)?;
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, delegate = %config.delegate_url, "A2A facade listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}

async fn agent_card(State(state): State<FacadeState>) -> Json<AgentCard> {
    Json(state.card.as_ref().clone())
}

async fn send_task(State(state): State<FacadeState>, Json(request): Json<TaskRequest>) -> Json<Task> {
    let id = request
        .id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    if state.card.skill(&request.skill).is_none() {
        let err = A2aError::UnknownSkill {
            name: request.skill.clone(),
        };
        return Json(Task::failed(id, request.skill, err.to_string()));
    }

    match forward(&state, &request.input).await {
        Ok(body) => {
            info!(task = %id, "task completed");
            Json(Task::completed(id, request.skill, body))
        }
        Err(err) => {
            warn!(task = %id, error = %err, "task failed");
            Json(Task::failed(id, request.skill, err.to_string()))
        }
    }
}

async fn forward(state: &FacadeState, input: &Value) -> Result<Value, A2aError> {
    let params = input_to_query(input)?;

    let response = state
        .http
        .get(state.delegate_url.as_ref())
        .query(&params)
        .send()
        .await
        .map_err(UpstreamError::from)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            detail: status_detail(status, &body),
        }
        .into());
    }

    let body = response.json::<Value>().await.map_err(UpstreamError::from)?;
    Ok(body)
}

/// Flattens a task input object into query parameters.
///
/// Strings pass through as-is, other scalars use their JSON text, nulls are
/// dropped, and nested values are sent as compact JSON.
fn input_to_query(input: &Value) -> Result<Vec<(String, String)>, A2aError> {
    let object = match input {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(A2aError::InvalidInput {
                message: format!("expected a JSON object, got {other}"),
            });
        }
    };

    Ok(object
        .iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), value))
        })
        .collect())
}
