//! Client for sending tasks to an A2A agent.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use super::card::AgentCard;
use super::task::{Task, TaskRequest, TaskState};
use crate::cfpb::status_detail;
use crate::error::{A2aError, UpstreamError};

/// Agent endpoint used when none is configured.
pub const DEFAULT_AGENT_URL: &str = "http://localhost:9100";

/// HTTP client for a remote A2A agent.
#[derive(Debug, Clone)]
pub struct A2aClient {
    http: reqwest::Client,
    base_url: String,
}

impl A2aClient {
    /// Creates a client for the agent at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, A2aError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Client {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the agent card.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn card(&self) -> Result<AgentCard, A2aError> {
        let url = format!("{}/.well-known/agent.json", self.base_url);
        let response = self.http.get(&url).send().await.map_err(UpstreamError::from)?;
        let response = Self::check(response).await?;
        let card = response.json().await.map_err(UpstreamError::from)?;
        Ok(card)
    }

    /// Sends a task and returns it in its terminal state.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response. A task
    /// that the agent reports as failed is returned, not an error.
    pub async fn send_task(&self, skill: &str, input: Value) -> Result<Task, A2aError> {
        let request = TaskRequest {
            id: Some(Uuid::new_v4().to_string()),
            skill: skill.to_string(),
            input,
        };
        debug!(agent = %self.base_url, skill, "sending A2A task");

        let url = format!("{}/tasks/send", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(UpstreamError::from)?;
        let response = Self::check(response).await?;
        let task = response.json().await.map_err(UpstreamError::from)?;
        Ok(task)
    }

    /// Sends a task and unwraps its first JSON artifact.
    ///
    /// # Errors
    ///
    /// Returns [`A2aError::TaskFailed`] for failed tasks and
    /// [`A2aError::NoArtifacts`] when a completed task carries no JSON.
    pub async fn invoke(&self, skill: &str, input: Value) -> Result<Value, A2aError> {
        let task = self.send_task(skill, input).await?;
        unwrap_task(task)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, A2aError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(UpstreamError::Status {
            status: status.as_u16(),
            detail: status_detail(status, &body),
        }
        .into())
    }
}

/// Extracts the result of a finished task.
///
/// # Errors
///
/// Same as [`A2aClient::invoke`].
pub fn unwrap_task(task: Task) -> Result<Value, A2aError> {
    if task.state == TaskState::Failed {
        return Err(A2aError::TaskFailed {
            message: task.error.unwrap_or_else(|| "unknown error".to_string()),
        });
    }

    task.artifacts
        .first()
        .and_then(|artifact| artifact.as_json())
        .cloned()
        .ok_or(A2aError::NoArtifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::a2a::task::Artifact;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> A2aClient {
        A2aClient::new(format!("{}/", server.uri()), Duration::from_secs(2))
            .unwrap_or_else(|e| unreachable!("{e}"))
    }

    #[tokio::test]
    async fn test_invoke_unwraps_artifact() {
        let server = MockServer::start().await;
        let task = Task::completed(
            "t".to_string(),
            "search_complaints".to_string(),
            json!({"hits": {"hits": []}}),
        );
        Mock::given(method("POST"))
            .and(path("/tasks/send"))
            .and(body_partial_json(json!({
                "skill": "search_complaints",
                "input": {"company": "Ally Bank"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&task))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .invoke("search_complaints", json!({"company": "Ally Bank"}))
            .await;
        assert_eq!(result.ok(), Some(json!({"hits": {"hits": []}})));
    }

    #[tokio::test]
    async fn test_failed_task_is_error() {
        let server = MockServer::start().await;
        let task = Task::failed("t".to_string(), "search_complaints".to_string(), "delegate down");
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&task))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .invoke("search_complaints", json!({}))
            .await
            .err();
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("A2A task failed: delegate down".to_string())
        );
    }

    #[tokio::test]
    async fn test_http_error_is_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .invoke("search_complaints", json!({}))
            .await
            .err();
        assert!(matches!(
            err,
            Some(A2aError::Upstream(UpstreamError::Status { status: 404, .. }))
        ));
    }

    #[tokio::test]
    async fn test_http_error_keeps_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({"detail": "input must be an object"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .invoke("search_complaints", json!({}))
            .await
            .err()
            .map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("input must be an object"));
    }

    #[tokio::test]
    async fn test_card() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/agent.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(AgentCard::complaint_search()))
            .mount(&server)
            .await;

        let card = client_for(&server).card().await.ok();
        assert_eq!(card, Some(AgentCard::complaint_search()));
    }

    #[test]
    fn test_unwrap_task_without_artifacts() {
        let mut task = Task::completed("t".to_string(), "s".to_string(), json!(1));
        task.artifacts.clear();
        assert!(matches!(unwrap_task(task.clone()), Err(A2aError::NoArtifacts)));

        task.artifacts.push(Artifact::error("text only"));
        assert!(matches!(unwrap_task(task), Err(A2aError::NoArtifacts)));
    }
}
