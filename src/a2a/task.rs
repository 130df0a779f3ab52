//! Task and artifact envelope types.
//!
//! A caller sends a [`TaskRequest`]; the agent answers with a [`Task`]
//! whose artifacts carry the result or the error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `POST /tasks/send`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Caller-chosen task id; generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Skill to run.
    pub skill: String,
    /// Skill input.
    #[serde(default)]
    pub input: Value,
}

/// Terminal task state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Finished with a result artifact.
    Completed,
    /// Finished with an error artifact.
    Failed,
}

/// One piece of artifact content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Part {
    /// Structured JSON.
    Data {
        /// The payload.
        data: Value,
    },
    /// Plain text.
    Text {
        /// The text.
        text: String,
    },
}

/// Output attached to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Artifact name (`"result"` or `"error"`).
    pub name: String,
    /// Content parts.
    pub parts: Vec<Part>,
}

impl Artifact {
    /// A JSON result artifact.
    #[must_use]
    pub fn json(data: Value) -> Self {
        Self {
            name: "result".to_string(),
            parts: vec![Part::Data { data }],
        }
    }

    /// An error artifact.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            name: "error".to_string(),
            parts: vec![Part::Text {
                text: message.into(),
            }],
        }
    }

    /// Returns the first JSON part, if any.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        self.parts.iter().find_map(|part| match part {
            Part::Data { data } => Some(data),
            Part::Text { .. } => None,
        })
    }
}

/// A finished task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task id.
    pub id: String,
    /// Skill that ran.
    pub skill: String,
    /// Terminal state.
    pub state: TaskState,
    /// Result or error artifacts.
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    /// Error detail for failed tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Task {
    /// A completed task carrying one JSON artifact.
    #[must_use]
    pub fn completed(id: String, skill: String, data: Value) -> Self {
        Self {
            id,
            skill,
            state: TaskState::Completed,
            artifacts: vec![Artifact::json(data)],
            error: None,
        }
    }

    /// A failed task carrying an error artifact.
    #[must_use]
    pub fn failed(id: String, skill: String, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            id,
            skill,
            state: TaskState::Failed,
            artifacts: vec![Artifact::error(message.clone())],
            error: Some(message),
        }
    }
}
