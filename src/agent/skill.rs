//! Skill invocation seam between the agent and a complaint-search backend.
//!
//! The remote path sends an A2A task; the in-process path calls
//! [`ComplaintSearch`] directly. Both accept the same input object, the
//! short parameter names served by the HTTP proxy.

use async_trait::async_trait;
use serde_json::Value;

use crate::a2a::{A2aClient, SKILL_NAME};
use crate::cfpb::ComplaintSearch;
use crate::core::ComplaintQuery;
use crate::error::AgentError;
use crate::proxy::ProxyParams;

/// Runs a named skill with a JSON input object.
#[async_trait]
pub trait SkillInvoker: Send + Sync {
    /// Invokes `skill` and returns its JSON result.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Skill`] if the skill is unknown or fails.
    async fn invoke(&self, skill: &str, input: Value) -> Result<Value, AgentError>;
}

#[async_trait]
impl SkillInvoker for A2aClient {
    async fn invoke(&self, skill: &str, input: Value) -> Result<Value, AgentError> {
        Self::invoke(self, skill, input)
            .await
            .map_err(|e| AgentError::Skill {
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl SkillInvoker for ComplaintSearch {
    async fn invoke(&self, skill: &str, input: Value) -> Result<Value, AgentError> {
        if skill != SKILL_NAME {
            return Err(AgentError::Skill {
                message: format!("unknown skill: {skill}"),
            });
        }

        let input = if input.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            input
        };
        let params: ProxyParams =
            serde_json::from_value(input).map_err(|e| AgentError::Skill {
                message: format!("invalid skill input: {e}"),
            })?;

        self.search_raw(&ComplaintQuery::from(params))
            .await
            .map_err(|e| AgentError::Skill {
                message: e.to_string(),
            })
    }
}
