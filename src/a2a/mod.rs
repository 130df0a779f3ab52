//! Agent-to-agent (A2A) facade and client.
//!
//! The facade advertises one skill, `search_complaints`, and forwards each
//! task to the HTTP proxy. The client sends tasks to such a facade and is
//! what the natural-language agent uses for remote searches.
//!
//! ```text
//! Peer agent
//!   ↓ POST /tasks/send {skill, input}
//! A2A facade
//!   ↓ GET <delegate>?<input as query>
//! HTTP proxy → CFPB
//!   ↓
//! Task {state, artifacts[0].data} → Peer agent
//! ```

pub mod card;
pub mod client;
pub mod facade;
pub mod task;

pub use card::{AgentCard, SKILL_NAME, Skill};
pub use client::{A2aClient, DEFAULT_AGENT_URL, unwrap_task};
pub use facade::{DEFAULT_DELEGATE_URL, FacadeConfig, build_router, serve};
pub use task::{Artifact, Part, Task, TaskRequest, TaskState};
