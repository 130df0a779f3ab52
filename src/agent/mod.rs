//! Natural-language agent for complaint search.
//!
//! Turns a free-text question into complaint-search parameters with an
//! LLM, then runs the `search_complaints` skill. The LLM provider and the
//! skill backend are injected, so the same agent works against a remote
//! A2A facade or an in-process [`ComplaintSearch`](crate::cfpb::ComplaintSearch).
//!
//! # Architecture
//!
//! ```text
//! Question → ComplaintNlAgent
//!   ├── QueryParserAgent (LLM, JSON mode) → {search, company, ...}
//!   └── SkillInvoker
//!       ├── A2aClient → A2A facade → HTTP proxy → CFPB
//!       └── ComplaintSearch → CFPB
//! ```
//!
//! # Feature Gate
//!
//! This module requires the `agent` feature flag:
//! ```toml
//! [dependencies]
//! cfpb-complaints = { version = "...", features = ["agent"] }
//! ```

pub mod client;
pub mod config;
pub mod message;
pub mod nl;
pub mod parser;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod skill;
pub mod traits;

// Re-export key types
pub use client::create_provider;
pub use config::{AgentConfig, load_api_key};
pub use message::{ChatMessage, ChatRequest, ChatResponse, Role, TokenUsage};
pub use nl::ComplaintNlAgent;
pub use parser::QueryParserAgent;
pub use provider::LlmProvider;
pub use skill::SkillInvoker;
pub use traits::{Agent, AgentResponse};
