//! MCP (Model Context Protocol) server for cfpb-complaints.
//!
//! Exposes the complaint search as the `search_complaints` tool so an
//! LLM-driven client can query the CFPB database directly.
//!
//! # Feature Gate
//!
//! This module requires the `mcp` feature flag:
//! ```toml
//! [dependencies]
//! cfpb-complaints = { version = "...", features = ["mcp"] }
//! ```
//!
//! # Architecture
//!
//! ```text
//! MCP Client (desktop assistant, agent)
//!   ↓ search_complaints(text, company, product, since | days, ...)
//! ComplaintsMcpServer
//!   ↓ SearchComplaintsParams → ComplaintQuery
//! ComplaintSearch::search()
//!   ↓
//! Complaint[] | guidance | CSV → MCP Client
//! ```

pub mod params;
pub mod server;
pub mod transport;

pub use params::SearchComplaintsParams;
pub use server::ComplaintsMcpServer;
pub use transport::{serve_sse, serve_stdio};
