//! # cfpb-complaints
//!
//! Adapters for querying the U.S. Consumer Financial Protection Bureau
//! (CFPB) Consumer Complaint Database (CCDB-5).
//!
//! The core maps loosely specified caller intent (free text, company,
//! product, date range, paging) onto the CFPB search API's fixed query
//! parameters, and normalizes the Elasticsearch-shaped response into flat
//! [`Complaint`] records. A search that matches nothing yields a
//! [`Guidance`] payload listing valid product categories and bank names.
//!
//! Facades over the core:
//!
//! - **CLI** ([`cli`]): direct search and server launchers
//! - **MCP** ([`mcp`], feature `mcp`): `search_complaints` tool
//! - **HTTP proxy** ([`proxy`]): `GET /complaints`
//! - **A2A** ([`a2a`]): agent card and `tasks/send` over the proxy
//! - **NL agent** ([`agent`], feature `agent`): question → parameters → search
//!
//! ## Example
//!
//! ```no_run
//! use cfpb_complaints::{CfpbConfig, ComplaintQuery, ComplaintSearch};
//!
//! # async fn run() -> cfpb_complaints::Result<()> {
//! let search = ComplaintSearch::from_config(&CfpbConfig::from_env())?;
//! let query = ComplaintQuery {
//!     company: Some("PNC Bank N.A.".to_string()),
//!     size: 5,
//!     ..ComplaintQuery::default()
//! };
//! let outcome = search.search(&query).await?;
//! println!("{} complaints", outcome.complaint_count());
//! # Ok(())
//! # }
//! ```

pub mod a2a;
#[cfg(feature = "agent")]
pub mod agent;
pub mod cfpb;
pub mod cli;
pub mod core;
pub mod error;
pub mod logging;
#[cfg(feature = "mcp")]
pub mod mcp;
pub mod proxy;

pub use cfpb::{CfpbClient, CfpbConfig, ComplaintSearch};
pub use crate::core::{
    CfpbParams, Complaint, ComplaintQuery, Guidance, SearchOutcome, map_query, normalize,
};
pub use error::{Error, Result};
