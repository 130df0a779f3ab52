//! CFPB Consumer Complaint Database (CCDB-5) access.
//!
//! # Architecture
//!
//! ```text
//! ComplaintQuery
//!   ↓ map_query (validation, CFPB vocabulary)
//! CfpbParams
//!   ↓ CfpbClient::fetch (one GET, Accept: json | csv)
//! CfpbResponse
//!   ↓ normalize (JSON only)
//! SearchOutcome → Complaints | Guidance | Csv
//! ```

pub mod client;
pub mod config;
pub mod search;

pub use client::{CfpbClient, CfpbResponse, status_detail};
pub use config::{CfpbConfig, DEFAULT_ENDPOINT};
pub use search::ComplaintSearch;
