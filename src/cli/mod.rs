//! CLI layer for cfpb-complaints.
//!
//! Provides the command-line interface using clap: direct search, the
//! reference lists, the natural-language agent and the three servers.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
#[cfg(feature = "mcp")]
pub use parser::McpCommands;
pub use parser::{Cli, Commands, SearchArgs};
