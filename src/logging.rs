//! Tracing subscriber setup.
//!
//! Logs always go to stderr: stdout carries MCP frames and command output.

use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when neither `RUST_LOG` nor `CFPB_LOG` is set.
pub const DEFAULT_LEVEL: &str = "warn";

/// Resolves the log filter.
///
/// `verbose` forces `debug`; otherwise `RUST_LOG`, then `CFPB_LOG`, then
/// [`DEFAULT_LEVEL`].
#[must_use]
pub fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_from_env("CFPB_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_tracing(verbose: bool) {
    let _ = fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
