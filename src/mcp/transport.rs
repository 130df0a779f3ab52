//! Transports for the complaints MCP server.
//!
//! `stdio` serves one client over the process's stdin/stdout; `sse` serves
//! any number of clients over HTTP at `/mcp`, each session getting its own
//! clone of the server.

use rmcp::ServiceExt;
use rmcp::transport::io::stdio;
use tracing::info;

use super::server::ComplaintsMcpServer;

/// Serves complaint searches to a single MCP client on stdin/stdout.
///
/// Runs until the client closes stdin. Logs must stay on stderr.
///
/// # Errors
///
/// Returns an error if the MCP handshake fails or the session aborts.
pub async fn serve_stdio(server: ComplaintsMcpServer) -> anyhow::Result<()> {
    info!("MCP server listening on stdio");
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

/// Serves complaint searches over MCP streamable HTTP at `http://{host}:{port}/mcp`.
///
/// Every session shares the server's pooled CFPB client. Stops on
/// Ctrl-C, cancelling open sessions.
///
/// # Errors
///
/// Returns an error if the address cannot be bound.
pub async fn serve_sse(server: ComplaintsMcpServer, host: &str, port: u16) -> anyhow::Result<()> {
    use rmcp::transport::streamable_http_server::{
        StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
    };
    use std::sync::Arc;

    let ct = tokio_util::sync::CancellationToken::new();

    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig {
            cancellation_token: ct.child_token(),
            ..Default::default()
        },
    );

    let router = axum::Router::new().nest_service("/mcp", service);
    let addr = format!("{host}:{port}");
    let tcp_listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, "MCP server listening on http://{addr}/mcp");

    axum::serve(tcp_listener, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            ct.cancel();
        })
        .await?;

    Ok(())
}
