//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CFPB complaints: search the U.S. Consumer Complaint Database.
///
/// Direct search from the command line, plus MCP, HTTP proxy and A2A
/// servers and a natural-language agent.
#[derive(Parser, Debug)]
#[command(name = "cfpb-complaints")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// CFPB search API endpoint.
    #[arg(long, env = "CFPB_API_URL", global = true)]
    pub endpoint_url: Option<String>,

    /// CFPB request timeout in seconds.
    #[arg(long, env = "CFPB_TIMEOUT_SECS", global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Filters shared by direct searches.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Free-text search term.
    pub text: Option<String>,

    /// Exact CFPB company name (e.g. "PNC Bank N.A.").
    #[arg(short, long)]
    pub company: Option<String>,

    /// CFPB product category (e.g. "Mortgage").
    #[arg(short, long)]
    pub product: Option<String>,

    /// Two-letter state code.
    #[arg(long)]
    pub state: Option<String>,

    /// Only complaints received on or after this date.
    #[arg(long, conflicts_with = "days")]
    pub since: Option<String>,

    /// Only complaints from the last N days (0 = no lower bound).
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Number of complaints to return (1-100).
    #[arg(short = 'n', long, default_value = "20")]
    pub size: u32,

    /// Result offset for paging.
    #[arg(long, default_value = "0")]
    pub from: u32,

    /// Sort order: relevance, `created_date_desc`, `created_date_asc`,
    /// `total_amount_desc`.
    #[arg(long, default_value = "created_date_desc")]
    pub sort: String,

    /// Restrict the text search to one field: all, keyword,
    /// `complaint_what_happened`.
    #[arg(long)]
    pub field: Option<String>,

    /// Only complaints with a consumer narrative.
    #[arg(long)]
    pub narrative_only: bool,

    /// Return raw CSV instead of complaint records.
    #[arg(long)]
    pub csv: bool,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search complaints directly against the CFPB API.
    ///
    /// Zero results print guidance listing valid product categories and
    /// bank names.
    #[command(after_help = r#"Examples:
  cfpb-complaints search "overdraft fees"                   # Free-text search
  cfpb-complaints search -c "Ally Bank" -n 5                # Five newest for a company
  cfpb-complaints search -p Mortgage --state CA --days 90   # Product + state, last 90 days
  cfpb-complaints search --since 2024-01-01 --narrative-only
  cfpb-complaints search -c "Truist Bank" --csv > truist.csv
  cfpb-complaints --format json search escrow | jq '.[].complaint_id'
"#)]
    Search(SearchArgs),

    /// Print the product categories and bank names the CFPB recognizes.
    Reference,

    /// Ask a question in plain English.
    ///
    /// An LLM turns the question into search parameters, which are sent to
    /// an A2A agent (default) or run in-process with `--direct`.
    #[cfg(feature = "agent")]
    #[command(after_help = r#"Examples:
  cfpb-complaints ask "Five recent mortgage complaints about Wells Fargo"
  cfpb-complaints ask "Credit card complaints in Texas" --direct
  cfpb-complaints ask "Ally Bank complaints" --endpoint http://agents:9100
  GROQ_API_KEY=gsk-... cfpb-complaints ask "..."
"#)]
    Ask {
        /// The question.
        question: String,

        /// A2A agent base URL.
        #[arg(long, env = "CFPB_A2A_URL", default_value = crate::a2a::DEFAULT_AGENT_URL)]
        endpoint: String,

        /// Search the CFPB API in-process instead of via A2A (ignores `--endpoint`).
        #[arg(long)]
        direct: bool,

        /// Read the LLM API key from this file.
        #[arg(long)]
        key_file: Option<PathBuf>,

        /// Override the chat model.
        #[arg(long)]
        model: Option<String>,
    },

    /// Start MCP (Model Context Protocol) server.
    #[cfg(feature = "mcp")]
    #[command(subcommand)]
    Mcp(McpCommands),

    /// Start the HTTP proxy (`GET /complaints`).
    #[command(after_help = r#"Examples:
  cfpb-complaints proxy                         # Listen on 127.0.0.1:8000
  cfpb-complaints proxy --host 0.0.0.0 --port 8080
  curl 'http://127.0.0.1:8000/complaints?company=Ally%20Bank&size=3'
"#)]
    Proxy {
        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to.
        #[arg(long, default_value = "8000")]
        port: u16,
    },

    /// Start the A2A agent facade over the HTTP proxy.
    #[command(after_help = r#"Examples:
  cfpb-complaints a2a                                   # Listen on 0.0.0.0:9100
  cfpb-complaints a2a --delegate-url http://proxy:8000/complaints
"#)]
    A2a {
        /// Host to bind to.
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to.
        #[arg(long, default_value = "9100")]
        port: u16,

        /// Endpoint task input is forwarded to.
        #[arg(long, env = "CFPB_DELEGATE_URL", default_value = crate::a2a::DEFAULT_DELEGATE_URL)]
        delegate_url: String,
    },
}

/// MCP server subcommands.
#[cfg(feature = "mcp")]
#[derive(Subcommand, Debug)]
pub enum McpCommands {
    /// Start MCP server with stdio transport.
    ///
    /// Reads JSON-RPC messages from stdin, writes responses to stdout.
    #[command(after_help = r#"Examples:
  cfpb-complaints mcp stdio                 # Start stdio MCP server
"#)]
    Stdio,

    /// Start MCP server with SSE/HTTP transport.
    ///
    /// Listens for incoming HTTP connections using streamable HTTP transport.
    #[command(after_help = r#"Examples:
  cfpb-complaints mcp sse                            # Listen on 127.0.0.1:3000
  cfpb-complaints mcp sse --host 0.0.0.0 --port 8080
"#)]
    Sse {
        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to.
        #[arg(long, default_value = "3000")]
        port: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_defaults() {
        let cli = Cli::try_parse_from(["cfpb-complaints", "search", "escrow"])
            .unwrap_or_else(|e| unreachable!("{e}"));
        let Commands::Search(args) = cli.command else {
            unreachable!()
        };
        assert_eq!(args.text.as_deref(), Some("escrow"));
        assert_eq!(args.size, 20);
        assert_eq!(args.sort, "created_date_desc");
        assert!(!args.csv);
        assert_eq!(cli.format, "text");
    }

    #[test]
    fn test_since_conflicts_with_days() {
        let result = Cli::try_parse_from([
            "cfpb-complaints",
            "search",
            "--since",
            "2024-01-01",
            "--days",
            "7",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cfpb-complaints",
            "reference",
            "--format",
            "json",
            "--endpoint-url",
            "http://localhost:1234/",
        ])
        .unwrap_or_else(|e| unreachable!("{e}"));
        assert_eq!(cli.format, "json");
        assert_eq!(cli.endpoint_url.as_deref(), Some("http://localhost:1234/"));
    }

    #[test]
    fn test_server_defaults() {
        let cli = Cli::try_parse_from(["cfpb-complaints", "proxy"])
            .unwrap_or_else(|e| unreachable!("{e}"));
        assert!(matches!(
            cli.command,
            Commands::Proxy { ref host, port: 8000 } if host == "127.0.0.1"
        ));
    }
}
