//! CLI command implementations.
//!
//! Each command returns the text to print. Async work runs on a tokio
//! runtime created per command.

use std::future::Future;
use std::time::Duration;

use crate::cfpb::{CfpbConfig, ComplaintSearch};
use crate::cli::output::{OutputFormat, format_outcome, format_reference};
#[cfg(feature = "mcp")]
use crate::cli::parser::McpCommands;
use crate::cli::parser::{Cli, Commands, SearchArgs};
use crate::core::{ComplaintQuery, ResponseFormat};
use crate::error::{CommandError, Result};

/// Executes the CLI command.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Search(args) => cmd_search(cli, args, format),
        Commands::Reference => format_reference(format),
        #[cfg(feature = "agent")]
        Commands::Ask {
            question,
            endpoint,
            direct,
            key_file,
            model,
        } => cmd_ask(
            cli,
            &AskParams {
                question,
                endpoint,
                direct: *direct,
                key_file: key_file.as_deref(),
                model: model.as_deref(),
            },
            format,
        ),
        #[cfg(feature = "mcp")]
        Commands::Mcp(cmd) => cmd_mcp(cli, cmd),
        Commands::Proxy { host, port } => cmd_proxy(cli, host, *port),
        Commands::A2a {
            host,
            port,
            delegate_url,
        } => cmd_a2a(cli, host, *port, delegate_url),
    }
}

/// Builds the CFPB client configuration from the environment and global flags.
#[must_use]
pub fn cfpb_config(cli: &Cli) -> CfpbConfig {
    let mut builder = CfpbConfig::builder().from_env();
    if let Some(url) = &cli.endpoint_url {
        builder = builder.endpoint(url.clone());
    }
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

/// Converts search flags into a query.
///
/// # Errors
///
/// Returns a validation error for an unknown sort order or field.
pub fn search_args_to_query(args: &SearchArgs) -> Result<ComplaintQuery> {
    Ok(ComplaintQuery {
        text: args.text.clone(),
        company: args.company.clone(),
        product: args.product.clone(),
        state: args.state.clone(),
        since: args.since.clone(),
        days: args.days,
        size: args.size,
        offset: args.from,
        sort: Some(args.sort.parse()?),
        field_restrict: args.field.as_deref().map(str::parse).transpose()?,
        narrative_only: args.narrative_only,
        format: if args.csv {
            ResponseFormat::Csv
        } else {
            ResponseFormat::Json
        },
    })
}

fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        CommandError::ExecutionFailed(format!("Failed to create async runtime: {e}"))
    })?;
    Ok(rt.block_on(future))
}

fn cmd_search(cli: &Cli, args: &SearchArgs, format: OutputFormat) -> Result<String> {
    let query = search_args_to_query(args)?;
    // Validate before spinning up a runtime or client.
    query.to_params()?;

    let search = ComplaintSearch::from_config(&cfpb_config(cli))?;
    let outcome = block_on(async { search.search(&query).await })??;
    format_outcome(&outcome, format)
}

#[cfg(feature = "agent")]
struct AskParams<'a> {
    question: &'a str,
    endpoint: &'a str,
    direct: bool,
    key_file: Option<&'a std::path::Path>,
    model: Option<&'a str>,
}

#[cfg(feature = "agent")]
fn cmd_ask(cli: &Cli, params: &AskParams<'_>, format: OutputFormat) -> Result<String> {
    use std::sync::Arc;

    use crate::a2a::A2aClient;
    use crate::agent::{AgentConfig, ComplaintNlAgent, SkillInvoker, create_provider};
    use crate::cli::output::format_raw;

    let mut builder = AgentConfig::builder();
    if let Some(path) = params.key_file {
        builder = builder.key_file(path);
    }
    if let Some(model) = params.model {
        builder = builder.model(model);
    }
    let config = builder.from_env().build()?;
    let provider = create_provider(&config)?;

    let cfpb = cfpb_config(cli);
    let invoker: Arc<dyn SkillInvoker> = if params.direct {
        Arc::new(ComplaintSearch::from_config(&cfpb)?)
    } else {
        Arc::new(A2aClient::new(params.endpoint, cfpb.timeout)?)
    };

    let agent = ComplaintNlAgent::new(provider, invoker, &config);
    let body = block_on(async { agent.run(params.question).await })??;
    format_raw(&body, format)
}

#[cfg(feature = "mcp")]
fn cmd_mcp(cli: &Cli, cmd: &McpCommands) -> Result<String> {
    use crate::mcp::{ComplaintsMcpServer, serve_sse, serve_stdio};

    let server = ComplaintsMcpServer::from_config(&cfpb_config(cli))?;

    block_on(async {
        match cmd {
            McpCommands::Stdio => serve_stdio(server).await,
            McpCommands::Sse { host, port } => serve_sse(server, host, *port).await,
        }
    })?
    .map_err(|e| CommandError::ExecutionFailed(format!("MCP server error: {e}")))?;

    Ok(String::new())
}

fn cmd_proxy(cli: &Cli, host: &str, port: u16) -> Result<String> {
    let search = ComplaintSearch::from_config(&cfpb_config(cli))?;

    block_on(crate::proxy::serve(search, host, port))?
        .map_err(|e| CommandError::ExecutionFailed(format!("proxy server error: {e}")))?;

    Ok(String::new())
}

fn cmd_a2a(cli: &Cli, host: &str, port: u16, delegate_url: &str) -> Result<String> {
    let config = crate::a2a::FacadeConfig {
        delegate_url: delegate_url.to_string(),
        timeout: cfpb_config(cli).timeout,
    };

    block_on(crate::a2a::serve(&config, host, port))?
        .map_err(|e| CommandError::ExecutionFailed(format!("A2A server error: {e}")))?;

    Ok(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldRestrict, SortOrder};
    use crate::error::{Error, ValidationError};
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap_or_else(|e| unreachable!("{e}"))
    }

    #[test]
    fn test_search_args_to_query() {
        let cli = parse(&[
            "cfpb-complaints",
            "search",
            "late fees",
            "--company",
            "Ally Bank",
            "--days",
            "0",
            "--sort",
            "relevance",
            "--field",
            "keyword",
            "--csv",
        ]);
        let Commands::Search(args) = &cli.command else {
            unreachable!()
        };
        let query = search_args_to_query(args).unwrap_or_default();
        assert_eq!(query.text.as_deref(), Some("late fees"));
        assert_eq!(query.company.as_deref(), Some("Ally Bank"));
        assert_eq!(query.days, Some(0));
        assert_eq!(query.sort, Some(SortOrder::Relevance));
        assert_eq!(query.field_restrict, Some(FieldRestrict::Keyword));
        assert_eq!(query.format, ResponseFormat::Csv);
    }

    #[test]
    fn test_search_rejects_bad_sort() {
        let cli = parse(&["cfpb-complaints", "search", "--sort", "oldest"]);
        let Commands::Search(args) = &cli.command else {
            unreachable!()
        };
        assert!(matches!(
            search_args_to_query(args),
            Err(Error::Validation(ValidationError::UnsupportedSort { .. }))
        ));
    }

    #[test]
    fn test_search_size_validated_before_request() {
        let cli = parse(&[
            "cfpb-complaints",
            "--endpoint-url",
            "http://127.0.0.1:9/",
            "search",
            "--size",
            "0",
        ]);
        assert!(matches!(
            execute(&cli),
            Err(Error::Validation(ValidationError::SizeOutOfRange { size: 0 }))
        ));
    }

    #[test]
    fn test_cfpb_config_overrides() {
        let cli = parse(&[
            "cfpb-complaints",
            "--endpoint-url",
            "http://localhost:1234/",
            "--timeout",
            "12",
            "reference",
        ]);
        let config = cfpb_config(&cli);
        assert_eq!(config.endpoint, "http://localhost:1234/");
        assert_eq!(config.timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_reference_command() {
        let out = execute(&parse(&["cfpb-complaints", "reference"])).unwrap_or_default();
        assert!(out.contains("Mortgage"));
        assert!(out.contains("Huntington National Bank"));
    }
}
