//! ai-lint MCP Server
//!
//! Run with: ai-lint-mcp-server

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ai_lint_mcp::mcp::{LintHandler, McpServer, ToolRegistry};
use ai_lint_mcp::{HttpRuleFetcher, ServerConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "ai-lint-mcp-server", version)]
#[command(about = "MCP server serving document lint rules over stdio")]
struct Args {
    /// Diagnostic log format (logs always go to stderr)
    #[arg(long, env = "AI_LINT_LOG_FORMAT", value_enum, default_value = "text")]
    log_format: LogFormat,
}

fn init_tracing(format: LogFormat) {
    // stdout carries protocol frames, so every log line goes to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry();
    match format {
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .with(filter)
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init(),
    }
}

async fn serve() -> anyhow::Result<()> {
    let config = ServerConfig::default();
    let registry = ToolRegistry::standard().context("building tool registry")?;
    let fetcher = Arc::new(HttpRuleFetcher::new());

    let server = McpServer::new(LintHandler::new(config, registry, fetcher));

    tracing::info!("MCP Server running on stdio");
    server.run().await?;
    tracing::info!("stdin closed, shutting down");

    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Requests are handled strictly one at a time
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("creating tokio runtime")?;
    runtime.block_on(serve())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_format);

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Fatal error in main(): {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_need_no_flags() {
        let args = Args::try_parse_from(["ai-lint-mcp-server"]).unwrap();
        assert_eq!(args.log_format, LogFormat::Text);
    }

    #[test]
    fn test_json_log_format() {
        let args =
            Args::try_parse_from(["ai-lint-mcp-server", "--log-format", "json"]).unwrap();
        assert_eq!(args.log_format, LogFormat::Json);
    }
}
