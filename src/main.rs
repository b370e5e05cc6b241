use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use paperblast_mcp::config::Config;
use paperblast_mcp::mcp::server::McpServer;
use paperblast_mcp::utils::PaperBlastClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// PaperBLAST MCP - protein literature search, Curated BLAST, and GapMind as MCP tools
#[derive(Parser, Debug)]
#[command(name = "paperblast-mcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP server for the PaperBLAST bioinformatics services", long_about = None)]
struct Cli {
    /// Enable verbose logging (can be used multiple times: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Run in HTTP mode instead of stdio
    #[arg(long)]
    http: bool,

    /// Host to bind to in HTTP mode
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to in HTTP mode
    #[arg(long, short, default_value_t = 3000)]
    port: u16,

    /// Base URL of the PaperBLAST service
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    // Logs go to stderr; in stdio mode stdout carries the MCP protocol.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("paperblast_mcp={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::default();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    tracing::info!(base_url = %config.base_url, "starting paperblast-mcp v{}", paperblast_mcp::VERSION);

    let client = Arc::new(PaperBlastClient::new(&config)?);
    let server = McpServer::new(client)?;

    if cli.http {
        let addr = format!("{}:{}", cli.host, cli.port);
        let (bound_addr, handle) = server.run_http(&addr).await?;
        tracing::info!("MCP server listening on {}", bound_addr);

        tokio::select! {
            result = handle => {
                result.map_err(|e| anyhow::anyhow!("Server task failed: {}", e))?;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
            }
        }
    } else {
        tracing::info!("Running MCP server in stdio mode");
        server.run().await?;
    }

    Ok(())
}
