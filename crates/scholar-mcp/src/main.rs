//! Google Scholar MCP Server - Entry Point
//!
//! Speaks MCP over stdio. Logs go to stderr so stdout stays protocol-only.

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scholar_mcp::config::{Config, parse_tool_list};
use scholar_mcp::server::McpServer;

// Flags override values read from the environment and `.env`.
#[derive(Parser, Debug)]
#[command(name = "scholar-mcp")]
#[command(about = "MCP server for Google Scholar (SerpAPI) and CORE Open Access full text")]
#[command(version)]
struct Cli {
    /// SerpAPI key (required for every tool call) [env: SERPAPI_API_KEY]
    #[arg(long)]
    serpapi_api_key: Option<String>,

    /// CORE API key (optional, sent as a bearer token) [env: CORE_API_KEY]
    #[arg(long)]
    core_api_key: Option<String>,

    /// Comma separated list of tools to expose (default: all) [env: SCHOLAR_MCP_TOOLS]
    #[arg(long)]
    tools: Option<String>,

    /// SerpAPI endpoint override [env: SERPAPI_URL]
    #[arg(long)]
    serpapi_url: Option<String>,

    /// CORE API base URL override [env: CORE_API_URL]
    #[arg(long)]
    core_api_url: Option<String>,

    /// Upstream request timeout in seconds (default: 30) [env: SCHOLAR_MCP_TIMEOUT_SECS]
    #[arg(long)]
    request_timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    /// Apply explicitly passed flags on top of `config`.
    fn apply(self, mut config: Config) -> Config {
        if self.serpapi_api_key.is_some() {
            config.serpapi_api_key = self.serpapi_api_key.filter(|k| !k.trim().is_empty());
        }
        if self.core_api_key.is_some() {
            config.core_api_key = self.core_api_key.filter(|k| !k.trim().is_empty());
        }
        if let Some(tools) = self.tools.as_deref() {
            config = config.with_enabled_tools(Some(parse_tool_list(tools)));
        }
        if let Some(url) = self.serpapi_url {
            config.serpapi_url = url;
        }
        if let Some(url) = self.core_api_url {
            config.core_api_url = url;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        config
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loads .env first, so RUST_LOG from the file reaches clap below.
    let env_config = Config::from_env()?;

    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Google Scholar MCP server");

    let config = cli.apply(env_config);

    tracing::debug!(?config, "Configuration loaded");

    let server = McpServer::from_config(&config)?;
    server.run_stdio().await?;

    Ok(())
}
