//! MCP server implementation.
//!
//! Stdio transport only; no network listener is opened.

pub mod dispatcher;
pub mod protocol;
pub mod stdio;

pub use dispatcher::Dispatcher;
pub use protocol::{CallToolResult, Content};

use crate::config::Config;
use crate::tools::{ToolContext, ToolRegistry};

/// MCP server for Google Scholar.
pub struct McpServer {
    dispatcher: Dispatcher,
}

impl McpServer {
    /// Create a new MCP server from prebuilt clients.
    #[must_use]
    pub fn new(ctx: ToolContext, registry: ToolRegistry) -> Self {
        Self { dispatcher: Dispatcher::new(registry, ctx) }
    }

    /// Build clients and the tool registry from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let ctx = ToolContext::from_config(config)?;
        let registry = ToolRegistry::from_config(config);

        if !config.has_api_key() {
            tracing::warn!("SERPAPI_API_KEY is not set; every tool call will fail until it is");
        }

        Ok(Self::new(ctx, registry))
    }

    /// Run the server in stdio mode.
    pub async fn run_stdio(&self) -> anyhow::Result<()> {
        tracing::info!("Starting MCP server in stdio mode");
        tracing::info!("Registered {} tools", self.dispatcher.registry().len());

        for tool in self.dispatcher.list_tools() {
            tracing::debug!("  - {}: {}", tool.name, tool.description);
        }

        stdio::run_stdio(&self.dispatcher).await
    }

    /// The dispatcher handling tool calls.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer").field("tools", &self.dispatcher.registry().len()).finish()
    }
}
