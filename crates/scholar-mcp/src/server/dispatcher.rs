//! Tool-call dispatch.
//!
//! Every outcome, including unknown tools and missing configuration, comes
//! back as a [`CallToolResult`]; nothing here produces a JSON-RPC error.

use std::time::Instant;

use super::protocol::CallToolResult;
use crate::error::{ToolError, ToolResult};
use crate::tools::{ToolContext, ToolDescriptor, ToolRegistry};

/// Resolves tool calls against the registry and runs them.
#[derive(Debug)]
pub struct Dispatcher {
    registry: ToolRegistry,
    ctx: ToolContext,
}

impl Dispatcher {
    #[must_use]
    pub fn new(registry: ToolRegistry, ctx: ToolContext) -> Self {
        Self { registry, ctx }
    }

    /// Registered tool descriptors, in registration order.
    #[must_use]
    pub fn list_tools(&self) -> Vec<&ToolDescriptor> {
        self.registry.list_tools()
    }

    #[must_use]
    pub const fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one tool call and wrap the outcome.
    pub async fn call_tool(&self, name: &str, arguments: serde_json::Value) -> CallToolResult {
        let started = Instant::now();

        match self.try_call(name, arguments).await {
            Ok(text) => {
                tracing::info!(
                    tool = %name,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Tool call succeeded"
                );
                CallToolResult::success(text)
            }
            Err(e) => {
                if e.is_transport() {
                    tracing::error!(tool = %name, error = %e, "Tool call failed at transport level");
                } else {
                    tracing::warn!(tool = %name, error = %e, "Tool call failed");
                }
                CallToolResult::failure(e.to_user_message())
            }
        }
    }

    async fn try_call(&self, name: &str, arguments: serde_json::Value) -> ToolResult<String> {
        let entry =
            self.registry.resolve(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        if !self.ctx.scholar.has_api_key() {
            return Err(ToolError::missing_api_key());
        }

        entry.descriptor.check_arguments(&arguments)?;

        tracing::debug!(tool = %name, "Executing tool");
        entry.tool.execute(&self.ctx, arguments).await
    }
}
