//! MCP tool implementations.
//!
//! Each tool declares a typed input and output. The [`DynTool`] adapter does
//! the JSON side: it deserializes and validates arguments at the boundary,
//! then serializes the normalized result as pretty-printed JSON.

mod fulltext;
mod scholar;

pub use fulltext::{GetFulltextTool, SearchOpenAccessTool};
pub use scholar::{GetArticleVersionsTool, GetCitationsTool, SearchArticlesTool, SearchAuthorTool};

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::{CoreClient, ScholarClient};
use crate::config::Config;
use crate::error::{ToolError, ToolResult};
use crate::models::Validate;

/// Tool execution context.
///
/// Clients are built once at startup and shared read-only by every call.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// SerpAPI Google Scholar client.
    pub scholar: Arc<ScholarClient>,

    /// CORE Open Access client.
    pub core: Arc<CoreClient>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub fn new(scholar: Arc<ScholarClient>, core: Arc<CoreClient>) -> Self {
        Self { scholar, core }
    }

    /// Build both clients from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            Arc::new(ScholarClient::new(config)?),
            Arc::new(CoreClient::new(config)?),
        ))
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync + 'static {
    /// Arguments, deserialized from the `tools/call` argument object.
    type Input: DeserializeOwned + Validate + Send;

    /// Normalized result.
    type Output: Serialize + Send;

    /// Tool name (e.g., "search_articles").
    fn name(&self) -> &'static str;

    /// Tool description for LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Run the tool.
    async fn call(&self, ctx: &ToolContext, input: Self::Input) -> ToolResult<Self::Output>;
}

/// Object-safe view of a tool, used by the registry.
#[async_trait::async_trait]
pub trait DynTool: Send + Sync {
    fn name(&self) -> &'static str;

    fn descriptor(&self) -> ToolDescriptor;

    /// Deserialize, validate, run and serialize.
    async fn execute(&self, ctx: &ToolContext, arguments: serde_json::Value) -> ToolResult<String>;
}

#[async_trait::async_trait]
impl<T> DynTool for T
where
    T: McpTool,
{
    fn name(&self) -> &'static str {
        McpTool::name(self)
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: McpTool::name(self).to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }

    async fn execute(&self, ctx: &ToolContext, arguments: serde_json::Value) -> ToolResult<String> {
        let name = McpTool::name(self);
        let input: T::Input = serde_json::from_value(arguments).map_err(|e| {
            ToolError::validation(name, format!("Invalid arguments for {name}: {e}"))
        })?;
        input.validate()?;

        let output = self.call(ctx, input).await?;
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

/// MCP tool info for the `tools/list` response.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

impl ToolDescriptor {
    /// Parameter names listed under the schema's `required` key.
    #[must_use]
    pub fn required_params(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(|r| r.as_array())
            .map(|r| r.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default()
    }

    /// Check that `arguments` is an object carrying every required parameter.
    pub fn check_arguments(&self, arguments: &serde_json::Value) -> ToolResult<()> {
        let Some(object) = arguments.as_object() else {
            return Err(ToolError::validation(
                "arguments",
                format!("Arguments for {} must be a JSON object", self.name),
            ));
        };

        for param in self.required_params() {
            if object.get(param).is_none_or(serde_json::Value::is_null) {
                return Err(ToolError::missing_parameter(param));
            }
        }

        Ok(())
    }
}

/// A tool together with the descriptor captured at registration.
pub struct RegisteredTool {
    pub descriptor: ToolDescriptor,
    pub tool: Box<dyn DynTool>,
}

impl std::fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredTool").field("name", &self.descriptor.name).finish()
    }
}

/// Name → tool dispatch table, in registration order.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    /// Build a registry from explicit tools.
    #[must_use]
    pub fn new(tools: Vec<Box<dyn DynTool>>) -> Self {
        let tools = tools
            .into_iter()
            .map(|tool| RegisteredTool { descriptor: tool.descriptor(), tool })
            .collect();
        Self { tools }
    }

    /// Register the tools enabled by configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let all = all_tools();

        if let Some(enabled) = &config.enabled_tools {
            for name in enabled {
                if !all.iter().any(|t| t.name() == name.as_str()) {
                    tracing::warn!(tool = %name, "Ignoring unknown tool in allow-list");
                }
            }
        }

        Self::new(all.into_iter().filter(|t| config.is_tool_enabled(t.name())).collect())
    }

    /// Descriptors for `tools/list`.
    #[must_use]
    pub fn list_tools(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor).collect()
    }

    /// Look up a tool by name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|t| t.descriptor.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Every tool this server knows, in listing order.
#[must_use]
pub fn all_tools() -> Vec<Box<dyn DynTool>> {
    vec![
        // Google Scholar tools (4)
        Box::new(SearchArticlesTool),
        Box::new(SearchAuthorTool),
        Box::new(GetCitationsTool),
        Box::new(GetArticleVersionsTool),
        // Full-text tools (2)
        Box::new(GetFulltextTool),
        Box::new(SearchOpenAccessTool),
    ]
}
