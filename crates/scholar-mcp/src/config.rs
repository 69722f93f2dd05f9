//! Configuration for the Scholar MCP server.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// SerpAPI search endpoint (all Google Scholar engines share it).
    pub const SERPAPI_URL: &str = "https://serpapi.com/search";

    /// CORE v3 API base URL.
    pub const CORE_API_URL: &str = "https://api.core.ac.uk/v3";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Environment variable names.
pub mod env {
    /// SerpAPI key (primary provider).
    pub const SERPAPI_API_KEY: &str = "SERPAPI_API_KEY";

    /// CORE API key (full-text provider, optional).
    pub const CORE_API_KEY: &str = "CORE_API_KEY";

    /// Override for the SerpAPI endpoint.
    pub const SERPAPI_URL: &str = "SERPAPI_URL";

    /// Override for the CORE API base URL.
    pub const CORE_API_URL: &str = "CORE_API_URL";

    /// Comma separated tool allow-list.
    pub const TOOLS: &str = "SCHOLAR_MCP_TOOLS";

    /// Upstream request timeout in seconds.
    pub const TIMEOUT_SECS: &str = "SCHOLAR_MCP_TIMEOUT_SECS";
}

/// Server configuration.
#[derive(Clone)]
pub struct Config {
    /// SerpAPI key. Every tool call fails without it.
    pub serpapi_api_key: Option<String>,

    /// CORE API key, sent as a bearer token when present.
    pub core_api_key: Option<String>,

    /// SerpAPI endpoint (for testing with mock servers).
    pub serpapi_url: String,

    /// CORE API base URL (for testing with mock servers).
    pub core_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Tools to expose. `None` registers every tool.
    pub enabled_tools: Option<Vec<String>>,
}

impl Config {
    /// Create a new configuration with the given provider keys.
    #[must_use]
    pub fn new(serpapi_api_key: Option<String>, core_api_key: Option<String>) -> Self {
        Self {
            serpapi_api_key: non_empty(serpapi_api_key),
            core_api_key: non_empty(core_api_key),
            serpapi_url: api::SERPAPI_URL.to_string(),
            core_api_url: api::CORE_API_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            enabled_tools: None,
        }
    }

    /// Create a test configuration pointing both providers at a mock server.
    ///
    /// SerpAPI is served from `{base_url}/search`, CORE from `{base_url}/v3`.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            serpapi_api_key: Some("test-serpapi-key".to_string()),
            core_api_key: Some("test-core-key".to_string()),
            serpapi_url: format!("{}/search", base_url),
            core_api_url: format!("{}/v3", base_url),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            enabled_tools: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Loads a `.env` file from the working directory first, if one exists.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Ok(path) = dotenv::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }

        let mut config = Self::new(
            std::env::var(env::SERPAPI_API_KEY).ok(),
            std::env::var(env::CORE_API_KEY).ok(),
        );

        if let Ok(url) = std::env::var(env::SERPAPI_URL) {
            config.serpapi_url = url;
        }
        if let Ok(url) = std::env::var(env::CORE_API_URL) {
            config.core_api_url = url;
        }
        if let Ok(tools) = std::env::var(env::TOOLS) {
            config.enabled_tools = Some(parse_tool_list(&tools));
        }
        if let Ok(secs) = std::env::var(env::TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid {}: {secs:?} ({e})", env::TIMEOUT_SECS))?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Restrict the exposed tools to the given names.
    #[must_use]
    pub fn with_enabled_tools(mut self, tools: Option<Vec<String>>) -> Self {
        self.enabled_tools = tools.map(|names| {
            names.into_iter().map(|n| n.trim().to_string()).filter(|n| !n.is_empty()).collect()
        });
        self
    }

    /// Check if the SerpAPI key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.serpapi_api_key.is_some()
    }

    /// Whether a tool should be registered.
    #[must_use]
    pub fn is_tool_enabled(&self, name: &str) -> bool {
        self.enabled_tools.as_ref().is_none_or(|tools| tools.iter().any(|t| t == name))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("serpapi_api_key", &self.serpapi_api_key.as_ref().map(|_| "<redacted>"))
            .field("core_api_key", &self.core_api_key.as_ref().map(|_| "<redacted>"))
            .field("serpapi_url", &self.serpapi_url)
            .field("core_api_url", &self.core_api_url)
            .field("request_timeout", &self.request_timeout)
            .field("enabled_tools", &self.enabled_tools)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Split a comma separated tool list.
#[must_use]
pub fn parse_tool_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}
