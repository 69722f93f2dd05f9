//! Error types for the Scholar MCP server.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// The SerpAPI key is not configured; raised before any request is sent.
    #[error("SERPAPI_API_KEY is not configured. Set it in the environment or pass --serpapi-api-key.")]
    MissingApiKey,

    /// The provider answered with a structured error message.
    #[error("{provider} error: {message}")]
    Provider {
        /// Provider name ("SerpAPI", "CORE API")
        provider: &'static str,
        /// Message taken verbatim from the response
        message: String,
    },

    /// HTTP transport error (connection, DNS, TLS, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status without a structured error body
    #[error("Unexpected status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or canonical reason
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Malformed provider URL
    #[error("Invalid provider URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// Create a provider error.
    #[must_use]
    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Provider { provider, message: message.into() }
    }

    /// Create a status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status { status, message: message.into() }
    }

    /// Returns true for network-level failures (as opposed to provider answers).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. } | Self::Parse(_))
    }
}

/// Errors from MCP tool execution.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Required configuration is absent
    #[error("{0}")]
    Configuration(String),

    /// No tool with this name is registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Input validation failed
    #[error("{message}")]
    Validation {
        /// Parameter that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Error from a provider client
    #[error(transparent)]
    Client(ClientError),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ClientError> for ToolError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::MissingApiKey => Self::Configuration(err.to_string()),
            other => Self::Client(other),
        }
    }
}

impl ToolError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Create a missing-parameter validation error.
    #[must_use]
    pub fn missing_parameter(field: &str) -> Self {
        Self::validation(field, format!("Missing required parameter: {field}"))
    }

    /// The configuration error returned when the SerpAPI key is absent.
    #[must_use]
    pub fn missing_api_key() -> Self {
        ClientError::MissingApiKey.into()
    }

    /// Returns true when the underlying failure is network-level.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        match self {
            Self::Client(err) => err.is_transport(),
            _ => false,
        }
    }

    /// Convert to the text placed in a failed tool result.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        format!("Error: {self}")
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;
