//! Google Scholar MCP Server
//!
//! A Model Context Protocol (MCP) server that exposes Google Scholar (through
//! SerpAPI) and CORE Open Access full text as tools over stdio.
//!
//! # Tools
//!
//! - **search_articles**, **search_author**, **get_citations**,
//!   **get_article_versions**: SerpAPI Google Scholar engines
//! - **get_fulltext**, **search_open_access**: CORE v3 API
//!
//! Each tool call issues one upstream request and returns a normalized JSON
//! document. Failures come back as tool results with `isError: true`.
//!
//! # Example
//!
//! ```no_run
//! use scholar_mcp::{config::Config, server::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::from_config(&config)?;
//!     server.run_stdio().await
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod server;
pub mod tools;

pub use client::{CoreClient, ScholarClient};
pub use config::Config;
pub use error::{ClientError, ToolError};
