//! Input models for MCP tool parameters.
//!
//! Arguments arrive as a JSON object; each tool deserializes its own input
//! struct and validates ranges before any request is made.

use serde::{Deserialize, Serialize};

use crate::error::{ToolError, ToolResult};

/// Bounds checks that serde cannot express.
pub trait Validate {
    fn validate(&self) -> ToolResult<()> {
        Ok(())
    }
}

/// Maximum results per Google Scholar page.
pub const MAX_SCHOLAR_RESULTS: u32 = 20;

/// Maximum results for an Open Access search.
pub const MAX_OPEN_ACCESS_RESULTS: u32 = 50;

fn default_num_results() -> u32 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

fn check_range(field: &str, value: u32, min: u32, max: u32) -> ToolResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ToolError::validation(
            field,
            format!("Invalid value for '{field}': {value} (must be between {min} and {max})"),
        ))
    }
}

fn check_not_blank(field: &str, value: &str) -> ToolResult<()> {
    if value.trim().is_empty() {
        Err(ToolError::validation(field, format!("Invalid value for '{field}': must not be empty")))
    } else {
        Ok(())
    }
}

/// Input for `search_articles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchArticlesInput {
    /// Search query (e.g., "transformer neural networks").
    pub query: String,

    /// Earliest publication year (inclusive).
    #[serde(default)]
    pub year_from: Option<i32>,

    /// Latest publication year (inclusive).
    #[serde(default)]
    pub year_to: Option<i32>,

    /// Interface language code (e.g., "en", "ru").
    #[serde(default = "default_language")]
    pub language: String,

    /// Number of results (1-20).
    #[serde(default = "default_num_results")]
    pub num_results: u32,
}

impl Validate for SearchArticlesInput {
    fn validate(&self) -> ToolResult<()> {
        check_not_blank("query", &self.query)?;
        check_range("num_results", self.num_results, 1, MAX_SCHOLAR_RESULTS)?;
        if let (Some(from), Some(to)) = (self.year_from, self.year_to) {
            if from > to {
                return Err(ToolError::validation(
                    "year_from",
                    format!("Invalid year range: year_from ({from}) is after year_to ({to})"),
                ));
            }
        }
        Ok(())
    }
}

/// Input for `search_author`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAuthorInput {
    /// Author name.
    pub author_name: String,
}

impl Validate for SearchAuthorInput {
    fn validate(&self) -> ToolResult<()> {
        check_not_blank("author_name", &self.author_name)
    }
}

/// Input for `get_citations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetCitationsInput {
    /// `citation_id` from a `search_articles` result.
    pub citation_id: String,

    /// Number of citing articles (1-20).
    #[serde(default = "default_num_results")]
    pub num_results: u32,
}

impl Validate for GetCitationsInput {
    fn validate(&self) -> ToolResult<()> {
        check_not_blank("citation_id", &self.citation_id)?;
        check_range("num_results", self.num_results, 1, MAX_SCHOLAR_RESULTS)
    }
}

/// Input for `get_article_versions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetArticleVersionsInput {
    /// `cluster_id` from a `search_articles` result.
    pub cluster_id: String,
}

impl Validate for GetArticleVersionsInput {
    fn validate(&self) -> ToolResult<()> {
        check_not_blank("cluster_id", &self.cluster_id)
    }
}

/// Input for `get_fulltext`. At least one identifier is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetFulltextInput {
    #[serde(default)]
    pub doi: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub core_id: Option<String>,
}

impl GetFulltextInput {
    fn present(value: Option<&str>) -> Option<&str> {
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        Self::present(self.doi.as_deref())
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        Self::present(self.title.as_deref())
    }

    #[must_use]
    pub fn core_id(&self) -> Option<&str> {
        Self::present(self.core_id.as_deref())
    }
}

impl Validate for GetFulltextInput {
    fn validate(&self) -> ToolResult<()> {
        if self.doi().is_none() && self.title().is_none() && self.core_id().is_none() {
            return Err(ToolError::validation(
                "doi",
                "Provide at least one of: doi, title, or core_id",
            ));
        }
        Ok(())
    }
}

/// Input for `search_open_access`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOpenAccessInput {
    /// Search query.
    pub query: String,

    /// Number of results (1-50).
    #[serde(default = "default_num_results")]
    pub limit: u32,
}

impl Validate for SearchOpenAccessInput {
    fn validate(&self) -> ToolResult<()> {
        check_not_blank("query", &self.query)?;
        check_range("limit", self.limit, 1, MAX_OPEN_ACCESS_RESULTS)
    }
}
