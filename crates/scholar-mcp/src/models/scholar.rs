//! Normalized tool results.
//!
//! These are the stable shapes returned to MCP clients. Keys are snake_case.

use serde::{Deserialize, Serialize};

/// Placeholder for absent author lists, years, sources and types.
pub const UNKNOWN: &str = "Unknown";

/// Source label for full-text results.
pub const CORE_SOURCE: &str = "CORE API";

/// Academic article from a Google Scholar search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: Option<String>,
    pub snippet: Option<String>,
    pub authors: String,
    pub year: String,
    pub citations: u64,

    /// Pass to `get_citations`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_id: Option<String>,

    /// Pass to `get_article_versions`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchArticlesResult {
    pub query: String,
    pub total_results: usize,
    pub articles: Vec<Article>,
}

/// Google Scholar author profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub name: String,
    pub affiliations: Option<String>,
    pub email: Option<String>,
    pub interests: String,
    pub author_id: Option<String>,
    pub citations: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAuthorResult {
    pub query: String,
    pub total_profiles: usize,
    pub profiles: Vec<AuthorProfile>,
}

/// Article citing another article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitingArticle {
    pub title: String,
    pub link: Option<String>,
    pub snippet: Option<String>,
    pub authors: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationsResult {
    pub citation_id: String,
    pub total_citations: usize,
    pub citing_articles: Vec<CitingArticle>,
}

/// One hosted version of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleVersion {
    pub title: String,
    pub link: Option<String>,
    pub source: String,
    #[serde(rename = "type")]
    pub version_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionsResult {
    pub cluster_id: String,
    pub total_versions: usize,
    pub versions: Vec<ArticleVersion>,
}

/// Full text lookup result from CORE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulltextResult {
    pub title: Option<String>,
    pub r#abstract: Option<String>,
    pub download_url: Option<String>,
    pub fulltext_available: bool,
    pub fulltext: Option<String>,
    pub source: String,
}

impl FulltextResult {
    /// Result for a lookup that matched nothing.
    #[must_use]
    pub fn not_found(title: Option<String>) -> Self {
        Self {
            title,
            r#abstract: None,
            download_url: None,
            fulltext_available: false,
            fulltext: None,
            source: CORE_SOURCE.to_string(),
        }
    }
}

/// Open Access article from CORE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAccessArticle {
    pub title: String,
    pub authors: Option<String>,
    pub year: Option<i32>,
    pub doi: Option<String>,
    pub download_url: Option<String>,
    pub r#abstract: Option<String>,
    pub core_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOpenAccessResult {
    pub query: String,
    pub total_results: usize,
    pub articles: Vec<OpenAccessArticle>,
}
