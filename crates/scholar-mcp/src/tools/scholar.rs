//! Google Scholar tools: search_articles, search_author, get_citations,
//! get_article_versions.

use serde_json::json;

use super::{McpTool, ToolContext};
use crate::error::ToolResult;
use crate::models::{
    CitationsResult, GetArticleVersionsInput, GetCitationsInput, MAX_SCHOLAR_RESULTS,
    SearchArticlesInput, SearchArticlesResult, SearchAuthorInput, SearchAuthorResult,
    VersionsResult,
};
use crate::normalize;

/// Article search tool.
pub struct SearchArticlesTool;

#[async_trait::async_trait]
impl McpTool for SearchArticlesTool {
    type Input = SearchArticlesInput;
    type Output = SearchArticlesResult;

    fn name(&self) -> &'static str {
        "search_articles"
    }

    fn description(&self) -> &'static str {
        "Search for academic articles on Google Scholar. \
         Returns articles with title, authors, year, citation count, and links. \
         Use citation_id for get_citations and cluster_id for get_article_versions."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query for articles"
                },
                "year_from": {
                    "type": "integer",
                    "description": "Filter articles from this year"
                },
                "year_to": {
                    "type": "integer",
                    "description": "Filter articles up to this year"
                },
                "language": {
                    "type": "string",
                    "description": "Language code (e.g., 'en', 'ru')",
                    "default": "en"
                },
                "num_results": {
                    "type": "integer",
                    "description": "Number of results (max 20)",
                    "default": 10,
                    "minimum": 1,
                    "maximum": MAX_SCHOLAR_RESULTS
                }
            },
            "required": ["query"]
        })
    }

    async fn call(&self, ctx: &ToolContext, input: Self::Input) -> ToolResult<Self::Output> {
        let response = ctx
            .scholar
            .search_articles(
                &input.query,
                &input.language,
                input.num_results,
                input.year_from,
                input.year_to,
            )
            .await?;

        Ok(normalize::scholar::search_articles(
            &input.query,
            &response,
            input.num_results as usize,
        ))
    }
}

/// Author profile search tool.
pub struct SearchAuthorTool;

#[async_trait::async_trait]
impl McpTool for SearchAuthorTool {
    type Input = SearchAuthorInput;
    type Output = SearchAuthorResult;

    fn name(&self) -> &'static str {
        "search_author"
    }

    fn description(&self) -> &'static str {
        "Search for author profiles on Google Scholar. \
         Returns author profiles with name, affiliations, interests, and citation count."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "author_name": {
                    "type": "string",
                    "description": "Name of the author to search"
                }
            },
            "required": ["author_name"]
        })
    }

    async fn call(&self, ctx: &ToolContext, input: Self::Input) -> ToolResult<Self::Output> {
        let response = ctx.scholar.search_profiles(&input.author_name).await?;

        Ok(normalize::scholar::author_profiles(&input.author_name, &response))
    }
}

/// Citing articles tool.
pub struct GetCitationsTool;

#[async_trait::async_trait]
impl McpTool for GetCitationsTool {
    type Input = GetCitationsInput;
    type Output = CitationsResult;

    fn name(&self) -> &'static str {
        "get_citations"
    }

    fn description(&self) -> &'static str {
        "Get articles that cite a specific paper. \
         Use the citation_id from search_articles results."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "citation_id": {
                    "type": "string",
                    "description": "Citation ID from a previous search result"
                },
                "num_results": {
                    "type": "integer",
                    "description": "Number of citing articles (max 20)",
                    "default": 10,
                    "minimum": 1,
                    "maximum": MAX_SCHOLAR_RESULTS
                }
            },
            "required": ["citation_id"]
        })
    }

    async fn call(&self, ctx: &ToolContext, input: Self::Input) -> ToolResult<Self::Output> {
        let response = ctx.scholar.get_citations(&input.citation_id, input.num_results).await?;

        Ok(normalize::scholar::citations(
            &input.citation_id,
            &response,
            input.num_results as usize,
        ))
    }
}

/// Article versions tool.
pub struct GetArticleVersionsTool;

#[async_trait::async_trait]
impl McpTool for GetArticleVersionsTool {
    type Input = GetArticleVersionsInput;
    type Output = VersionsResult;

    fn name(&self) -> &'static str {
        "get_article_versions"
    }

    fn description(&self) -> &'static str {
        "Get all versions of a specific article from different sources. \
         Use the cluster_id from search_articles results."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "cluster_id": {
                    "type": "string",
                    "description": "Cluster ID from a previous search result"
                }
            },
            "required": ["cluster_id"]
        })
    }

    async fn call(&self, ctx: &ToolContext, input: Self::Input) -> ToolResult<Self::Output> {
        let response = ctx.scholar.get_cluster(&input.cluster_id).await?;

        Ok(normalize::scholar::versions(&input.cluster_id, &response))
    }
}
