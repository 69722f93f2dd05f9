//! Full-text tools backed by CORE: get_fulltext, search_open_access.

use serde_json::json;

use super::{McpTool, ToolContext};
use crate::error::ToolResult;
use crate::models::{
    FulltextResult, GetFulltextInput, MAX_OPEN_ACCESS_RESULTS, SearchOpenAccessInput,
    SearchOpenAccessResult,
};
use crate::normalize;

/// Open Access full-text lookup tool.
pub struct GetFulltextTool;

#[async_trait::async_trait]
impl McpTool for GetFulltextTool {
    type Input = GetFulltextInput;
    type Output = FulltextResult;

    fn name(&self) -> &'static str {
        "get_fulltext"
    }

    fn description(&self) -> &'static str {
        "Get full text of an Open Access article via CORE API. \
         Provide at least one identifier: DOI, title, or CORE ID. \
         Returns full text if available, otherwise abstract and download link."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "doi": {
                    "type": "string",
                    "description": "DOI of the article"
                },
                "title": {
                    "type": "string",
                    "description": "Title of the article"
                },
                "core_id": {
                    "type": "string",
                    "description": "CORE ID of the article"
                }
            },
            "required": []
        })
    }

    /// Tries the CORE id, then the DOI, then the title.
    async fn call(&self, ctx: &ToolContext, input: Self::Input) -> ToolResult<Self::Output> {
        let mut work = None;

        if let Some(core_id) = input.core_id() {
            match ctx.core.get_work(core_id).await {
                Ok(found) => work = Some(found),
                Err(e) => {
                    tracing::warn!(core_id, error = %e, "CORE id lookup failed, trying other identifiers");
                }
            }
        }

        if work.is_none() {
            if let Some(doi) = input.doi() {
                work = ctx.core.search_by_doi(doi).await?;
            }
        }

        if work.is_none() {
            if let Some(title) = input.title() {
                work = ctx.core.search_by_title(title).await?;
            }
        }

        Ok(match work {
            Some(work) => normalize::open_access::fulltext(work),
            None => FulltextResult::not_found(input.title().map(String::from)),
        })
    }
}

/// Open Access search tool.
pub struct SearchOpenAccessTool;

#[async_trait::async_trait]
impl McpTool for SearchOpenAccessTool {
    type Input = SearchOpenAccessInput;
    type Output = SearchOpenAccessResult;

    fn name(&self) -> &'static str {
        "search_open_access"
    }

    fn description(&self) -> &'static str {
        "Search for Open Access articles with full-text available. \
         Returns articles from the CORE aggregator with direct download links."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query for Open Access articles"
                },
                "limit": {
                    "type": "integer",
                    "description": "Number of results (max 50)",
                    "default": 10,
                    "minimum": 1,
                    "maximum": MAX_OPEN_ACCESS_RESULTS
                }
            },
            "required": ["query"]
        })
    }

    async fn call(&self, ctx: &ToolContext, input: Self::Input) -> ToolResult<Self::Output> {
        let response = ctx.core.search_works(&input.query, true, input.limit).await?;

        Ok(normalize::open_access::search_open_access(&input.query, response, input.limit as usize))
    }
}
