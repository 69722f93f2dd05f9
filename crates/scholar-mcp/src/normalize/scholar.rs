//! SerpAPI Google Scholar responses to tool results.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::serpapi::{OrganicResult, Profile, ProfilesResponse, ScholarResponse};
use crate::models::{
    Article, ArticleVersion, AuthorProfile, CitationsResult, CitingArticle, SearchArticlesResult,
    SearchAuthorResult, UNKNOWN, VersionsResult,
};

/// Four-digit year inside a publication summary line.
static SUMMARY_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(1[5-9]\d{2}|20\d{2})\b").expect("valid year regex"));

/// Normalize a `google_scholar` search response.
#[must_use]
pub fn search_articles(
    query: &str,
    response: &ScholarResponse,
    limit: usize,
) -> SearchArticlesResult {
    let articles: Vec<Article> =
        response.organic_results.iter().take(limit).map(article).collect();

    SearchArticlesResult { query: query.to_string(), total_results: articles.len(), articles }
}

/// Normalize a `google_scholar` response filtered by `cites`.
#[must_use]
pub fn citations(citation_id: &str, response: &ScholarResponse, limit: usize) -> CitationsResult {
    let citing_articles: Vec<CitingArticle> =
        response.organic_results.iter().take(limit).map(citing_article).collect();

    CitationsResult {
        citation_id: citation_id.to_string(),
        total_citations: citing_articles.len(),
        citing_articles,
    }
}

/// Normalize a `google_scholar` response filtered by `cluster`.
#[must_use]
pub fn versions(cluster_id: &str, response: &ScholarResponse) -> VersionsResult {
    let versions: Vec<ArticleVersion> = response.organic_results.iter().map(version).collect();

    VersionsResult { cluster_id: cluster_id.to_string(), total_versions: versions.len(), versions }
}

/// Normalize a `google_scholar_profiles` response.
#[must_use]
pub fn author_profiles(query: &str, response: &ProfilesResponse) -> SearchAuthorResult {
    let profiles: Vec<AuthorProfile> = response.profiles.iter().map(author_profile).collect();

    SearchAuthorResult { query: query.to_string(), total_profiles: profiles.len(), profiles }
}

/// Map one organic result to an [`Article`].
#[must_use]
pub fn article(item: &OrganicResult) -> Article {
    let links = item.inline_links.as_ref();
    let cited_by = links.and_then(|l| l.cited_by.as_ref());

    Article {
        title: item.title.clone().unwrap_or_default(),
        link: item.link.clone(),
        snippet: item.snippet.clone(),
        authors: authors(item),
        year: year(item),
        citations: cited_by.and_then(|c| c.total).unwrap_or(0),
        citation_id: cited_by.and_then(|c| c.cites_id.clone()),
        cluster_id: links.and_then(|l| l.cluster_id()).map(String::from),
        pdf_link: pdf_link(item),
    }
}

fn citing_article(item: &OrganicResult) -> CitingArticle {
    CitingArticle {
        title: item.title.clone().unwrap_or_default(),
        link: item.link.clone(),
        snippet: item.snippet.clone(),
        authors: authors(item),
        year: year(item),
    }
}

fn version(item: &OrganicResult) -> ArticleVersion {
    ArticleVersion {
        title: item.title.clone().unwrap_or_default(),
        link: item.link.clone(),
        source: item
            .publication_info
            .as_ref()
            .and_then(|p| p.summary.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        version_type: item.result_type.clone().unwrap_or_else(|| UNKNOWN.to_string()),
    }
}

fn author_profile(profile: &Profile) -> AuthorProfile {
    let interests = profile
        .interests
        .iter()
        .filter_map(|i| i.title.as_deref())
        .collect::<Vec<_>>()
        .join(", ");

    AuthorProfile {
        name: profile.name.clone().unwrap_or_default(),
        affiliations: profile.affiliations.clone(),
        email: profile.email.clone(),
        interests,
        author_id: profile.author_id.clone(),
        citations: profile.cited_by.as_ref().and_then(|c| c.total()).unwrap_or(0),
    }
}

/// Comma-joined author names, or "Unknown".
fn authors(item: &OrganicResult) -> String {
    let names: Vec<&str> = item
        .publication_info
        .iter()
        .flat_map(|p| p.authors.iter())
        .filter_map(|a| a.name.as_deref())
        .filter(|n| !n.trim().is_empty())
        .collect();

    if names.is_empty() { UNKNOWN.to_string() } else { names.join(", ") }
}

/// Explicit year, else the last year mentioned in the summary, else "Unknown".
fn year(item: &OrganicResult) -> String {
    let Some(info) = item.publication_info.as_ref() else {
        return UNKNOWN.to_string();
    };

    info.year
        .clone()
        .filter(|y| !y.trim().is_empty())
        .or_else(|| {
            let summary = info.summary.as_deref()?;
            SUMMARY_YEAR.find_iter(summary).last().map(|m| m.as_str().to_string())
        })
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// First resource whose format is PDF.
fn pdf_link(item: &OrganicResult) -> Option<String> {
    item.resources
        .iter()
        .find(|r| r.file_format.as_deref() == Some("PDF"))
        .and_then(|r| r.link.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> ScholarResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_article_full_mapping() {
        let response = parse(json!({
            "organic_results": [{
                "title": "Attention Is All You Need",
                "link": "https://arxiv.org/abs/1706.03762",
                "snippet": "The dominant sequence transduction models...",
                "publication_info": {
                    "summary": "A Vaswani, N Shazeer - Advances in neural information processing systems, 2017 - proceedings.neurips.cc",
                    "authors": [{"name": "A Vaswani"}, {"name": "N Shazeer"}]
                },
                "inline_links": {
                    "cited_by": {"total": 120_000, "cites_id": "2960712678066186980"},
                    "versions": {"total": 60, "cluster_id": "5Gohgn6QFikJ"}
                },
                "resources": [
                    {"title": "arxiv.org", "file_format": "HTML", "link": "https://arxiv.org/html"},
                    {"title": "arxiv.org", "file_format": "PDF", "link": "https://arxiv.org/pdf/1706.03762"}
                ]
            }]
        }));

        let result = search_articles("attention", &response, 10);
        assert_eq!(result.total_results, 1);

        let a = &result.articles[0];
        assert_eq!(a.authors, "A Vaswani, N Shazeer");
        assert_eq!(a.year, "2017");
        assert_eq!(a.citations, 120_000);
        assert_eq!(a.citation_id.as_deref(), Some("2960712678066186980"));
        assert_eq!(a.cluster_id.as_deref(), Some("5Gohgn6QFikJ"));
        assert_eq!(a.pdf_link.as_deref(), Some("https://arxiv.org/pdf/1706.03762"));
    }

    #[test]
    fn test_article_defaults() {
        let response = parse(json!({"organic_results": [{}]}));
        let result = search_articles("q", &response, 10);
        let a = &result.articles[0];

        assert_eq!(a.title, "");
        assert_eq!(a.authors, UNKNOWN);
        assert_eq!(a.year, UNKNOWN);
        assert_eq!(a.citations, 0);
        assert!(a.citation_id.is_none());
        assert!(a.cluster_id.is_none());
        assert!(a.pdf_link.is_none());

        let serialized = serde_json::to_value(a).unwrap();
        assert!(serialized.get("citation_id").is_none());
        assert!(serialized.get("pdf_link").is_none());
    }

    #[test]
    fn test_explicit_year_wins_over_summary() {
        let response = parse(json!({"organic_results": [{
            "publication_info": {"summary": "X - Journal, 1999", "year": 2001}
        }]}));
        assert_eq!(search_articles("q", &response, 10).articles[0].year, "2001");
    }

    #[test]
    fn test_results_truncated_to_limit() {
        let items: Vec<_> = (0..5).map(|i| json!({"title": format!("Paper {i}")})).collect();
        let result = search_articles("q", &parse(json!({"organic_results": items})), 3);
        assert_eq!(result.total_results, 3);
        assert_eq!(result.articles.len(), 3);
    }

    #[test]
    fn test_versions_defaults() {
        let response = parse(json!({"organic_results": [
            {"title": "Copy A", "link": "https://a", "type": "Pdf",
             "publication_info": {"summary": "arxiv.org"}},
            {"title": "Copy B"}
        ]}));

        let result = versions("cluster-1", &response);
        assert_eq!(result.total_versions, 2);
        assert_eq!(result.versions[0].source, "arxiv.org");
        assert_eq!(result.versions[0].version_type, "Pdf");
        assert_eq!(result.versions[1].source, UNKNOWN);
        assert_eq!(result.versions[1].version_type, UNKNOWN);

        let serialized = serde_json::to_value(&result.versions[1]).unwrap();
        assert_eq!(serialized["type"], UNKNOWN);
    }

    #[test]
    fn test_citations_empty() {
        let result = citations("abc123", &ScholarResponse::default(), 10);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"citation_id": "abc123", "total_citations": 0, "citing_articles": []})
        );
    }

    #[test]
    fn test_author_profiles() {
        let response: ProfilesResponse = serde_json::from_value(json!({"profiles": [
            {
                "name": "Geoffrey Hinton",
                "author_id": "JicYPdAAAAAJ",
                "affiliations": "University of Toronto",
                "email": "Verified email at cs.toronto.edu",
                "cited_by": 800_000,
                "interests": [{"title": "machine learning"}, {"title": "psychology"}]
            },
            {"name": "No Interests"}
        ]}))
        .unwrap();

        let result = author_profiles("hinton", &response);
        assert_eq!(result.total_profiles, 2);
        assert_eq!(result.profiles[0].interests, "machine learning, psychology");
        assert_eq!(result.profiles[0].citations, 800_000);
        assert_eq!(result.profiles[1].interests, "");
        assert_eq!(result.profiles[1].citations, 0);
    }
}
