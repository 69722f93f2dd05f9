//! CORE responses to tool results.

use crate::models::core_api::{SearchWorksResponse, Work};
use crate::models::{CORE_SOURCE, FulltextResult, OpenAccessArticle, SearchOpenAccessResult};

/// Normalize a CORE works search.
#[must_use]
pub fn search_open_access(
    query: &str,
    response: SearchWorksResponse,
    limit: usize,
) -> SearchOpenAccessResult {
    let articles: Vec<OpenAccessArticle> =
        response.results.into_iter().take(limit).map(open_access_article).collect();

    SearchOpenAccessResult { query: query.to_string(), total_results: articles.len(), articles }
}

/// Normalize a single CORE work into a full-text result.
#[must_use]
pub fn fulltext(work: Work) -> FulltextResult {
    FulltextResult {
        title: work.title,
        r#abstract: work.r#abstract,
        download_url: work.download_url,
        fulltext_available: work.full_text.is_some(),
        fulltext: work.full_text,
        source: CORE_SOURCE.to_string(),
    }
}

fn open_access_article(work: Work) -> OpenAccessArticle {
    let names: Vec<&str> =
        work.authors.iter().map(|a| a.name()).filter(|n| !n.trim().is_empty()).collect();
    let authors = if names.is_empty() { None } else { Some(names.join(", ")) };

    OpenAccessArticle {
        title: work.title.unwrap_or_default(),
        authors,
        year: work.year_published,
        doi: work.doi,
        download_url: work.download_url,
        r#abstract: work.r#abstract,
        core_id: work.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_open_access_article_mapping() {
        let response: SearchWorksResponse = serde_json::from_value(json!({
            "totalHits": 2,
            "results": [
                {"id": 42, "title": "Open Paper", "authors": [{"name": "Ada"}, {"name": "Grace"}],
                 "yearPublished": 2021, "doi": "10.1/open", "downloadUrl": "https://core.ac.uk/download/42.pdf"},
                {"title": "Anonymous"}
            ]
        }))
        .unwrap();

        let result = search_open_access("open", response, 10);
        assert_eq!(result.total_results, 2);
        assert_eq!(result.articles[0].authors.as_deref(), Some("Ada, Grace"));
        assert_eq!(result.articles[0].core_id.as_deref(), Some("42"));
        assert_eq!(result.articles[0].year, Some(2021));
        assert!(result.articles[1].authors.is_none());
        assert!(result.articles[1].core_id.is_none());
    }

    #[test]
    fn test_fulltext_availability_follows_body() {
        let work = Work { title: Some("T".to_string()), ..Default::default() };
        let result = fulltext(work);
        assert!(!result.fulltext_available);
        assert_eq!(result.source, CORE_SOURCE);

        let work = Work { full_text: Some("Body".to_string()), ..Default::default() };
        assert!(fulltext(work).fulltext_available);
    }
}
