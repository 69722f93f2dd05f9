//! CORE v3 Open Access client.
//!
//! CORE aggregates Open Access research outputs from repositories worldwide.
//! A key is optional; with one, requests carry `Authorization: Bearer <key>`.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use url::Url;

use super::{build_http_client, get_json};
use crate::config::Config;
use crate::error::ClientResult;
use crate::models::core_api::{SearchWorksResponse, Work};

const PROVIDER: &str = "CORE API";

/// CORE rejects `/search/works` without the trailing slash.
const SEARCH_WORKS_PATH: &str = "search/works/";

const WORKS_PATH: &str = "works";

/// CORE's page size limit.
const MAX_LIMIT: u32 = 100;

/// Client for the CORE v3 API.
#[derive(Clone)]
pub struct CoreClient {
    http: reqwest::Client,
    base_url: String,
    has_api_key: bool,
}

impl CoreClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(ref key) = config.core_api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = build_http_client(config, headers)?;

        Ok(Self {
            http,
            base_url: config.core_api_url.trim_end_matches('/').to_string(),
            has_api_key: config.core_api_key.is_some(),
        })
    }

    /// Check if a CORE key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.has_api_key
    }

    /// Search works. `query` supports CORE's `field:value` syntax.
    pub async fn search_works(
        &self,
        query: &str,
        fulltext: bool,
        limit: u32,
    ) -> ClientResult<SearchWorksResponse> {
        let mut url = self.endpoint(SEARCH_WORKS_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", query)
                .append_pair("limit", &limit.min(MAX_LIMIT).to_string())
                .append_pair("offset", "0");
            if fulltext {
                pairs.append_pair("fulltext", "true");
            }
        }

        get_json(&self.http, PROVIDER, url, &["error", "message"]).await
    }

    /// Get a single work by CORE id.
    pub async fn get_work(&self, work_id: &str) -> ClientResult<Work> {
        let mut url = self.endpoint(WORKS_PATH)?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .push(work_id);

        get_json(&self.http, PROVIDER, url, &["error", "message"]).await
    }

    /// Find a work by DOI.
    pub async fn search_by_doi(&self, doi: &str) -> ClientResult<Option<Work>> {
        let result = self.search_works(&field_query("doi", doi), false, 1).await?;
        Ok(result.results.into_iter().next())
    }

    /// Find the best full-text match for a title.
    pub async fn search_by_title(&self, title: &str) -> ClientResult<Option<Work>> {
        let result = self.search_works(&field_query("title", title), true, 1).await?;
        Ok(result.results.into_iter().next())
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }
}

/// `field:"value"` phrase query with embedded quotes and backslashes escaped.
fn field_query(field: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{field}:\"{escaped}\"")
}

impl std::fmt::Debug for CoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreClient")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.has_api_key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_endpoint_keeps_trailing_slash() {
        let client = CoreClient::new(&Config::default()).unwrap();
        let url = client.endpoint(SEARCH_WORKS_PATH).unwrap();
        assert_eq!(url.as_str(), "https://api.core.ac.uk/v3/search/works/");
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let mut config = Config::default();
        config.core_api_url = "http://localhost:8080/v3/".to_string();
        let client = CoreClient::new(&config).unwrap();
        let url = client.endpoint(WORKS_PATH).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v3/works");
    }

    #[test]
    fn test_field_query_escapes_quotes() {
        assert_eq!(field_query("doi", "10.1234/abc"), r#"doi:"10.1234/abc""#);
        assert_eq!(
            field_query("title", r#"The "Hello" paper"#),
            r#"title:"The \"Hello\" paper""#
        );
        assert_eq!(field_query("title", r"a\b"), r#"title:"a\\b""#);
    }
}
