//! SerpAPI Google Scholar client.

use reqwest::header::HeaderMap;
use url::Url;

use super::{build_http_client, get_json};
use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::MAX_SCHOLAR_RESULTS;
use crate::models::serpapi::{ProfilesResponse, ScholarResponse};

const PROVIDER: &str = "SerpAPI";

/// Article search, `cites` and `cluster` lookups.
const ENGINE_SCHOLAR: &str = "google_scholar";

/// Author profile search.
const ENGINE_PROFILES: &str = "google_scholar_profiles";

/// Client for the SerpAPI `/search` endpoint.
#[derive(Clone)]
pub struct ScholarClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl ScholarClient {
    /// Create a new client with the given configuration.
    ///
    /// A missing API key is not an error here; calls fail instead.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = build_http_client(config, HeaderMap::new())?;

        Ok(Self {
            http,
            api_key: config.serpapi_api_key.clone(),
            base_url: config.serpapi_url.clone(),
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search Google Scholar for articles.
    ///
    /// `year_from` / `year_to` are sent only when set.
    pub async fn search_articles(
        &self,
        query: &str,
        language: &str,
        num_results: u32,
        year_from: Option<i32>,
        year_to: Option<i32>,
    ) -> ClientResult<ScholarResponse> {
        let mut params = vec![
            ("engine", ENGINE_SCHOLAR.to_string()),
            ("q", query.to_string()),
            ("hl", language.to_string()),
            ("num", clamp_results(num_results).to_string()),
        ];
        if let Some(year) = year_from {
            params.push(("as_ylo", year.to_string()));
        }
        if let Some(year) = year_to {
            params.push(("as_yhi", year.to_string()));
        }

        self.get(&params).await
    }

    /// Search Google Scholar author profiles.
    pub async fn search_profiles(&self, author_name: &str) -> ClientResult<ProfilesResponse> {
        let params = vec![("engine", ENGINE_PROFILES.to_string()), ("q", author_name.to_string())];

        self.get(&params).await
    }

    /// Get articles citing the paper identified by `citation_id`.
    pub async fn get_citations(
        &self,
        citation_id: &str,
        num_results: u32,
    ) -> ClientResult<ScholarResponse> {
        let params = vec![
            ("engine", ENGINE_SCHOLAR.to_string()),
            ("cites", citation_id.to_string()),
            ("num", clamp_results(num_results).to_string()),
        ];

        self.get(&params).await
    }

    /// Get all versions of the article cluster `cluster_id`.
    pub async fn get_cluster(&self, cluster_id: &str) -> ClientResult<ScholarResponse> {
        let params = vec![("engine", ENGINE_SCHOLAR.to_string()), ("cluster", cluster_id.to_string())];

        self.get(&params).await
    }

    async fn get<T>(&self, params: &[(&str, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let api_key = self.api_key.as_deref().ok_or(ClientError::MissingApiKey)?;

        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
            .append_pair("api_key", api_key);

        get_json(&self.http, PROVIDER, url, &["error"]).await
    }
}

fn clamp_results(num_results: u32) -> u32 {
    num_results.clamp(1, MAX_SCHOLAR_RESULTS)
}

impl std::fmt::Debug for ScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScholarClient")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}
