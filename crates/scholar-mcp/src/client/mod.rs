//! Provider API clients.
//!
//! - [`ScholarClient`]: SerpAPI Google Scholar engines (search, citations,
//!   versions, author profiles)
//! - [`CoreClient`]: CORE v3 Open Access search and full text
//!
//! Each call issues exactly one HTTP request. There is no retry and no cache;
//! provider error messages are passed through unchanged.

mod core_api;
mod serpapi;

pub use core_api::CoreClient;
pub use serpapi::ScholarClient;

use std::time::Instant;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};

/// Query parameters whose values never appear in logs.
const SECRET_PARAMS: &[&str] = &["api_key"];

/// Longest response body echoed back in a status error.
const MAX_ERROR_BODY: usize = 200;

/// Build a pooled HTTP client with the configured timeouts.
fn build_http_client(config: &Config, mut headers: HeaderMap) -> anyhow::Result<reqwest::Client> {
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .user_agent(concat!("scholar-mcp/", env!("CARGO_PKG_VERSION")))
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .pool_max_idle_per_host(api::MAX_KEEPALIVE)
        .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
        .gzip(true)
        .build()?;

    Ok(client)
}

/// Render a URL for logging with secret query parameters masked.
fn redacted(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| SECRET_PARAMS.contains(&k.as_ref())) {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value =
                if SECRET_PARAMS.contains(&k.as_ref()) { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), value)
        })
        .collect();

    let mut masked = url.clone();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

/// Send a GET request and decode the JSON body.
async fn get_json<T>(
    http: &reqwest::Client,
    provider: &'static str,
    url: Url,
    failure_keys: &[&str],
) -> ClientResult<T>
where
    T: DeserializeOwned,
{
    let started = Instant::now();
    tracing::debug!(provider, url = %redacted(&url), "Sending request");

    let response = http.get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;

    tracing::debug!(
        provider,
        status = status.as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Received response"
    );

    let value = decode_body(provider, status, &body, failure_keys)?;
    serde_json::from_value(value).map_err(ClientError::from)
}

/// Classify a response body.
///
/// A body carrying an `error` field is a provider error regardless of status.
/// On non-2xx statuses `failure_keys` are also consulted; any other non-2xx
/// becomes a status error.
fn decode_body(
    provider: &'static str,
    status: reqwest::StatusCode,
    body: &str,
    failure_keys: &[&str],
) -> ClientResult<serde_json::Value> {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();

    if let Some(message) = parsed.as_ref().and_then(|v| error_message(v, &["error"])) {
        return Err(ClientError::provider(provider, message));
    }

    if !status.is_success() {
        if let Some(message) = parsed.as_ref().and_then(|v| error_message(v, failure_keys)) {
            return Err(ClientError::provider(provider, message));
        }

        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("no response body").to_string()
        } else {
            body.chars().take(MAX_ERROR_BODY).collect()
        };
        return Err(ClientError::status(status.as_u16(), message));
    }

    match parsed {
        Some(value) => Ok(value),
        None => Ok(serde_json::from_str(body)?),
    }
}

/// Pull a human-readable message out of the first matching key.
fn error_message(value: &serde_json::Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(*key)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    })
}
