//! DVIDS API client: query construction, response normalization, and the
//! silent-failure contract.
//!
//! The Defense Visual Information Distribution Service (DVIDS) exposes two
//! routes this module talks to:
//! - a **search endpoint** returning a paginated, filterable list of content
//!   records (restricted here to `type[]=news`)
//! - an **asset endpoint** returning a single content record by identifier
//!
//! # Failure contract
//!
//! The public methods never return errors. Any transport failure, non-success
//! HTTP status, or JSON decode failure collapses to the zero value
//! ([`SearchResult::default`] for searches, `None` for single-article
//! lookups). Callers see absence of data, not cause; the cause is logged via
//! `tracing` as best-effort diagnostics. Fallible internals (`try_search`,
//! `try_fetch`) stay `Result`-typed so the collapse happens in exactly one
//! place per operation.
//!
//! Response-body normalization lives in pure functions
//! ([`parse_search_response`], [`parse_asset_response`]) so the wire contract
//! is testable without a socket.

use crate::models::{Article, SearchResult};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// DVIDS search route.
pub const SEARCH_ENDPOINT: &str = "https://api.dvidshub.net/search";
/// DVIDS single-asset route.
pub const ASSET_ENDPOINT: &str = "https://api.dvidshub.net/asset";

/// Development API key shipped with the original integration.
///
/// Not suitable for production use: requests should be proxied through a
/// server-side credential instead of shipping a key in the binary.
pub const DEV_API_KEY: &str = "key-6911edd214ab0";

/// Sort direction for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortDir {
    /// Oldest first.
    Asc,
    /// Newest first (API default).
    Desc,
}

impl SortDir {
    fn as_str(self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters and pagination for a news search.
///
/// The defaults mirror the API's: ten newest articles, first page, sorted by
/// date descending.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Full-text query, sent as `q` when non-empty.
    pub keyword: Option<String>,
    /// Service branch filter (Army, Navy, Air Force, ...).
    pub branch: Option<String>,
    /// Unit ID filter.
    pub unit: Option<String>,
    /// Maximum results per page.
    pub limit: u32,
    /// Page number, 1-based.
    pub page: u32,
    /// Sort field: date, publishdate, timestamp, or score.
    pub sort: String,
    /// Sort direction.
    pub sortdir: SortDir,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            keyword: None,
            branch: None,
            unit: None,
            limit: 10,
            page: 1,
            sort: "date".to_string(),
            sortdir: SortDir::Desc,
        }
    }
}

/// HTTP client for the DVIDS API.
///
/// Holds a reused [`reqwest::Client`] plus the endpoint URLs and API key.
/// Endpoints are overridable so tests and server-side proxies can point the
/// client elsewhere.
#[derive(Debug, Clone)]
pub struct DvidsClient {
    http: reqwest::Client,
    api_key: String,
    search_endpoint: String,
    asset_endpoint: String,
}

impl Default for DvidsClient {
    fn default() -> Self {
        Self::new(DEV_API_KEY)
    }
}

impl DvidsClient {
    /// Create a client against the production DVIDS endpoints.
    pub fn new(api_key: &str) -> Self {
        Self::with_endpoints(api_key, SEARCH_ENDPOINT, ASSET_ENDPOINT)
    }

    /// Create a client with explicit endpoint URLs.
    pub fn with_endpoints(api_key: &str, search_endpoint: &str, asset_endpoint: &str) -> Self {
        DvidsClient {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            search_endpoint: search_endpoint.to_string(),
            asset_endpoint: asset_endpoint.to_string(),
        }
    }

    /// Search DVIDS news articles.
    ///
    /// Returns the normalized result page, or [`SearchResult::default`] on
    /// any failure. Failures are logged, never propagated.
    #[instrument(level = "info", skip(self))]
    pub async fn search(&self, options: &SearchOptions) -> SearchResult {
        match self.try_search(options).await {
            Ok(result) => {
                info!(
                    count = result.articles.len(),
                    total = result.total_results,
                    page = result.page,
                    "DVIDS search succeeded"
                );
                result
            }
            Err(e) => {
                warn!(error = %e, "DVIDS search failed; returning empty result");
                SearchResult::default()
            }
        }
    }

    /// Fetch a single article by DVIDS asset ID.
    ///
    /// A blank `id` short-circuits to `None` without touching the network.
    /// Otherwise returns the parsed record, or `None` on missing results,
    /// non-success status, or any transport/decode error.
    #[instrument(level = "info", skip(self), fields(%id))]
    pub async fn fetch_by_id(&self, id: &str) -> Option<Article> {
        if id.trim().is_empty() {
            debug!("empty article id; skipping fetch");
            return None;
        }
        match self.try_fetch(id).await {
            Ok(Some(article)) => {
                info!(title = article.display_title(), "Fetched DVIDS article");
                Some(article)
            }
            Ok(None) => {
                warn!("DVIDS asset response had no results");
                None
            }
            Err(e) => {
                warn!(error = %e, "DVIDS article fetch failed");
                None
            }
        }
    }

    async fn try_search(&self, options: &SearchOptions) -> Result<SearchResult, Box<dyn Error>> {
        let url = self.search_url(options)?;
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("DVIDS API error: {status}").into());
        }
        let body = response.text().await?;
        Ok(parse_search_response(&body)?)
    }

    async fn try_fetch(&self, id: &str) -> Result<Option<Article>, Box<dyn Error>> {
        let mut url = Url::parse(&self.asset_endpoint)?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("id", id);

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("DVIDS API error: {status}").into());
        }
        let body = response.text().await?;
        Ok(parse_asset_response(&body)?)
    }

    fn search_url(&self, options: &SearchOptions) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.search_endpoint)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("api_key", &self.api_key)
                .append_pair("type[]", "news")
                .append_pair("max_results", &options.limit.to_string())
                .append_pair("page", &options.page.to_string())
                .append_pair("sort", &options.sort)
                .append_pair("sortdir", options.sortdir.as_str());

            if let Some(keyword) = options.keyword.as_deref().filter(|s| !s.is_empty()) {
                pairs.append_pair("q", keyword);
            }
            if let Some(branch) = options.branch.as_deref().filter(|s| !s.is_empty()) {
                pairs.append_pair("branch", branch);
            }
            if let Some(unit) = options.unit.as_deref().filter(|s| !s.is_empty()) {
                pairs.append_pair("unit", unit);
            }
        }
        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    #[serde(default)]
    results: Option<Value>,
    #[serde(default)]
    total_results: Option<u64>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    page_count: Option<u32>,
}

/// Normalize a search response body into a [`SearchResult`].
///
/// `results` must be a JSON array to yield articles; any other shape
/// normalizes to an empty list. Individual records that fail to decode are
/// skipped rather than failing the page. Missing pagination fields fall back
/// to zero total / page 1 of 1.
pub fn parse_search_response(body: &str) -> Result<SearchResult, serde_json::Error> {
    let raw: RawSearchResponse = serde_json::from_str(body)?;

    let articles = match raw.results {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Article>(item) {
                Ok(article) => Some(article),
                Err(e) => {
                    debug!(error = %e, "skipping malformed search record");
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(SearchResult {
        articles,
        total_results: raw.total_results.unwrap_or(0),
        page: raw.page.unwrap_or(1).max(1),
        page_count: raw.page_count.unwrap_or(1).max(1),
    })
}

#[derive(Debug, Deserialize)]
struct RawAssetResponse {
    #[serde(default)]
    results: Option<Value>,
}

/// Normalize an asset response body into an optional [`Article`].
///
/// Absent or null `results` yields `None`; a present record that fails to
/// decode is an error (the caller collapses it to `None`).
pub fn parse_asset_response(body: &str) -> Result<Option<Article>, serde_json::Error> {
    let raw: RawAssetResponse = serde_json::from_str(body)?;
    match raw.results {
        Some(Value::Null) | None => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response_full() {
        let body = r#"{
            "results": [{"id": "A1", "title": "T"}],
            "total_results": 1,
            "page": 1,
            "page_count": 1
        }"#;
        let result = parse_search_response(body).unwrap();
        assert_eq!(result.articles.len(), 1);
        assert_eq!(result.articles[0].id, "A1");
        assert_eq!(result.articles[0].title.as_deref(), Some("T"));
        assert_eq!(result.total_results, 1);
    }

    #[test]
    fn test_parse_search_response_missing_fields() {
        let result = parse_search_response("{}").unwrap();
        assert!(result.articles.is_empty());
        assert_eq!(result.total_results, 0);
        assert_eq!(result.page, 1);
        assert_eq!(result.page_count, 1);
    }

    #[test]
    fn test_parse_search_response_results_not_array() {
        let result = parse_search_response(r#"{"results": "nope", "total_results": 5}"#).unwrap();
        assert!(result.articles.is_empty());
        assert_eq!(result.total_results, 5);
    }

    #[test]
    fn test_parse_search_response_skips_malformed_records() {
        let body = r#"{
            "results": [{"id": "A1"}, {"title": "no id"}, {"id": "A2"}],
            "total_results": 3
        }"#;
        let result = parse_search_response(body).unwrap();
        let ids: Vec<&str> = result.articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A2"]);
    }

    #[test]
    fn test_parse_search_response_malformed_body() {
        assert!(parse_search_response("not json").is_err());
        assert!(parse_search_response("").is_err());
    }

    #[test]
    fn test_parse_asset_response() {
        let found = parse_asset_response(r#"{"results": {"id": "A1", "title": "T"}}"#).unwrap();
        assert_eq!(found.unwrap().id, "A1");

        assert!(parse_asset_response("{}").unwrap().is_none());
        assert!(parse_asset_response(r#"{"results": null}"#).unwrap().is_none());
        assert!(parse_asset_response("broken").is_err());
    }

    #[test]
    fn test_search_url_includes_filters() {
        let client = DvidsClient::new("test-key");
        let options = SearchOptions {
            keyword: Some("pacific".to_string()),
            branch: Some("Navy".to_string()),
            unit: None,
            limit: 6,
            page: 2,
            sort: "date".to_string(),
            sortdir: SortDir::Asc,
        };
        let url = client.search_url(&options).unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("api_key=test-key"));
        assert!(query.contains("type%5B%5D=news"));
        assert!(query.contains("max_results=6"));
        assert!(query.contains("page=2"));
        assert!(query.contains("sortdir=asc"));
        assert!(query.contains("q=pacific"));
        assert!(query.contains("branch=Navy"));
        assert!(!query.contains("unit="));
    }

    #[test]
    fn test_search_url_omits_blank_filters() {
        let client = DvidsClient::new("test-key");
        let options = SearchOptions {
            keyword: Some(String::new()),
            ..SearchOptions::default()
        };
        let url = client.search_url(&options).unwrap();
        assert!(!url.query().unwrap().contains("q="));
    }

    #[tokio::test]
    async fn test_fetch_by_id_blank_id_skips_network() {
        // Endpoint is not even a valid URL: a network attempt would error
        // loudly, a blank id must never get that far.
        let client = DvidsClient::with_endpoints("k", "::not a url::", "::not a url::");
        assert!(client.fetch_by_id("").await.is_none());
        assert!(client.fetch_by_id("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_search_failure_collapses_to_zero_value() {
        let client = DvidsClient::with_endpoints("k", "::not a url::", "::not a url::");
        let result = client.search(&SearchOptions::default()).await;
        assert!(result.articles.is_empty());
        assert_eq!(result.total_results, 0);
        assert_eq!(result.page, 1);
        assert_eq!(result.page_count, 1);
    }
}
