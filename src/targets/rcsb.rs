//! # RCSB PDB Client Module
//!
//! ## Purpose
//! Issues structured entry-search queries against the RCSB PDB API and
//! memoizes raw responses per term in the injected in-memory cache.
//!
//! ## Input/Output Specification
//! - **Input**: Free-text condition/disease term
//! - **Output**: Parsed search response, or `None` when the fetch failed
//! - **Failure Handling**: Network errors, non-2xx statuses, and malformed
//!   bodies are logged and absorbed — callers never see an error from this
//!   path, only the absence of a result
//!
//! ## Key Features
//! - Explicit request timeout (the original backend inherited an unbounded one)
//! - Per-term TTL memoization with LRU eviction under capacity pressure
//! - One POST per cache miss; no retries, no single-flight coordination

use crate::config::TargetsConfig;
use crate::errors::{DiscoveryError, Result};
use crate::targets::memory::ResponseCache;
use crate::targets::query::{RcsbSearchResponse, SearchQuery};
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the RCSB PDB entry-search API with response memoization
pub struct RcsbClient {
    config: TargetsConfig,
    client: reqwest::Client,
    cache: ResponseCache<RcsbSearchResponse>,
}

impl RcsbClient {
    /// Create a new client from target-discovery configuration
    pub fn new(config: TargetsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent("pharmflow/0.1")
            .build()
            .map_err(|e| DiscoveryError::NetworkError {
                details: e.to_string(),
            })?;

        let cache = ResponseCache::new(
            config.cache_capacity,
            Duration::from_secs(config.cache_ttl_seconds),
        );

        Ok(Self {
            config,
            client,
            cache,
        })
    }

    /// Fetch search results for a term, serving repeats from the cache.
    ///
    /// Successive calls with the same exact term within the TTL return the
    /// previously fetched response without a network call. Any failure is
    /// logged and converted to `None`; an existing cache entry is left
    /// untouched by a failed refetch.
    pub async fn fetch(&self, term: &str) -> Option<RcsbSearchResponse> {
        if let Some(cached) = self.cache.get(term) {
            debug!("RCSB response cache hit for '{}'", term);
            return Some(cached);
        }

        match self.fetch_remote(term).await {
            Ok(response) => {
                self.cache.insert(term, response.clone());
                Some(response)
            }
            Err(e) => {
                warn!("Error fetching from RCSB PDB for '{}': {}", term, e);
                None
            }
        }
    }

    /// Issue the actual POST against the search endpoint
    async fn fetch_remote(&self, term: &str) -> Result<RcsbSearchResponse> {
        let query = SearchQuery::for_term(term);

        debug!("Querying RCSB PDB at {} for '{}'", self.config.api_url, term);

        let response = self
            .client
            .post(&self.config.api_url)
            .json(&query)
            .send()
            .await
            .map_err(|e| DiscoveryError::NetworkError {
                details: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(DiscoveryError::NetworkError {
                details: format!(
                    "HTTP {}: {}",
                    response.status(),
                    response.text().await.unwrap_or_default()
                ),
            });
        }

        response
            .json()
            .await
            .map_err(|e| DiscoveryError::DataParsing {
                origin: "RCSB search API".to_string(),
                details: e.to_string(),
            })
    }

    /// Number of terms currently held in the in-memory cache
    pub fn cached_terms(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(api_url: String, capacity: usize) -> TargetsConfig {
        TargetsConfig {
            api_url,
            cache_dir: std::env::temp_dir(),
            cache_capacity: capacity,
            cache_ttl_seconds: 3600,
            request_timeout_seconds: 5,
        }
    }

    fn sample_body() -> serde_json::Value {
        serde_json::json!({
            "result_set": [{"rcsb_id": "1ABC"}, {"rcsb_id": "2DEF"}]
        })
    }

    #[tokio::test]
    async fn test_repeat_fetch_within_ttl_issues_one_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = RcsbClient::new(test_config(format!("{}/query", server.uri()), 10)).unwrap();

        let first = client.fetch("diabetes").await.unwrap();
        let second = client.fetch("diabetes").await.unwrap();

        assert_eq!(first.result_set.as_ref().unwrap().len(), 2);
        assert_eq!(second.result_set.as_ref().unwrap()[0].rcsb_id, "1ABC");
        // wiremock verifies the expect(1) call count on drop
    }

    #[tokio::test]
    async fn test_distinct_terms_fetch_separately() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(2)
            .mount(&server)
            .await;

        let client = RcsbClient::new(test_config(format!("{}/query", server.uri()), 10)).unwrap();

        assert!(client.fetch("diabetes").await.is_some());
        assert!(client.fetch("cancer").await.is_some());
        assert_eq!(client.cached_terms(), 2);
    }

    #[tokio::test]
    async fn test_eviction_provokes_fresh_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(3)
            .mount(&server)
            .await;

        // Capacity 1: fetching a second term evicts the first
        let client = RcsbClient::new(test_config(format!("{}/query", server.uri()), 1)).unwrap();

        assert!(client.fetch("diabetes").await.is_some());
        assert!(client.fetch("cancer").await.is_some());
        assert_eq!(client.cached_terms(), 1);

        // "diabetes" was evicted, so this must hit the network again
        assert!(client.fetch("diabetes").await.is_some());
    }

    #[tokio::test]
    async fn test_http_error_absorbed_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = RcsbClient::new(test_config(format!("{}/query", server.uri()), 10)).unwrap();

        assert!(client.fetch("diabetes").await.is_none());
        // Failures are never cached
        assert_eq!(client.cached_terms(), 0);
    }

    #[tokio::test]
    async fn test_connection_error_absorbed_to_none() {
        // Nothing listens on this port
        let client =
            RcsbClient::new(test_config("http://127.0.0.1:1/query".to_string(), 10)).unwrap();
        assert!(client.fetch("diabetes").await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_absorbed_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = RcsbClient::new(test_config(format!("{}/query", server.uri()), 10)).unwrap();
        assert!(client.fetch("diabetes").await.is_none());
    }
}
