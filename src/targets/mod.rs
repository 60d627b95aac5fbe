//! # Target Discovery Module
//!
//! ## Purpose
//! Finds protein targets related to a free-text condition/disease term by
//! querying the RCSB PDB entry-search API, with a two-tier cache: in-memory
//! TTL memoization of raw responses, and durable per-term JSON files of the
//! extracted identifiers.
//!
//! ## Input/Output Specification
//! - **Input**: Free-text condition/disease term
//! - **Output**: Ordered list of RCSB entry identifiers (possibly empty)
//! - **Degradation**: A failed or malformed fetch is indistinguishable from
//!   "no targets found" — both yield an empty list
//!
//! ## Architecture
//! - `query`: Boolean group query builder and typed response shapes
//! - `rcsb`: HTTP transport with failure absorption and response memoization
//! - `memory`: Injected TTL + LRU in-memory cache
//! - `store`: Durable per-term JSON file cache
//!
//! ## Usage
//! ```rust,no_run
//! use pharmflow::config::TargetsConfig;
//! use pharmflow::targets::TargetSelector;
//!
//! # async fn run() -> pharmflow::Result<()> {
//! let selector = TargetSelector::new(TargetsConfig::default()).await?;
//! let targets = selector.find_targets("diabetes").await?;
//! println!("Found {} targets", targets.len());
//! # Ok(())
//! # }
//! ```

pub mod memory;
pub mod query;
pub mod rcsb;
pub mod store;

use crate::config::TargetsConfig;
use crate::errors::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

pub use query::{RcsbHit, RcsbSearchResponse, SearchQuery};
pub use rcsb::RcsbClient;
pub use store::TargetStore;

/// Statistics for the target discovery component
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorStats {
    /// Total `find_targets` calls
    pub searches: usize,
    /// Identifiers returned across all searches
    pub targets_found: usize,
    /// Searches that degraded to an empty result (failed or malformed fetch)
    pub empty_results: usize,
    /// Time of the most recent search
    pub last_search: Option<DateTime<Utc>>,
}

/// Target selector composing the RCSB fetcher with the durable store
pub struct TargetSelector {
    client: RcsbClient,
    store: TargetStore,
    stats: Mutex<SelectorStats>,
}

impl TargetSelector {
    /// Create a selector from target-discovery configuration.
    ///
    /// The durable cache directory is created here, once, idempotently.
    pub async fn new(config: TargetsConfig) -> Result<Self> {
        let store = TargetStore::new(config.cache_dir.clone()).await?;
        let client = RcsbClient::new(config)?;

        Ok(Self {
            client,
            store,
            stats: Mutex::new(SelectorStats::default()),
        })
    }

    /// Find protein targets related to a condition or disease.
    ///
    /// The term is used verbatim as the query term for all three search
    /// clauses. On a well-formed response the identifiers are extracted in
    /// API order (no dedup, no reordering), persisted to the durable store,
    /// and returned. An absent or malformed response yields `Ok(vec![])` and
    /// leaves any existing durable file untouched; only a filesystem failure
    /// surfaces as an error.
    pub async fn find_targets(&self, condition_or_disease: &str) -> Result<Vec<String>> {
        info!("Searching for targets related to: {}", condition_or_disease);

        let result_set = self
            .client
            .fetch(condition_or_disease)
            .await
            .and_then(|response| response.result_set);

        let Some(result_set) = result_set else {
            self.record_search(None);
            return Ok(Vec::new());
        };

        let target_ids: Vec<String> = result_set.into_iter().map(|hit| hit.rcsb_id).collect();

        let cache_file = self.store.persist(condition_or_disease, &target_ids).await?;
        info!(
            "Found {} targets for '{}'. Cached to {:?}",
            target_ids.len(),
            condition_or_disease,
            cache_file
        );

        self.record_search(Some(target_ids.len()));
        Ok(target_ids)
    }

    /// Snapshot of the selector statistics
    pub fn stats(&self) -> SelectorStats {
        self.stats.lock().clone()
    }

    /// Number of terms currently held in the in-memory response cache
    pub fn cached_terms(&self) -> usize {
        self.client.cached_terms()
    }

    /// Check that the durable cache directory is usable
    pub async fn health_check(&self) -> Result<()> {
        tokio::fs::metadata(self.store.cache_dir()).await?;
        Ok(())
    }

    fn record_search(&self, found: Option<usize>) {
        let mut stats = self.stats.lock();
        stats.searches += 1;
        stats.last_search = Some(Utc::now());
        match found {
            Some(count) => stats.targets_found += count,
            None => stats.empty_results += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(api_url: String, cache_dir: &std::path::Path) -> TargetsConfig {
        TargetsConfig {
            api_url,
            cache_dir: cache_dir.to_path_buf(),
            cache_capacity: 10,
            cache_ttl_seconds: 3600,
            request_timeout_seconds: 5,
        }
    }

    async fn mock_server(body: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_find_targets_extracts_ids_in_order_and_persists() {
        let dir = TempDir::new().unwrap();
        let server = mock_server(serde_json::json!({
            "result_set": [{"rcsb_id": "A"}, {"rcsb_id": "B"}]
        }))
        .await;

        let selector = TargetSelector::new(config(format!("{}/query", server.uri()), dir.path()))
            .await
            .unwrap();

        let targets = selector.find_targets("diabetes").await.unwrap();
        assert_eq!(targets, vec!["A", "B"]);

        let content = std::fs::read_to_string(dir.path().join("diabetes.json")).unwrap();
        let persisted: Vec<String> = serde_json::from_str(&content).unwrap();
        assert_eq!(persisted, vec!["A", "B"]);

        let stats = selector.stats();
        assert_eq!(stats.searches, 1);
        assert_eq!(stats.targets_found, 2);
        assert!(stats.last_search.is_some());
    }

    #[tokio::test]
    async fn test_sanitized_filename_for_multiword_term() {
        let dir = TempDir::new().unwrap();
        let server = mock_server(serde_json::json!({
            "result_set": [{"rcsb_id": "1XYZ"}]
        }))
        .await;

        let selector = TargetSelector::new(config(format!("{}/query", server.uri()), dir.path()))
            .await
            .unwrap();

        selector.find_targets("type 2 diabetes").await.unwrap();
        assert!(dir.path().join("type_2_diabetes.json").is_file());
    }

    #[tokio::test]
    async fn test_connection_error_yields_empty_and_no_file() {
        let dir = TempDir::new().unwrap();
        let selector = TargetSelector::new(config(
            "http://127.0.0.1:1/query".to_string(),
            dir.path(),
        ))
        .await
        .unwrap();

        let targets = selector.find_targets("diabetes").await.unwrap();
        assert!(targets.is_empty());
        assert!(!dir.path().join("diabetes.json").exists());
        assert_eq!(selector.stats().empty_results, 1);
    }

    #[tokio::test]
    async fn test_missing_result_set_yields_empty_and_no_file() {
        let dir = TempDir::new().unwrap();
        let server = mock_server(serde_json::json!({})).await;

        let selector = TargetSelector::new(config(format!("{}/query", server.uri()), dir.path()))
            .await
            .unwrap();

        let targets = selector.find_targets("diabetes").await.unwrap();
        assert!(targets.is_empty());
        assert!(!dir.path().join("diabetes.json").exists());
    }

    #[tokio::test]
    async fn test_failed_refetch_leaves_existing_file_untouched() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("diabetes.json");
        std::fs::write(&file, "[\n  \"KEEP\"\n]").unwrap();

        let selector = TargetSelector::new(config(
            "http://127.0.0.1:1/query".to_string(),
            dir.path(),
        ))
        .await
        .unwrap();

        assert!(selector.find_targets("diabetes").await.unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "[\n  \"KEEP\"\n]");
    }

    #[tokio::test]
    async fn test_empty_result_set_still_persists_empty_array() {
        let dir = TempDir::new().unwrap();
        let server = mock_server(serde_json::json!({ "result_set": [] })).await;

        let selector = TargetSelector::new(config(format!("{}/query", server.uri()), dir.path()))
            .await
            .unwrap();

        let targets = selector.find_targets("diabetes").await.unwrap();
        assert!(targets.is_empty());

        let content = std::fs::read_to_string(dir.path().join("diabetes.json")).unwrap();
        assert_eq!(content, "[]");
    }
}
