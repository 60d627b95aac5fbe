//! # Durable Target Cache Module
//!
//! ## Purpose
//! Persists the extracted identifier list for a query term to stable storage,
//! one JSON file per term, keyed by a filesystem-safe encoding of the term.
//!
//! ## Input/Output Specification
//! - **Input**: Query term, ordered identifier list
//! - **Output**: `<cache_dir>/<sanitized_term>.json` containing a 2-space
//!   indented JSON array of identifier strings
//! - **Lifecycle**: Overwritten on every successful fetch; no expiry — files
//!   persist until externally deleted
//!
//! ## Key Features
//! - Cache directory created once, idempotently, at construction
//! - Full slug sanitization: any character outside `[A-Za-z0-9._-]` becomes
//!   `_`, so spaces map to underscores and path separators cannot escape the
//!   cache directory
//! - Write failures propagate — a failed write is fatal to the call

use crate::errors::{DiscoveryError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Durable per-term cache of extracted target identifiers
pub struct TargetStore {
    cache_dir: PathBuf,
}

impl TargetStore {
    /// Create a store rooted at `cache_dir`, creating the directory if needed
    pub async fn new(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let cache_dir = cache_dir.into();
        tokio::fs::create_dir_all(&cache_dir).await?;
        Ok(Self { cache_dir })
    }

    /// Write the identifier list for a term, overwriting any prior content
    pub async fn persist(&self, term: &str, ids: &[String]) -> Result<PathBuf> {
        let path = self.path_for(term);
        let json = serde_json::to_string_pretty(ids)?;

        tokio::fs::write(&path, json)
            .await
            .map_err(|e| DiscoveryError::CacheWrite {
                path: path.to_string_lossy().to_string(),
                details: e.to_string(),
            })?;

        debug!("Persisted {} target ids to {:?}", ids.len(), path);
        Ok(path)
    }

    /// The file path a term persists to
    pub fn path_for(&self, term: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", sanitize_term(term)))
    }

    /// The directory durable files are written to
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

/// Encode a query term as a safe filename stem.
///
/// Alphanumerics, `.`, `-`, and `_` pass through; everything else (spaces
/// included) becomes `_`.
pub fn sanitize_term(term: &str) -> String {
    term.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_replaces_spaces() {
        assert_eq!(sanitize_term("type 2 diabetes"), "type_2_diabetes");
        assert_eq!(sanitize_term("diabetes"), "diabetes");
    }

    #[test]
    fn test_sanitize_blocks_path_separators() {
        assert_eq!(sanitize_term("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_term("a/b\\c"), "a_b_c");
    }

    #[tokio::test]
    async fn test_persist_writes_indented_json_array() {
        let dir = TempDir::new().unwrap();
        let store = TargetStore::new(dir.path()).await.unwrap();

        let ids = vec!["1ABC".to_string(), "2DEF".to_string()];
        let path = store.persist("type 2 diabetes", &ids).await.unwrap();

        assert_eq!(path.file_name().unwrap(), "type_2_diabetes.json");
        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "[\n  \"1ABC\",\n  \"2DEF\"\n]");

        let parsed: Vec<String> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, ids);
    }

    #[tokio::test]
    async fn test_persist_overwrites_prior_content() {
        let dir = TempDir::new().unwrap();
        let store = TargetStore::new(dir.path()).await.unwrap();

        store
            .persist("cancer", &["OLD1".to_string(), "OLD2".to_string()])
            .await
            .unwrap();
        let path = store.persist("cancer", &["NEW".to_string()]).await.unwrap();

        let parsed: Vec<String> =
            serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
        assert_eq!(parsed, vec!["NEW"]);
    }

    #[tokio::test]
    async fn test_new_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("targets").join("cache");
        let store = TargetStore::new(&nested).await.unwrap();
        assert!(store.cache_dir().is_dir());
    }
}
