//! # In-Memory Response Cache Module
//!
//! ## Purpose
//! Time-expiring, capacity-bounded memoization of raw API responses keyed by
//! query term. Constructed explicitly and injected into the fetcher — there is
//! no module-level global cache state.
//!
//! ## Input/Output Specification
//! - **Input**: Query term, raw response value
//! - **Output**: Cached value if present and fresh, `None` otherwise
//! - **Eviction**: Least-recently-used entry on capacity pressure; stale
//!   entries dropped on read once the TTL has elapsed
//!
//! ## Key Features
//! - Fixed capacity over distinct terms
//! - Fixed time-to-live from insertion
//! - Internally locked, safe for concurrent callers
//! - No single-flight de-duplication: two concurrent misses for the same term
//!   may both trigger a fetch

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// TTL + LRU bounded cache from query term to a cloneable value
pub struct ResponseCache<V> {
    inner: Mutex<CacheInner<V>>,
    capacity: usize,
    ttl: Duration,
}

struct CacheInner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    /// Monotonic use counter; higher means more recently used
    tick: u64,
}

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    last_used: u64,
}

impl<V: Clone> ResponseCache<V> {
    /// Create a cache holding at most `capacity` distinct terms, each entry
    /// living for `ttl` from insertion.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                tick: 0,
            }),
            capacity,
            ttl,
        }
    }

    /// Look up a term, returning the cached value if present and fresh.
    ///
    /// A stale entry is removed on the spot. A hit counts as a use for LRU
    /// ordering.
    pub fn get(&self, term: &str) -> Option<V> {
        let mut inner = self.inner.lock();

        let fresh = match inner.entries.get(term) {
            Some(entry) => entry.inserted_at.elapsed() < self.ttl,
            None => return None,
        };

        if !fresh {
            inner.entries.remove(term);
            return None;
        }

        inner.tick += 1;
        let tick = inner.tick;
        inner.entries.get_mut(term).map(|entry| {
            entry.last_used = tick;
            entry.value.clone()
        })
    }

    /// Insert a value for a term, evicting the least-recently-used entry if
    /// the capacity would otherwise be exceeded.
    pub fn insert(&self, term: &str, value: V) {
        let mut inner = self.inner.lock();
        inner.tick += 1;
        let tick = inner.tick;

        if !inner.entries.contains_key(term) && inner.entries.len() >= self.capacity {
            if let Some(oldest) = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone())
            {
                inner.entries.remove(&oldest);
            }
        }

        inner.entries.insert(
            term.to_string(),
            CacheEntry {
                value,
                inserted_at: Instant::now(),
                last_used: tick,
            },
        );
    }

    /// Number of terms currently cached, including not-yet-collected stale
    /// entries.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// True if no terms are cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
