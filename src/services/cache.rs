use crate::models::Candidate;
use std::sync::Arc;
use std::time::Duration;

/// In-process cache for the normalized candidate snapshot
///
/// Only fetched candidates are cached. Scores depend on the buyer's
/// criteria and are always recomputed.
pub struct CandidateCache {
    cache: moka::future::Cache<String, Arc<Vec<Candidate>>>,
}

impl CandidateCache {
    pub fn new(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<Vec<Candidate>>> {
        let hit = self.cache.get(key).await;
        if hit.is_some() {
            tracing::trace!("Cache hit: {}", key);
        } else {
            tracing::trace!("Cache miss: {}", key);
        }
        hit
    }

    pub async fn insert(&self, key: &str, candidates: Arc<Vec<Candidate>>) {
        self.cache.insert(key.to_string(), candidates).await;
        tracing::trace!("Cache set: {}", key);
    }

    pub async fn invalidate(&self, key: &str) {
        self.cache.invalidate(key).await;
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for the candidate snapshot of a table
    pub fn candidates(table: &str) -> String {
        format!("candidates:{}", table)
    }
}
