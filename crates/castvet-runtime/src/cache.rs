//! In-memory cache of evaluation results.
//!
//! Chat requests depend on a prior evaluation being cached; the cache key
//! is the influencer identifier plus the content type, so the same
//! influencer evaluated under two content types occupies two entries.

use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use castvet_core::{ContentType, EvaluationResult};

/// Evaluation cache backed by moka.
pub struct EvaluationCache {
    cache: Cache<String, Arc<EvaluationResult>>,
}

impl EvaluationCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Cache key for one evaluation.
    pub fn key(influencer_id: &str, content_type: ContentType) -> String {
        format!("{influencer_id}_{content_type}")
    }

    pub async fn get(&self, key: &str) -> Option<Arc<EvaluationResult>> {
        self.cache.get(key).await
    }

    pub async fn insert(&self, key: String, result: Arc<EvaluationResult>) {
        self.cache.insert(key, result).await;
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl Default for EvaluationCache {
    fn default() -> Self {
        Self::new(10_000, Duration::from_secs(3600))
    }
}
