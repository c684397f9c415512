//! Caching layer for juror-runtime.
//!
//! Normalization is a pure function of `(raw, metric_key_hint)`, so its
//! output can be memoized without invalidation concerns. Entries only
//! leave the cache by capacity or time-to-live.

use moka::sync::Cache;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

use juror_core::{normalize_signals, SignalGroup};

/// Cache key for a normalization request.
///
/// Holds the canonical JSON text of the raw value, so two values share a
/// key only when they serialize identically (including key order).
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct CacheKey {
    raw: String,
    metric_key_hint: Option<String>,
}

impl CacheKey {
    /// Create a cache key from normalization inputs.
    pub fn new(raw: &Value, metric_key_hint: Option<&str>) -> Self {
        Self {
            raw: raw.to_string(),
            metric_key_hint: metric_key_hint.map(str::to_string),
        }
    }
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Normalization cache using moka.
pub struct SignalCache {
    cache: Cache<CacheKey, Arc<Vec<SignalGroup>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SignalCache {
    /// Create a new cache with the given capacity and time-to-live.
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();

        Self {
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Normalize `raw`, reusing a cached result when one exists.
    pub fn normalize(&self, raw: &Value, metric_key_hint: Option<&str>) -> Arc<Vec<SignalGroup>> {
        let key = CacheKey::new(raw, metric_key_hint);
        let entry = self
            .cache
            .entry(key)
            .or_insert_with(|| Arc::new(normalize_signals(raw, metric_key_hint)));

        if entry.is_fresh() {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(metric = metric_key_hint.unwrap_or("-"), "signal cache miss");
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(metric = metric_key_hint.unwrap_or("-"), "signal cache hit");
        }

        entry.into_value()
    }

    /// Get a cached result without computing it.
    pub fn get(&self, raw: &Value, metric_key_hint: Option<&str>) -> Option<Arc<Vec<SignalGroup>>> {
        self.cache.get(&CacheKey::new(raw, metric_key_hint))
    }

    /// Clear the cache.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Number of cached entries after pending maintenance has run.
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for SignalCache {
    fn default() -> Self {
        Self::new(10_000, Duration::from_secs(3600))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_operations() {
        let cache = SignalCache::default();
        let raw = json!({"verdict": "yes"});

        // Cache miss
        assert!(cache.get(&raw, None).is_none());

        let first = cache.normalize(&raw, None);
        let second = cache.normalize(&raw, None);

        // Cache hit returns the same allocation
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn test_hint_is_part_of_key() {
        let cache = SignalCache::default();
        let raw = json!({"faithfulness": {"verdict": "no"}, "other": {"verdict": "yes"}});

        let plain = cache.normalize(&raw, None);
        let hinted = cache.normalize(&raw, Some("faithfulness"));

        assert_ne!(plain, hinted);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_key_order_matters() {
        let a = CacheKey::new(&json!({"x": 1, "y": 2}), None);
        let b = CacheKey::new(&json!({"y": 2, "x": 1}), None);
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalidate_all() {
        let cache = SignalCache::default();
        let raw = json!("a\nb");
        cache.normalize(&raw, None);
        cache.invalidate_all();
        assert!(cache.get(&raw, None).is_none());
    }
}
