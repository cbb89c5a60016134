//! Time-bounded cache shared across scanner instances
//!
//! Entity resolution and directory cover discovery both funnel through this
//! cache. It is advisory: a miss (or an expired entry) falls through to the
//! producer, and correctness never depends on a hit.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Thread-safe string-keyed cache with per-entry expiry.
///
/// Values are cloned out on access, so cached types should be cheap to clone
/// (catalog entities, paths). A `Duration::ZERO` time-to-live makes every
/// lookup miss, which tests use as a deterministic pass-through cache.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TtlCache<V> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of entries, including any that have expired but not been evicted
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Drop all entries
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

impl<V: Clone> TtlCache<V> {
    /// Look up a live entry, evicting it if it has expired
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().unwrap();
        if let Some(entry) = entries.get(key) {
            if entry.expires_at > Instant::now() {
                return Some(entry.value.clone());
            }
        }
        entries.remove(key);
        None
    }

    /// Store a value under `key` for `ttl`
    pub fn insert(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().unwrap().insert(key.into(), entry);
    }

    /// Return the cached value for `key`, or run `producer` and cache its
    /// output for `ttl`.
    ///
    /// Producer failures are returned as-is and nothing is cached. Under
    /// concurrent misses on the same key the producer may run more than once;
    /// callers rely on the backing store being race-safe, not on this cache.
    pub async fn remember<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> std::result::Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value = producer().await?;
        self.insert(key, value.clone(), ttl);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn insert_and_get() {
        let cache = TtlCache::new();
        cache.insert("a", 1, Duration::from_secs(60));

        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn zero_ttl_always_misses() {
        let cache = TtlCache::new();
        cache.insert("a", 1, Duration::ZERO);

        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn expired_entries_are_evicted_on_access() {
        let cache = TtlCache::new();
        cache.insert("a", 1, Duration::ZERO);

        assert_eq!(cache.get("a"), None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn remember_runs_producer_once_per_live_entry() {
        let cache = TtlCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: Result<i32, ()> = cache
                .remember("key", Duration::from_secs(60), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await;
            assert_eq!(value, Ok(7));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn remember_with_zero_ttl_always_runs_producer() {
        let cache = TtlCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let _: Result<i32, ()> = cache
                .remember("key", Duration::ZERO, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await;
        }

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn remember_does_not_cache_failures() {
        let cache: TtlCache<i32> = TtlCache::new();

        let result: Result<i32, &str> = cache
            .remember("key", Duration::from_secs(60), || async { Err("boom") })
            .await;
        assert_eq!(result, Err("boom"));
        assert!(cache.is_empty());
    }
}
