//! Two-layer TTL cache for API responses.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use profiledeck_core::cache::{
    derive_key_for, is_cache_key, key_matches, CacheEntry, CacheError, PersistentLayer,
};

use super::memory::MemoryLayer;

/// Default time-to-live for cached entries.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default maximum number of entries in the fast layer.
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Source of the current time in Unix milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Size of the fast layer, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub persistent: bool,
}

/// Key/value store with TTL expiry over a fast and an optional slow layer.
///
/// Reads try the fast layer first and promote slow-layer hits into it.
/// Writes and invalidations go to both layers. Every slow-layer failure is
/// logged and swallowed; the store then behaves as if that layer were
/// empty.
pub struct CacheStore {
    fast: Mutex<MemoryLayer>,
    slow: Option<Box<dyn PersistentLayer>>,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    /// Creates a store backed by the fast layer only.
    pub fn in_memory(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            fast: Mutex::new(MemoryLayer::new(max_entries)),
            slow: None,
            default_ttl,
            clock: Arc::new(SystemClock),
        }
    }

    /// Adds a persistent slow layer.
    pub fn with_persistent_layer(mut self, layer: impl PersistentLayer + 'static) -> Self {
        self.slow = Some(Box::new(layer));
        self
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Returns the cached value for `(endpoint, params)` if it is still valid.
    ///
    /// A value that no longer deserializes as `T` is invalidated and treated
    /// as a miss.
    pub fn get<P, T>(&self, endpoint: &str, params: &P) -> Option<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let key = derive_key_for(endpoint, params)?;
        let value = self.get_raw(&key)?;

        match serde_json::from_value(value) {
            Ok(typed) => Some(typed),
            Err(err) => {
                tracing::warn!(%key, error = %err, "Cached value has unexpected shape");
                self.invalidate_key(&key);
                None
            }
        }
    }

    /// Stores `value` under `(endpoint, params)` in both layers.
    ///
    /// `ttl = None` uses the store's default TTL.
    pub fn set<P, T>(&self, endpoint: &str, params: &P, value: &T, ttl: Option<Duration>)
    where
        P: Serialize + ?Sized,
        T: Serialize + ?Sized,
    {
        let Some(key) = derive_key_for(endpoint, params) else {
            tracing::warn!(endpoint, "Cache parameters are not serializable");
            return;
        };
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(%key, error = %err, "Cache value is not serializable");
                return;
            }
        };

        let entry = CacheEntry::new(
            value,
            self.clock.now_millis(),
            ttl.unwrap_or(self.default_ttl),
        );

        if let Some(layer) = &self.slow {
            match entry.to_json() {
                Ok(raw) => {
                    if let Err(err) = layer.write(&key, &raw) {
                        log_slow_failure("write", &key, &err);
                    }
                }
                Err(err) => log_slow_failure("write", &key, &err),
            }
        }

        if let Some(evicted) = self.fast().insert(key, entry) {
            tracing::trace!(key = %evicted, "Evicted oldest cache entry");
        }
    }

    /// Removes the entry for `(endpoint, params)` from both layers.
    pub fn invalidate<P>(&self, endpoint: &str, params: &P)
    where
        P: Serialize + ?Sized,
    {
        if let Some(key) = derive_key_for(endpoint, params) {
            self.invalidate_key(&key);
        }
    }

    /// Removes one already-derived key from both layers.
    pub fn invalidate_key(&self, key: &str) {
        self.fast().remove(key);
        self.remove_slow(key);
    }

    /// Removes every entry whose key contains `pattern`, from both layers.
    pub fn invalidate_pattern(&self, pattern: &str) {
        let removed = self.fast().remove_matching(pattern);
        tracing::trace!(pattern, removed, "Invalidated cache pattern");

        for key in self.slow_cache_keys() {
            if key_matches(pattern, &key) {
                self.remove_slow(&key);
            }
        }
    }

    /// Removes every entry this store created.
    ///
    /// Slow-layer rows without the cache prefix are left alone.
    pub fn clear(&self) {
        self.fast().clear();
        for key in self.slow_cache_keys() {
            self.remove_slow(&key);
        }
    }

    pub fn stats(&self) -> CacheStats {
        let fast = self.fast();
        CacheStats {
            entries: fast.len(),
            capacity: fast.capacity(),
            persistent: self.slow.is_some(),
        }
    }

    fn get_raw(&self, key: &str) -> Option<Value> {
        let now = self.clock.now_millis();

        {
            let mut fast = self.fast();
            match fast.get(key) {
                Some(entry) if entry.is_valid(now) => {
                    tracing::trace!(%key, "Cache hit");
                    return Some(entry.value.clone());
                }
                Some(_) => {
                    tracing::trace!(%key, "Cache entry expired");
                    fast.remove(key);
                    drop(fast);
                    self.remove_slow(key);
                    return None;
                }
                None => {}
            }
        }

        let layer = self.slow.as_ref()?;
        let raw = match layer.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::trace!(%key, "Cache miss");
                return None;
            }
            Err(err) => {
                log_slow_failure("read", key, &err);
                return None;
            }
        };

        let entry = match CacheEntry::from_json(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                log_slow_failure("read", key, &err);
                self.remove_slow(key);
                return None;
            }
        };

        if !entry.is_valid(now) {
            tracing::trace!(%key, "Persistent cache entry expired");
            self.remove_slow(key);
            return None;
        }

        tracing::trace!(%key, "Persistent cache hit, promoting");
        let value = entry.value.clone();
        self.fast().insert(key.to_string(), entry);
        Some(value)
    }

    fn remove_slow(&self, key: &str) {
        if let Some(layer) = &self.slow {
            if let Err(err) = layer.remove(key) {
                log_slow_failure("remove", key, &err);
            }
        }
    }

    fn slow_cache_keys(&self) -> Vec<String> {
        let Some(layer) = &self.slow else {
            return Vec::new();
        };
        match layer.keys() {
            Ok(keys) => keys.into_iter().filter(|k| is_cache_key(k)).collect(),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to list persistent cache keys");
                Vec::new()
            }
        }
    }

    fn fast(&self) -> MutexGuard<'_, MemoryLayer> {
        self.fast.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("stats", &self.stats())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

fn log_slow_failure(op: &'static str, key: &str, err: &CacheError) {
    tracing::warn!(op, %key, error = %err, "Persistent cache layer failed, continuing in memory");
}
