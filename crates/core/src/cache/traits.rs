use super::Result;

/// A persistent string key/value layer, the slow tier of the cache store.
///
/// Calls are synchronous so that invalidation finishes before the caller
/// moves on. The layer may hold keys that do not belong to the cache; the
/// store filters by its reserved prefix.
pub trait PersistentLayer: Send + Sync {
    /// Reads the raw value stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Lists every key currently stored, cache-owned or not.
    fn keys(&self) -> Result<Vec<String>>;
}
