//! Bounded in-memory cache layer.
//!
//! Backed by `lru::LruCache`, but read through `peek` so lookups never move
//! an entry: the least recently *inserted* entry is the one evicted.

use std::num::NonZeroUsize;

use lru::LruCache;

use profiledeck_core::cache::{key_matches, CacheEntry};

/// The fast layer of the cache store.
#[derive(Debug)]
pub struct MemoryLayer {
    store: LruCache<String, CacheEntry>,
}

impl MemoryLayer {
    /// Creates a layer holding at most `max_entries` entries (at least one).
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: LruCache::new(capacity),
        }
    }

    /// Looks up an entry without touching its eviction order.
    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.store.peek(key)
    }

    /// Inserts an entry, returning the key evicted to make room, if any.
    pub fn insert(&mut self, key: String, entry: CacheEntry) -> Option<String> {
        match self.store.push(key.clone(), entry) {
            Some((evicted, _)) if evicted != key => Some(evicted),
            _ => None,
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.store.pop(key).is_some()
    }

    /// Removes every key containing `pattern`, returning how many were removed.
    pub fn remove_matching(&mut self, pattern: &str) -> usize {
        let keys: Vec<String> = self
            .store
            .iter()
            .filter(|(key, _)| key_matches(pattern, key))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &keys {
            self.store.pop(key);
        }
        keys.len()
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.cap().get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn entry(n: i64) -> CacheEntry {
        CacheEntry::new(json!(n), 0, Duration::from_secs(60))
    }

    #[test]
    fn test_insert_and_get() {
        let mut layer = MemoryLayer::new(2);
        assert!(layer.insert("a".to_string(), entry(1)).is_none());
        assert_eq!(layer.get("a").map(|e| e.value.clone()), Some(json!(1)));
        assert!(layer.get("b").is_none());
    }

    #[test]
    fn test_evicts_first_inserted_even_after_reads() {
        let mut layer = MemoryLayer::new(2);
        layer.insert("a".to_string(), entry(1));
        layer.insert("b".to_string(), entry(2));

        // Reading "a" must not protect it.
        assert!(layer.get("a").is_some());

        let evicted = layer.insert("c".to_string(), entry(3));
        assert_eq!(evicted.as_deref(), Some("a"));
        assert_eq!(layer.len(), 2);
        assert!(layer.get("a").is_none());
        assert!(layer.get("b").is_some());
        assert!(layer.get("c").is_some());
    }

    #[test]
    fn test_overwrite_is_not_an_eviction() {
        let mut layer = MemoryLayer::new(2);
        layer.insert("a".to_string(), entry(1));
        assert!(layer.insert("a".to_string(), entry(2)).is_none());
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.get("a").map(|e| e.value.clone()), Some(json!(2)));
    }

    #[test]
    fn test_remove_matching() {
        let mut layer = MemoryLayer::new(10);
        layer.insert("p_list_1".to_string(), entry(1));
        layer.insert("p_list_2".to_string(), entry(2));
        layer.insert("p_get_1".to_string(), entry(3));

        assert_eq!(layer.remove_matching("list_"), 2);
        assert_eq!(layer.len(), 1);
        assert!(layer.get("p_get_1").is_some());
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let layer = MemoryLayer::new(0);
        assert_eq!(layer.capacity(), 1);
        assert!(layer.is_empty());
    }
}
