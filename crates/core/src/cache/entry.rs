//! The cache entry record and its freshness rule.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{CacheError, Result};

/// A cached value with the time it was written and its time-to-live.
///
/// Timestamps are Unix milliseconds so entries written by one process stay
/// meaningful when read back from persistent storage by another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub value: Value,
    pub written_at: i64,
    pub ttl_ms: u64,
}

impl CacheEntry {
    pub fn new(value: Value, written_at: i64, ttl: Duration) -> Self {
        Self {
            value,
            written_at,
            ttl_ms: u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// An entry is valid iff `now - written_at < ttl`.
    pub fn is_valid(&self, now: i64) -> bool {
        let age = now.saturating_sub(self.written_at);
        // A clock that went backwards makes the entry look younger, never expired.
        age < 0 || (age as u64) < self.ttl_ms
    }

    /// Serialize for persistent storage.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CacheError::Serialization(e.to_string()))
    }

    /// Parse an entry read back from persistent storage.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| CacheError::Corrupt(e.to_string()))
    }
}
