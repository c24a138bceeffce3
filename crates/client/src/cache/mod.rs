//! Client-side response cache.
//!
//! A [`CacheStore`] pairs a bounded in-memory layer with an optional SQLite
//! layer; [`CachedOperation`] puts it in front of any API operation.

mod decorator;
mod memory;
mod schema;
mod sqlite;
mod store;

pub use decorator::CachedOperation;
pub use memory::MemoryLayer;
pub use sqlite::SqliteLayer;
pub use store::{CacheStats, CacheStore, Clock, SystemClock, DEFAULT_MAX_ENTRIES, DEFAULT_TTL};
