mod entry;
mod error;
mod keys;
mod patterns;
mod traits;

pub use entry::CacheEntry;
pub use error::{CacheError, Result};
pub use keys::{
    derive_key, derive_key_for, is_cache_key, list_profiles_key, profile_key,
    profile_lists_pattern, CACHE_KEY_PREFIX, GET_PROFILE_ENDPOINT, LIST_ALL_PROFILES_ENDPOINT,
    LIST_PROFILES_ENDPOINT,
};
pub use patterns::key_matches;
pub use traits::PersistentLayer;
