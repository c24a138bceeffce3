//! Pure pattern matching functions for cache keys.
//!
//! Invalidation patterns are literal substrings: a key matches when it
//! contains the pattern anywhere. No character is special, so search text
//! embedded in keys can be matched exactly.

/// Checks if a cache key matches an invalidation pattern.
///
/// # Examples
///
/// ```
/// use profiledeck_core::cache::key_matches;
///
/// assert!(key_matches("list_profiles", "profiledeck_cache_list_profiles_{\"page\":1}"));
/// assert!(!key_matches("get_profile", "profiledeck_cache_list_profiles_{}"));
/// ```
pub fn key_matches(pattern: &str, key: &str) -> bool {
    key.contains(pattern)
}
