use serde::Serialize;
use serde_json::Value;

use crate::profile::ListProfilesQuery;

/// Reserved prefix for every key the cache store writes.
///
/// Persistent storage may be shared with unrelated data; only keys carrying
/// this prefix belong to the cache.
pub const CACHE_KEY_PREFIX: &str = "profiledeck_cache_";

/// Endpoint name for paginated list results.
pub const LIST_PROFILES_ENDPOINT: &str = "list_profiles";

/// Endpoint name for the unpaginated list.
pub const LIST_ALL_PROFILES_ENDPOINT: &str = "list_all_profiles";

/// Endpoint name for single-profile lookups.
pub const GET_PROFILE_ENDPOINT: &str = "get_profile";

/// Derives the cache key for an endpoint and its request parameters.
///
/// Object keys are emitted in sorted order at every depth, so two parameter
/// sets that differ only in field order map to the same key.
pub fn derive_key(endpoint: &str, params: &Value) -> String {
    let mut key = format!("{CACHE_KEY_PREFIX}{endpoint}_");
    write_canonical(params, &mut key);
    key
}

/// Derives the cache key for any serializable parameter value.
///
/// Returns `None` when the parameters cannot be represented as JSON.
pub fn derive_key_for<P: Serialize + ?Sized>(endpoint: &str, params: &P) -> Option<String> {
    serde_json::to_value(params)
        .ok()
        .map(|value| derive_key(endpoint, &value))
}

/// Returns the cache key for one page of the profile list.
pub fn list_profiles_key(query: &ListProfilesQuery) -> Option<String> {
    derive_key_for(LIST_PROFILES_ENDPOINT, query)
}

/// Returns the cache key for a single profile.
pub fn profile_key(id: &str) -> String {
    derive_key(GET_PROFILE_ENDPOINT, &Value::String(id.to_string()))
}

/// Returns the pattern matching every cached list result, paged or not.
pub fn profile_lists_pattern() -> String {
    format!("{CACHE_KEY_PREFIX}list_")
}

/// Checks if a key belongs to the cache namespace.
pub fn is_cache_key(key: &str) -> bool {
    key.starts_with(CACHE_KEY_PREFIX)
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (k, v)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(k.clone()).to_string());
                out.push(':');
                write_canonical(v, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
