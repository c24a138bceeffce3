use std::{env, path::PathBuf, time::Duration};

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API base URL (default: "http://localhost:5000")
    pub base_url: String,
    /// Cache TTL in seconds (default: 300)
    pub cache_ttl_seconds: u64,
    /// Maximum number of in-memory cache entries (default: 100)
    pub cache_max_entries: usize,
    /// Path to the SQLite cache file (default: "profiledeck-cache.db")
    pub cache_db_path: PathBuf,
    /// Quiet window for search input in milliseconds (default: 300)
    pub search_debounce_ms: u64,
    /// Side length of rendered QR images in pixels (default: 256)
    pub qr_image_size: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PROFILEDECK_URL` - API base URL (default: "http://localhost:5000")
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 300)
    /// - `CACHE_MAX_ENTRIES` - Maximum in-memory cache entries (default: 100)
    /// - `CACHE_DB_PATH` - SQLite cache path (default: "profiledeck-cache.db")
    /// - `SEARCH_DEBOUNCE_MS` - Search debounce window (default: 300)
    /// - `QR_IMAGE_SIZE` - QR image size in pixels (default: 256)
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("PROFILEDECK_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            cache_ttl_seconds: parse_var("CACHE_TTL_SECONDS").unwrap_or(300),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES")
                .filter(|n| *n > 0)
                .unwrap_or(100),
            cache_db_path: env::var("CACHE_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("profiledeck-cache.db")),
            search_debounce_ms: parse_var("SEARCH_DEBOUNCE_MS").unwrap_or(300),
            qr_image_size: parse_var("QR_IMAGE_SIZE").filter(|n| *n > 0).unwrap_or(256),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Get the search debounce window as a Duration.
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
