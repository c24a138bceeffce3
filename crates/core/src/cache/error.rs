use thiserror::Error;

/// Errors raised by a persistent cache layer.
///
/// The cache store never propagates these: they are logged and the store
/// carries on with its in-memory layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache storage unavailable: {0}")]
    Unavailable(String),
    #[error("Cache storage quota exceeded")]
    QuotaExceeded,
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
    #[error("Corrupt cache entry: {0}")]
    Corrupt(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
