//! Cache-aside decorator for API operations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use profiledeck_core::api::{ApiResult, Operation};

use super::store::CacheStore;

/// Wraps an [`Operation`] so fresh results are served from a [`CacheStore`].
///
/// - **Hit**: the stored result is returned and the wrapped operation is not
///   invoked.
/// - **Miss**: the wrapped operation runs; its result is stored only when
///   `success` is true.
///
/// Arguments and the result contract are those of the wrapped operation.
pub struct CachedOperation<O> {
    inner: O,
    endpoint: String,
    cache: Arc<CacheStore>,
    ttl: Option<Duration>,
}

impl<O> CachedOperation<O> {
    /// Creates a decorator using the store's default TTL.
    pub fn new(inner: O, endpoint: impl Into<String>, cache: Arc<CacheStore>) -> Self {
        Self {
            inner,
            endpoint: endpoint.into(),
            cache,
            ttl: None,
        }
    }

    /// Overrides the TTL for entries written by this decorator.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

#[async_trait]
impl<O> Operation for CachedOperation<O>
where
    O: Operation,
{
    type Args = O::Args;
    type Output = O::Output;

    async fn call(&self, args: &Self::Args) -> ApiResult<Self::Output> {
        if let Some(cached) = self
            .cache
            .get::<_, ApiResult<Self::Output>>(&self.endpoint, args)
        {
            tracing::trace!(endpoint = %self.endpoint, "Serving from cache");
            return cached;
        }

        tracing::trace!(endpoint = %self.endpoint, "Cache miss, calling operation");
        let result = self.inner.call(args).await;

        if result.success {
            self.cache.set(&self.endpoint, args, &result, self.ttl);
        } else {
            tracing::debug!(endpoint = %self.endpoint, message = %result.message, "Not caching failed result");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Doubles its argument; fails for negative input.
    #[derive(Default)]
    struct Doubler {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Operation for Doubler {
        type Args = i64;
        type Output = i64;

        async fn call(&self, args: &i64) -> ApiResult<i64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if *args < 0 {
                ApiResult::failure(0, "negative")
            } else {
                ApiResult::ok(args * 2, "")
            }
        }
    }

    fn store() -> Arc<CacheStore> {
        Arc::new(CacheStore::in_memory(10, Duration::from_secs(60)))
    }

    #[tokio::test]
    async fn test_second_call_is_served_from_cache() {
        let op = CachedOperation::new(Doubler::default(), "double", store());

        let first = op.call(&21).await;
        let second = op.call(&21).await;

        assert_eq!(first, ApiResult::ok(42, ""));
        assert_eq!(second, first);
        assert_eq!(op.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_different_args_are_separate_entries() {
        let op = CachedOperation::new(Doubler::default(), "double", store());

        op.call(&1).await;
        op.call(&2).await;
        op.call(&1).await;

        assert_eq!(op.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_are_never_cached() {
        let cache = store();
        let op = CachedOperation::new(Doubler::default(), "double", cache.clone());

        let first = op.call(&-1).await;
        let second = op.call(&-1).await;

        assert!(!first.success);
        assert_eq!(second.message, "negative");
        assert_eq!(op.inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.stats().entries, 0);
    }

    #[tokio::test]
    async fn test_invalidation_forces_refetch() {
        let cache = store();
        let op = CachedOperation::new(Doubler::default(), "double", cache.clone());

        op.call(&5).await;
        cache.invalidate("double", &5);
        op.call(&5).await;

        assert_eq!(op.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_custom_ttl_expiry() {
        let op = CachedOperation::new(Doubler::default(), "double", store())
            .with_ttl(Duration::ZERO);

        op.call(&3).await;
        op.call(&3).await;

        assert_eq!(op.inner.calls.load(Ordering::SeqCst), 2);
    }
}
