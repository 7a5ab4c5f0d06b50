//! Per-call timeout wrapper for backing stores.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rialto_core::{BackingStore, Collection, Document, Filter, FindQuery, RialtoError, StoreLayer};

/// Bounds every call to the inner store by a fixed timeout.
///
/// An elapsed timeout surfaces as [`RialtoError::UpstreamTimeout`]; the inner
/// call is dropped.
pub struct TimeoutStore {
    inner: Arc<dyn BackingStore>,
    timeout: Duration,
}

impl TimeoutStore {
    /// Wrap `inner` so each call is bounded by `timeout`.
    pub fn new(inner: Arc<dyn BackingStore>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// The configured bound.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T, Fut>(&self, operation: &'static str, fut: Fut) -> Result<T, RialtoError>
    where
        Fut: Future<Output = Result<T, RialtoError>>,
    {
        tokio::time::timeout(self.timeout, fut)
            .await
            .unwrap_or_else(|_| {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    store = self.inner.name(),
                    operation,
                    timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                    "store call timed out"
                );
                Err(RialtoError::upstream_timeout(self.inner.name(), operation))
            })
    }
}

#[async_trait]
impl BackingStore for TimeoutStore {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn find(&self, query: FindQuery) -> Result<Vec<Document>, RialtoError> {
        self.bounded("find", self.inner.find(query)).await
    }

    async fn find_one(
        &self,
        collection: &Collection,
        filter: &Filter,
    ) -> Result<Document, RialtoError> {
        self.bounded("find_one", self.inner.find_one(collection, filter))
            .await
    }
}

/// Declarative layer that wraps a store in [`TimeoutStore`] at build time.
pub struct TimeoutLayer {
    timeout: Duration,
}

impl TimeoutLayer {
    /// Layer bounding each call by `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl StoreLayer for TimeoutLayer {
    fn apply(self: Box<Self>, inner: Arc<dyn BackingStore>) -> Arc<dyn BackingStore> {
        Arc::new(TimeoutStore::new(inner, self.timeout))
    }

    fn name(&self) -> &'static str {
        "TimeoutStore"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "timeout_ms": u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
        })
    }
}
