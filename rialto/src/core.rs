use std::sync::Arc;
use std::time::Duration;

use rialto_core::{
    BackingStore, Document, Interval, PaginationConfig, ResampleConfig, RialtoConfig, RialtoError,
    Route, SourcesConfig,
};
use rialto_middleware::{CoalescingCache, StoreBuilder};

use crate::resampler::BucketResampler;
use crate::response::SeriesPage;

/// Cache key for one page of a bucketed series.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SeriesKey {
    pub(crate) symbol: String,
    pub(crate) interval: Interval,
    pub(crate) page: usize,
    pub(crate) limit: usize,
}

/// Read-only query service over a backing document store.
///
/// Snapshot routes go through a request-coalescing TTL cache; the series
/// route goes through the bucket resampler (and optionally its own cache).
/// Every store call is bounded by the configured timeout.
pub struct Rialto {
    pub(crate) store: Arc<dyn BackingStore>,
    pub(crate) cfg: RialtoConfig,
    pub(crate) snapshots: CoalescingCache<String, Arc<Vec<Document>>>,
    pub(crate) series_cache: CoalescingCache<SeriesKey, SeriesPage>,
    pub(crate) resampler: Arc<BucketResampler>,
    pub(crate) default_interval: Interval,
}

/// Builder for constructing a [`Rialto`] service.
pub struct RialtoBuilder {
    store: Option<Arc<dyn BackingStore>>,
    cfg: RialtoConfig,
}

impl Default for RialtoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RialtoBuilder {
    /// Start from default configuration and no store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: None,
            cfg: RialtoConfig::default(),
        }
    }

    /// Set the raw backing store. The timeout layer is applied at build time.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn BackingStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: RialtoConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Upper bound on every store call.
    #[must_use]
    pub const fn store_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.store_timeout = timeout;
        self
    }

    /// Cache TTL for one route. Zero disables storage for it.
    #[must_use]
    pub fn cache_ttl(mut self, route: Route, ttl: Duration) -> Self {
        self.cfg.cache.set_ttl(route, ttl);
        self
    }

    /// Cache TTL for series pages. Zero (the default) disables series caching.
    #[must_use]
    pub fn series_ttl(self, ttl: Duration) -> Self {
        self.cache_ttl(Route::Series, ttl)
    }

    /// Page bounds for the orders route.
    #[must_use]
    pub const fn orders_pagination(mut self, bounds: PaginationConfig) -> Self {
        self.cfg.orders = bounds;
        self
    }

    /// Row bounds for the candles route.
    #[must_use]
    pub const fn candles_pagination(mut self, bounds: PaginationConfig) -> Self {
        self.cfg.candles = bounds;
        self
    }

    /// Page bounds for the series route.
    #[must_use]
    pub const fn series_pagination(mut self, bounds: PaginationConfig) -> Self {
        self.cfg.series = bounds;
        self
    }

    /// Resampler tuning.
    #[must_use]
    pub fn resample(mut self, cfg: ResampleConfig) -> Self {
        self.cfg.resample = cfg;
        self
    }

    /// Collection and field names.
    #[must_use]
    pub fn sources(mut self, sources: SourcesConfig) -> Self {
        self.cfg.sources = sources;
        self
    }

    /// Build the service.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no store was set, a page bound is zero or its
    /// default exceeds its maximum, or the default interval does not parse.
    pub fn build(self) -> Result<Rialto, RialtoError> {
        let raw = self
            .store
            .ok_or_else(|| RialtoError::invalid_arg("a backing store is required"))?;
        for (route, bounds) in [
            (Route::Orders, self.cfg.orders),
            (Route::Candles, self.cfg.candles),
            (Route::Series, self.cfg.series),
        ] {
            if bounds.default_limit == 0 || bounds.default_limit > bounds.max_limit {
                return Err(RialtoError::invalid_arg(format!(
                    "{route}: default limit must be within 1..={}",
                    bounds.max_limit
                )));
            }
        }
        let default_interval: Interval = self.cfg.resample.default_interval.parse()?;

        let store = StoreBuilder::new(raw)
            .with_timeout(self.cfg.store_timeout)
            .build();
        let resampler = BucketResampler::new(
            Arc::clone(&store),
            self.cfg.sources.matches.clone(),
            self.cfg.sources.match_time_field.as_str(),
        )
        .with_config(self.cfg.resample.clone());
        let resampler = Arc::new(resampler);

        Ok(Rialto {
            store,
            cfg: self.cfg,
            snapshots: CoalescingCache::new(),
            series_cache: CoalescingCache::new(),
            resampler,
            default_interval,
        })
    }
}

impl Rialto {
    /// Start building a new service.
    #[must_use]
    pub fn builder() -> RialtoBuilder {
        RialtoBuilder::new()
    }

    /// The effective configuration.
    #[must_use]
    pub const fn config(&self) -> &RialtoConfig {
        &self.cfg
    }

    /// Name of the underlying store.
    #[must_use]
    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    /// The bucket resampler backing the series route.
    #[must_use]
    pub fn resampler(&self) -> &BucketResampler {
        &self.resampler
    }

    pub(crate) fn ttl(&self, route: Route) -> Duration {
        self.cfg.cache.ttl_for(route).unwrap_or(Duration::ZERO)
    }

    /// Drop every cached snapshot and series page.
    pub async fn clear_caches(&self) {
        self.snapshots.clear().await;
        self.series_cache.clear().await;
    }
}
