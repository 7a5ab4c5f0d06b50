//! Configuration types shared by the query service, the resampler, and the server.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Collection, Route};

/// TTL configuration for the coalescing result cache.
///
/// A TTL of zero disables storage for that route; concurrent identical requests
/// are still coalesced onto one backend fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL applied to routes without an explicit override, in milliseconds.
    pub default_ttl_ms: u64,
    /// Per-route TTL overrides keyed by [`Route::as_str`], in milliseconds.
    pub per_route_ttl_ms: HashMap<String, u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        let per_route_ttl_ms = HashMap::from([
            (Route::Tc.as_str().to_string(), 1_000_000),
            (Route::Info.as_str().to_string(), 10_000_000),
            (Route::Code.as_str().to_string(), 10_000),
            (Route::Exchange.as_str().to_string(), 10_000),
            (Route::Series.as_str().to_string(), 0),
        ]);
        Self {
            default_ttl_ms: 0,
            per_route_ttl_ms,
        }
    }
}

impl CacheConfig {
    /// Effective TTL for a route; `None` when storage is disabled.
    #[must_use]
    pub fn ttl_for(&self, route: Route) -> Option<Duration> {
        let ms = self
            .per_route_ttl_ms
            .get(route.as_str())
            .copied()
            .unwrap_or(self.default_ttl_ms);
        (ms > 0).then(|| Duration::from_millis(ms))
    }

    /// Set a per-route TTL override.
    pub fn set_ttl(&mut self, route: Route, ttl: Duration) {
        let ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        self.per_route_ttl_ms.insert(route.as_str().to_string(), ms);
    }
}

/// Page size bounds for a paged route.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Page size used when the request omits `limit` or sends an invalid one.
    pub default_limit: usize,
    /// Upper bound; larger requests are clamped to this value.
    pub max_limit: usize,
}

impl PaginationConfig {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(default_limit: usize, max_limit: usize) -> Self {
        Self {
            default_limit,
            max_limit,
        }
    }
}

/// Tuning for the bucket resampler's bounded raw fetch and grid walk.
///
/// None of these values are correctness guarantees: they trade backend load
/// against the likelihood that a requested page is fully populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResampleConfig {
    /// Raw records fetched per wanted bucket: `buffer = multiplier * (offset + limit)`.
    pub buffer_multiplier: usize,
    /// The walk stops once `slack_factor * (offset + limit)` buckets are collected.
    pub slack_factor: usize,
    /// The walk never steps back more than `horizon_factor * (offset + limit)` intervals.
    pub horizon_factor: usize,
    /// Interval used when the request omits one.
    pub default_interval: String,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            buffer_multiplier: 30,
            slack_factor: 2,
            horizon_factor: 3,
            default_interval: "1m".to_string(),
        }
    }
}

/// Where each route reads from, and the field names the service relies on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourcesConfig {
    /// Collection behind [`Route::Tc`].
    pub tc: Collection,
    /// Collection behind [`Route::Info`].
    pub info: Collection,
    /// Collection behind [`Route::Code`] and [`Route::OnlyCode`].
    pub stock_code: Collection,
    /// Collection behind [`Route::Exchange`].
    pub exchange: Collection,
    /// Raw order matches behind [`Route::Orders`] and [`Route::Series`].
    pub matches: Collection,
    /// Kline documents behind [`Route::Candles`].
    pub klines: Collection,
    /// Field holding the event time of a raw match, used by the series route.
    pub match_time_field: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            tc: Collection::new("moneyflow", "tc"),
            info: Collection::new("moneyflow", "info_stocks"),
            stock_code: Collection::new("moneyflow", "stock_code"),
            exchange: Collection::new("moneyflow", "exchange"),
            matches: Collection::new("moneyflow", "matchs"),
            klines: Collection::new("binance", "klines"),
            match_time_field: "Timestamp".to_string(),
        }
    }
}

/// Global configuration for the `Rialto` query service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RialtoConfig {
    /// Result cache TTLs.
    pub cache: CacheConfig,
    /// Page bounds for the orders route.
    pub orders: PaginationConfig,
    /// Row bounds for the candles route.
    pub candles: PaginationConfig,
    /// Page bounds for the bucketed series route.
    pub series: PaginationConfig,
    /// Resampler tuning.
    pub resample: ResampleConfig,
    /// Collection and field names.
    pub sources: SourcesConfig,
    /// Upper bound on every backing store call.
    pub store_timeout: Duration,
}

impl Default for RialtoConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            orders: PaginationConfig::new(20, 200),
            candles: PaginationConfig::new(200, 1000),
            series: PaginationConfig::new(100, 1000),
            resample: ResampleConfig::default(),
            sources: SourcesConfig::default(),
            store_timeout: Duration::from_secs(10),
        }
    }
}
