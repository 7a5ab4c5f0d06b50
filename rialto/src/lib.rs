//! Rialto serves read-mostly queries over a growing market data document store.
//!
//! Overview
//! - Snapshot routes (`tc`, `info`, `code`, `exchange`) read whole or filtered
//!   collections through a request-coalescing TTL cache: concurrent identical
//!   requests share one store fetch, and failures are never cached.
//! - The series route resamples a symbol's raw trades onto a regular time grid
//!   and serves it page by page from one bounded fetch per request.
//! - Orders, candles and single-code lookups are validated pass-through reads.
//! - Every store call is bounded by a timeout layer.
//!
//! Key behaviors and trade-offs
//! - Cache TTLs are absolute from population; reads never extend them.
//! - Series totals describe only the buckets found inside the fetched window.
//!   `pagination.windowLimited` reports when older history may exist beyond it.
//! - Pagination inputs never fail a request: bad values fall back to defaults
//!   and oversized limits are clamped.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use rialto::{Rialto, SeriesQuery};
//! use rialto_mock::MemoryStore;
//!
//! let rialto = Rialto::builder()
//!     .with_store(Arc::new(MemoryStore::with_fixtures()))
//!     .store_timeout(Duration::from_secs(5))
//!     .series_ttl(Duration::from_secs(2))
//!     .build()?;
//!
//! let page = rialto
//!     .series(&SeriesQuery {
//!         symbol: Some("VNM".into()),
//!         interval: Some("1m".into()),
//!         ..Default::default()
//!     })
//!     .await?;
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod params;
mod resampler;
mod response;
mod router;

pub use crate::core::{Rialto, RialtoBuilder};
pub use params::{CandlesQuery, MarketQuery, OrdersQuery, SeriesQuery};
pub use resampler::BucketResampler;
pub use response::{Kline, Lookup, OrdersPage, SeriesPage, Snapshot};

pub use rialto_middleware::{CoalescingCache, StoreBuilder, TimeoutLayer, TimeoutStore};

// Re-export core types for convenience
pub use rialto_core::{
    BackingStore, Bucket, CacheConfig, Collection, Document, Filter, FindQuery, Interval,
    PageInfo, PaginationConfig, RawRecord, ResampleConfig, RialtoConfig, RialtoError, Route,
    Sort, SourcesConfig,
};
