//! rialto-core
//!
//! Core types, traits, and utilities shared across the rialto workspace.
//!
//! - `types`: documents, raw records, and buckets.
//! - `query`: the filter/sort/skip/limit vocabulary spoken to backing stores.
//! - `store`: the `BackingStore` trait every data source implements.
//! - `layer`: the `StoreLayer` trait implemented by store wrappers.
//! - `timeseries`: interval parsing, time truncation, bucketing, and grid pagination.
//!
//! Nothing in this crate performs I/O; the store trait is async so that
//! implementations can, and the bucket algorithms are pure functions over
//! already-fetched records.
#![warn(missing_docs)]

/// Store wrapper trait used by the middleware builder.
pub mod layer;
/// Filter, sort, and find-query vocabulary.
pub mod query;
/// The `BackingStore` trait.
pub mod store;
/// Interval parsing and time-bucket algorithms.
pub mod timeseries;
pub mod types;

pub use layer::StoreLayer;
pub use query::{Condition, Filter, FindQuery, Sort, SortDirection};
pub use store::BackingStore;
pub use timeseries::bucket::{
    GridWalk, buffer_limit, build_bucket_map, paginate, resample_page, truncate_secs,
    validate_page, walk_grid,
};
pub use timeseries::interval::Interval;
pub use types::*;
