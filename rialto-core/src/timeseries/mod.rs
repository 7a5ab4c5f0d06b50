//! Time-series utilities for the bucketed series route.
//!
//! Modules include:
//! - `interval`: parse and display bucket widths
//! - `bucket`: truncate timestamps, build the sparse grid, walk it, and paginate
/// Sparse bucket grid construction and pagination.
pub mod bucket;
/// Bucket width type.
pub mod interval;
