//! rialto-middleware
//!
//! The coalescing result cache plus wrappers applied around backing stores.

mod builder;
mod cache;
mod timeout;

pub use crate::builder::StoreBuilder;
pub use crate::cache::CoalescingCache;
pub use crate::timeout::{TimeoutLayer, TimeoutStore};
