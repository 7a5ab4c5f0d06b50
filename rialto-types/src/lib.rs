//! Rialto-specific error taxonomy, route labels, and configuration primitives.
#![warn(missing_docs)]

mod collection;
mod config;
mod error;
mod route;

pub use collection::Collection;
pub use config::{CacheConfig, PaginationConfig, ResampleConfig, RialtoConfig, SourcesConfig};
pub use error::RialtoError;
pub use route::Route;
