//! Layer trait for wrapping `BackingStore` implementations.

use std::sync::Arc;

use crate::store::BackingStore;

/// Trait implemented by store layers.
///
/// A layer consumes an inner `BackingStore` and returns a wrapped store that
/// augments or restricts behavior (e.g., timeouts).
pub trait StoreLayer: Send + Sync {
    /// Apply this layer to wrap an inner store and return the wrapped store.
    fn apply(self: Box<Self>, inner: Arc<dyn BackingStore>) -> Arc<dyn BackingStore>;

    /// Human-readable layer name for introspection/logging.
    fn name(&self) -> &'static str;

    /// Opaque configuration snapshot for serialization/inspection.
    fn config_json(&self) -> serde_json::Value;
}
