//! Builder for composing a backing store with layered wrappers.
//!
//! Layers form an onion around the raw store. They are kept outermost-first
//! (the most recently added layer is outermost) and applied in reverse by
//! [`StoreBuilder::build`], so `layers[0]` ends up wrapping everything else.
//!
//! ```text
//! builder.layer(a).layer(b)
//!
//! Storage: [b, a]
//! Result:  b(a(raw))
//! ```

use std::sync::Arc;
use std::time::Duration;

use rialto_core::{BackingStore, StoreLayer};
use serde_json::json;

use crate::timeout::TimeoutLayer;

/// Composes a raw store with layers such as [`TimeoutLayer`].
pub struct StoreBuilder {
    raw: Arc<dyn BackingStore>,
    layers: Vec<Box<dyn StoreLayer>>,
}

impl StoreBuilder {
    /// Start from a raw, unwrapped store.
    #[must_use]
    pub fn new(raw: Arc<dyn BackingStore>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the per-call timeout.
    ///
    /// The timeout is placed outermost so it bounds every other layer too.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.without_timeout()
            .layer(Box::new(TimeoutLayer::new(timeout)))
    }

    /// Remove the timeout layer if present.
    #[must_use]
    pub fn without_timeout(mut self) -> Self {
        self.layers.retain(|l| l.name() != "TimeoutStore");
        self
    }

    /// Add an arbitrary layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn StoreLayer>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Describe the stack outermost-first, ending with the raw store.
    #[must_use]
    pub fn describe(&self) -> Vec<serde_json::Value> {
        self.layers
            .iter()
            .map(|l| json!({ "name": l.name(), "config": l.config_json() }))
            .chain(std::iter::once(
                json!({ "name": "RawStore", "config": { "name": self.raw.name() } }),
            ))
            .collect()
    }

    /// Apply the layers innermost-first and return the wrapped store.
    #[must_use]
    pub fn build(self) -> Arc<dyn BackingStore> {
        let mut acc = Arc::clone(&self.raw);
        for l in self.layers.into_iter().rev() {
            acc = l.apply(acc);
        }
        acc
    }
}
