//! Backing store doubles for tests and the demo server.
//!
//! [`MemoryStore`] evaluates filters, sorts, skip and limit over in-memory
//! collections and ships with deterministic fixtures. [`DynamicStore`] answers
//! from behaviors scripted through its controller.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use rialto_core::{BackingStore, Collection, Condition, Document, Filter, FindQuery, RialtoError};
use serde_json::Value;
use tokio::sync::RwLock;

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicStore, DynamicStoreController, StoreBehavior};

const NAME: &str = "rialto-mock";

/// In-memory document store keyed by collection.
///
/// Documents inserted without an `_id` get one from a store-wide counter, so
/// `_id` order is insertion order. Missing collections read as empty.
///
/// Symbol filters double as fault injection: `"FAIL"` yields an upstream error
/// and `"TIMEOUT"` stalls the call for 200 ms.
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
    next_id: AtomicU64,
    calls: AtomicUsize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            calls: AtomicUsize::new(0),
        }
    }

    /// A store seeded with the bundled fixture collections.
    #[must_use]
    pub fn with_fixtures() -> Self {
        fixtures::all()
            .into_iter()
            .fold(Self::new(), |store, (coll, docs)| store.with_documents(coll, docs))
    }

    /// Append `docs` to `collection`.
    #[must_use]
    pub fn with_documents(
        mut self,
        collection: Collection,
        docs: impl IntoIterator<Item = Document>,
    ) -> Self {
        let prepared: Vec<Document> = docs.into_iter().map(|d| self.assign_id(d)).collect();
        self.collections
            .get_mut()
            .entry(collection)
            .or_default()
            .extend(prepared);
        self
    }

    /// Build a store from a JSON object mapping `"database.collection"` to an
    /// array of documents.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a malformed collection key and `Data` when the
    /// seed is not an object of arrays of objects.
    pub fn from_json(seed: &Value) -> Result<Self, RialtoError> {
        let Value::Object(map) = seed else {
            return Err(RialtoError::Data("seed must be a JSON object".into()));
        };
        let mut store = Self::new();
        for (key, docs) in map {
            let collection: Collection = key.parse()?;
            let Value::Array(items) = docs else {
                return Err(RialtoError::Data(format!("seed `{key}` must be an array")));
            };
            let docs = items
                .iter()
                .map(|v| {
                    v.as_object().cloned().ok_or_else(|| {
                        RialtoError::Data(format!("seed `{key}` holds a non-object document"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            store = store.with_documents(collection, docs);
        }
        Ok(store)
    }

    /// Insert one document into `collection`.
    pub async fn insert(&self, collection: &Collection, doc: Document) {
        let doc = self.assign_id(doc);
        self.collections
            .write()
            .await
            .entry(collection.clone())
            .or_default()
            .push(doc);
    }

    /// Number of documents held in `collection`.
    pub async fn count(&self, collection: &Collection) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Store calls served so far (`find` and `find_one`).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn assign_id(&self, mut doc: Document) -> Document {
        if !doc.contains_key("_id") {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            doc.insert("_id".into(), Value::from(id));
        }
        doc
    }

    async fn maybe_fail_or_timeout(filter: &Filter, operation: &str) -> Result<(), RialtoError> {
        for c in filter.conditions() {
            let Condition::Eq(field, Value::String(symbol)) = c else {
                continue;
            };
            if !field.eq_ignore_ascii_case("symbol") {
                continue;
            }
            match symbol.as_str() {
                "FAIL" => {
                    return Err(RialtoError::upstream(
                        NAME,
                        format!("forced failure: {operation}"),
                    ));
                }
                "TIMEOUT" => tokio::time::sleep(std::time::Duration::from_millis(200)).await,
                _ => {}
            }
        }
        Ok(())
    }
}

/// Evaluate `query` over `docs`: filter, stable sort, skip, then limit.
#[must_use]
pub fn apply_query(docs: &[Document], query: &FindQuery) -> Vec<Document> {
    let mut out: Vec<Document> = docs
        .iter()
        .filter(|d| query.filter.matches(d))
        .cloned()
        .collect();
    if let Some(sort) = &query.sort {
        out.sort_by(|a, b| sort.compare(a, b));
    }
    out.into_iter()
        .skip(query.skip)
        .take(query.limit.unwrap_or(usize::MAX))
        .collect()
}

#[async_trait]
impl BackingStore for MemoryStore {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn find(&self, query: FindQuery) -> Result<Vec<Document>, RialtoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Self::maybe_fail_or_timeout(&query.filter, "find").await?;
        let guard = self.collections.read().await;
        Ok(guard
            .get(&query.collection)
            .map(|docs| apply_query(docs, &query))
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: &Collection,
        filter: &Filter,
    ) -> Result<Document, RialtoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Self::maybe_fail_or_timeout(filter, "find_one").await?;
        let guard = self.collections.read().await;
        guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned())
            .ok_or_else(|| RialtoError::not_found(format!("document in {collection}")))
    }
}
