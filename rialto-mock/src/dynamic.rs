use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use rialto_core::{BackingStore, Collection, Document, FindQuery, RialtoError};

use crate::apply_query;

/// Instruction for how calls against one collection should behave.
#[derive(Clone)]
pub enum StoreBehavior {
    /// Evaluate each query over these documents.
    Return(Vec<Document>),
    /// Sleep, then evaluate each query over these documents.
    Delay(Duration, Vec<Document>),
    /// Fail immediately with the provided error.
    Fail(RialtoError),
    /// Hang indefinitely (simulate a stalled backend).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<Collection, StoreBehavior>,
    queries: Vec<FindQuery>,
}

/// Controller handle used by tests to drive a [`DynamicStore`] from the outside.
pub struct DynamicStoreController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicStoreController {
    /// Set the behavior for calls against `collection`.
    pub async fn set_behavior(&self, collection: Collection, behavior: StoreBehavior) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(collection, behavior);
    }

    /// Every query received so far, oldest first.
    pub async fn queries(&self) -> Vec<FindQuery> {
        self.state.lock().await.queries.clone()
    }

    /// Number of calls received against `collection`.
    pub async fn call_count(&self, collection: &Collection) -> usize {
        let guard = self.state.lock().await;
        guard
            .queries
            .iter()
            .filter(|q| &q.collection == collection)
            .count()
    }

    /// Clear all configured behaviors and the query log.
    pub async fn clear_all(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.queries.clear();
    }
}

/// A store that defers all behavior to an external controller.
///
/// Calls against a collection with no configured behavior fail with
/// `RialtoError::Other`.
pub struct DynamicStore {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicStore {
    /// Create a new dynamic store and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn BackingStore>, DynamicStoreController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicStoreController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn BackingStore>, controller)
    }
}

#[async_trait]
impl BackingStore for DynamicStore {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn find(&self, query: FindQuery) -> Result<Vec<Document>, RialtoError> {
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.queries.push(query.clone());
            guard.rules.get(&query.collection).cloned()
        };

        match behavior {
            Some(StoreBehavior::Return(docs)) => Ok(apply_query(&docs, &query)),
            Some(StoreBehavior::Delay(d, docs)) => {
                tokio::time::sleep(d).await;
                Ok(apply_query(&docs, &query))
            }
            Some(StoreBehavior::Fail(e)) => Err(e),
            Some(StoreBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(RialtoError::Other(format!(
                "{}: no behavior for {}",
                self.name, query.collection
            ))),
        }
    }
}
