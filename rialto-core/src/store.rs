use async_trait::async_trait;

use crate::query::{Filter, FindQuery};
use crate::types::{Collection, Document, RialtoError};

/// A queryable document store: the only data source the service talks to.
///
/// Implementations must be safe to share across concurrent requests. Transient
/// failures are reported as [`RialtoError::Upstream`]; callers never retry on
/// their own.
#[async_trait]
pub trait BackingStore: Send + Sync {
    /// Stable store name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Return the documents matching `query`, honoring its sort, skip, and limit.
    async fn find(&self, query: FindQuery) -> Result<Vec<Document>, RialtoError>;

    /// Return the first document in `collection` matching `filter`.
    ///
    /// # Errors
    /// Returns [`RialtoError::NotFound`] when nothing matches.
    async fn find_one(
        &self,
        collection: &Collection,
        filter: &Filter,
    ) -> Result<Document, RialtoError> {
        let query = FindQuery::new(collection.clone())
            .filter(filter.clone())
            .limit(1);
        self.find(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RialtoError::not_found(format!("document in {collection}")))
    }
}
