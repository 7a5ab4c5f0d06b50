use std::sync::Arc;

use rialto_core::{Collection, Filter, FindQuery, RialtoError, Route};

use crate::Rialto;
use crate::params::non_empty;
use crate::response::Snapshot;

impl Rialto {
    /// Every document of the `tc` collection.
    ///
    /// # Errors
    /// Store failures, shared by every caller coalesced onto the same fetch.
    pub async fn tc(&self) -> Result<Snapshot, RialtoError> {
        self.snapshot(Route::Tc).await
    }

    /// Every document of the stock info collection.
    ///
    /// # Errors
    /// Store failures, shared by every caller coalesced onto the same fetch.
    pub async fn info(&self) -> Result<Snapshot, RialtoError> {
        self.snapshot(Route::Info).await
    }

    /// Three-letter stock codes, optionally restricted to one market.
    ///
    /// # Errors
    /// Store failures, shared by every caller coalesced onto the same fetch.
    pub async fn codes(&self, market_id: Option<&str>) -> Result<Snapshot, RialtoError> {
        self.filtered_snapshot(Route::Code, market_id).await
    }

    /// Exchange listing, optionally restricted to one market.
    ///
    /// # Errors
    /// Store failures, shared by every caller coalesced onto the same fetch.
    pub async fn exchanges(&self, market_id: Option<&str>) -> Result<Snapshot, RialtoError> {
        self.filtered_snapshot(Route::Exchange, market_id).await
    }

    /// Whole-collection snapshot for `Route::Tc` or `Route::Info`, cached under
    /// `"{database}_{collection}"`.
    ///
    /// # Errors
    /// `InvalidArg` for any other route; otherwise store failures.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "rialto::snapshot", skip(self, route), fields(route = %route))
    )]
    pub async fn snapshot(&self, route: Route) -> Result<Snapshot, RialtoError> {
        let collection = match route {
            Route::Tc => &self.cfg.sources.tc,
            Route::Info => &self.cfg.sources.info,
            other => {
                return Err(RialtoError::invalid_arg(format!(
                    "{other} is not a snapshot route"
                )));
            }
        };
        self.cached_find(route, collection.cache_key(), collection, Filter::new())
            .await
    }

    /// Filtered snapshot for `Route::Code` or `Route::Exchange`, cached under
    /// `"{database}_{collection}_filtered[_{marketId}]"`.
    ///
    /// # Errors
    /// `InvalidArg` for any other route; otherwise store failures.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "rialto::filtered_snapshot", skip(self, route), fields(route = %route))
    )]
    pub async fn filtered_snapshot(
        &self,
        route: Route,
        market_id: Option<&str>,
    ) -> Result<Snapshot, RialtoError> {
        let (collection, base) = match route {
            Route::Code => (
                &self.cfg.sources.stock_code,
                Filter::new().str_len("Symbol", 3),
            ),
            Route::Exchange => (&self.cfg.sources.exchange, Filter::new()),
            other => {
                return Err(RialtoError::invalid_arg(format!(
                    "{other} is not a filtered snapshot route"
                )));
            }
        };
        let mut key = format!("{}_filtered", collection.cache_key());
        let mut filter = base;
        if let Some(m) = non_empty(market_id) {
            key.push('_');
            key.push_str(m);
            filter = filter.eq("MarketId", m);
        }
        self.cached_find(route, key, collection, filter).await
    }

    async fn cached_find(
        &self,
        route: Route,
        key: String,
        collection: &Collection,
        filter: Filter,
    ) -> Result<Snapshot, RialtoError> {
        let store = Arc::clone(&self.store);
        let query = FindQuery::new(collection.clone()).filter(filter);
        let data = self
            .snapshots
            .get_or_fetch(key, self.ttl(route), move || async move {
                store.find(query).await.map(Arc::new)
            })
            .await?;
        Ok(Snapshot { data })
    }
}
