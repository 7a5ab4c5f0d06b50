use rialto_core::{Filter, FindQuery, RialtoError, Sort};

use crate::Rialto;
use crate::params::{
    OrdersQuery, limit_within, non_empty, page_or_default, require_symbol, trading_date,
};
use crate::response::OrdersPage;

impl Rialto {
    /// Page through raw order matches for a symbol.
    ///
    /// Without a date the newest matches (by `_id`) come first. With a date,
    /// matches for that trading day are returned in store order. Not cached.
    ///
    /// # Errors
    /// `InvalidArg` for a missing symbol or malformed date; store failures.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "rialto::orders", skip(self))
    )]
    pub async fn orders(&self, req: &OrdersQuery) -> Result<OrdersPage, RialtoError> {
        let symbol = require_symbol(req.symbol.as_deref())?;
        let limit = limit_within(req.limit.as_deref(), self.cfg.orders);
        let page = page_or_default(req.page.as_deref());
        let skip = (page - 1).saturating_mul(limit);

        let mut filter = Filter::new().eq("Symbol", symbol);
        let mut query = FindQuery::new(self.cfg.sources.matches.clone());
        match non_empty(req.date.as_deref()) {
            Some(date) => filter = filter.eq("TradingDate", trading_date(date)?),
            None => query = query.sort(Sort::desc("_id")),
        }
        let data = self
            .store
            .find(query.filter(filter).skip(skip).limit(limit))
            .await?;
        Ok(OrdersPage { data, page, limit })
    }
}
