use rialto_core::{Filter, FindQuery, RialtoError, Sort};

use crate::Rialto;
use crate::params::{CandlesQuery, limit_within, non_empty, require_symbol};
use crate::response::{Kline, kline_row};

impl Rialto {
    /// Kline rows for a pair and interval, oldest first, as Binance-style arrays.
    ///
    /// # Errors
    /// `InvalidArg` for a missing symbol; store failures.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "rialto::candles", skip(self))
    )]
    pub async fn candles(&self, req: &CandlesQuery) -> Result<Vec<Kline>, RialtoError> {
        let symbol = require_symbol(req.symbol.as_deref())?;
        let interval = non_empty(req.interval.as_deref()).unwrap_or("1m");
        let limit = limit_within(req.limit.as_deref(), self.cfg.candles);

        let query = FindQuery::new(self.cfg.sources.klines.clone())
            .filter(Filter::new().eq("symbol", symbol).eq("interval", interval))
            .sort(Sort::asc("openTime"))
            .limit(limit);
        let docs = self.store.find(query).await?;
        Ok(docs.iter().map(kline_row).collect())
    }
}
