use std::sync::Arc;

use rialto_core::{Interval, RialtoError, Route};

use crate::Rialto;
use crate::core::SeriesKey;
use crate::params::{SeriesQuery, limit_within, non_empty, page_or_default, require_symbol};
use crate::response::SeriesPage;

impl Rialto {
    /// One page of a symbol's trades resampled onto a regular time grid.
    ///
    /// Cached per `(symbol, interval, page, limit)` when a series TTL is set;
    /// concurrent identical requests share one resample either way.
    ///
    /// # Errors
    /// `InvalidArg` for a missing symbol or bad interval, `NotFound` when the
    /// symbol has no trades, otherwise store failures.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "rialto::series", skip(self))
    )]
    pub async fn series(&self, req: &SeriesQuery) -> Result<SeriesPage, RialtoError> {
        let symbol = require_symbol(req.symbol.as_deref())?;
        let interval = match non_empty(req.interval.as_deref()) {
            Some(raw) => raw.parse::<Interval>()?,
            None => self.default_interval,
        };
        let key = SeriesKey {
            symbol: symbol.to_string(),
            interval,
            page: page_or_default(req.page.as_deref()),
            limit: limit_within(req.limit.as_deref(), self.cfg.series),
        };
        self.series_page(key).await
    }

    async fn series_page(&self, key: SeriesKey) -> Result<SeriesPage, RialtoError> {
        let ttl = self.ttl(Route::Series);
        let resampler = Arc::clone(&self.resampler);
        let fetch_key = key.clone();
        self.series_cache
            .get_or_fetch(key, ttl, move || async move {
                let (data, pagination) = resampler
                    .page(
                        &fetch_key.symbol,
                        fetch_key.interval,
                        fetch_key.page,
                        fetch_key.limit,
                    )
                    .await?;
                Ok(SeriesPage::new(data, pagination))
            })
            .await
    }
}
