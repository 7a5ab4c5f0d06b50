use std::sync::Arc;

use rialto_core::{
    BackingStore, Bucket, Collection, Filter, FindQuery, Interval, PageInfo, RawRecord,
    ResampleConfig, RialtoError, Sort, buffer_limit, resample_page, validate_page,
};

/// Serves pages of a sparse, regular time grid built from raw trade records.
///
/// Each call fetches one bounded, newest-first window of records for the
/// symbol and resamples it; nothing is shared between calls except the store.
pub struct BucketResampler {
    store: Arc<dyn BackingStore>,
    collection: Collection,
    symbol_field: String,
    time_field: String,
    cfg: ResampleConfig,
}

impl BucketResampler {
    /// Resample documents of `collection`, reading event time from `time_field`.
    pub fn new(
        store: Arc<dyn BackingStore>,
        collection: Collection,
        time_field: impl Into<String>,
    ) -> Self {
        Self {
            store,
            collection,
            symbol_field: "Symbol".to_string(),
            time_field: time_field.into(),
            cfg: ResampleConfig::default(),
        }
    }

    /// Override the field matched against the requested symbol.
    #[must_use]
    pub fn symbol_field(mut self, field: impl Into<String>) -> Self {
        self.symbol_field = field.into();
        self
    }

    /// Replace the fetch and walk tuning.
    #[must_use]
    pub fn with_config(mut self, cfg: ResampleConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Fetch and resample one page of `symbol` at `interval`.
    ///
    /// Totals in the returned [`PageInfo`] cover only the buckets found in the
    /// fetched window; `window_limited` flags when older history may exist.
    ///
    /// # Errors
    /// - `InvalidArg` for an empty symbol or a zero page or limit.
    /// - `NotFound` when the store holds no usable records for the symbol.
    /// - Store failures propagate unchanged.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rialto::resampler::page",
            skip(self, interval),
            fields(interval = %interval),
        )
    )]
    pub async fn page(
        &self,
        symbol: &str,
        interval: Interval,
        page: usize,
        limit: usize,
    ) -> Result<(Vec<Bucket>, PageInfo), RialtoError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(RialtoError::invalid_arg("symbol is required"));
        }
        validate_page(page, limit)?;

        let buffer = buffer_limit(&self.cfg, page, limit);
        let query = FindQuery::new(self.collection.clone())
            .filter(Filter::new().eq(self.symbol_field.as_str(), symbol))
            .sort(Sort::desc(self.time_field.as_str()))
            .limit(buffer);
        let docs = self.store.find(query).await?;
        let fetched = docs.len();
        let window_full = fetched >= buffer;

        let mut records: Vec<RawRecord> = docs
            .into_iter()
            .filter_map(|d| RawRecord::from_document(d, &self.time_field))
            .collect();
        #[cfg(feature = "tracing")]
        if records.len() < fetched {
            tracing::debug!(
                skipped = fetched - records.len(),
                field = %self.time_field,
                "skipped records without a usable time"
            );
        }
        // Stable: ties keep store order, so first-seen still means store-newest.
        records.sort_by(|a, b| b.ts.cmp(&a.ts));

        resample_page(symbol, records, interval, page, limit, &self.cfg, window_full)
    }
}
