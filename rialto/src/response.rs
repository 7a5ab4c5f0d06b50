//! Response envelopes returned by the query service.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use rialto_core::{Bucket, Document, PageInfo};

/// `{data: [...]}` for whole or filtered collection snapshots.
///
/// The document list is shared with the cache, so cloning is cheap.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Every document in the snapshot, in store order.
    pub data: Arc<Vec<Document>>,
}

/// `{data, page, limit}` for the orders route.
#[derive(Debug, Clone, Serialize)]
pub struct OrdersPage {
    /// Matches on this page.
    pub data: Vec<Document>,
    /// Page that was served after normalization.
    pub page: usize,
    /// Page size that was applied after normalization.
    pub limit: usize,
}

/// One Binance-style kline row:
/// `[openTime, open, high, low, close, volume, closeTime, quoteAssetVolume,
/// numberOfTrades, takerBuyBaseAssetVolume, takerBuyQuoteAssetVolume, "0"]`.
pub type Kline = [Value; 12];

pub(crate) const KLINE_FIELDS: [&str; 11] = [
    "openTime",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "closeTime",
    "quoteAssetVolume",
    "numberOfTrades",
    "takerBuyBaseAssetVolume",
    "takerBuyQuoteAssetVolume",
];

/// Render a kline document; absent fields become `null`.
pub(crate) fn kline_row(doc: &Document) -> Kline {
    let mut row: Kline = std::array::from_fn(|_| Value::Null);
    for (slot, field) in row.iter_mut().zip(KLINE_FIELDS) {
        if let Some(v) = doc.get(field) {
            slot.clone_from(v);
        }
    }
    row[11] = Value::from("0");
    row
}

/// `{data: {...}}` for a single stock code lookup.
#[derive(Debug, Clone, Serialize)]
pub struct Lookup {
    /// The matching stock code document.
    pub data: Document,
}

/// `{data, pagination, count}` for the bucketed series route.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesPage {
    /// Buckets on this page, ascending by bucket start.
    pub data: Vec<Bucket>,
    /// Page metadata computed over the materialized grid.
    pub pagination: PageInfo,
    /// `data.len()`.
    pub count: usize,
}

impl SeriesPage {
    pub(crate) fn new(data: Vec<Bucket>, pagination: PageInfo) -> Self {
        let count = data.len();
        Self {
            data,
            pagination,
            count,
        }
    }
}
