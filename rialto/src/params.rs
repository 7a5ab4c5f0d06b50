//! Inbound request parameters and their normalization.
//!
//! Every field arrives as an optional raw string. Pagination inputs are never
//! rejected: unparsable or non-positive values fall back to defaults and
//! oversized limits are clamped. Only a missing symbol or a malformed date or
//! interval is an error.

use chrono::NaiveDate;
use serde::Deserialize;

use rialto_core::{PaginationConfig, RialtoError};

/// Parameters of the orders route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrdersQuery {
    /// Symbol to list matches for (required).
    pub symbol: Option<String>,
    /// Trading day, `YYYY-MM-DD` or `DD/MM/YYYY`.
    pub date: Option<String>,
    /// 1-based page number.
    pub page: Option<String>,
    /// Page size.
    pub limit: Option<String>,
}

/// Parameters of the candles route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandlesQuery {
    /// Pair symbol, e.g. `BTCUSDT` (required).
    pub symbol: Option<String>,
    /// Kline interval label, passed to the store verbatim (default `1m`).
    pub interval: Option<String>,
    /// Maximum rows.
    pub limit: Option<String>,
}

/// Parameters of the bucketed series route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeriesQuery {
    /// Symbol to resample (required).
    pub symbol: Option<String>,
    /// Bucket width, e.g. `1m`, `15m`, `1h`.
    pub interval: Option<String>,
    /// 1-based page number.
    pub page: Option<String>,
    /// Buckets per page.
    pub limit: Option<String>,
}

/// Optional market filter shared by the listing routes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketQuery {
    /// Exchange identifier matched against the `MarketId` field.
    pub market_id: Option<String>,
}

pub(crate) fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

pub(crate) fn require_symbol(raw: Option<&str>) -> Result<&str, RialtoError> {
    non_empty(raw).ok_or_else(|| RialtoError::invalid_arg("symbol is required"))
}

pub(crate) fn page_or_default(raw: Option<&str>) -> usize {
    non_empty(raw)
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&p| p > 0)
        .unwrap_or(1)
}

pub(crate) fn limit_within(raw: Option<&str>, bounds: PaginationConfig) -> usize {
    non_empty(raw)
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&l| l > 0)
        .unwrap_or(bounds.default_limit)
        .min(bounds.max_limit)
}

/// Normalize a trading date to the stored `DD/MM/YYYY` form.
pub(crate) fn trading_date(raw: &str) -> Result<String, RialtoError> {
    let raw = raw.trim();
    let parsed = if raw.contains('-') {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    } else {
        NaiveDate::parse_from_str(raw, "%d/%m/%Y")
    };
    parsed
        .map(|d| d.format("%d/%m/%Y").to_string())
        .map_err(|_| RialtoError::invalid_arg(format!("invalid date: {raw:?}")))
}

/// Extract the stock code from a raw lookup query string.
///
/// The code is the first `&`-separated segment without an `=`; failing that, a
/// `symbol=` or `code=` parameter.
pub(crate) fn lookup_code(raw_query: &str) -> Option<&str> {
    let segments = || raw_query.split('&').map(str::trim).filter(|s| !s.is_empty());
    segments().find(|s| !s.contains('=')).or_else(|| {
        segments().find_map(|s| {
            let (k, v) = s.split_once('=')?;
            (k.eq_ignore_ascii_case("symbol") || k.eq_ignore_ascii_case("code"))
                .then_some(v.trim())
                .filter(|v| !v.is_empty())
        })
    })
}
