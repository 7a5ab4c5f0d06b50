//! Document, record, and bucket types, plus re-exports from `rialto-types`.
// Consolidated re-exports so downstream crates can depend on `rialto-core` only

pub use rialto_types::{
    CacheConfig, Collection, PaginationConfig, ResampleConfig, RialtoConfig, RialtoError, Route,
    SourcesConfig,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An opaque stored document: field name to JSON value.
pub type Document = serde_json::Map<String, serde_json::Value>;

// Integer times above this are epoch milliseconds (year 5138 in seconds).
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// A timestamped event extracted from a stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Event time.
    pub ts: DateTime<Utc>,
    /// The full source document.
    pub fields: Document,
}

impl RawRecord {
    /// Build a record directly from a timestamp and payload.
    #[must_use]
    pub const fn new(ts: DateTime<Utc>, fields: Document) -> Self {
        Self { ts, fields }
    }

    /// Extract a record from `doc`, reading its time from `time_field`.
    ///
    /// Accepts integer epoch seconds, integer epoch milliseconds, or an RFC 3339
    /// string. Returns `None` when the field is missing or not a usable time.
    #[must_use]
    pub fn from_document(doc: Document, time_field: &str) -> Option<Self> {
        let ts = parse_time(doc.get(time_field)?)?;
        Some(Self { ts, fields: doc })
    }
}

fn parse_time(v: &serde_json::Value) -> Option<DateTime<Utc>> {
    match v {
        serde_json::Value::Number(n) => {
            let raw = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))?;
            if raw.unsigned_abs() >= MILLIS_THRESHOLD.unsigned_abs() {
                DateTime::from_timestamp_millis(raw)
            } else {
                DateTime::from_timestamp(raw, 0)
            }
        }
        serde_json::Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    }
}

/// One slot of a resampled grid: the representative record for a time window.
///
/// Serializes flat: `{"symbol", "bucket", "time", ...record fields}` with
/// `bucket` and `time` in epoch seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    /// Symbol the series belongs to.
    pub symbol: String,
    /// Start of the bucket window.
    pub start: DateTime<Utc>,
    /// Most recent record that fell in the window.
    pub record: RawRecord,
}

impl Serialize for Bucket {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let reserved = ["symbol", "bucket", "time"];
        let extra = self
            .record
            .fields
            .iter()
            .filter(|(k, _)| !reserved.contains(&k.as_str()));
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("symbol", &self.symbol)?;
        map.serialize_entry("bucket", &self.start.timestamp())?;
        map.serialize_entry("time", &self.record.ts.timestamp())?;
        for (k, v) in extra {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Pagination metadata for a page of a materialized bucket grid.
///
/// Totals describe only the buckets discovered inside the bounded fetch
/// window; `window_limited` reports when older buckets may exist beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// 1-based page number that was served.
    pub current_page: usize,
    /// Buckets materialized in the window.
    pub total_results: usize,
    /// `ceil(total_results / limit)`.
    pub total_pages: usize,
    /// `current_page < total_pages`.
    pub has_next: bool,
    /// `current_page > 1`.
    pub has_prev: bool,
    /// True when the window may have cut off older history.
    pub window_limited: bool,
}
