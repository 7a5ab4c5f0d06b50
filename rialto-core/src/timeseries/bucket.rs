//! Sparse time-bucket grid construction and pagination.
//!
//! The pipeline is: records (newest first) → [`build_bucket_map`] (first record
//! seen per window wins) → [`walk_grid`] (bounded backward walk from the newest
//! window) → [`paginate`] (slice + metadata). [`resample_page`] runs all three.

use std::collections::HashMap;
use std::ops::Range;

use chrono::DateTime;

use crate::timeseries::interval::Interval;
use crate::types::{Bucket, PageInfo, RawRecord, ResampleConfig, RialtoError};

/// Floor `secs` to the start of its `step`-second window.
#[must_use]
pub const fn truncate_secs(secs: i64, step: i64) -> i64 {
    secs - secs.rem_euclid(step)
}

/// Map each window start (epoch seconds) to one representative record.
///
/// `records_desc` must be newest first; the first record seen for a window is
/// kept and later (older) ones are discarded, so each bucket holds the most
/// recent record in its window.
#[must_use]
pub fn build_bucket_map<I>(records_desc: I, interval: Interval) -> HashMap<i64, RawRecord>
where
    I: IntoIterator<Item = RawRecord>,
{
    let step = interval.as_secs();
    let mut map: HashMap<i64, RawRecord> = HashMap::new();
    for rec in records_desc {
        let key = truncate_secs(rec.ts.timestamp(), step);
        map.entry(key).or_insert(rec);
    }
    map
}

/// Outcome of a bounded walk over the bucket map.
#[derive(Debug, Clone, PartialEq)]
pub struct GridWalk {
    /// Collected `(window_start, record)` pairs in ascending time order.
    pub buckets: Vec<(i64, RawRecord)>,
    /// Buckets in the map the walk never reached.
    pub unvisited: usize,
    /// Grid steps actually taken (at most `horizon + 1`).
    pub steps: usize,
}

/// Walk backward from `end` (a window start) one `interval` at a time.
///
/// Stops when `want` buckets are collected, when the cursor would step more
/// than `horizon` intervals back from `end`, or when the map is exhausted.
/// Empty windows are skipped, never filled.
#[must_use]
pub fn walk_grid(
    mut map: HashMap<i64, RawRecord>,
    end: i64,
    interval: Interval,
    want: usize,
    horizon: usize,
) -> GridWalk {
    let step = interval.as_secs();
    let mut acc: Vec<(i64, RawRecord)> = Vec::new();
    let mut steps = 0usize;
    for k in 0..=horizon {
        if acc.len() >= want || map.is_empty() {
            break;
        }
        let Some(cursor) = i64::try_from(k)
            .ok()
            .and_then(|k| k.checked_mul(step))
            .and_then(|back| end.checked_sub(back))
        else {
            break;
        };
        steps += 1;
        if let Some(rec) = map.remove(&cursor) {
            acc.push((cursor, rec));
        }
    }
    acc.reverse();
    GridWalk {
        buckets: acc,
        unvisited: map.len(),
        steps,
    }
}

/// Slice bounds and metadata for page `page` of a grid holding `total` buckets.
///
/// `window_limited` is left `false`; the caller knows whether the window was cut.
///
/// # Errors
/// Returns `InvalidArg` when `page` or `limit` is zero.
pub fn paginate(
    total: usize,
    page: usize,
    limit: usize,
) -> Result<(Range<usize>, PageInfo), RialtoError> {
    validate_page(page, limit)?;
    let offset = (page - 1).saturating_mul(limit);
    let start = offset.min(total);
    let end = offset.saturating_add(limit).min(total);
    let total_pages = total.div_ceil(limit);
    let info = PageInfo {
        current_page: page,
        total_results: total,
        total_pages,
        has_next: page < total_pages,
        has_prev: page > 1,
        window_limited: false,
    };
    Ok((start..end, info))
}

/// Reject a zero `page` or `limit`.
///
/// # Errors
/// Returns `InvalidArg` naming the offending parameter.
pub fn validate_page(page: usize, limit: usize) -> Result<(), RialtoError> {
    if page == 0 {
        return Err(RialtoError::invalid_arg("page must be >= 1"));
    }
    if limit == 0 {
        return Err(RialtoError::invalid_arg("limit must be >= 1"));
    }
    Ok(())
}

/// Raw records to fetch for `page`/`limit`: `multiplier * (offset + limit)`.
#[must_use]
pub fn buffer_limit(cfg: &ResampleConfig, page: usize, limit: usize) -> usize {
    depth(page, limit).saturating_mul(cfg.buffer_multiplier.max(1))
}

// offset + limit
const fn depth(page: usize, limit: usize) -> usize {
    page.saturating_sub(1)
        .saturating_mul(limit)
        .saturating_add(limit)
}

/// Resample a newest-first record window into one page of a sparse bucket grid.
///
/// `window_full` tells whether the fetch that produced `records_desc` hit its
/// limit (so older history may exist beyond it); it feeds
/// [`PageInfo::window_limited`].
///
/// # Errors
/// - `InvalidArg` when `page` or `limit` is zero.
/// - `NotFound` when `records_desc` is empty.
pub fn resample_page(
    symbol: &str,
    records_desc: Vec<RawRecord>,
    interval: Interval,
    page: usize,
    limit: usize,
    cfg: &ResampleConfig,
    window_full: bool,
) -> Result<(Vec<Bucket>, PageInfo), RialtoError> {
    validate_page(page, limit)?;
    let Some(newest) = records_desc.iter().map(|r| r.ts).max() else {
        return Err(RialtoError::not_found(format!("records for {symbol}")));
    };
    let end = truncate_secs(newest.timestamp(), interval.as_secs());

    let d = depth(page, limit);
    let want = d.saturating_mul(cfg.slack_factor.max(1));
    let horizon = d.saturating_mul(cfg.horizon_factor.max(1));

    let map = build_bucket_map(records_desc, interval);
    let walk = walk_grid(map, end, interval, want, horizon);

    let (range, mut info) = paginate(walk.buckets.len(), page, limit)?;
    info.window_limited = window_full || walk.unvisited > 0;

    let items = walk
        .buckets
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .filter_map(|(start, record)| {
            Some(Bucket {
                symbol: symbol.to_string(),
                start: DateTime::from_timestamp(start, 0)?,
                record,
            })
        })
        .collect();
    Ok((items, info))
}
