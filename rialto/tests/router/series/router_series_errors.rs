use std::sync::Arc;
use std::time::Duration;

use rialto::{Rialto, RialtoError, Route, SeriesQuery};
use rialto_mock::MemoryStore;

use crate::helpers::fixture_service;

fn q(symbol: Option<&str>, interval: Option<&str>) -> SeriesQuery {
    SeriesQuery {
        symbol: symbol.map(Into::into),
        interval: interval.map(Into::into),
        ..Default::default()
    }
}

#[tokio::test]
async fn missing_symbol_is_invalid() {
    let rialto = fixture_service();
    for symbol in [None, Some(""), Some("   ")] {
        let err = rialto.series(&q(symbol, None)).await.unwrap_err();
        assert!(matches!(err, RialtoError::InvalidArg(_)));
    }
}

#[tokio::test]
async fn bad_interval_is_invalid() {
    let rialto = fixture_service();
    for interval in ["7x", "0m", "m"] {
        let err = rialto
            .series(&q(Some("VNM"), Some(interval)))
            .await
            .unwrap_err();
        assert!(matches!(err, RialtoError::InvalidArg(_)), "{interval}");
    }
}

#[tokio::test]
async fn symbol_without_trades_is_not_found_and_never_cached() {
    let store = Arc::new(MemoryStore::with_fixtures());
    let rialto = Rialto::builder()
        .with_store(store.clone())
        .series_ttl(Duration::from_secs(60))
        .build()
        .unwrap();
    for _ in 0..2 {
        let err = rialto.series(&q(Some("ZZZ"), None)).await.unwrap_err();
        assert!(matches!(err, RialtoError::NotFound { .. }));
    }
    assert_eq!(store.calls(), 2);
    assert_eq!(rialto.config().cache.ttl_for(Route::Series), Some(Duration::from_secs(60)));
}

#[tokio::test]
async fn store_failure_propagates() {
    let rialto = fixture_service();
    let err = rialto.series(&q(Some("FAIL"), None)).await.unwrap_err();
    assert!(matches!(err, RialtoError::Upstream { .. }));
}

#[tokio::test(start_paused = true)]
async fn slow_store_times_out() {
    let rialto = Rialto::builder()
        .with_store(Arc::new(MemoryStore::with_fixtures()))
        .store_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let err = rialto.series(&q(Some("TIMEOUT"), None)).await.unwrap_err();
    assert!(
        matches!(&err, RialtoError::UpstreamTimeout { store, operation } if store == "rialto-mock" && operation == "find"),
        "{err:?}"
    );
    assert!(err.is_retryable());
}
