use std::sync::Arc;
use std::time::Duration;

use rialto::{PaginationConfig, ResampleConfig, Rialto, RialtoError, Route};
use rialto_mock::MemoryStore;

#[test]
fn build_requires_a_store() {
    let err = Rialto::builder().build().err().expect("no store");
    assert!(matches!(err, RialtoError::InvalidArg(_)));
}

#[test]
fn build_rejects_default_limit_above_max() {
    let err = Rialto::builder()
        .with_store(Arc::new(MemoryStore::new()))
        .orders_pagination(PaginationConfig::new(500, 200))
        .build()
        .err()
        .expect("bad bounds");
    assert!(matches!(err, RialtoError::InvalidArg(msg) if msg.contains("orders")));
}

#[test]
fn build_rejects_zero_default_limit() {
    let err = Rialto::builder()
        .with_store(Arc::new(MemoryStore::new()))
        .series_pagination(PaginationConfig::new(0, 10))
        .build()
        .err()
        .expect("bad bounds");
    assert!(matches!(err, RialtoError::InvalidArg(_)));
}

#[test]
fn build_rejects_unparsable_default_interval() {
    let resample = ResampleConfig {
        default_interval: "fortnight".into(),
        ..ResampleConfig::default()
    };
    let err = Rialto::builder()
        .with_store(Arc::new(MemoryStore::new()))
        .resample(resample)
        .build()
        .err()
        .expect("bad interval");
    assert!(matches!(err, RialtoError::InvalidArg(_)));
}

#[test]
fn builder_overrides_land_in_config() {
    let rialto = Rialto::builder()
        .with_store(Arc::new(MemoryStore::new()))
        .store_timeout(Duration::from_millis(250))
        .series_ttl(Duration::from_secs(2))
        .cache_ttl(Route::Tc, Duration::from_secs(5))
        .build()
        .expect("valid config");
    let cfg = rialto.config();
    assert_eq!(cfg.store_timeout, Duration::from_millis(250));
    assert_eq!(cfg.cache.ttl_for(Route::Series), Some(Duration::from_secs(2)));
    assert_eq!(cfg.cache.ttl_for(Route::Tc), Some(Duration::from_secs(5)));
    assert_eq!(cfg.cache.ttl_for(Route::Info), Some(Duration::from_secs(10_000)));
}

#[test]
fn timeout_layer_reports_the_raw_store_name() {
    let rialto = Rialto::builder()
        .with_store(Arc::new(MemoryStore::new()))
        .build()
        .expect("valid config");
    assert_eq!(rialto.store_name(), "rialto-mock");
}
