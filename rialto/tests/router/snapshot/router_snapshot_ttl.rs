use std::time::Duration;

use rialto::{Collection, Rialto, Route};
use rialto_mock::{DynamicStore, StoreBehavior};
use serde_json::json;

use crate::helpers::doc;

fn exchange() -> Collection {
    Collection::new("moneyflow", "exchange")
}

#[tokio::test(start_paused = true)]
async fn snapshot_expires_after_ttl() {
    let (store, ctrl) = DynamicStore::new_with_controller("dyn");
    ctrl.set_behavior(
        exchange(),
        StoreBehavior::Return(vec![doc(json!({"MarketId": "HOSE"}))]),
    )
    .await;
    let rialto = Rialto::builder()
        .with_store(store)
        .cache_ttl(Route::Exchange, Duration::from_secs(1))
        .build()
        .unwrap();

    rialto.exchanges(None).await.unwrap();
    tokio::time::advance(Duration::from_millis(500)).await;
    rialto.exchanges(None).await.unwrap();
    assert_eq!(ctrl.call_count(&exchange()).await, 1);

    tokio::time::advance(Duration::from_millis(600)).await;
    rialto.exchanges(None).await.unwrap();
    assert_eq!(ctrl.call_count(&exchange()).await, 2);
}

#[tokio::test(start_paused = true)]
async fn reads_do_not_extend_ttl() {
    let (store, ctrl) = DynamicStore::new_with_controller("dyn");
    ctrl.set_behavior(exchange(), StoreBehavior::Return(vec![])).await;
    let rialto = Rialto::builder()
        .with_store(store)
        .cache_ttl(Route::Exchange, Duration::from_secs(1))
        .build()
        .unwrap();

    rialto.exchanges(None).await.unwrap();
    for _ in 0..3 {
        tokio::time::advance(Duration::from_millis(300)).await;
        rialto.exchanges(None).await.unwrap();
    }
    // 900ms of reads, then past the original deadline.
    tokio::time::advance(Duration::from_millis(200)).await;
    rialto.exchanges(None).await.unwrap();
    assert_eq!(ctrl.call_count(&exchange()).await, 2);
}

#[tokio::test]
async fn zero_ttl_fetches_every_time() {
    let (store, ctrl) = DynamicStore::new_with_controller("dyn");
    ctrl.set_behavior(exchange(), StoreBehavior::Return(vec![])).await;
    let rialto = Rialto::builder()
        .with_store(store)
        .cache_ttl(Route::Exchange, Duration::ZERO)
        .build()
        .unwrap();

    rialto.exchanges(None).await.unwrap();
    rialto.exchanges(None).await.unwrap();
    assert_eq!(ctrl.call_count(&exchange()).await, 2);
}
