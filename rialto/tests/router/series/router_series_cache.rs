use std::time::Duration;

use futures::future::join_all;
use rialto::{Rialto, SeriesQuery};
use rialto_mock::{DynamicStore, StoreBehavior};
use serde_json::json;

use crate::helpers::{SESSION_START, doc, matches};

fn trades() -> Vec<rialto::Document> {
    (0..5)
        .map(|i| doc(json!({"Symbol": "VNM", "Timestamp": SESSION_START + i * 60, "Price": i})))
        .collect()
}

fn vnm(limit: &str) -> SeriesQuery {
    SeriesQuery {
        symbol: Some("VNM".into()),
        limit: Some(limit.into()),
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn series_pages_are_cached_when_ttl_is_set() {
    let (store, ctrl) = DynamicStore::new_with_controller("dyn");
    ctrl.set_behavior(matches(), StoreBehavior::Return(trades())).await;
    let rialto = Rialto::builder()
        .with_store(store)
        .series_ttl(Duration::from_secs(2))
        .build()
        .unwrap();

    let a = rialto.series(&vnm("3")).await.unwrap();
    let b = rialto.series(&vnm("3")).await.unwrap();
    assert_eq!(a.pagination, b.pagination);
    assert_eq!(ctrl.call_count(&matches()).await, 1);

    // Different page shape, different key.
    rialto.series(&vnm("2")).await.unwrap();
    assert_eq!(ctrl.call_count(&matches()).await, 2);

    tokio::time::advance(Duration::from_secs(3)).await;
    rialto.series(&vnm("3")).await.unwrap();
    assert_eq!(ctrl.call_count(&matches()).await, 3);
}

#[tokio::test]
async fn series_is_uncached_by_default() {
    let (store, ctrl) = DynamicStore::new_with_controller("dyn");
    ctrl.set_behavior(matches(), StoreBehavior::Return(trades())).await;
    let rialto = Rialto::builder().with_store(store).build().unwrap();

    rialto.series(&vnm("3")).await.unwrap();
    rialto.series(&vnm("3")).await.unwrap();
    assert_eq!(ctrl.call_count(&matches()).await, 2);
}

#[tokio::test(start_paused = true)]
async fn concurrent_identical_pages_share_one_fetch() {
    let (store, ctrl) = DynamicStore::new_with_controller("dyn");
    ctrl.set_behavior(
        matches(),
        StoreBehavior::Delay(Duration::from_millis(40), trades()),
    )
    .await;
    let rialto = Rialto::builder().with_store(store).build().unwrap();

    let req = vnm("3");
    let pages = join_all((0..8).map(|_| rialto.series(&req))).await;
    for p in pages {
        assert_eq!(p.unwrap().count, 3);
    }
    assert_eq!(ctrl.call_count(&matches()).await, 1);
}

#[tokio::test]
async fn series_fetch_is_bounded_and_newest_first() {
    let (store, ctrl) = DynamicStore::new_with_controller("dyn");
    ctrl.set_behavior(matches(), StoreBehavior::Return(trades())).await;
    let rialto = Rialto::builder().with_store(store).build().unwrap();

    rialto
        .series(&SeriesQuery {
            page: Some("2".into()),
            ..vnm("4")
        })
        .await
        .unwrap();
    let queries = ctrl.queries().await;
    let q = queries.last().unwrap();
    assert_eq!(q.limit, Some(30 * 8));
    let sort = q.sort.as_ref().unwrap();
    assert_eq!(sort.field, "Timestamp");
}
