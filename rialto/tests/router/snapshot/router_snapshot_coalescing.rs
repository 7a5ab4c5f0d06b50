use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use rialto::{Collection, Rialto, RialtoError};
use rialto_mock::{DynamicStore, StoreBehavior};
use serde_json::json;

use crate::helpers::{doc, service};

fn tc() -> Collection {
    Collection::new("moneyflow", "tc")
}

#[tokio::test(start_paused = true)]
async fn concurrent_reads_share_one_fetch() {
    let (store, ctrl) = DynamicStore::new_with_controller("dyn");
    ctrl.set_behavior(
        tc(),
        StoreBehavior::Delay(
            Duration::from_millis(50),
            vec![doc(json!({"Symbol": "VNM"}))],
        ),
    )
    .await;
    let rialto = service(store);

    let results = join_all((0..16).map(|_| rialto.tc())).await;
    let first = results[0].as_ref().unwrap();
    for r in &results {
        let snap = r.as_ref().unwrap();
        assert!(Arc::ptr_eq(&snap.data, &first.data));
    }
    assert_eq!(ctrl.call_count(&tc()).await, 1);
}

#[tokio::test(start_paused = true)]
async fn concurrent_waiters_share_a_failure() {
    let (store, ctrl) = DynamicStore::new_with_controller("dyn");
    ctrl.set_behavior(tc(), StoreBehavior::Hang).await;
    let rialto = Rialto::builder()
        .with_store(store)
        .store_timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let results = join_all((0..4).map(|_| rialto.tc())).await;
    for r in results {
        assert!(matches!(r, Err(RialtoError::UpstreamTimeout { .. })));
    }
    assert_eq!(ctrl.call_count(&tc()).await, 1);
}

#[tokio::test]
async fn failures_are_not_cached() {
    let (store, ctrl) = DynamicStore::new_with_controller("dyn");
    ctrl.set_behavior(tc(), StoreBehavior::Fail(RialtoError::upstream("dyn", "down")))
        .await;
    let rialto = service(store);

    let err = rialto.tc().await.unwrap_err();
    assert!(matches!(err, RialtoError::Upstream { .. }));

    ctrl.set_behavior(tc(), StoreBehavior::Return(vec![doc(json!({"Symbol": "FPT"}))]))
        .await;
    let ok = rialto.tc().await.unwrap();
    assert_eq!(ok.data.len(), 1);
    assert_eq!(ctrl.call_count(&tc()).await, 2);
}
