use std::sync::Arc;

use rialto::{ResampleConfig, Rialto, SeriesQuery};
use rialto_mock::{DynamicStore, MemoryStore, StoreBehavior};
use serde_json::json;

use crate::helpers::{SESSION_START, doc, fixture_service, matches, service};

fn q(symbol: &str, interval: Option<&str>, page: Option<&str>, limit: Option<&str>) -> SeriesQuery {
    SeriesQuery {
        symbol: Some(symbol.into()),
        interval: interval.map(Into::into),
        page: page.map(Into::into),
        limit: limit.map(Into::into),
    }
}

fn offsets(page: &rialto::SeriesPage) -> Vec<(i64, i64)> {
    page.data
        .iter()
        .map(|b| {
            (
                b.start.timestamp() - SESSION_START,
                b.record.ts.timestamp() - SESSION_START,
            )
        })
        .collect()
}

#[tokio::test]
async fn minute_grid_pages_oldest_first() {
    let rialto = fixture_service();

    let p1 = rialto
        .series(&q("VNM", Some("1m"), Some("1"), Some("2")))
        .await
        .unwrap();
    // Latest trade in each minute represents it.
    assert_eq!(offsets(&p1), vec![(0, 20), (60, 110)]);
    assert_eq!(p1.count, 2);
    assert_eq!(p1.pagination.total_results, 4);
    assert_eq!(p1.pagination.total_pages, 2);
    assert!(p1.pagination.has_next);
    assert!(!p1.pagination.has_prev);
    assert!(!p1.pagination.window_limited);

    let p2 = rialto
        .series(&q("VNM", Some("1m"), Some("2"), Some("2")))
        .await
        .unwrap();
    assert_eq!(offsets(&p2), vec![(180, 190), (300, 330)]);
    assert!(!p2.pagination.has_next);
    assert!(p2.pagination.has_prev);
}

#[tokio::test]
async fn interval_defaults_to_one_minute() {
    let rialto = fixture_service();
    let page = rialto.series(&q("VNM", None, None, None)).await.unwrap();
    assert_eq!(
        offsets(&page),
        vec![(0, 20), (60, 110), (180, 190), (300, 330)]
    );
    assert_eq!(page.pagination.current_page, 1);
}

#[tokio::test]
async fn wider_interval_merges_trades() {
    let rialto = fixture_service();
    let page = rialto.series(&q("VNM", Some("5m"), None, None)).await.unwrap();
    assert_eq!(offsets(&page), vec![(0, 190), (300, 330)]);
    assert!(page.data.iter().all(|b| b.symbol == "VNM"));
}

#[tokio::test]
async fn body_is_flat_buckets_with_camel_case_pagination() {
    let rialto = fixture_service();
    let page = rialto
        .series(&q("FPT", Some("1m"), None, None))
        .await
        .unwrap();
    let body = serde_json::to_value(&page).unwrap();
    assert_eq!(body["count"], json!(2));
    assert_eq!(body["data"][0]["symbol"], json!("FPT"));
    assert_eq!(body["data"][0]["bucket"], json!(SESSION_START));
    assert_eq!(body["data"][0]["time"], json!(SESSION_START + 25));
    assert_eq!(body["data"][0]["Price"], json!(96.4));
    assert_eq!(body["data"][1]["bucket"], json!(SESSION_START + 120));
    assert_eq!(
        body["pagination"],
        json!({
            "currentPage": 1,
            "totalResults": 2,
            "totalPages": 1,
            "hasNext": false,
            "hasPrev": false,
            "windowLimited": false,
        })
    );
}

#[tokio::test]
async fn page_past_the_grid_is_empty_with_totals() {
    let rialto = fixture_service();
    let page = rialto
        .series(&q("VNM", Some("1m"), Some("5"), Some("2")))
        .await
        .unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.count, 0);
    assert_eq!(page.pagination.current_page, 5);
    assert!(!page.pagination.has_next);
}

#[tokio::test]
async fn full_fetch_window_is_flagged() {
    let rialto = Rialto::builder()
        .with_store(Arc::new(MemoryStore::with_fixtures()))
        .resample(ResampleConfig {
            buffer_multiplier: 1,
            ..ResampleConfig::default()
        })
        .build()
        .unwrap();
    let page = rialto
        .series(&q("VNM", Some("1m"), None, Some("2")))
        .await
        .unwrap();
    // Only the two newest trades were fetched; both fall in one minute.
    assert_eq!(offsets(&page), vec![(300, 330)]);
    assert!(page.pagination.window_limited);
}

#[tokio::test]
async fn stopping_the_walk_early_is_flagged() {
    let rialto = fixture_service();
    let page = rialto
        .series(&q("VNM", Some("1m"), None, Some("1")))
        .await
        .unwrap();
    assert_eq!(offsets(&page), vec![(180, 190)]);
    assert_eq!(page.pagination.total_results, 2);
    assert!(page.pagination.window_limited);
}

#[tokio::test]
async fn millisecond_stamps_and_bad_times_are_handled() {
    let (store, ctrl) = DynamicStore::new_with_controller("dyn");
    ctrl.set_behavior(
        matches(),
        StoreBehavior::Return(vec![
            doc(json!({"Symbol": "ACB", "Timestamp": (SESSION_START + 10) * 1000, "Price": 1})),
            doc(json!({"Symbol": "ACB", "Timestamp": SESSION_START + 70, "Price": 2})),
            doc(json!({"Symbol": "ACB", "Timestamp": "not a time", "Price": 3})),
            doc(json!({"Symbol": "ACB", "Price": 4})),
        ]),
    )
    .await;
    let rialto = service(store);
    let page = rialto.series(&q("ACB", Some("1m"), None, None)).await.unwrap();
    assert_eq!(offsets(&page), vec![(0, 10), (60, 70)]);
    assert_eq!(page.data[0].record.fields["Price"], json!(1));
}

#[tokio::test]
async fn out_of_range_stamps_are_skipped() {
    let (store, ctrl) = DynamicStore::new_with_controller("dyn");
    ctrl.set_behavior(
        matches(),
        StoreBehavior::Return(vec![
            doc(json!({"Symbol": "HPG", "Timestamp": i64::MIN, "Price": 0})),
            doc(json!({"Symbol": "HPG", "Timestamp": -1.0e30, "Price": 0})),
            doc(json!({"Symbol": "HPG", "Timestamp": SESSION_START + 5, "Price": 27.1})),
            doc(json!({"Symbol": "HPG", "Timestamp": SESSION_START + 65, "Price": 27.2})),
        ]),
    )
    .await;
    let rialto = service(store);
    let page = rialto.series(&q("HPG", Some("1m"), None, None)).await.unwrap();
    assert_eq!(offsets(&page), vec![(0, 5), (60, 65)]);
    assert_eq!(page.pagination.total_results, 2);
}
