use std::sync::Arc;

use rialto::{OrdersQuery, PaginationConfig, Rialto, RialtoError};
use rialto_mock::MemoryStore;
use serde_json::json;

use crate::helpers::{SESSION_START, fixture_service};

fn q(symbol: &str) -> OrdersQuery {
    OrdersQuery {
        symbol: Some(symbol.into()),
        ..Default::default()
    }
}

fn stamps(page: &rialto::OrdersPage) -> Vec<i64> {
    page.data
        .iter()
        .filter_map(|d| d["Timestamp"].as_i64())
        .map(|t| t - SESSION_START)
        .collect()
}

#[tokio::test]
async fn without_date_newest_matches_come_first() {
    let rialto = fixture_service();
    let page = rialto
        .orders(&OrdersQuery {
            limit: Some("3".into()),
            ..q("VNM")
        })
        .await
        .unwrap();
    assert_eq!(stamps(&page), vec![330, 315, 190]);
    assert_eq!((page.page, page.limit), (1, 3));

    let page2 = rialto
        .orders(&OrdersQuery {
            page: Some("2".into()),
            limit: Some("3".into()),
            ..q("VNM")
        })
        .await
        .unwrap();
    assert_eq!(stamps(&page2), vec![110, 75, 20]);
}

#[tokio::test]
async fn iso_and_day_first_dates_match_the_same_rows() {
    let rialto = fixture_service();
    for date in ["2024-01-02", "02/01/2024"] {
        let page = rialto
            .orders(&OrdersQuery {
                date: Some(date.into()),
                ..q("VNM")
            })
            .await
            .unwrap();
        // Store order when filtered by day.
        assert_eq!(stamps(&page), vec![0, 20, 75, 110, 190, 315, 330]);
        assert!(page.data.iter().all(|d| d["TradingDate"] == json!("02/01/2024")));
    }
}

#[tokio::test]
async fn other_trading_days_are_empty() {
    let rialto = fixture_service();
    let page = rialto
        .orders(&OrdersQuery {
            date: Some("2024-01-03".into()),
            ..q("VNM")
        })
        .await
        .unwrap();
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn bad_pagination_falls_back_and_clamps() {
    let rialto = Rialto::builder()
        .with_store(Arc::new(MemoryStore::with_fixtures()))
        .orders_pagination(PaginationConfig::new(2, 4))
        .build()
        .unwrap();

    let page = rialto
        .orders(&OrdersQuery {
            page: Some("-1".into()),
            limit: Some("abc".into()),
            ..q("VNM")
        })
        .await
        .unwrap();
    assert_eq!((page.page, page.limit), (1, 2));
    assert_eq!(page.data.len(), 2);

    let page = rialto
        .orders(&OrdersQuery {
            limit: Some("1000".into()),
            ..q("VNM")
        })
        .await
        .unwrap();
    assert_eq!(page.limit, 4);
    assert_eq!(page.data.len(), 4);
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let rialto = fixture_service();
    let page = rialto
        .orders(&OrdersQuery {
            page: Some("9".into()),
            ..q("FPT")
        })
        .await
        .unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.page, 9);
}

#[tokio::test]
async fn missing_symbol_or_bad_date_is_invalid() {
    let rialto = fixture_service();
    let err = rialto.orders(&OrdersQuery::default()).await.unwrap_err();
    assert!(matches!(err, RialtoError::InvalidArg(_)));

    let err = rialto
        .orders(&OrdersQuery {
            date: Some("2024/01/02".into()),
            ..q("VNM")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RialtoError::InvalidArg(_)));
}

#[tokio::test]
async fn store_failures_propagate() {
    let rialto = fixture_service();
    let err = rialto.orders(&q("FAIL")).await.unwrap_err();
    assert!(matches!(err, RialtoError::Upstream { .. }));
}
