use rialto::RialtoError;
use serde_json::json;

use crate::helpers::fixture_service;

#[tokio::test]
async fn finds_code_from_raw_query() {
    let rialto = fixture_service();
    let found = rialto.lookup("FPT", None).await.unwrap();
    assert_eq!(found.data["Name"], json!("FPT Corp"));

    let found = rialto.lookup("VNM&marketId=HOSE", Some("HOSE")).await.unwrap();
    assert_eq!(found.data["Symbol"], json!("VNM"));
}

#[tokio::test]
async fn market_mismatch_is_not_found() {
    let rialto = fixture_service();
    let err = rialto.lookup("SHB&marketId=HOSE", Some("HOSE")).await.unwrap_err();
    assert!(matches!(err, RialtoError::NotFound { what } if what.contains("SHB")));
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let rialto = fixture_service();
    let err = rialto.lookup("ZZZ", None).await.unwrap_err();
    assert!(matches!(err, RialtoError::NotFound { .. }));
}

#[tokio::test]
async fn query_without_code_is_invalid() {
    let rialto = fixture_service();
    for raw in ["", "marketId=HOSE"] {
        let err = rialto.lookup(raw, Some("HOSE")).await.unwrap_err();
        assert!(matches!(err, RialtoError::InvalidArg(_)));
    }
}

#[tokio::test]
async fn lookup_body_wraps_document() {
    let rialto = fixture_service();
    let found = rialto.lookup("symbol=BSR", None).await.unwrap();
    let body = serde_json::to_value(&found).unwrap();
    assert_eq!(body["data"]["MarketId"], json!("UPCOM"));
}
