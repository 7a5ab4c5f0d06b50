use std::sync::Arc;

use axum::extract::{Query, RawQuery, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use rialto::{
    CandlesQuery, Kline, Lookup, MarketQuery, OrdersPage, OrdersQuery, Rialto, SeriesPage,
    SeriesQuery, Snapshot,
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::ApiError;

type Shared = State<Arc<Rialto>>;

/// Build the HTTP router over a shared service.
pub fn app(rialto: Arc<Rialto>) -> Router {
    Router::new()
        .route("/api/tc", get(tc))
        .route("/api/info", get(info))
        .route("/api/code", get(code))
        .route("/api/exchange", get(exchange))
        .route("/api/orders", get(orders))
        .route("/api/candles", get(candles))
        .route("/api/onlycode", get(onlycode))
        .route("/api/series", get(series))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(rialto)
}

async fn tc(State(rialto): Shared) -> Result<Json<Snapshot>, ApiError> {
    Ok(Json(rialto.tc().await?))
}

async fn info(State(rialto): Shared) -> Result<Json<Snapshot>, ApiError> {
    Ok(Json(rialto.info().await?))
}

async fn code(
    State(rialto): Shared,
    Query(market): Query<MarketQuery>,
) -> Result<Json<Snapshot>, ApiError> {
    Ok(Json(rialto.codes(market.market_id.as_deref()).await?))
}

async fn exchange(
    State(rialto): Shared,
    Query(market): Query<MarketQuery>,
) -> Result<Json<Snapshot>, ApiError> {
    Ok(Json(rialto.exchanges(market.market_id.as_deref()).await?))
}

async fn orders(
    State(rialto): Shared,
    Query(req): Query<OrdersQuery>,
) -> Result<Json<OrdersPage>, ApiError> {
    Ok(Json(rialto.orders(&req).await?))
}

async fn candles(
    State(rialto): Shared,
    Query(req): Query<CandlesQuery>,
) -> Result<Json<Vec<Kline>>, ApiError> {
    Ok(Json(rialto.candles(&req).await?))
}

// `/api/onlycode?VNM&marketId=HOSE`: the code is a bare token in the raw query.
async fn onlycode(
    State(rialto): Shared,
    RawQuery(raw): RawQuery,
    Query(market): Query<MarketQuery>,
) -> Result<Json<Lookup>, ApiError> {
    let raw = raw.unwrap_or_default();
    Ok(Json(rialto.lookup(&raw, market.market_id.as_deref()).await?))
}

async fn series(
    State(rialto): Shared,
    Query(req): Query<SeriesQuery>,
) -> Result<Json<SeriesPage>, ApiError> {
    Ok(Json(rialto.series(&req).await?))
}

async fn healthz() -> impl IntoResponse {
    Json::<Value>(json!({ "status": "ok" }))
}
