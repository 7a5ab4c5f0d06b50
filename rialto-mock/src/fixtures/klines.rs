use serde_json::{Value, json};

// 2024-01-01 00:00:00 UTC, in milliseconds.
const OPEN_MS: i64 = 1_704_067_200_000;

fn kline(symbol: &str, minute: i64, o: &str, h: &str, l: &str, c: &str, trades: i64) -> Value {
    let open_time = OPEN_MS + minute * 60_000;
    json!({
        "symbol": symbol,
        "interval": "1m",
        "openTime": open_time,
        "open": o,
        "high": h,
        "low": l,
        "close": c,
        "volume": "12.5",
        "closeTime": open_time + 59_999,
        "quoteAssetVolume": "530000.0",
        "numberOfTrades": trades,
        "takerBuyBaseAssetVolume": "6.1",
        "takerBuyQuoteAssetVolume": "258000.0",
    })
}

/// Kline documents, deliberately not in `openTime` order.
pub fn all() -> Vec<Value> {
    vec![
        kline("BTCUSDT", 2, "42410.0", "42450.0", "42390.0", "42440.0", 310),
        kline("BTCUSDT", 0, "42280.0", "42350.0", "42270.0", "42330.0", 402),
        kline("BTCUSDT", 1, "42330.0", "42420.0", "42300.0", "42410.0", 377),
        kline("ETHUSDT", 0, "2281.5", "2290.0", "2279.0", "2288.4", 190),
        json!({
            "symbol": "BTCUSDT",
            "interval": "1h",
            "openTime": OPEN_MS,
            "open": "42280.0",
            "close": "42700.0",
        }),
    ]
}
