use serde_json::{Value, json};

// 2024-01-02 09:15:00 UTC
const SESSION_START: i64 = 1_704_186_900;

fn row(symbol: &str, offset_secs: i64, price: f64, volume: i64, side: &str) -> Value {
    let ts = SESSION_START + offset_secs;
    let secs_of_day = ts.rem_euclid(86_400);
    json!({
        "Symbol": symbol,
        "TradingDate": "02/01/2024",
        "Time": format!(
            "{:02}:{:02}:{:02}",
            secs_of_day / 3600,
            secs_of_day % 3600 / 60,
            secs_of_day % 60
        ),
        "Timestamp": ts,
        "Price": price,
        "Volume": volume,
        "Side": side,
    })
}

/// Raw order matches in insertion (oldest first) order.
pub fn all() -> Vec<Value> {
    vec![
        row("VNM", 0, 67.1, 1_000, "B"),
        row("VNM", 20, 67.2, 500, "S"),
        row("FPT", 25, 96.4, 2_000, "B"),
        row("VNM", 75, 67.2, 300, "B"),
        row("VNM", 110, 67.3, 700, "B"),
        row("FPT", 130, 96.5, 100, "S"),
        row("VNM", 190, 67.0, 1_200, "S"),
        row("VNM", 315, 67.4, 900, "B"),
        row("VNM", 330, 67.5, 400, "B"),
    ]
}
