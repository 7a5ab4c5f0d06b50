use serde_json::{Value, json};

pub fn stock_codes() -> Vec<Value> {
    vec![
        json!({"Symbol": "VNM", "MarketId": "HOSE", "Name": "Vinamilk"}),
        json!({"Symbol": "FPT", "MarketId": "HOSE", "Name": "FPT Corp"}),
        json!({"Symbol": "SHB", "MarketId": "HNX", "Name": "SHB Bank"}),
        json!({"Symbol": "BSR", "MarketId": "UPCOM", "Name": "Binh Son Refining"}),
        json!({"Symbol": "VN30F1M", "MarketId": "DER", "Name": "VN30 futures"}),
        json!({"Symbol": "E1VFVN30", "MarketId": "HOSE", "Name": "VN30 ETF"}),
    ]
}

pub fn exchanges() -> Vec<Value> {
    vec![
        json!({"MarketId": "HOSE", "Name": "Ho Chi Minh Stock Exchange"}),
        json!({"MarketId": "HNX", "Name": "Hanoi Stock Exchange"}),
        json!({"MarketId": "UPCOM", "Name": "Unlisted Public Company Market"}),
    ]
}

pub fn tc() -> Vec<Value> {
    vec![
        json!({"Symbol": "VNM", "Inflow": 1_250_000_000i64, "Outflow": 980_000_000i64}),
        json!({"Symbol": "FPT", "Inflow": 2_100_000_000i64, "Outflow": 2_300_000_000i64}),
    ]
}

pub fn info() -> Vec<Value> {
    vec![
        json!({"Symbol": "VNM", "Sector": "Consumer Staples", "ListedShares": 2_089_955_445i64}),
        json!({"Symbol": "FPT", "Sector": "Technology", "ListedShares": 1_463_000_000i64}),
    ]
}
