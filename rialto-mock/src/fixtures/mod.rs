pub mod klines;
pub mod listings;
pub mod matches;

use rialto_core::{Collection, Document};

fn docs(values: Vec<serde_json::Value>) -> Vec<Document> {
    values
        .into_iter()
        .filter_map(|v| match v {
            serde_json::Value::Object(m) => Some(m),
            _ => None,
        })
        .collect()
}

/// Every fixture collection under its default location.
pub fn all() -> Vec<(Collection, Vec<Document>)> {
    vec![
        (Collection::new("moneyflow", "tc"), docs(listings::tc())),
        (Collection::new("moneyflow", "info_stocks"), docs(listings::info())),
        (Collection::new("moneyflow", "stock_code"), docs(listings::stock_codes())),
        (Collection::new("moneyflow", "exchange"), docs(listings::exchanges())),
        (Collection::new("moneyflow", "matchs"), docs(matches::all())),
        (Collection::new("binance", "klines"), docs(klines::all())),
    ]
}
