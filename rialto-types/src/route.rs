use core::fmt;
use serde::{Deserialize, Serialize};

/// Route labels for configuration keys, errors, and telemetry.
///
/// These map one-to-one with the service's read endpoints and give a stable
/// string form for per-route TTL overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Route {
    /// Whole `tc` collection snapshot.
    Tc,
    /// Whole stock info collection snapshot.
    Info,
    /// Three-letter stock codes, optionally filtered by market.
    Code,
    /// Exchange listing, optionally filtered by market.
    Exchange,
    /// Paged raw order matches for a symbol.
    Orders,
    /// Kline rows rendered as Binance-style arrays.
    Candles,
    /// Single stock code lookup.
    OnlyCode,
    /// Time-bucketed, paged trade series.
    Series,
}

impl Route {
    /// Every route, in endpoint order.
    pub const ALL: [Self; 8] = [
        Self::Tc,
        Self::Info,
        Self::Code,
        Self::Exchange,
        Self::Orders,
        Self::Candles,
        Self::OnlyCode,
        Self::Series,
    ];

    /// Stable, lowercase identifier for logs and config keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tc => "tc",
            Self::Info => "info",
            Self::Code => "code",
            Self::Exchange => "exchange",
            Self::Orders => "orders",
            Self::Candles => "candles",
            Self::OnlyCode => "onlycode",
            Self::Series => "series",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Route {
    type Err = crate::RialtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::RialtoError::invalid_arg(format!("unknown route: {s}")))
    }
}
