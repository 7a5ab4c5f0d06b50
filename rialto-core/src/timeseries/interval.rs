use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::RialtoError;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// A positive, whole-second bucket width.
///
/// Parses `"<n>s"`, `"<n>m"`, `"<n>h"`, `"<n>d"`, `"<n>w"` and bare integers
/// (seconds). Displays in the coarsest unit that divides it exactly.
///
/// ```
/// use rialto_core::Interval;
/// let iv: Interval = "15m".parse().unwrap();
/// assert_eq!(iv.as_secs(), 900);
/// assert_eq!(iv.to_string(), "15m");
/// assert!("0m".parse::<Interval>().is_err());
/// assert!("-1h".parse::<Interval>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval(i64);

impl Interval {
    /// One minute.
    pub const MINUTE: Self = Self(MINUTE);

    /// Build an interval of `secs` seconds.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `secs` is not positive.
    pub fn from_secs(secs: i64) -> Result<Self, RialtoError> {
        if secs <= 0 {
            return Err(RialtoError::invalid_arg(format!(
                "interval must be positive, got {secs}s"
            )));
        }
        Ok(Self(secs))
    }

    /// Width in seconds.
    #[must_use]
    pub const fn as_secs(self) -> i64 {
        self.0
    }
}

impl FromStr for Interval {
    type Err = RialtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || RialtoError::invalid_arg(format!("invalid interval: {s:?}"));
        if raw.is_empty() {
            return Err(invalid());
        }
        let (digits, unit) = match raw.char_indices().last() {
            Some((i, c)) if c.is_ascii_alphabetic() => (&raw[..i], c.to_ascii_lowercase()),
            _ => (raw, 's'),
        };
        let mult = match unit {
            's' => 1,
            'm' => MINUTE,
            'h' => HOUR,
            'd' => DAY,
            'w' => WEEK,
            _ => return Err(invalid()),
        };
        let n: i64 = digits.parse().map_err(|_| invalid())?;
        let secs = n.checked_mul(mult).ok_or_else(invalid)?;
        Self::from_secs(secs)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        for (unit, width) in [('w', WEEK), ('d', DAY), ('h', HOUR), ('m', MINUTE)] {
            if s % width == 0 {
                return write!(f, "{}{unit}", s / width);
            }
        }
        write!(f, "{s}s")
    }
}

impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
