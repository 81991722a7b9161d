// In crates/core-types/src/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A broker instrument identifier (e.g., "EUR_USD").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Instrument(pub String);

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Instrument {
    fn from(code: &str) -> Self {
        Instrument(code.to_string())
    }
}

/// The time resolution of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Granularity {
    #[serde(rename = "M1")]
    Minute,
    #[serde(rename = "H1")]
    Hour,
    #[serde(rename = "D")]
    Day,
    #[serde(rename = "M")]
    Month,
}

impl Granularity {
    /// The broker code for this granularity.
    pub fn code(&self) -> &'static str {
        match self {
            Granularity::Minute => "M1",
            Granularity::Hour => "H1",
            Granularity::Day => "D",
            Granularity::Month => "M",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M1" | "minute" => Ok(Granularity::Minute),
            "H1" | "hour" => Ok(Granularity::Hour),
            "D" | "day" => Ok(Granularity::Day),
            "M" | "month" => Ok(Granularity::Month),
            other => Err(Error::UnknownGranularity(other.to_string())),
        }
    }
}

/// One OHLC price observation.
///
/// Indicator math assumes `high >= max(open, close)` and `low <= min(open, close)`.
/// Broker data is trusted on that point; only positivity and finiteness are checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    pub fn new(timestamp: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    pub(crate) fn validate(&self) -> crate::Result<()> {
        let prices = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (field, value) in prices {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidBar {
                    timestamp: self.timestamp,
                    reason: format!("{field} must be a positive finite price, got {value}"),
                });
            }
        }
        Ok(())
    }
}
