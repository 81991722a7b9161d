// In crates/market-data/src/types.rs

use chrono::{DateTime, Utc};
use core_types::Bar;
use serde::Deserialize;

use crate::{Error, Result};

/// A candles response as served by the OANDA v20 REST API.
#[derive(Debug, Deserialize, Clone)]
pub struct CandlesResponse {
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(default)]
    pub granularity: Option<String>,
    pub candles: Vec<Candle>,
}

/// One candle. Prices arrive as decimal strings.
#[derive(Debug, Deserialize, Clone)]
pub struct Candle {
    pub time: DateTime<Utc>,
    /// Still-forming candles are `false`.
    #[serde(default = "default_complete")]
    pub complete: bool,
    #[serde(default)]
    pub volume: Option<u64>,
    /// Midpoint prices; absent when only bid/ask were requested.
    pub mid: Option<CandlePrices>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CandlePrices {
    pub o: String,
    pub h: String,
    pub l: String,
    pub c: String,
}

fn default_complete() -> bool {
    true
}

impl Candle {
    /// Converts the midpoint prices into a validated [`Bar`].
    pub fn to_bar(&self) -> Result<Bar> {
        let mid = self.mid.as_ref().ok_or_else(|| self.invalid("no midpoint prices"))?;
        let price = |field: &str, raw: &str| {
            raw.trim()
                .parse::<f64>()
                .map_err(|e| self.invalid(format!("{field} price '{raw}': {e}")))
        };
        Ok(Bar::new(
            self.time,
            price("open", &mid.o)?,
            price("high", &mid.h)?,
            price("low", &mid.l)?,
            price("close", &mid.c)?,
        ))
    }

    fn invalid(&self, reason: impl Into<String>) -> Error {
        Error::InvalidCandle {
            time: self.time.to_rfc3339(),
            reason: reason.into(),
        }
    }
}
