// In crates/strategies/src/family.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The strategy families the signal generator knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyFamily {
    /// Close versus a single SMA.
    #[serde(alias = "SMA")]
    Sma,
    /// Close versus a single EMA.
    #[serde(alias = "EMA")]
    Ema,
    /// Fast SMA versus slow SMA.
    #[serde(alias = "SMA_CROSSOVER")]
    SmaCrossover,
    /// Fast EMA versus slow EMA.
    #[serde(alias = "EMA_CROSSOVER")]
    EmaCrossover,
    #[serde(alias = "RSI")]
    Rsi,
    #[serde(alias = "MACD")]
    Macd,
    /// Fades closes outside the bands.
    #[serde(alias = "BOLLINGER_BANDS")]
    BollingerBands,
    /// Follows closes outside the bands.
    #[serde(alias = "BOLLINGER_BREAKOUT", alias = "BREAKOUT")]
    BollingerBreakout,
    #[serde(alias = "STOCHASTIC")]
    Stochastic,
}

impl StrategyFamily {
    pub const ALL: [StrategyFamily; 9] = [
        StrategyFamily::Sma,
        StrategyFamily::Ema,
        StrategyFamily::SmaCrossover,
        StrategyFamily::EmaCrossover,
        StrategyFamily::Rsi,
        StrategyFamily::Macd,
        StrategyFamily::BollingerBands,
        StrategyFamily::BollingerBreakout,
        StrategyFamily::Stochastic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyFamily::Sma => "sma",
            StrategyFamily::Ema => "ema",
            StrategyFamily::SmaCrossover => "sma_crossover",
            StrategyFamily::EmaCrossover => "ema_crossover",
            StrategyFamily::Rsi => "rsi",
            StrategyFamily::Macd => "macd",
            StrategyFamily::BollingerBands => "bollinger_bands",
            StrategyFamily::BollingerBreakout => "bollinger_breakout",
            StrategyFamily::Stochastic => "stochastic",
        }
    }

    /// Families whose parameters include a fast/slow pair that must be ordered.
    pub fn is_crossover(&self) -> bool {
        matches!(
            self,
            StrategyFamily::SmaCrossover | StrategyFamily::EmaCrossover | StrategyFamily::Macd
        )
    }
}

impl fmt::Display for StrategyFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        StrategyFamily::ALL
            .into_iter()
            .find(|family| family.as_str() == normalized)
            .ok_or_else(|| Error::UnknownFamily(s.to_string()))
    }
}
