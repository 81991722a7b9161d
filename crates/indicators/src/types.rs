// In crates/indicators/src/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bollinger::BollingerBands;
use crate::ema::Ema;
use crate::macd::Macd;
use crate::rsi::Rsi;
use crate::sma::Sma;
use crate::stochastic::Stochastic;
use crate::{Indicator, Result};

/// An indicator family together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum IndicatorKind {
    Sma { period: usize },
    Ema { period: usize },
    Rsi { period: usize },
    Macd { fast: usize, slow: usize, signal: usize },
    BollingerBands { period: usize, std_dev: f64 },
    Stochastic { k_period: usize, d_period: usize },
}

impl IndicatorKind {
    /// Validates the parameters and returns the matching implementation.
    pub fn build(&self) -> Result<Box<dyn Indicator>> {
        Ok(match *self {
            IndicatorKind::Sma { period } => Box::new(Sma::new(period)?),
            IndicatorKind::Ema { period } => Box::new(Ema::new(period)?),
            IndicatorKind::Rsi { period } => Box::new(Rsi::new(period)?),
            IndicatorKind::Macd { fast, slow, signal } => Box::new(Macd::new(fast, slow, signal)?),
            IndicatorKind::BollingerBands { period, std_dev } => {
                Box::new(BollingerBands::new(period, std_dev)?)
            }
            IndicatorKind::Stochastic { k_period, d_period } => {
                Box::new(Stochastic::new(k_period, d_period)?)
            }
        })
    }

    /// A stable key naming the indicator and its parameters, e.g. `MACD(12,26,9)`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Sma { period } => write!(f, "SMA({period})"),
            IndicatorKind::Ema { period } => write!(f, "EMA({period})"),
            IndicatorKind::Rsi { period } => write!(f, "RSI({period})"),
            IndicatorKind::Macd { fast, slow, signal } => write!(f, "MACD({fast},{slow},{signal})"),
            IndicatorKind::BollingerBands { period, std_dev } => write!(f, "BB({period},{std_dev})"),
            IndicatorKind::Stochastic { k_period, d_period } => write!(f, "STOCH({k_period},{d_period})"),
        }
    }
}

/// A named value column aligned with the bars of the source series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: &'static str,
    pub values: Vec<Option<f64>>,
}

/// The derived output of one indicator computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorResult {
    pub kind: IndicatorKind,
    pub columns: Vec<Column>,
}

impl IndicatorResult {
    pub fn new(kind: IndicatorKind, columns: Vec<Column>) -> Self {
        Self { kind, columns }
    }

    /// Number of bars covered.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// The value of column `name` at bar `index`, if defined.
    pub fn value(&self, name: &str, index: usize) -> Option<f64> {
        self.column(name)?.get(index).copied().flatten()
    }

    /// Index of the first bar where every column is defined.
    pub fn first_defined(&self) -> Option<usize> {
        (0..self.len()).find(|&i| self.columns.iter().all(|c| c.values[i].is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::series;

    #[test]
    fn keys_include_parameters() {
        assert_eq!(IndicatorKind::Macd { fast: 12, slow: 26, signal: 9 }.key(), "MACD(12,26,9)");
        assert_eq!(IndicatorKind::BollingerBands { period: 20, std_dev: 2.0 }.key(), "BB(20,2)");
    }

    #[test]
    fn non_positive_periods_are_rejected() {
        let kinds = [
            IndicatorKind::Sma { period: 0 },
            IndicatorKind::Rsi { period: 0 },
            IndicatorKind::Macd { fast: 0, slow: 26, signal: 9 },
            IndicatorKind::Stochastic { k_period: 14, d_period: 0 },
            IndicatorKind::BollingerBands { period: 20, std_dev: 0.0 },
        ];
        for kind in kinds {
            assert!(kind.build().is_err(), "{kind} should be rejected");
        }
    }

    #[test]
    fn oversized_window_is_all_undefined() {
        let s = series(&[1.0, 2.0, 3.0]);
        for kind in [
            IndicatorKind::Sma { period: 14 },
            IndicatorKind::Ema { period: 14 },
            IndicatorKind::Rsi { period: 14 },
            IndicatorKind::Stochastic { k_period: 14, d_period: 3 },
        ] {
            let result = crate::compute(&s, &kind).unwrap();
            assert_eq!(result.len(), 3);
            assert_eq!(result.first_defined(), None, "{kind}");
        }
    }
}
