// In crates/indicators/src/rsi.rs

use core_types::PriceSeries;

use crate::error::ensure_positive;
use crate::{Column, Indicator, IndicatorKind, IndicatorResult, Result};

pub const RSI: &str = "RSI";

/// Relative Strength Index using a simple rolling mean of gains and losses
/// (not Wilder's smoothing).
///
/// The value at bar `t` uses the `period` close-to-close deltas ending at `t`,
/// so the first defined bar is index `period`. When the average loss over the
/// window is zero the ratio is undefined and so is the RSI for that bar.
#[derive(Debug, Clone, Copy)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Result<Self> {
        ensure_positive("period", period)?;
        Ok(Self { period })
    }

    fn from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
        if avg_loss == 0.0 {
            return None;
        }
        let rs = avg_gain / avg_loss;
        Some(100.0 - 100.0 / (1.0 + rs))
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &'static str {
        RSI
    }

    fn warmup(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorResult> {
        let closes = series.closes();
        let mut values = vec![None; closes.len()];

        // deltas[i] is the change from bar i to bar i + 1.
        let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
        let period = self.period as f64;
        for (i, window) in deltas.windows(self.period).enumerate() {
            let avg_gain = window.iter().filter(|d| **d > 0.0).sum::<f64>() / period;
            let avg_loss = window.iter().filter(|d| **d < 0.0).map(|d| -d).sum::<f64>() / period;
            values[i + self.period] = Self::from_averages(avg_gain, avg_loss);
        }

        Ok(IndicatorResult::new(
            IndicatorKind::Rsi { period: self.period },
            vec![Column { name: RSI, values }],
        ))
    }
}
