// In crates/indicators/src/macd.rs

use core_types::PriceSeries;

use crate::error::ensure_positive;
use crate::rolling::{ema_recursive, mask_warmup};
use crate::{Column, Indicator, IndicatorKind, IndicatorResult, Result};

pub const MACD: &str = "MACD";
pub const SIGNAL_LINE: &str = "Signal";
pub const HISTOGRAM: &str = "Histogram";

/// Moving Average Convergence Divergence.
///
/// `MACD = EMA(fast) - EMA(slow)`, `Signal = EMA(MACD, signal)`,
/// `Histogram = MACD - Signal`. All three recursions start at the first bar;
/// the MACD line is defined once the longer EMA has warmed up and the signal
/// line `signal - 1` bars after that.
#[derive(Debug, Clone, Copy)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Result<Self> {
        ensure_positive("fast_period", fast)?;
        ensure_positive("slow_period", slow)?;
        ensure_positive("signal_period", signal)?;
        Ok(Self { fast, slow, signal })
    }

    fn line_warmup(&self) -> usize {
        self.fast.max(self.slow)
    }
}

impl Indicator for Macd {
    fn name(&self) -> &'static str {
        MACD
    }

    fn warmup(&self) -> usize {
        self.line_warmup() + self.signal - 1
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorResult> {
        let closes = series.closes();
        let fast = ema_recursive(&closes, self.fast)?;
        let slow = ema_recursive(&closes, self.slow)?;
        let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema_recursive(&macd, self.signal)?;
        let histogram: Vec<f64> = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

        Ok(IndicatorResult::new(
            IndicatorKind::Macd {
                fast: self.fast,
                slow: self.slow,
                signal: self.signal,
            },
            vec![
                Column {
                    name: MACD,
                    values: mask_warmup(macd, self.line_warmup()),
                },
                Column {
                    name: SIGNAL_LINE,
                    values: mask_warmup(signal, self.warmup()),
                },
                Column {
                    name: HISTOGRAM,
                    values: mask_warmup(histogram, self.warmup()),
                },
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{assert_close, series};

    #[test]
    fn warmup_covers_slow_ema_and_signal_line() {
        let closes: Vec<f64> = (0..12).map(|i| 100.0 + i as f64).collect();
        let result = Macd::new(2, 4, 3).unwrap().compute(&series(&closes)).unwrap();
        let macd = result.column(MACD).unwrap();
        let signal = result.column(SIGNAL_LINE).unwrap();
        assert!(macd[..3].iter().all(Option::is_none));
        assert!(macd[3].is_some());
        assert!(signal[..5].iter().all(Option::is_none));
        assert!(signal[5].is_some());
        assert_eq!(result.first_defined(), Some(5));
    }

    #[test]
    fn histogram_is_macd_minus_signal() {
        let closes = [10.0, 10.5, 10.2, 11.0, 11.4, 11.1, 12.0, 12.5, 12.2, 13.0];
        let result = Macd::new(2, 3, 2).unwrap().compute(&series(&closes)).unwrap();
        for i in 0..closes.len() {
            if let (Some(m), Some(s)) = (result.value(MACD, i), result.value(SIGNAL_LINE, i)) {
                assert_close(result.value(HISTOGRAM, i), m - s);
            }
        }
    }

    #[test]
    fn rising_prices_give_positive_macd() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + 2.0 * i as f64).collect();
        let result = Macd::new(3, 6, 3).unwrap().compute(&series(&closes)).unwrap();
        assert!(result.value(MACD, 29).unwrap() > 0.0);
    }
}
