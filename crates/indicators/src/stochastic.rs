// In crates/indicators/src/stochastic.rs

use core_types::PriceSeries;
use ta::Next;
use ta::indicators::{Maximum, Minimum};

use crate::error::ensure_positive;
use crate::rolling::mean_of_defined;
use crate::{Column, Error, Indicator, IndicatorKind, IndicatorResult, Result};

pub const PERCENT_K: &str = "%K";
pub const PERCENT_D: &str = "%D";

/// Stochastic oscillator.
///
/// `%K = 100 * (close - lowest low) / (highest high - lowest low)` over
/// `k_period` bars and `%D = SMA(%K, d_period)`. A flat range leaves `%K`
/// undefined for that bar, and every `%D` window that contains it.
#[derive(Debug, Clone, Copy)]
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Stochastic {
    pub fn new(k_period: usize, d_period: usize) -> Result<Self> {
        ensure_positive("k_period", k_period)?;
        ensure_positive("d_period", d_period)?;
        Ok(Self { k_period, d_period })
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &'static str {
        "STOCHASTIC"
    }

    fn warmup(&self) -> usize {
        self.k_period + self.d_period - 1
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorResult> {
        let mut highest = Maximum::new(self.k_period).map_err(|e| Error::Backend(format!("{e:?}")))?;
        let mut lowest = Minimum::new(self.k_period).map_err(|e| Error::Backend(format!("{e:?}")))?;

        let percent_k: Vec<Option<f64>> = series
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let high = highest.next(bar.high);
                let low = lowest.next(bar.low);
                let range = high - low;
                if i + 1 < self.k_period || range == 0.0 {
                    None
                } else {
                    Some(100.0 * (bar.close - low) / range)
                }
            })
            .collect();
        let percent_d = mean_of_defined(&percent_k, self.d_period);

        Ok(IndicatorResult::new(
            IndicatorKind::Stochastic {
                k_period: self.k_period,
                d_period: self.d_period,
            },
            vec![
                Column {
                    name: PERCENT_K,
                    values: percent_k,
                },
                Column {
                    name: PERCENT_D,
                    values: percent_d,
                },
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{assert_close, series_with_spread};

    #[test]
    fn percent_k_locates_close_in_range() {
        // highs = close + 1, lows = close - 1
        let s = series_with_spread(&[10.0, 11.0, 12.0, 11.0], 1.0);
        let result = Stochastic::new(3, 2).unwrap().compute(&s).unwrap();
        assert_eq!(result.value(PERCENT_K, 1), None);
        assert_close(result.value(PERCENT_K, 2), 75.0);
        // window bars 1..=3: low 10, high 13
        assert_close(result.value(PERCENT_K, 3), 100.0 / 3.0);
        assert_eq!(result.value(PERCENT_D, 2), None);
        assert_close(result.value(PERCENT_D, 3), (75.0 + 100.0 / 3.0) / 2.0);
    }

    #[test]
    fn flat_range_is_undefined() {
        let s = series_with_spread(&[5.0, 5.0, 5.0, 5.0], 0.0);
        let result = Stochastic::new(2, 1).unwrap().compute(&s).unwrap();
        assert!(result.column(PERCENT_K).unwrap().iter().all(Option::is_none));
    }
}
