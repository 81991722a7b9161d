// In crates/indicators/src/ema.rs

use core_types::PriceSeries;

use crate::error::ensure_positive;
use crate::rolling;
use crate::{Column, Indicator, IndicatorKind, IndicatorResult, Result};

pub const EMA: &str = "EMA";

/// Unadjusted recursive exponential moving average of the close.
///
/// The recursion starts at the first close; the first `period - 1` values are
/// reported as undefined so every indicator shares the same warm-up rule.
#[derive(Debug, Clone, Copy)]
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Result<Self> {
        ensure_positive("period", period)?;
        Ok(Self { period })
    }
}

impl Indicator for Ema {
    fn name(&self) -> &'static str {
        EMA
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorResult> {
        let raw = rolling::ema_recursive(&series.closes(), self.period)?;
        Ok(IndicatorResult::new(
            IndicatorKind::Ema { period: self.period },
            vec![Column {
                name: EMA,
                values: rolling::mask_warmup(raw, self.period),
            }],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{assert_close, series};

    #[test]
    fn matches_simple_recursive_ema() {
        let s = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let result = Ema::new(3).unwrap().compute(&s).unwrap();
        let column = result.column(EMA).unwrap();
        assert_eq!(column[0], None);
        assert_eq!(column[1], None);
        assert_close(column[2], 2.25);
        assert_close(column[3], 3.125);
        assert_close(column[4], 4.0625);
    }

    #[test]
    fn period_one_tracks_the_close() {
        let s = series(&[3.0, 1.0, 2.0]);
        let result = Ema::new(1).unwrap().compute(&s).unwrap();
        assert_eq!(result.column(EMA).unwrap(), &[Some(3.0), Some(1.0), Some(2.0)]);
    }
}
