// In crates/indicators/src/sma.rs

use core_types::PriceSeries;

use crate::error::ensure_positive;
use crate::rolling;
use crate::{Column, Indicator, IndicatorKind, IndicatorResult, Result};

pub const SMA: &str = "SMA";

/// Rolling arithmetic mean of the close.
#[derive(Debug, Clone, Copy)]
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Result<Self> {
        ensure_positive("period", period)?;
        Ok(Self { period })
    }
}

impl Indicator for Sma {
    fn name(&self) -> &'static str {
        SMA
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorResult> {
        let values = rolling::sma(&series.closes(), self.period)?;
        Ok(IndicatorResult::new(
            IndicatorKind::Sma { period: self.period },
            vec![Column { name: SMA, values }],
        ))
    }
}
