// In crates/indicators/src/bollinger.rs

use core_types::PriceSeries;

use crate::error::ensure_positive;
use crate::rolling::{sample_std, sma};
use crate::{Column, Indicator, IndicatorKind, IndicatorResult, Result};

pub const MID: &str = "Mid";
pub const UPPER: &str = "Upper";
pub const LOWER: &str = "Lower";

/// Bollinger Bands: an SMA wrapped by `std_dev` rolling sample standard deviations.
#[derive(Debug, Clone, Copy)]
pub struct BollingerBands {
    period: usize,
    std_dev: f64,
}

impl BollingerBands {
    pub fn new(period: usize, std_dev: f64) -> Result<Self> {
        ensure_positive("period", period)?;
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(core_types::Error::invalid_parameter("std_dev", "must be a positive number").into());
        }
        Ok(Self { period, std_dev })
    }
}

impl Indicator for BollingerBands {
    fn name(&self) -> &'static str {
        "BOLLINGER_BANDS"
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorResult> {
        let closes = series.closes();
        let mid = sma(&closes, self.period)?;
        let std = sample_std(&closes, self.period);

        let band = |sign: f64| -> Vec<Option<f64>> {
            mid.iter()
                .zip(&std)
                .map(|(m, s)| Some((*m)? + sign * self.std_dev * (*s)?))
                .collect()
        };
        let upper = band(1.0);
        let lower = band(-1.0);

        Ok(IndicatorResult::new(
            IndicatorKind::BollingerBands {
                period: self.period,
                std_dev: self.std_dev,
            },
            vec![
                Column { name: MID, values: mid },
                Column { name: UPPER, values: upper },
                Column { name: LOWER, values: lower },
            ],
        ))
    }
}
