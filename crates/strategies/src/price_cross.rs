// In crates/strategies/src/price_cross.rs

use core_types::SignalSeries;
use indicators::{IndicatorCache, IndicatorKind, ema, sma};
use serde::{Deserialize, Serialize};

use crate::types::PriceCrossSettings;
use crate::{Error, Result, SignalRule, column, compare, lookup};

/// Which moving average a rule is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovingAverage {
    Simple,
    Exponential,
}

impl MovingAverage {
    pub fn kind(&self, period: usize) -> IndicatorKind {
        match self {
            MovingAverage::Simple => IndicatorKind::Sma { period },
            MovingAverage::Exponential => IndicatorKind::Ema { period },
        }
    }

    pub(crate) fn column(&self) -> &'static str {
        match self {
            MovingAverage::Simple => sma::SMA,
            MovingAverage::Exponential => ema::EMA,
        }
    }
}

/// Long while the close sits above its moving average, short while below.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceCross {
    average: MovingAverage,
    settings: PriceCrossSettings,
}

impl PriceCross {
    pub fn new(average: MovingAverage, settings: PriceCrossSettings) -> Result<Self> {
        if settings.period == 0 {
            return Err(Error::invalid_parameter("period", "must be a positive integer"));
        }
        Ok(Self { average, settings })
    }

    pub fn settings(&self) -> &PriceCrossSettings {
        &self.settings
    }

    fn indicator(&self) -> IndicatorKind {
        self.average.kind(self.settings.period)
    }
}

impl SignalRule for PriceCross {
    fn name(&self) -> &'static str {
        match self.average {
            MovingAverage::Simple => "SMA",
            MovingAverage::Exponential => "EMA",
        }
    }

    fn indicators(&self) -> Vec<IndicatorKind> {
        vec![self.indicator()]
    }

    fn apply(&self, cache: &IndicatorCache<'_>) -> Result<SignalSeries> {
        let result = lookup(cache, &self.indicator())?;
        let average = column(result, self.average.column())?;
        let closes = cache.series().closes();

        Ok(closes
            .iter()
            .zip(average)
            .map(|(close, avg)| compare(Some(*close), *avg))
            .collect())
    }
}
