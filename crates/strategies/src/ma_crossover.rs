// In crates/strategies/src/ma_crossover.rs

use core_types::SignalSeries;
use indicators::{IndicatorCache, IndicatorKind};
use serde::Serialize;

use crate::price_cross::MovingAverage;
use crate::types::MACrossoverSettings;
use crate::{Error, Result, SignalRule, column, compare, lookup};

/// Dual moving-average crossover: long while the fast average is above the slow one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MACrossover {
    /// The configuration for this strategy instance.
    settings: MACrossoverSettings,
    average: MovingAverage,
}

impl MACrossover {
    /// Creates a new `MACrossover` from its settings.
    ///
    /// The fast period must be strictly shorter than the slow one.
    pub fn new(average: MovingAverage, settings: MACrossoverSettings) -> Result<Self> {
        if settings.fast_period == 0 {
            return Err(Error::invalid_parameter("fast_period", "must be a positive integer"));
        }
        if settings.fast_period >= settings.slow_period {
            return Err(Error::invalid_parameter(
                "fast_period",
                format!(
                    "must be shorter than slow_period ({} >= {})",
                    settings.fast_period, settings.slow_period
                ),
            ));
        }
        Ok(Self { settings, average })
    }

    pub fn settings(&self) -> &MACrossoverSettings {
        &self.settings
    }

    fn fast(&self) -> IndicatorKind {
        self.average.kind(self.settings.fast_period)
    }

    fn slow(&self) -> IndicatorKind {
        self.average.kind(self.settings.slow_period)
    }
}

impl SignalRule for MACrossover {
    fn name(&self) -> &'static str {
        match self.average {
            MovingAverage::Simple => "SMA_CROSSOVER",
            MovingAverage::Exponential => "EMA_CROSSOVER",
        }
    }

    fn indicators(&self) -> Vec<IndicatorKind> {
        vec![self.fast(), self.slow()]
    }

    fn apply(&self, cache: &IndicatorCache<'_>) -> Result<SignalSeries> {
        let name = self.average.column();
        let fast = column(lookup(cache, &self.fast())?, name)?;
        let slow = column(lookup(cache, &self.slow())?, name)?;

        Ok(fast.iter().zip(slow).map(|(f, s)| compare(*f, *s)).collect())
    }
}
