// In crates/strategies/src/macd.rs

use core_types::SignalSeries;
use indicators::macd::{MACD, SIGNAL_LINE};
use indicators::{IndicatorCache, IndicatorKind};
use serde::Serialize;

use crate::types::MacdSettings;
use crate::{Error, Result, SignalRule, column, compare, lookup};

/// Long while the MACD line is above its signal line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdCross {
    settings: MacdSettings,
}

impl MacdCross {
    pub fn new(settings: MacdSettings) -> Result<Self> {
        let MacdSettings {
            fast_period,
            slow_period,
            signal_period,
        } = settings;
        for (name, period) in [("fast_period", fast_period), ("signal_period", signal_period)] {
            if period == 0 {
                return Err(Error::invalid_parameter(name, "must be a positive integer"));
            }
        }
        if fast_period >= slow_period {
            return Err(Error::invalid_parameter(
                "fast_period",
                format!("must be shorter than slow_period ({fast_period} >= {slow_period})"),
            ));
        }
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &MacdSettings {
        &self.settings
    }

    fn indicator(&self) -> IndicatorKind {
        IndicatorKind::Macd {
            fast: self.settings.fast_period,
            slow: self.settings.slow_period,
            signal: self.settings.signal_period,
        }
    }
}

impl SignalRule for MacdCross {
    fn name(&self) -> &'static str {
        "MACD"
    }

    fn indicators(&self) -> Vec<IndicatorKind> {
        vec![self.indicator()]
    }

    fn apply(&self, cache: &IndicatorCache<'_>) -> Result<SignalSeries> {
        let result = lookup(cache, &self.indicator())?;
        let macd = column(result, MACD)?;
        let signal_line = column(result, SIGNAL_LINE)?;
        Ok(macd.iter().zip(signal_line).map(|(m, s)| compare(*m, *s)).collect())
    }
}
