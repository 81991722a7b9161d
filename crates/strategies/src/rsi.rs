// In crates/strategies/src/rsi.rs

use core_types::SignalSeries;
use indicators::{IndicatorCache, IndicatorKind, rsi::RSI};
use serde::Serialize;

use crate::types::RsiSettings;
use crate::{Error, Result, SignalRule, band, column, lookup};

/// RSI mean reversion: long when oversold, short when overbought.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RsiReversion {
    settings: RsiSettings,
}

impl RsiReversion {
    pub fn new(settings: RsiSettings) -> Result<Self> {
        if settings.period == 0 {
            return Err(Error::invalid_parameter("period", "must be a positive integer"));
        }
        validate_thresholds(settings.oversold, settings.overbought)?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &RsiSettings {
        &self.settings
    }

    fn indicator(&self) -> IndicatorKind {
        IndicatorKind::Rsi {
            period: self.settings.period,
        }
    }
}

/// Both thresholds must lie on the 0..=100 oscillator scale with oversold below overbought.
pub(crate) fn validate_thresholds(oversold: f64, overbought: f64) -> Result<()> {
    for (name, value) in [("oversold", oversold), ("overbought", overbought)] {
        if !(0.0..=100.0).contains(&value) {
            return Err(Error::invalid_parameter(name, format!("{value} is outside 0..=100")));
        }
    }
    if oversold >= overbought {
        return Err(Error::invalid_parameter(
            "oversold",
            format!("must be below overbought ({oversold} >= {overbought})"),
        ));
    }
    Ok(())
}

impl SignalRule for RsiReversion {
    fn name(&self) -> &'static str {
        "RSI"
    }

    fn indicators(&self) -> Vec<IndicatorKind> {
        vec![self.indicator()]
    }

    fn apply(&self, cache: &IndicatorCache<'_>) -> Result<SignalSeries> {
        let rsi = column(lookup(cache, &self.indicator())?, RSI)?;
        Ok(rsi
            .iter()
            .map(|value| band(*value, self.settings.oversold, self.settings.overbought))
            .collect())
    }
}
