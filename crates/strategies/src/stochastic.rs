// In crates/strategies/src/stochastic.rs

use core_types::SignalSeries;
use indicators::stochastic::PERCENT_K;
use indicators::{IndicatorCache, IndicatorKind};
use serde::Serialize;

use crate::rsi::validate_thresholds;
use crate::types::StochasticSettings;
use crate::{Error, Result, SignalRule, band, column, lookup};

/// Stochastic %K mean reversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StochasticReversion {
    settings: StochasticSettings,
}

impl StochasticReversion {
    pub fn new(settings: StochasticSettings) -> Result<Self> {
        if settings.k_period == 0 || settings.d_period == 0 {
            return Err(Error::invalid_parameter("stochastic", "periods must be positive integers"));
        }
        validate_thresholds(settings.oversold, settings.overbought)?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &StochasticSettings {
        &self.settings
    }

    fn indicator(&self) -> IndicatorKind {
        IndicatorKind::Stochastic {
            k_period: self.settings.k_period,
            d_period: self.settings.d_period,
        }
    }
}

impl SignalRule for StochasticReversion {
    fn name(&self) -> &'static str {
        "STOCHASTIC"
    }

    fn indicators(&self) -> Vec<IndicatorKind> {
        vec![self.indicator()]
    }

    // Only %K drives the rule, so %D's extra warm-up does not apply.
    fn warmup(&self) -> usize {
        self.settings.k_period
    }

    fn apply(&self, cache: &IndicatorCache<'_>) -> Result<SignalSeries> {
        let percent_k = column(lookup(cache, &self.indicator())?, PERCENT_K)?;
        Ok(percent_k
            .iter()
            .map(|k| band(*k, self.settings.oversold, self.settings.overbought))
            .collect())
    }
}
