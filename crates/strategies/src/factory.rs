// In crates/strategies/src/factory.rs

use core_types::SignalSeries;
use indicators::{IndicatorCache, IndicatorKind};
use serde::de::DeserializeOwned;

use crate::bollinger::{BandReaction, BollingerRule};
use crate::ma_crossover::MACrossover;
use crate::macd::MacdCross;
use crate::price_cross::{MovingAverage, PriceCross};
use crate::rsi::RsiReversion;
use crate::stochastic::StochasticReversion;
use crate::{Error, ParameterSet, Result, SignalRule, StrategyFamily};

/// A configured signal rule of any family.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    PriceCross(PriceCross),
    MACrossover(MACrossover),
    Rsi(RsiReversion),
    Macd(MacdCross),
    Bollinger(BollingerRule),
    Stochastic(StochasticReversion),
}

impl Strategy {
    /// Builds and validates a strategy from a flat parameter set.
    ///
    /// Parameter names follow the family's settings struct; unknown names are
    /// rejected rather than ignored.
    pub fn from_params(family: StrategyFamily, params: &ParameterSet) -> Result<Self> {
        Ok(match family {
            StrategyFamily::Sma => Strategy::PriceCross(PriceCross::new(MovingAverage::Simple, settings(params)?)?),
            StrategyFamily::Ema => {
                Strategy::PriceCross(PriceCross::new(MovingAverage::Exponential, settings(params)?)?)
            }
            StrategyFamily::SmaCrossover => {
                Strategy::MACrossover(MACrossover::new(MovingAverage::Simple, settings(params)?)?)
            }
            StrategyFamily::EmaCrossover => {
                Strategy::MACrossover(MACrossover::new(MovingAverage::Exponential, settings(params)?)?)
            }
            StrategyFamily::Rsi => Strategy::Rsi(RsiReversion::new(settings(params)?)?),
            StrategyFamily::Macd => Strategy::Macd(MacdCross::new(settings(params)?)?),
            StrategyFamily::BollingerBands => {
                Strategy::Bollinger(BollingerRule::new(BandReaction::Reversion, settings(params)?)?)
            }
            StrategyFamily::BollingerBreakout => {
                Strategy::Bollinger(BollingerRule::new(BandReaction::Breakout, settings(params)?)?)
            }
            StrategyFamily::Stochastic => Strategy::Stochastic(StochasticReversion::new(settings(params)?)?),
        })
    }

    fn rule(&self) -> &dyn SignalRule {
        match self {
            Strategy::PriceCross(rule) => rule,
            Strategy::MACrossover(rule) => rule,
            Strategy::Rsi(rule) => rule,
            Strategy::Macd(rule) => rule,
            Strategy::Bollinger(rule) => rule,
            Strategy::Stochastic(rule) => rule,
        }
    }
}

fn settings<T: DeserializeOwned>(params: &ParameterSet) -> Result<T> {
    // Periods and thresholds are never negative.
    if let Some((name, value)) = params.iter().find(|(_, value)| value.as_f64() < 0.0) {
        return Err(Error::invalid_parameter(
            name.as_str(),
            format!("must not be negative, got {value}"),
        ));
    }
    params.to_toml().try_into().map_err(|source| Error::Parameters {
        params: params.to_string(),
        source,
    })
}

impl SignalRule for Strategy {
    fn name(&self) -> &'static str {
        self.rule().name()
    }

    fn indicators(&self) -> Vec<IndicatorKind> {
        self.rule().indicators()
    }

    fn warmup(&self) -> usize {
        self.rule().warmup()
    }

    fn apply(&self, cache: &IndicatorCache<'_>) -> Result<SignalSeries> {
        self.rule().apply(cache)
    }
}
