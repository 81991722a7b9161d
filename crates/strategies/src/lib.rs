// In crates/strategies/src/lib.rs

//! Signal rules for each strategy family.
//!
//! A rule declares the indicators it reads, pulls them from an
//! [`IndicatorCache`] and turns them into one [`Signal`] per bar. Bars where any
//! input is undefined stay `None` so the backtester can leave them out.

use core_types::{PriceSeries, Signal, SignalSeries};
use indicators::{IndicatorCache, IndicatorKind, IndicatorResult};

pub mod bollinger;
pub mod combined;
pub mod error;
pub mod factory;
pub mod family;
pub mod ma_crossover;
pub mod macd;
pub mod params;
pub mod price_cross;
pub mod rsi;
pub mod stochastic;
pub mod types;

pub use combined::CombinedStrategy;
pub use error::{Error, Result};
pub use factory::Strategy;
pub use family::StrategyFamily;
pub use params::{ParamValue, ParameterSet};

/// The universal interface for a signal rule.
///
/// Rules are stateless: the same cache always yields the same signal series.
pub trait SignalRule {
    /// The name of the rule, e.g. "RSI".
    fn name(&self) -> &'static str;

    /// Every indicator `apply` will read from the cache.
    fn indicators(&self) -> Vec<IndicatorKind>;

    fn apply(&self, cache: &IndicatorCache<'_>) -> Result<SignalSeries>;

    /// Bars needed before the first defined signal.
    fn warmup(&self) -> usize {
        self.indicators()
            .iter()
            .filter_map(|kind| kind.build().ok())
            .map(|indicator| indicator.warmup())
            .max()
            .unwrap_or(0)
    }

    /// Computes the required indicators over `series` and applies the rule.
    fn generate(&self, series: &PriceSeries) -> Result<SignalSeries> {
        let mut cache = IndicatorCache::new(series);
        for kind in self.indicators() {
            cache.ensure(&kind)?;
        }
        self.apply(&cache)
    }
}

/// The signal for the most recent bar, if it is defined.
///
/// This is the value an external trading loop polls.
pub fn current_signal<R: SignalRule + ?Sized>(series: &PriceSeries, rule: &R) -> Result<Option<Signal>> {
    let signals = rule.generate(series)?;
    Ok(signals.last().copied().flatten())
}

pub(crate) fn lookup<'c>(cache: &'c IndicatorCache<'_>, kind: &IndicatorKind) -> Result<&'c IndicatorResult> {
    cache
        .get(kind)
        .ok_or_else(|| Error::MissingIndicator(kind.key()))
}

pub(crate) fn column<'c>(result: &'c IndicatorResult, name: &str) -> Result<&'c [Option<f64>]> {
    result
        .column(name)
        .ok_or_else(|| Error::MissingIndicator(format!("{}.{name}", result.kind)))
}

/// `Long` when `a > b`, `Short` when `a < b`, `Flat` on a tie.
pub(crate) fn compare(a: Option<f64>, b: Option<f64>) -> Option<Signal> {
    let (a, b) = (a?, b?);
    Some(if a > b {
        Signal::Long
    } else if a < b {
        Signal::Short
    } else {
        Signal::Flat
    })
}

/// Mean-reversion banding: `Long` below `lower`, `Short` above `upper`.
pub(crate) fn band(value: Option<f64>, lower: f64, upper: f64) -> Option<Signal> {
    let value = value?;
    Some(if value < lower {
        Signal::Long
    } else if value > upper {
        Signal::Short
    } else {
        Signal::Flat
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{Duration, TimeZone, Utc};
    use core_types::{Bar, PriceSeries, Signal};

    pub fn series(closes: &[f64]) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, c)| Bar::new(start + Duration::hours(i as i64), *c, c + 0.5, c - 0.5, *c))
            .collect();
        PriceSeries::new(bars).unwrap()
    }

    pub fn values(signals: &[Option<Signal>]) -> Vec<Option<i8>> {
        signals.iter().map(|s| s.map(i8::from)).collect()
    }
}
