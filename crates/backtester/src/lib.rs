// In crates/backtester/src/lib.rs

//! Bar-by-bar simulation of a single position driven by a signal series.
//!
//! The position held during bar `t` is the signal computed at bar `t - 1`, so
//! no bar ever trades on its own close.

pub mod error;

pub use error::{Error, Result};

use analytics::{AnalyticsEngine, BacktestReport, BarRecord};
use core_types::{PriceSeries, SignalSeries};
use strategies::SignalRule;
use tracing::debug;

/// Lags a signal series by exactly one bar. The first position is undefined.
pub fn positions(signals: &SignalSeries) -> SignalSeries {
    std::iter::once(None)
        .chain(signals.iter().copied())
        .take(signals.len())
        .collect()
}

/// Close-to-close returns; the first bar has none.
pub fn bar_returns(series: &PriceSeries) -> Vec<Option<f64>> {
    let closes = series.closes();
    std::iter::once(None)
        .chain(closes.windows(2).map(|w| Some((w[1] - w[0]) / w[0])))
        .take(closes.len())
        .collect()
}

/// The main engine for running historical backtests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Backtester {
    analytics: AnalyticsEngine,
}

impl Backtester {
    pub fn new(analytics: AnalyticsEngine) -> Self {
        Self { analytics }
    }

    /// The per-bar accounting for `signals` over `series`.
    pub fn records(&self, series: &PriceSeries, signals: &SignalSeries) -> Result<Vec<BarRecord>> {
        if series.len() != signals.len() {
            return Err(Error::LengthMismatch {
                bars: series.len(),
                signals: signals.len(),
            });
        }

        let records = series
            .timestamps()
            .into_iter()
            .zip(positions(signals))
            .zip(bar_returns(series))
            .map(|((timestamp, position), bar_return)| BarRecord::new(timestamp, position, bar_return))
            .collect();
        Ok(records)
    }

    /// Simulates `signals` over `series` and reports aggregate performance.
    pub fn run(&self, series: &PriceSeries, signals: &SignalSeries) -> Result<BacktestReport> {
        let records = self.records(series, signals)?;
        let report = self.analytics.calculate(&records);
        debug!(
            bars = report.bars,
            evaluated = report.evaluated_bars,
            trades = report.num_trades,
            total_return = report.total_return,
            win_rate = report.win_rate,
            "Backtest complete"
        );
        Ok(report)
    }

    /// Generates the rule's signals over `series` and backtests them.
    pub fn run_strategy<R: SignalRule + ?Sized>(&self, series: &PriceSeries, rule: &R) -> Result<BacktestReport> {
        let signals = rule.generate(series)?;
        self.run(series, &signals)
    }
}
