// In crates/engine/src/assessor.rs

use backtester::Backtester;
use core_types::{Granularity, Instrument, PriceSeries};
use market_data::MarketDataProvider;
use strategies::{SignalRule, current_signal};
use tracing::{info, warn};

use crate::Result;
use crate::control::{CASCADE, ControlOutcome, ControlStep, GranularityReport};
use crate::light::TradeLight;

/// Bars requested per granularity unless configured otherwise.
pub const DEFAULT_CANDLE_COUNT: usize = 5000;

/// Runs a control step for an instrument against live or stored data.
pub struct Assessor<P, R> {
    provider: P,
    rule: R,
    step: ControlStep,
    backtester: Backtester,
    count: usize,
}

impl<P: MarketDataProvider, R: SignalRule> Assessor<P, R> {
    pub fn new(provider: P, rule: R, step: ControlStep) -> Self {
        Self {
            provider,
            rule,
            step,
            backtester: Backtester::default(),
            count: DEFAULT_CANDLE_COUNT,
        }
    }

    pub fn with_candle_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    fn fetch(&self, instrument: &Instrument, granularity: Granularity) -> Option<PriceSeries> {
        match self.provider.candles(instrument, granularity, self.count) {
            Ok(series) => Some(series),
            Err(e) => {
                warn!(instrument = %instrument, granularity = %granularity, error = %e, "Failed to get historical data.");
                None
            }
        }
    }

    /// Backtests the rule from the longest granularity down, stopping at the
    /// first that does not qualify, and returns the next light.
    ///
    /// When every granularity passes, the outcome carries the rule's signal on
    /// the latest minute bar.
    pub fn assess(&self, instrument: &Instrument, state: TradeLight) -> Result<ControlOutcome> {
        info!(instrument = %instrument, state = %state, "Analyzing instrument.");
        let mut reports = Vec::with_capacity(CASCADE.len());
        let mut latest = None;

        for granularity in CASCADE {
            let series = self.fetch(instrument, granularity);
            let report = match &series {
                Some(series) => Some(self.backtester.run_strategy(series, &self.rule)?),
                None => None,
            };
            let passed = self.step.verdict(granularity, report.as_ref()).is_pass();
            reports.push(GranularityReport { granularity, report });
            latest = series;
            if !passed {
                break;
            }
        }

        let mut outcome = self.step.evaluate(state, &reports);
        if outcome.should_trade {
            if let Some(series) = &latest {
                outcome.signal = current_signal(series, &self.rule)?;
            }
            info!(instrument = %instrument, signal = ?outcome.signal, "Cascade passed; trading allowed.");
        }
        Ok(outcome)
    }
}
