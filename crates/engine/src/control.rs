// In crates/engine/src/control.rs

use analytics::BacktestReport;
use core_types::{Granularity, Signal};
use serde::Serialize;
use tracing::info;

use crate::light::{TradeLight, Verdict};

/// Granularities checked by a control step, longest first.
pub const CASCADE: [Granularity; 3] = [Granularity::Month, Granularity::Day, Granularity::Minute];

/// A backtest of the control strategy at one granularity, if data was available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GranularityReport {
    pub granularity: Granularity,
    pub report: Option<BacktestReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlOutcome {
    pub state: TradeLight,
    /// True only when every granularity in the cascade passed.
    pub should_trade: bool,
    /// One verdict per granularity checked, stopping at the first that did not pass.
    pub verdicts: Vec<Verdict>,
    /// The current minute-level signal when trading is allowed.
    pub signal: Option<Signal>,
}

/// One pass of the monthly, daily, minute cascade.
///
/// The light is an explicit value: the caller passes the previous state in and
/// keeps the returned one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlStep {
    min_win_rate: f64,
}

impl Default for ControlStep {
    fn default() -> Self {
        Self { min_win_rate: 0.5 }
    }
}

impl ControlStep {
    pub fn new(min_win_rate: f64) -> Self {
        Self { min_win_rate }
    }

    /// Profitable with a win rate strictly above the minimum.
    pub fn qualifies(&self, report: &BacktestReport) -> bool {
        report.total_return > 0.0 && report.win_rate > self.min_win_rate
    }

    pub fn verdict(&self, granularity: Granularity, report: Option<&BacktestReport>) -> Verdict {
        match report {
            None => Verdict::Missing(granularity),
            Some(report) if self.qualifies(report) => Verdict::Pass(granularity),
            Some(_) => Verdict::Fail(granularity),
        }
    }

    pub fn evaluate(&self, state: TradeLight, reports: &[GranularityReport]) -> ControlOutcome {
        let mut state = state;
        let mut verdicts = Vec::with_capacity(CASCADE.len());

        for granularity in CASCADE {
            let report = reports
                .iter()
                .find(|r| r.granularity == granularity)
                .and_then(|r| r.report.as_ref());
            let verdict = self.verdict(granularity, report);
            state = state.transition(verdict);
            info!(granularity = %granularity, ?verdict, state = %state, "Control cascade step.");
            verdicts.push(verdict);

            if !verdict.is_pass() {
                return ControlOutcome {
                    state,
                    should_trade: false,
                    verdicts,
                    signal: None,
                };
            }
        }

        ControlOutcome {
            state,
            should_trade: true,
            verdicts,
            signal: None,
        }
    }
}
