// In crates/analytics/src/types.rs

use chrono::{DateTime, Utc};
use core_types::Signal;
use serde::{Deserialize, Serialize};

/// One bar of backtest accounting.
///
/// `strategy_return` is defined only when both the lagged position and the bar
/// return are defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarRecord {
    pub timestamp: DateTime<Utc>,
    pub position: Option<Signal>,
    pub bar_return: Option<f64>,
    pub strategy_return: Option<f64>,
}

impl BarRecord {
    /// Records a bar, deriving the strategy return from position and bar return.
    pub fn new(timestamp: DateTime<Utc>, position: Option<Signal>, bar_return: Option<f64>) -> Self {
        let strategy_return = match (position, bar_return) {
            (Some(position), Some(r)) => Some(f64::from(position.value()) * r),
            _ => None,
        };
        Self {
            timestamp,
            position,
            bar_return,
            strategy_return,
        }
    }

    /// True when the bar counts towards win rate and exposure.
    pub fn is_active(&self) -> bool {
        self.strategy_return.is_some() && self.position.is_some_and(|p| p != Signal::Flat)
    }
}

/// A struct to hold a point in the strategy's equity curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Aggregate performance of one signal series over one price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BacktestReport {
    /// Compounded: `prod(1 + r) - 1` over bars with a defined strategy return.
    pub total_return: f64,
    /// Additive: `sum(r)` over the same bars.
    pub total_return_simple: f64,
    /// Sum of absolute position changes; a reversal counts twice.
    pub num_trades: u32,
    /// Winning bars over active bars, in `0.0..=1.0`.
    pub win_rate: f64,
    /// False when no bar held a non-flat position, in which case `win_rate` is 0.
    pub win_rate_defined: bool,
    /// Set when no bar had a defined strategy return.
    pub insufficient_data: bool,

    pub bars: usize,
    pub evaluated_bars: usize,
    pub active_bars: usize,
    pub winning_bars: usize,
    pub losing_bars: usize,
    /// Active bars over all bars.
    pub exposure: f64,
    /// Largest peak-to-trough fall of the equity curve, as a fraction of the peak.
    pub max_drawdown: f64,
    /// Per-bar Sharpe ratio (mean over population standard deviation), not annualized.
    pub sharpe_ratio: f64,
    /// Gross profit over gross loss; `None` when there were no losing bars.
    pub profit_factor: Option<f64>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub equity_curve: Vec<EquityPoint>,
}

impl BacktestReport {
    /// Creates a new, empty report with every metric at zero.
    pub fn new() -> Self {
        Self::default()
    }
}
