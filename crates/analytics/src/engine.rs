// In crates/analytics/src/engine.rs

use crate::types::{BacktestReport, BarRecord, EquityPoint};

/// The engine responsible for turning per-bar records into a report.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsEngine {
    initial_capital: f64,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self { initial_capital: 1.0 }
    }
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scales the equity curve; returns and ratios are unaffected.
    pub fn with_initial_capital(initial_capital: f64) -> Self {
        Self { initial_capital }
    }

    /// Calculates a full report from the bar records of one backtest.
    pub fn calculate(&self, records: &[BarRecord]) -> BacktestReport {
        let mut report = BacktestReport::new();
        report.bars = records.len();
        report.num_trades = count_trades(records);

        let returns: Vec<f64> = records.iter().filter_map(|r| r.strategy_return).collect();
        report.evaluated_bars = returns.len();
        report.insufficient_data = returns.is_empty();
        if report.insufficient_data {
            return report;
        }

        // 1. Returns, both conventions
        report.total_return = returns.iter().map(|r| 1.0 + r).product::<f64>() - 1.0;
        report.total_return_simple = returns.iter().sum();

        // 2. Win rate and exposure, over bars that actually held a position
        let active: Vec<f64> = records
            .iter()
            .filter(|r| r.is_active())
            .filter_map(|r| r.strategy_return)
            .collect();
        report.active_bars = active.len();
        report.winning_bars = active.iter().filter(|r| **r > 0.0).count();
        report.losing_bars = active.iter().filter(|r| **r < 0.0).count();
        report.win_rate_defined = !active.is_empty();
        if report.win_rate_defined {
            report.win_rate = report.winning_bars as f64 / report.active_bars as f64;
        }
        report.exposure = report.active_bars as f64 / report.bars as f64;

        // 3. Profit factor
        let gross_profit: f64 = active.iter().filter(|r| **r > 0.0).sum();
        let gross_loss: f64 = active.iter().filter(|r| **r < 0.0).map(|r| -r).sum();
        report.profit_factor = (gross_loss > 0.0).then(|| gross_profit / gross_loss);

        // 4. Equity curve and max drawdown
        report.equity_curve = self.equity_curve(records);
        report.max_drawdown = max_drawdown(&report.equity_curve);

        // 5. Sharpe ratio (per bar)
        report.sharpe_ratio = sharpe(&returns);

        report
    }

    /// Compounds strategy returns from the initial capital; undefined bars carry the value forward.
    pub fn equity_curve(&self, records: &[BarRecord]) -> Vec<EquityPoint> {
        let mut value = self.initial_capital;
        records
            .iter()
            .map(|record| {
                if let Some(r) = record.strategy_return {
                    value *= 1.0 + r;
                }
                EquityPoint {
                    timestamp: record.timestamp,
                    value,
                }
            })
            .collect()
    }
}

/// Sum of absolute changes between successive defined positions.
///
/// Undefined bars are skipped, so a gap inside a run is not an exit and a
/// re-entry. Holdings start flat: entering after warm-up is one trade and a
/// long-to-short reversal is two.
pub fn count_trades(records: &[BarRecord]) -> u32 {
    let mut held = 0_i8;
    let mut trades = 0;
    for position in records.iter().filter_map(|record| record.position) {
        trades += u32::from((position.value() - held).unsigned_abs());
        held = position.value();
    }
    trades
}

fn max_drawdown(curve: &[EquityPoint]) -> f64 {
    let mut peak = f64::MIN;
    let mut worst = 0.0_f64;
    for point in curve {
        peak = peak.max(point.value);
        if peak > 0.0 {
            worst = worst.max((peak - point.value) / peak);
        }
    }
    worst
}

fn sharpe(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    if std_dev > 0.0 { mean / std_dev } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use core_types::Signal;

    fn at(i: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(i)
    }

    fn records(rows: &[(Option<i8>, Option<f64>)]) -> Vec<BarRecord> {
        rows.iter()
            .enumerate()
            .map(|(i, (position, bar_return))| {
                let position = position.map(|p| Signal::try_from(p).unwrap());
                BarRecord::new(at(i as i64), position, *bar_return)
            })
            .collect()
    }

    #[test]
    fn compounded_and_simple_returns() {
        let rows = records(&[(None, None), (Some(1), Some(0.10)), (Some(1), Some(-0.05)), (Some(-1), Some(-0.02))]);
        let report = AnalyticsEngine::new().calculate(&rows);

        let compounded = 1.10 * 0.95 * 1.02 - 1.0;
        assert!((report.total_return - compounded).abs() < 1e-12);
        assert!((report.total_return_simple - 0.07).abs() < 1e-12);
        assert_eq!(report.winning_bars, 2);
        assert_eq!(report.losing_bars, 1);
        assert!((report.win_rate - 2.0 / 3.0).abs() < 1e-12);
        assert!(report.win_rate_defined);
        assert_eq!(report.num_trades, 3);
    }

    #[test]
    fn trade_counting_reversal_counts_twice() {
        // signal [0, 1, 1, -1, -1, 0] lagged one bar
        let rows = records(&[
            (None, None),
            (Some(0), Some(0.01)),
            (Some(1), Some(0.01)),
            (Some(1), Some(0.01)),
            (Some(-1), Some(0.01)),
            (Some(-1), Some(0.01)),
        ]);
        assert_eq!(count_trades(&rows), 3);
    }

    #[test]
    fn undefined_bars_inside_a_run_are_not_trades() {
        let rows = records(&[
            (None, None),
            (Some(1), Some(0.01)),
            (None, Some(0.01)),
            (None, Some(-0.02)),
            (Some(1), Some(0.01)),
            (Some(-1), Some(-0.01)),
        ]);
        // enter long, hold across the gap, reverse
        assert_eq!(count_trades(&rows), 3);

        let report = AnalyticsEngine::new().calculate(&rows);
        assert_eq!(report.num_trades, 3);
        assert_eq!(report.active_bars, 3);
        assert_eq!(report.winning_bars, 3);
        assert!((report.total_return_simple - 0.03).abs() < 1e-12);
    }

    #[test]
    fn flat_bars_are_not_in_the_win_rate() {
        let rows = records(&[(Some(0), Some(0.05)), (Some(0), Some(-0.05)), (Some(1), Some(0.01))]);
        let report = AnalyticsEngine::new().calculate(&rows);
        assert_eq!(report.active_bars, 1);
        assert_eq!(report.win_rate, 1.0);
        assert!((report.exposure - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(report.profit_factor, None);
    }

    #[test]
    fn all_flat_has_undefined_win_rate() {
        let rows = records(&[(Some(0), Some(0.05)), (Some(0), Some(-0.05))]);
        let report = AnalyticsEngine::new().calculate(&rows);
        assert!(!report.win_rate_defined);
        assert_eq!(report.win_rate, 0.0);
        assert_eq!(report.total_return, 0.0);
        assert!(!report.insufficient_data);
    }

    #[test]
    fn no_defined_returns_is_insufficient_data() {
        let rows = records(&[(None, None), (None, Some(0.01)), (None, Some(0.02))]);
        let report = AnalyticsEngine::new().calculate(&rows);
        assert!(report.insufficient_data);
        assert_eq!(report.num_trades, 0);
        assert_eq!(report.total_return, 0.0);
        assert!(report.equity_curve.is_empty());
    }

    #[test]
    fn drawdown_is_measured_from_the_running_peak() {
        let rows = records(&[(Some(1), Some(0.5)), (Some(1), Some(-0.5)), (Some(1), Some(0.2))]);
        let engine = AnalyticsEngine::with_initial_capital(100.0);
        let report = engine.calculate(&rows);
        let values: Vec<f64> = report.equity_curve.iter().map(|p| p.value).collect();
        assert_eq!(values.len(), 3);
        assert!((values[0] - 150.0).abs() < 1e-9);
        assert!((values[1] - 75.0).abs() < 1e-9);
        assert!((report.max_drawdown - 0.5).abs() < 1e-12);
        let profit_factor = report.profit_factor.unwrap();
        assert!((profit_factor - 1.4).abs() < 1e-9);
    }

    #[test]
    fn report_serializes_without_losses() {
        let rows = records(&[(None, None), (Some(1), Some(0.01)), (Some(1), Some(0.02))]);
        let report = AnalyticsEngine::new().calculate(&rows);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["profit_factor"].is_null());
        assert_eq!(json["num_trades"], 1);
        assert_eq!(json["equity_curve"].as_array().unwrap().len(), 3);
    }
}
