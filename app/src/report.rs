// In app/src/report.rs

use analytics::BacktestReport;
use anyhow::Result;
use engine::ControlOutcome;
use optimizer::{CompositeResult, OptimizationResult, SweepCounters};
use serde::Serialize;

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_backtest(title: &str, report: &BacktestReport) {
    println!("\n--- {title} ---");
    if report.insufficient_data {
        println!("Not enough bars to evaluate ({} bars).", report.bars);
        return;
    }
    println!("Bars:            {} ({} evaluated, {} in market)", report.bars, report.evaluated_bars, report.active_bars);
    println!("Total Return:    {:.4}% (simple {:.4}%)", report.total_return * 100.0, report.total_return_simple * 100.0);
    println!("Trades:          {}", report.num_trades);
    if report.win_rate_defined {
        println!("Win Rate:        {:.2}%", report.win_rate * 100.0);
    } else {
        println!("Win Rate:        n/a");
    }
    println!("Max Drawdown:    {:.4}%", report.max_drawdown * 100.0);
    println!("Sharpe (per bar): {:.4}", report.sharpe_ratio);
    match report.profit_factor {
        Some(pf) => println!("Profit Factor:   {pf:.4}"),
        None => println!("Profit Factor:   n/a (no losing bars)"),
    }
    println!("Exposure:        {:.2}%", report.exposure * 100.0);
}

fn sweep_summary(combinations: usize, counters: &SweepCounters) -> String {
    let mut line = format!(
        "{combinations} combinations: {} evaluated, {} skipped, {} failed",
        counters.evaluated, counters.skipped, counters.failed
    );
    if counters.cancelled > 0 {
        line.push_str(&format!(" ({} cancelled)", counters.cancelled));
    }
    line
}

pub fn print_optimization(result: &OptimizationResult) {
    println!("\n--- {} optimization ---", result.family);
    println!("{}", sweep_summary(result.combinations, &result.counters));
    println!("{:<5} | {:<12} | {:<10} | {:<7} | {:<8} | Params", "Rank", "Score", "Return %", "Trades", "Win %");
    for (rank, candidate) in result.top.iter().enumerate() {
        println!(
            "{:<5} | {:<12.6} | {:<10.4} | {:<7} | {:<8.2} | {}",
            rank + 1,
            candidate.score,
            candidate.report.total_return * 100.0,
            candidate.report.num_trades,
            candidate.report.win_rate * 100.0,
            candidate.params
        );
    }
}

pub fn print_composite(result: &CompositeResult) {
    for family in &result.families {
        print_optimization(family);
    }
    println!("\n--- Composite ranking ---");
    println!("{}", sweep_summary(result.combinations, &result.counters));
    for (rank, candidate) in result.top.iter().enumerate() {
        println!(
            "#{:<3} score {:.6} | return {:.4}% | trades {} | {}",
            rank + 1,
            candidate.score,
            candidate.report.total_return * 100.0,
            candidate.report.num_trades,
            candidate.params
        );
    }
}

pub fn print_control(instrument: &str, outcome: &ControlOutcome) {
    println!("\n--- Control step for {instrument} ---");
    for verdict in &outcome.verdicts {
        println!("  {verdict:?}");
    }
    println!("Light:        {}", outcome.state);
    println!("Should trade: {}", outcome.should_trade);
    match outcome.signal {
        Some(signal) => println!("Signal:       {signal:?}"),
        None => println!("Signal:       none"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_mentions_cancellation_only_when_it_happened() {
        let finished = SweepCounters {
            evaluated: 7,
            skipped: 2,
            failed: 0,
            cancelled: 0,
        };
        assert_eq!(sweep_summary(9, &finished), "9 combinations: 7 evaluated, 2 skipped, 0 failed");

        let stopped = SweepCounters {
            evaluated: 3,
            cancelled: 6,
            ..SweepCounters::default()
        };
        assert_eq!(
            sweep_summary(9, &stopped),
            "9 combinations: 3 evaluated, 0 skipped, 0 failed (6 cancelled)"
        );
    }
}
