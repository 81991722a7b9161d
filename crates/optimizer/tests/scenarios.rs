// In crates/optimizer/tests/scenarios.rs

use std::collections::BTreeMap;

use backtester::Backtester;
use chrono::{Duration, TimeZone, Utc};
use core_types::{Bar, PriceSeries, Signal};
use optimizer::{CancellationToken, Error, Optimizer, ParamRange, ParameterGrid, score};
use strategies::{ParamValue, ParameterSet, SignalRule, Strategy, StrategyFamily};

fn series(closes: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, c)| Bar::new(start + Duration::hours(i as i64), *c, c * 1.002, c * 0.998, *c))
        .collect();
    PriceSeries::new(bars).unwrap()
}

fn wave(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            100.0 + 8.0 * (t / 6.0).sin() + 3.0 * (t / 2.3).cos() + 0.05 * t
        })
        .collect()
}

fn ints(values: &[i64]) -> ParamRange {
    ParamRange::List(values.iter().map(|v| ParamValue::Int(*v)).collect())
}

#[test]
fn sma_follows_a_monotonic_uptrend() {
    let closes: Vec<f64> = (100..130).map(f64::from).collect();
    let s = series(&closes);
    let rule = Strategy::from_params(StrategyFamily::Sma, &ParameterSet::new().with("period", 5)).unwrap();

    let signals = rule.generate(&s).unwrap();
    assert!(signals[..4].iter().all(Option::is_none));
    assert!(signals[4..].iter().all(|s| *s == Some(Signal::Long)));

    let report = Backtester::default().run(&s, &signals).unwrap();
    assert!(report.total_return > 0.0);
    assert_eq!(report.num_trades, 1);
    assert_eq!(report.win_rate, 1.0);
}

#[test]
fn rsi_buys_the_tail_of_a_sharp_decline() {
    let mut closes: Vec<f64> = (0..20).map(|i| 200.0 - 2.0 * f64::from(i)).collect();
    closes.extend(std::iter::repeat_n(162.0, 10));
    let s = series(&closes);
    let rule = Strategy::from_params(StrategyFamily::Rsi, &ParameterSet::new().with("period", 14)).unwrap();

    let signals = rule.generate(&s).unwrap();
    assert!(signals[..14].iter().all(Option::is_none));
    assert!(signals[14..20].iter().all(|s| *s == Some(Signal::Long)));
}

#[test]
fn short_series_yields_an_empty_report() {
    let s = series(&[100.0, 101.0, 102.0]);
    let rule = Strategy::from_params(StrategyFamily::Rsi, &ParameterSet::new().with("period", 14)).unwrap();
    let report = Backtester::default().run_strategy(&s, &rule).unwrap();
    assert_eq!(report.num_trades, 0);
    assert_eq!(report.total_return, 0.0);
    assert_eq!(report.win_rate, 0.0);
    assert!(!report.win_rate_defined);
}

#[test]
fn invalid_crossover_cells_are_skipped() {
    let s = series(&wave(120));
    let grid = ParameterGrid::new()
        .with("fast_period", ints(&[5, 30]))
        .with("slow_period", ints(&[20, 30]));
    let result = Optimizer::new(3).optimize(&s, StrategyFamily::EmaCrossover, &grid).unwrap();

    assert_eq!(result.combinations, 4);
    assert_eq!(result.counters.skipped, 2);
    assert_eq!(result.counters.evaluated, 2);
    assert_eq!(result.top.len(), 2);
}

#[test]
fn entirely_invalid_grid_is_an_error() {
    let s = series(&wave(60));
    let grid = ParameterGrid::new()
        .with("fast_period", ints(&[30]))
        .with("slow_period", ints(&[10, 20]));
    let err = Optimizer::new(3).optimize(&s, StrategyFamily::SmaCrossover, &grid).unwrap_err();
    assert!(matches!(err, Error::NoValidCombinations { combinations: 2, .. }));
}

#[test]
fn top_result_beats_every_evaluated_candidate() {
    let s = series(&wave(200));
    let grid = ParameterGrid::new()
        .with("period", ints(&[5, 10, 14, 20]))
        .with("overbought", ints(&[60, 70]))
        .with("oversold", ints(&[30, 40]));
    let result = Optimizer::new(3).optimize(&s, StrategyFamily::Rsi, &grid).unwrap();
    let best = result.best().unwrap();

    for params in grid.expand().unwrap() {
        let rule = Strategy::from_params(StrategyFamily::Rsi, &params).unwrap();
        let report = Backtester::default().run_strategy(&s, &rule).unwrap();
        assert!(best.score >= score(&report), "{params} beat the top result");
    }
    assert!(result.top.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn sweeps_are_deterministic_across_runs_and_thread_counts() {
    let s = series(&wave(150));
    let grid = ParameterGrid::new()
        .with("fast_period", ints(&[3, 5, 8]))
        .with("slow_period", ints(&[13, 21, 34]))
        .with("signal_period", ints(&[5, 9]));

    let single = Optimizer::new(5).with_threads(1).optimize(&s, StrategyFamily::Macd, &grid).unwrap();
    let again = Optimizer::new(5).with_threads(1).optimize(&s, StrategyFamily::Macd, &grid).unwrap();
    let parallel = Optimizer::new(5).with_threads(4).optimize(&s, StrategyFamily::Macd, &grid).unwrap();

    assert_eq!(single.top, again.top);
    assert_eq!(single.top, parallel.top);
}

#[test]
fn cancelled_sweep_returns_what_it_has() {
    let s = series(&wave(80));
    let token = CancellationToken::new();
    token.cancel();
    let grid = ParameterGrid::new().with("period", ints(&[5, 10, 20]));
    let result = Optimizer::new(3)
        .with_cancellation(token)
        .optimize(&s, StrategyFamily::Sma, &grid)
        .unwrap();
    assert_eq!(result.counters.cancelled, 3);
    assert!(result.top.is_empty());
}

#[test]
fn composite_combines_each_familys_best() {
    let s = series(&wave(200));
    let mut families = BTreeMap::new();
    families.insert(StrategyFamily::Sma, ParameterGrid::new().with("period", ints(&[5, 10, 20])));
    families.insert(
        StrategyFamily::Stochastic,
        ParameterGrid::new()
            .with("k_period", ints(&[10, 14]))
            .with("d_period", ints(&[3])),
    );
    // every cell invalid: left out rather than failing the composite
    families.insert(
        StrategyFamily::SmaCrossover,
        ParameterGrid::new()
            .with("fast_period", ints(&[50]))
            .with("slow_period", ints(&[10])),
    );

    let result = Optimizer::new(3).optimize_composite(&s, &families, 2).unwrap();
    assert_eq!(result.families.len(), 2);
    assert_eq!(result.combinations, 4);
    let best = result.best().unwrap();
    assert_eq!(best.params.0.len(), 2);
    assert_eq!(best.params.0[0].family, StrategyFamily::Sma);
    assert_eq!(best.params.0[1].family, StrategyFamily::Stochastic);
}

#[test]
fn composite_accounting_skips_undefined_bars_mid_series() {
    // decline, then a run of pure gains (RSI has no losses to divide by), then chop
    let mut closes: Vec<f64> = (0..10).map(|i| 100.0 - f64::from(i)).collect();
    closes.extend((1..=12).map(|i| 91.0 + f64::from(i)));
    closes.extend((0..20).map(|i| if i % 2 == 0 { 101.0 - f64::from(i) * 0.1 } else { 104.0 + f64::from(i) * 0.1 }));
    let s = series(&closes);

    let grid = ParameterGrid::new().with("period", ints(&[5]));
    let rule = Strategy::from_params(StrategyFamily::Rsi, &ParameterSet::new().with("period", 5)).unwrap();
    let signals = rule.generate(&s).unwrap();
    let first = signals.iter().position(Option::is_some).unwrap();
    let last = signals.iter().rposition(Option::is_some).unwrap();
    assert!(signals[first..last].iter().any(Option::is_none), "fixture needs an undefined stretch");

    let mut families = BTreeMap::new();
    families.insert(StrategyFamily::Rsi, grid);
    let result = Optimizer::new(3).optimize_composite(&s, &families, 1).unwrap();
    let best = result.best().unwrap();

    let mut held = 0_i8;
    let mut expected_trades = 0_u32;
    for position in backtester::positions(&signals).into_iter().flatten().map(i8::from) {
        expected_trades += u32::from((position - held).unsigned_abs());
        held = position;
    }
    let defined_positions = backtester::positions(&signals).iter().flatten().count();

    assert_eq!(best.report.num_trades, expected_trades);
    assert!(best.report.evaluated_bars < s.len() - 1);
    assert!(best.report.evaluated_bars <= defined_positions);
    assert_eq!(best.report, Backtester::default().run(&s, &signals).unwrap());
}
