// In crates/optimizer/src/score.rs

use analytics::BacktestReport;
use serde::Serialize;

/// `total_return * win_rate * num_trades`.
///
/// Rewards configurations that are profitable, hit often and trade often over a
/// single lucky trade. A report without trades scores zero.
pub fn score(report: &BacktestReport) -> f64 {
    report.total_return * report.win_rate * f64::from(report.num_trades)
}

/// One evaluated grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scored<P> {
    /// Position of the cell in enumeration order.
    pub index: usize,
    pub params: P,
    pub score: f64,
    pub report: BacktestReport,
}

/// Sorts best first, keeps the first occurrence of each parameter set and
/// truncates to `top_k`.
///
/// Equal scores keep enumeration order, whatever order the cells finished in.
pub fn rank<P: PartialEq>(mut runs: Vec<Scored<P>>, top_k: usize) -> Vec<Scored<P>> {
    runs.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
    let mut ranked: Vec<Scored<P>> = Vec::with_capacity(top_k);
    for run in runs {
        if ranked.len() == top_k {
            break;
        }
        if !ranked.iter().any(|kept| kept.params == run.params) {
            ranked.push(run);
        }
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(index: usize, params: &str, score: f64) -> Scored<String> {
        Scored {
            index,
            params: params.to_string(),
            score,
            report: BacktestReport::new(),
        }
    }

    #[test]
    fn score_multiplies_the_three_metrics() {
        let report = BacktestReport {
            total_return: 0.1,
            win_rate: 0.5,
            num_trades: 4,
            ..BacktestReport::new()
        };
        assert!((score(&report) - 0.2).abs() < 1e-12);
        assert_eq!(score(&BacktestReport::new()), 0.0);
    }

    #[test]
    fn ties_keep_enumeration_order() {
        let runs = vec![run(3, "d", 1.0), run(1, "b", 2.0), run(2, "c", 1.0), run(0, "a", 1.0)];
        let ranked = rank(runs, 3);
        let order: Vec<usize> = ranked.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn duplicate_parameter_sets_are_kept_once() {
        let runs = vec![run(0, "a", 1.0), run(1, "a", 1.0), run(2, "b", 0.5)];
        let ranked = rank(runs, 3);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[1].params, "b");
    }

    #[test]
    fn negative_scores_rank_below_zero() {
        let ranked = rank(vec![run(0, "a", -0.3), run(1, "b", 0.0)], 1);
        assert_eq!(ranked[0].params, "b");
    }
}
