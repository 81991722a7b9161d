// In crates/optimizer/src/sweep.rs

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use analytics::BacktestReport;
use rayon::ThreadPool;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::score::{Scored, score};
use crate::CancellationToken;

/// Why a grid cell produced no report.
pub(crate) enum CellError {
    /// The parameters are structurally invalid; the cell is skipped.
    Invalid(strategies::Error),
    /// The backtest itself failed; the cell is excluded.
    Failed(backtester::Error),
}

enum Cell<P> {
    Scored(Scored<P>),
    Skipped,
    Failed,
    Cancelled,
}

/// What happened to each cell of a sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepCounters {
    pub evaluated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub cancelled: usize,
}

/// Evaluates every cell on `pool`, returning scored runs in enumeration order.
///
/// A panic inside `evaluate` is contained to its cell and counted as a failure.
pub(crate) fn run_cells<P, F>(
    pool: &ThreadPool,
    cells: Vec<P>,
    token: &CancellationToken,
    label: &str,
    evaluate: F,
) -> (Vec<Scored<P>>, SweepCounters)
where
    P: Send + fmt::Display,
    F: Fn(&P) -> Result<BacktestReport, CellError> + Sync,
{
    let outcomes: Vec<Cell<P>> = pool.install(|| {
        cells
            .into_par_iter()
            .enumerate()
            .map(|(index, params)| {
                if token.is_cancelled() {
                    return Cell::Cancelled;
                }
                match panic::catch_unwind(AssertUnwindSafe(|| evaluate(&params))) {
                    Ok(Ok(report)) => Cell::Scored(Scored {
                        index,
                        score: score(&report),
                        params,
                        report,
                    }),
                    Ok(Err(CellError::Invalid(error))) => {
                        debug!(sweep = label, params = %params, error = %error, "Skipping invalid combination");
                        Cell::Skipped
                    }
                    Ok(Err(CellError::Failed(error))) => {
                        warn!(sweep = label, params = %params, error = %error, "Backtest failed for combination");
                        Cell::Failed
                    }
                    Err(_) => {
                        warn!(sweep = label, params = %params, "Backtest panicked for combination");
                        Cell::Failed
                    }
                }
            })
            .collect()
    });

    let mut counters = SweepCounters::default();
    let mut runs = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Cell::Scored(run) => {
                counters.evaluated += 1;
                runs.push(run);
            }
            Cell::Skipped => counters.skipped += 1,
            Cell::Failed => counters.failed += 1,
            Cell::Cancelled => counters.cancelled += 1,
        }
    }
    (runs, counters)
}
