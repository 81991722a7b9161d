// In crates/optimizer/src/lib.rs

//! Exhaustive parameter search over strategy families.
//!
//! Grid cells run on a rayon pool but results are ranked by score and then by
//! enumeration index, so the output never depends on which thread finished
//! first.

use analytics::BacktestReport;
use backtester::Backtester;
use core_types::PriceSeries;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Serialize;
use strategies::{ParameterSet, Strategy, StrategyFamily};
use tracing::info;

pub mod cancel;
pub mod composite;
pub mod error;
pub mod grid;
pub mod score;
mod sweep;

pub use cancel::CancellationToken;
pub use composite::{Composition, CompositeResult, Member};
pub use error::{Error, Result};
pub use grid::{ParamRange, ParameterGrid};
pub use score::{Scored, rank, score};
pub use sweep::SweepCounters;

use sweep::{CellError, run_cells};

/// The number of results kept per sweep unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 3;

/// One ranked parameter set of a single family.
pub type Candidate = Scored<ParameterSet>;

/// The ranked outcome of one family's sweep.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    pub family: StrategyFamily,
    pub combinations: usize,
    /// Best first; at most `top_k` entries and possibly none.
    pub top: Vec<Candidate>,
    #[serde(flatten)]
    pub counters: SweepCounters,
}

impl OptimizationResult {
    pub fn best(&self) -> Option<&Candidate> {
        self.top.first()
    }
}

/// Runs grid searches with a fixed ranking depth and worker count.
#[derive(Debug, Clone)]
pub struct Optimizer {
    backtester: Backtester,
    top_k: usize,
    threads: usize,
    cancel: CancellationToken,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl Optimizer {
    pub fn new(top_k: usize) -> Self {
        Self {
            backtester: Backtester::default(),
            top_k,
            threads: 0,
            cancel: CancellationToken::new(),
        }
    }

    /// Worker threads for the sweep; 0 lets rayon pick one per core.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_backtester(mut self, backtester: Backtester) -> Self {
        self.backtester = backtester;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// A handle the caller can use to stop a running sweep.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn pool(&self) -> Result<ThreadPool> {
        info!(cores = self.threads, "Configuring Rayon thread pool.");
        Ok(ThreadPoolBuilder::new().num_threads(self.threads).build()?)
    }

    fn backtest(&self, series: &PriceSeries, strategy: &impl strategies::SignalRule) -> std::result::Result<BacktestReport, CellError> {
        self.backtester
            .run_strategy(series, strategy)
            .map_err(CellError::Failed)
    }

    /// Backtests every combination of `grid` for `family` and keeps the best `top_k`.
    ///
    /// Structurally invalid combinations are skipped and failing ones excluded;
    /// only a grid with no valid combination at all is an error.
    pub fn optimize(&self, series: &PriceSeries, family: StrategyFamily, grid: &ParameterGrid) -> Result<OptimizationResult> {
        let cells = grid.expand()?;
        let combinations = cells.len();
        info!(family = %family, combinations, bars = series.len(), "Starting parameter sweep.");

        let pool = self.pool()?;
        let (runs, counters) = run_cells(&pool, cells, &self.cancel, family.as_str(), |params| {
            let strategy = Strategy::from_params(family, params).map_err(CellError::Invalid)?;
            self.backtest(series, &strategy)
        });

        if counters.skipped == combinations {
            return Err(Error::NoValidCombinations {
                family: family.to_string(),
                combinations,
            });
        }

        let top = rank(runs, self.top_k);
        info!(
            family = %family,
            evaluated = counters.evaluated,
            skipped = counters.skipped,
            failed = counters.failed,
            cancelled = counters.cancelled,
            best_score = top.first().map(|c| c.score),
            "Parameter sweep complete."
        );

        Ok(OptimizationResult {
            family,
            combinations,
            top,
            counters,
        })
    }
}
