// In crates/optimizer/src/composite.rs

use std::collections::BTreeMap;
use std::fmt;

use core_types::PriceSeries;
use itertools::Itertools;
use serde::Serialize;
use strategies::{CombinedStrategy, ParameterSet, Strategy, StrategyFamily};
use tracing::{info, warn};

use crate::score::{Scored, rank};
use crate::sweep::{CellError, SweepCounters, run_cells};
use crate::{Error, OptimizationResult, Optimizer, ParameterGrid, Result};

/// One family's parameter set inside a composite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub family: StrategyFamily,
    pub params: ParameterSet,
}

/// The members of one composite candidate, in family order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Composition(pub Vec<Member>);

impl Composition {
    pub fn build(&self) -> strategies::Result<CombinedStrategy> {
        let members = self
            .0
            .iter()
            .map(|m| Strategy::from_params(m.family, &m.params))
            .collect::<strategies::Result<Vec<_>>>()?;
        CombinedStrategy::new(members)
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, member) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{}({})", member.family, member.params)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompositeResult {
    /// The independent sweep of every family that produced candidates.
    pub families: Vec<OptimizationResult>,
    pub combinations: usize,
    pub top: Vec<Scored<Composition>>,
    #[serde(flatten)]
    pub counters: SweepCounters,
}

impl CompositeResult {
    pub fn best(&self) -> Option<&Scored<Composition>> {
        self.top.first()
    }
}

impl Optimizer {
    /// Optimizes each family on its own, then ranks composites built from the
    /// Cartesian product of each family's best `candidates_per_family` sets.
    ///
    /// A family whose grid has no valid combination is left out of the
    /// composites; malformed grids are still errors.
    pub fn optimize_composite(
        &self,
        series: &PriceSeries,
        families: &BTreeMap<StrategyFamily, ParameterGrid>,
        candidates_per_family: usize,
    ) -> Result<CompositeResult> {
        let mut sweeps = Vec::with_capacity(families.len());
        for (family, grid) in families {
            match self.optimize(series, *family, grid) {
                Ok(result) => sweeps.push(result),
                Err(error @ Error::NoValidCombinations { .. }) => {
                    warn!(family = %family, error = %error, "Leaving family out of the composite.");
                }
                Err(error) => return Err(error),
            }
        }

        let axes: Vec<Vec<Member>> = sweeps
            .iter()
            .map(|sweep| {
                sweep
                    .top
                    .iter()
                    .take(candidates_per_family)
                    .map(|candidate| Member {
                        family: sweep.family,
                        params: candidate.params.clone(),
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|axis| !axis.is_empty())
            .collect();
        if axes.is_empty() {
            return Err(Error::NoValidCombinations {
                family: "composite".to_string(),
                combinations: 0,
            });
        }

        let cells: Vec<Composition> = axes.into_iter().multi_cartesian_product().map(Composition).collect();
        let combinations = cells.len();
        info!(combinations, families = sweeps.len(), "Starting composite sweep.");

        let pool = self.pool()?;
        let (runs, counters) = run_cells(&pool, cells, &self.cancel, "composite", |composition| {
            let strategy = composition.build().map_err(CellError::Invalid)?;
            self.backtest(series, &strategy)
        });
        let top = rank(runs, self.top_k);
        info!(
            evaluated = counters.evaluated,
            failed = counters.failed,
            cancelled = counters.cancelled,
            best_score = top.first().map(|c| c.score),
            "Composite sweep complete."
        );

        Ok(CompositeResult {
            families: sweeps,
            combinations,
            top,
            counters,
        })
    }
}
