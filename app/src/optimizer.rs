// In app/src/optimizer.rs

use std::path::Path;

use anyhow::{Context, Result};
use app_config::Settings;
use core_types::PriceSeries;
use optimizer::{CompositeResult, OptimizationResult, Optimizer};
use strategies::StrategyFamily;

fn build_optimizer(settings: &Settings) -> Optimizer {
    Optimizer::new(settings.optimizer.top_k).with_threads(settings.app.optimizer_cores as usize)
}

/// Sweeps one family, or every family listed in the optimizer config.
pub fn run_optimization(
    settings: &Settings,
    series: &PriceSeries,
    config_path: &Path,
    family: Option<StrategyFamily>,
) -> Result<Vec<OptimizationResult>> {
    let config = app_config::load_optimizer_config(config_path)
        .with_context(|| format!("Failed to load optimizer config from {}", config_path.display()))?;
    let optimizer = build_optimizer(settings);

    let families: Vec<StrategyFamily> = match family {
        Some(family) => vec![family],
        None => config.families.keys().copied().collect(),
    };

    let mut results = Vec::with_capacity(families.len());
    for family in families {
        let grid = config
            .grid(family)
            .with_context(|| format!("No [{family}] ranges in {}", config_path.display()))?;
        tracing::info!(%family, bars = series.len(), "Starting optimization job...");
        let result = optimizer.optimize(series, family, grid)?;
        if let Some(best) = result.best() {
            tracing::info!(%family, score = best.score, params = %best.params, "Best parameters found.");
        }
        results.push(result);
    }
    Ok(results)
}

/// Sweeps every configured family, then ranks combinations of their leaders.
pub fn run_composite(settings: &Settings, series: &PriceSeries, config_path: &Path) -> Result<CompositeResult> {
    let config = app_config::load_optimizer_config(config_path)
        .with_context(|| format!("Failed to load optimizer config from {}", config_path.display()))?;
    let optimizer = build_optimizer(settings);

    tracing::info!(families = config.families.len(), "Starting composite optimization...");
    let result = optimizer.optimize_composite(series, &config.families, settings.optimizer.candidates_per_family)?;
    if let Some(best) = result.best() {
        tracing::info!(score = best.score, composition = %best.params, "Best composition found.");
    }
    Ok(result)
}
