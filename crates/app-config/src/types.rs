// In crates/app-config/src/types.rs

use std::collections::BTreeMap;

use optimizer::ParameterGrid;
use serde::Deserialize;
use strategies::{ParameterSet, StrategyFamily};

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub optimizer: OptimizerSettings,
    #[serde(default)]
    pub control: ControlSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
    /// Worker threads for parameter sweeps; 0 uses every core.
    #[serde(default)]
    pub optimizer_cores: u32,
}

/// Where stored candle files live.
#[derive(Deserialize, Debug, Clone)]
pub struct DataSettings {
    pub directory: String,
    /// Most recent bars loaded per request.
    #[serde(default = "default_candle_count")]
    pub candle_count: usize,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            directory: "data".to_string(),
            candle_count: default_candle_count(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct OptimizerSettings {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Best sets per family fed into composite optimization.
    #[serde(default = "default_candidates_per_family")]
    pub candidates_per_family: usize,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            candidates_per_family: default_candidates_per_family(),
        }
    }
}

/// The trade-light control step.
#[derive(Deserialize, Debug, Clone)]
pub struct ControlSettings {
    #[serde(default = "default_min_win_rate")]
    pub min_win_rate: f64,
    #[serde(default)]
    pub instruments: Vec<String>,
    /// Members of the strategy backtested at each granularity.
    #[serde(default)]
    pub strategies: Vec<StrategyConfig>,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            min_win_rate: default_min_win_rate(),
            instruments: Vec::new(),
            strategies: Vec::new(),
        }
    }
}

/// One configured strategy family and its fixed parameters.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct StrategyConfig {
    pub family: StrategyFamily,
    pub params: ParameterSet,
}

// --- Structs for optimizer.toml ---

/// Sweep ranges per strategy family.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct OptimizerConfig {
    #[serde(default)]
    pub families: BTreeMap<StrategyFamily, ParameterGrid>,
}

impl OptimizerConfig {
    pub fn grid(&self, family: StrategyFamily) -> Option<&ParameterGrid> {
        self.families.get(&family)
    }
}

/// Helper functions for serde defaults
fn default_candle_count() -> usize {
    5000
}
fn default_top_k() -> usize {
    optimizer::DEFAULT_TOP_K
}
fn default_candidates_per_family() -> usize {
    1
}
fn default_min_win_rate() -> f64 {
    0.5
}
