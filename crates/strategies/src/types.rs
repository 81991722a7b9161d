// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

/// Settings for a close-versus-moving-average rule.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PriceCrossSettings {
    #[serde(alias = "SMA_PERIOD", alias = "EMA_PERIOD")]
    pub period: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)] // Clone is needed for the optimizer
#[serde(deny_unknown_fields)]
pub struct MACrossoverSettings {
    #[serde(alias = "Fast_Period", alias = "fast")]
    pub fast_period: usize,
    #[serde(alias = "Slow_Period", alias = "slow")]
    pub slow_period: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RsiSettings {
    #[serde(alias = "RSI_PERIOD")]
    pub period: usize,
    #[serde(default = "default_rsi_overbought", alias = "RSI_OVERBOUGHT")]
    pub overbought: f64,
    #[serde(default = "default_rsi_oversold", alias = "RSI_OVERSOLD")]
    pub oversold: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MacdSettings {
    #[serde(alias = "MACD_FAST_PERIOD", alias = "fast")]
    pub fast_period: usize,
    #[serde(alias = "MACD_SLOW_PERIOD", alias = "slow")]
    pub slow_period: usize,
    #[serde(alias = "MACD_SIGNAL_PERIOD", alias = "signal")]
    pub signal_period: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BollingerSettings {
    #[serde(alias = "BOLLINGER_BANDS_PERIOD")]
    pub period: usize,
    #[serde(alias = "BOLLINGER_BANDS_STD_DEV", alias = "k")]
    pub std_dev: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StochasticSettings {
    #[serde(alias = "STOCHASTIC_K_PERIOD")]
    pub k_period: usize,
    #[serde(alias = "STOCHASTIC_D_PERIOD")]
    pub d_period: usize,
    #[serde(default = "default_stochastic_overbought")]
    pub overbought: f64,
    #[serde(default = "default_stochastic_oversold")]
    pub oversold: f64,
}

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_stochastic_overbought() -> f64 {
    80.0
}

fn default_stochastic_oversold() -> f64 {
    20.0
}
