// In crates/indicators/src/rolling.rs

//! Window helpers shared by the indicator implementations.

use ta::Next;
use ta::indicators::{ExponentialMovingAverage, SimpleMovingAverage};

use crate::{Error, Result};

/// Hides the first `warmup - 1` values of a fully computed recursion.
pub fn mask_warmup(values: Vec<f64>, warmup: usize) -> Vec<Option<f64>> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| if i + 1 >= warmup && v.is_finite() { Some(v) } else { None })
        .collect()
}

/// Rolling arithmetic mean; undefined until `period` values have been seen.
pub fn sma(values: &[f64], period: usize) -> Result<Vec<Option<f64>>> {
    let mut sma = SimpleMovingAverage::new(period).map_err(|e| Error::Backend(format!("{e:?}")))?;
    let raw = values.iter().map(|v| sma.next(*v)).collect();
    Ok(mask_warmup(raw, period))
}

/// Recursive EMA with `alpha = 2 / (period + 1)`, seeded by the first value.
/// No warm-up masking is applied here.
pub fn ema_recursive(values: &[f64], period: usize) -> Result<Vec<f64>> {
    let mut ema = ExponentialMovingAverage::new(period).map_err(|e| Error::Backend(format!("{e:?}")))?;
    Ok(values.iter().map(|v| ema.next(*v)).collect())
}

/// Rolling mean over a column that may contain undefined entries.
/// A window containing any undefined entry is itself undefined.
pub fn mean_of_defined(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }
    for (i, window) in values.windows(period).enumerate() {
        let sum: Option<f64> = window.iter().try_fold(0.0, |acc, v| v.map(|x| acc + x));
        out[i + period - 1] = sum.map(|s| s / period as f64);
    }
    out
}

/// Rolling sample standard deviation (n - 1 denominator).
pub fn sample_std(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period < 2 {
        return out;
    }
    for (i, window) in values.windows(period).enumerate() {
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (period - 1) as f64;
        out[i + period - 1] = Some(variance.sqrt());
    }
    out
}
