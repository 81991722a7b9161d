// In crates/indicators/src/lib.rs

//! Pure indicator computations over a [`PriceSeries`].
//!
//! Every indicator returns freshly allocated columns; the series is never
//! mutated. Bars without enough history are `None`, never zero.

use core_types::PriceSeries;

pub mod bollinger;
pub mod cache;
pub mod ema;
pub mod error;
pub mod macd;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod types;

pub use cache::IndicatorCache;
pub use error::{Error, Result};
pub use types::{Column, IndicatorKind, IndicatorResult};

/// The capability shared by every indicator family.
pub trait Indicator {
    /// Short display name, e.g. "RSI".
    fn name(&self) -> &'static str;

    /// Number of bars needed before the first defined value.
    fn warmup(&self) -> usize;

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorResult>;
}

/// Computes `kind` over `series`.
///
/// Non-positive periods fail with `InvalidParameter`; a window longer than the
/// series yields an all-undefined result.
pub fn compute(series: &PriceSeries, kind: &IndicatorKind) -> Result<IndicatorResult> {
    kind.build()?.compute(series)
}
