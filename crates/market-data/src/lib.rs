// In crates/market-data/src/lib.rs

//! Sources of historical price series.
//!
//! Providers may hand back candles in either order; every series they return
//! is ascending by time.

use core_types::{Granularity, Instrument, PriceSeries};

pub mod error;
pub mod file_provider;
pub mod memory;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use file_provider::CandleFileProvider;
pub use memory::InMemoryProvider;
pub use types::{Candle, CandlePrices, CandlesResponse};

/// Supplies the most recent `count` bars of an instrument at a granularity.
pub trait MarketDataProvider {
    fn candles(&self, instrument: &Instrument, granularity: Granularity, count: usize) -> Result<PriceSeries>;
}

impl<P: MarketDataProvider + ?Sized> MarketDataProvider for &P {
    fn candles(&self, instrument: &Instrument, granularity: Granularity, count: usize) -> Result<PriceSeries> {
        (**self).candles(instrument, granularity, count)
    }
}
