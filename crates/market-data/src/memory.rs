// In crates/market-data/src/memory.rs

use std::collections::HashMap;

use core_types::{Granularity, Instrument, PriceSeries};

use crate::{Error, MarketDataProvider, Result};

/// Serves series registered up front. Useful for replaying fixed data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    series: HashMap<(Instrument, Granularity), PriceSeries>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, instrument: Instrument, granularity: Granularity, series: PriceSeries) {
        self.series.insert((instrument, granularity), series);
    }

    pub fn with(mut self, instrument: &str, granularity: Granularity, series: PriceSeries) -> Self {
        self.insert(Instrument::from(instrument), granularity, series);
        self
    }
}

impl MarketDataProvider for InMemoryProvider {
    fn candles(&self, instrument: &Instrument, granularity: Granularity, count: usize) -> Result<PriceSeries> {
        self.series
            .get(&(instrument.clone(), granularity))
            .filter(|series| !series.is_empty())
            .map(|series| series.tail(count))
            .ok_or_else(|| Error::NoData {
                instrument: instrument.to_string(),
                granularity: granularity.to_string(),
            })
    }
}
