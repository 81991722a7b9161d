// In crates/market-data/src/file_provider.rs

use std::fs;
use std::path::{Path, PathBuf};

use core_types::{Granularity, Instrument, PriceSeries};
use tracing::{debug, info};

use crate::{CandlesResponse, Error, MarketDataProvider, Result};

/// Reads saved OANDA candle responses from `{directory}/{instrument}_{granularity}.json`,
/// e.g. `data/EUR_USD_D.json`.
#[derive(Debug, Clone)]
pub struct CandleFileProvider {
    directory: PathBuf,
}

impl CandleFileProvider {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, instrument: &Instrument, granularity: Granularity) -> PathBuf {
        self.directory
            .join(format!("{}_{}.json", instrument, granularity.code()))
    }

    /// Parses one candles file. Incomplete candles are dropped and the rest
    /// sorted ascending.
    pub fn load(path: &Path) -> Result<PriceSeries> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let response: CandlesResponse = serde_json::from_str(&content)?;

        let total = response.candles.len();
        let bars = response
            .candles
            .iter()
            .filter(|candle| candle.complete)
            .map(|candle| candle.to_bar())
            .collect::<Result<Vec<_>>>()?;
        debug!(path = %path.display(), total, complete = bars.len(), "Loaded candles file.");

        Ok(PriceSeries::from_unordered(bars)?)
    }
}

impl MarketDataProvider for CandleFileProvider {
    fn candles(&self, instrument: &Instrument, granularity: Granularity, count: usize) -> Result<PriceSeries> {
        let path = self.path_for(instrument, granularity);
        let series = Self::load(&path)?;
        if series.is_empty() {
            return Err(Error::NoData {
                instrument: instrument.to_string(),
                granularity: granularity.to_string(),
            });
        }
        info!(instrument = %instrument, granularity = %granularity, bars = series.len().min(count), "Historical data retrieved.");
        Ok(series.tail(count))
    }
}
