// In crates/core-types/src/series.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Bar, Error, Result};

/// An immutable, ascending sequence of bars.
///
/// Indicator values are never written back onto the series; every computation
/// derives its own columns from the bars and leaves the series untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Builds a series from bars that are already in ascending timestamp order.
    pub fn new(bars: Vec<Bar>) -> Result<Self> {
        for (index, bar) in bars.iter().enumerate() {
            bar.validate()?;
            if index > 0 {
                let prev = bars[index - 1].timestamp;
                if bar.timestamp == prev {
                    return Err(Error::DuplicateTimestamp {
                        timestamp: bar.timestamp,
                    });
                }
                if bar.timestamp < prev {
                    return Err(Error::UnsortedSeries { index });
                }
            }
        }
        Ok(Self { bars })
    }

    /// Builds a series from bars in any order (providers may return newest first).
    pub fn from_unordered(mut bars: Vec<Bar>) -> Result<Self> {
        bars.sort_by_key(|bar| bar.timestamp);
        Self::new(bars)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    /// A new series holding only the most recent `count` bars.
    pub fn tail(&self, count: usize) -> PriceSeries {
        let start = self.bars.len().saturating_sub(count);
        PriceSeries {
            bars: self.bars[start..].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn bar(minutes: i64, close: f64) -> Bar {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
        Bar::new(ts, close, close + 0.5, close - 0.5, close)
    }

    #[test]
    fn accepts_ascending_bars() {
        let series = PriceSeries::new(vec![bar(0, 1.0), bar(1, 2.0), bar(5, 3.0)]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn rejects_descending_and_duplicate_bars() {
        let err = PriceSeries::new(vec![bar(1, 1.0), bar(0, 2.0)]).unwrap_err();
        assert_eq!(err, Error::UnsortedSeries { index: 1 });

        let err = PriceSeries::new(vec![bar(0, 1.0), bar(0, 2.0)]).unwrap_err();
        assert!(matches!(err, Error::DuplicateTimestamp { .. }));
    }

    #[test]
    fn from_unordered_resorts_newest_first_input() {
        let series = PriceSeries::from_unordered(vec![bar(2, 3.0), bar(1, 2.0), bar(0, 1.0)]).unwrap();
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn tail_keeps_most_recent_bars() {
        let series = PriceSeries::new((0..10).map(|i| bar(i, 1.0 + i as f64)).collect()).unwrap();
        let tail = series.tail(3);
        assert_eq!(tail.closes(), vec![8.0, 9.0, 10.0]);
        assert_eq!(series.tail(50).len(), 10);
    }
}
