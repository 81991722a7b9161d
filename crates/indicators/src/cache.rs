// In crates/indicators/src/cache.rs

use std::collections::HashMap;

use core_types::PriceSeries;

use crate::{IndicatorKind, IndicatorResult, Result};

/// Read-only arena of indicator results for one series, keyed by indicator and
/// parameters. Signal rules pull their inputs from here instead of writing
/// columns onto shared state.
#[derive(Debug)]
pub struct IndicatorCache<'a> {
    series: &'a PriceSeries,
    results: HashMap<String, IndicatorResult>,
}

impl<'a> IndicatorCache<'a> {
    pub fn new(series: &'a PriceSeries) -> Self {
        Self {
            series,
            results: HashMap::new(),
        }
    }

    pub fn series(&self) -> &'a PriceSeries {
        self.series
    }

    /// Computes `kind` unless an identical indicator is already cached.
    pub fn ensure(&mut self, kind: &IndicatorKind) -> Result<()> {
        let key = kind.key();
        if !self.results.contains_key(&key) {
            let result = crate::compute(self.series, kind)?;
            self.results.insert(key, result);
        }
        Ok(())
    }

    pub fn get(&self, kind: &IndicatorKind) -> Option<&IndicatorResult> {
        self.results.get(&kind.key())
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::series;

    #[test]
    fn identical_requests_share_one_entry() {
        let s = series(&[1.0, 2.0, 3.0, 4.0]);
        let mut cache = IndicatorCache::new(&s);
        cache.ensure(&IndicatorKind::Sma { period: 2 }).unwrap();
        cache.ensure(&IndicatorKind::Sma { period: 2 }).unwrap();
        cache.ensure(&IndicatorKind::Ema { period: 2 }).unwrap();
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&IndicatorKind::Sma { period: 3 }).is_none());
    }

    #[test]
    fn invalid_kind_is_not_cached() {
        let s = series(&[1.0, 2.0]);
        let mut cache = IndicatorCache::new(&s);
        assert!(cache.ensure(&IndicatorKind::Rsi { period: 0 }).is_err());
        assert!(cache.is_empty());
    }
}
