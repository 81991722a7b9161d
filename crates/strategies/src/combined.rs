// In crates/strategies/src/combined.rs

use core_types::{Signal, SignalSeries};
use indicators::{IndicatorCache, IndicatorKind};

use crate::{Error, Result, SignalRule, Strategy};

/// Several independently configured strategies voting bar by bar.
///
/// The composite signal is the sign of the summed member signals, so a tie is
/// flat. A member with no signal on a bar abstains; the bar is only undefined
/// when every member abstains.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedStrategy {
    members: Vec<Strategy>,
}

impl CombinedStrategy {
    pub fn new(members: Vec<Strategy>) -> Result<Self> {
        if members.is_empty() {
            return Err(Error::EmptyCombination);
        }
        Ok(Self { members })
    }

    pub fn members(&self) -> &[Strategy] {
        &self.members
    }
}

/// Sums member signals per bar and keeps the sign.
pub fn combine(series: &[SignalSeries]) -> SignalSeries {
    let len = series.iter().map(Vec::len).max().unwrap_or(0);
    (0..len)
        .map(|i| {
            let votes: Vec<i64> = series
                .iter()
                .filter_map(|signals| signals.get(i).copied().flatten())
                .map(|signal| i64::from(signal.value()))
                .collect();
            (!votes.is_empty()).then(|| Signal::from_sign(votes.iter().sum()))
        })
        .collect()
}

impl SignalRule for CombinedStrategy {
    fn name(&self) -> &'static str {
        "COMBINED"
    }

    fn indicators(&self) -> Vec<IndicatorKind> {
        let mut kinds: Vec<IndicatorKind> = Vec::new();
        for kind in self.members.iter().flat_map(|member| member.indicators()) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }

    // Any defined member defines the bar.
    fn warmup(&self) -> usize {
        self.members.iter().map(|member| member.warmup()).min().unwrap_or(0)
    }

    fn apply(&self, cache: &IndicatorCache<'_>) -> Result<SignalSeries> {
        let member_signals = self
            .members
            .iter()
            .map(|member| member.apply(cache))
            .collect::<Result<Vec<_>>>()?;
        Ok(combine(&member_signals))
    }
}
