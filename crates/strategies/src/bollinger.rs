// In crates/strategies/src/bollinger.rs

use core_types::SignalSeries;
use indicators::bollinger::{LOWER, UPPER};
use indicators::{IndicatorCache, IndicatorKind};
use serde::{Deserialize, Serialize};

use crate::types::BollingerSettings;
use crate::{Error, Result, SignalRule, band, column, lookup};

/// How a rule reads a close outside the bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandReaction {
    /// Long below the lower band, short above the upper band.
    Reversion,
    /// Long above the upper band, short below the lower band.
    Breakout,
}

/// Signals from the close's position relative to its Bollinger Bands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerRule {
    reaction: BandReaction,
    settings: BollingerSettings,
}

impl BollingerRule {
    pub fn new(reaction: BandReaction, settings: BollingerSettings) -> Result<Self> {
        if settings.period == 0 {
            return Err(Error::invalid_parameter("period", "must be a positive integer"));
        }
        if !(settings.std_dev.is_finite() && settings.std_dev > 0.0) {
            return Err(Error::invalid_parameter(
                "std_dev",
                format!("must be a positive number, got {}", settings.std_dev),
            ));
        }
        Ok(Self { reaction, settings })
    }

    pub fn reaction(&self) -> BandReaction {
        self.reaction
    }

    pub fn settings(&self) -> &BollingerSettings {
        &self.settings
    }

    fn indicator(&self) -> IndicatorKind {
        IndicatorKind::BollingerBands {
            period: self.settings.period,
            std_dev: self.settings.std_dev,
        }
    }
}

impl SignalRule for BollingerRule {
    fn name(&self) -> &'static str {
        match self.reaction {
            BandReaction::Reversion => "BOLLINGER_BANDS",
            BandReaction::Breakout => "BOLLINGER_BREAKOUT",
        }
    }

    fn indicators(&self) -> Vec<IndicatorKind> {
        vec![self.indicator()]
    }

    fn apply(&self, cache: &IndicatorCache<'_>) -> Result<SignalSeries> {
        let result = lookup(cache, &self.indicator())?;
        let upper = column(result, UPPER)?;
        let lower = column(result, LOWER)?;
        let closes = cache.series().closes();

        Ok(closes
            .iter()
            .zip(upper.iter().zip(lower))
            .map(|(close, (upper, lower))| {
                let signal = band(Some(*close), (*lower)?, (*upper)?)?;
                Some(match self.reaction {
                    BandReaction::Reversion => signal,
                    BandReaction::Breakout => signal.inverse(),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{series, values};
    use core_types::Signal;

    fn settings(period: usize, std_dev: f64) -> BollingerSettings {
        BollingerSettings { period, std_dev }
    }

    #[test]
    fn breakouts_fade_back_to_the_mean() {
        // window [10, 10, 10, 20]: mid 12.5, sample std 5
        let up = series(&[10.0, 10.0, 10.0, 10.0, 20.0]);
        let rule = BollingerRule::new(BandReaction::Reversion, settings(4, 1.0)).unwrap();
        assert_eq!(values(&rule.generate(&up).unwrap()), vec![None, None, None, Some(0), Some(-1)]);

        let down = series(&[10.0, 10.0, 10.0, 10.0, 1.0]);
        let signals = rule.generate(&down).unwrap();
        assert_eq!(signals[4], Some(Signal::Long));
    }

    #[test]
    fn breakout_follows_the_band_it_crosses() {
        let rule = BollingerRule::new(BandReaction::Breakout, settings(4, 1.0)).unwrap();
        let up = series(&[10.0, 10.0, 10.0, 10.0, 20.0]);
        assert_eq!(values(&rule.generate(&up).unwrap()), vec![None, None, None, Some(0), Some(1)]);

        let down = series(&[10.0, 10.0, 10.0, 10.0, 1.0]);
        assert_eq!(rule.generate(&down).unwrap()[4], Some(Signal::Short));
        assert_eq!(rule.name(), "BOLLINGER_BREAKOUT");
    }

    #[test]
    fn wider_bands_stay_flat() {
        let s = series(&[10.0, 10.0, 10.0, 10.0, 20.0]);
        for reaction in [BandReaction::Reversion, BandReaction::Breakout] {
            let rule = BollingerRule::new(reaction, settings(4, 2.0)).unwrap();
            assert_eq!(rule.generate(&s).unwrap()[4], Some(Signal::Flat));
        }
    }

    #[test]
    fn std_dev_must_be_positive() {
        assert!(BollingerRule::new(BandReaction::Reversion, settings(20, 0.0)).is_err());
        assert!(BollingerRule::new(BandReaction::Breakout, settings(20, f64::NAN)).is_err());
    }
}
