// In crates/engine/src/light.rs

use core_types::Granularity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether the control loop may trade an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeLight {
    /// The long-horizon view rejects the instrument.
    #[default]
    Red,
    /// The long-horizon view is fine but a shorter one is not.
    Yellow,
    Green,
}

/// The result of checking one granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "granularity", rename_all = "lowercase")]
pub enum Verdict {
    Pass(Granularity),
    Fail(Granularity),
    /// No data could be fetched for the granularity.
    Missing(Granularity),
}

impl Verdict {
    pub fn granularity(&self) -> Granularity {
        match *self {
            Verdict::Pass(g) | Verdict::Fail(g) | Verdict::Missing(g) => g,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass(_))
    }
}

impl TradeLight {
    /// The light after `verdict`.
    ///
    /// A monthly failure or missing daily data turns the light red; any other
    /// failure below monthly turns it yellow. Missing monthly data leaves the
    /// light as it was.
    pub fn transition(self, verdict: Verdict) -> TradeLight {
        match verdict {
            Verdict::Pass(_) => TradeLight::Green,
            Verdict::Fail(Granularity::Month) => TradeLight::Red,
            Verdict::Fail(_) => TradeLight::Yellow,
            Verdict::Missing(Granularity::Month) => self,
            Verdict::Missing(Granularity::Day) => TradeLight::Red,
            Verdict::Missing(_) => TradeLight::Yellow,
        }
    }
}

impl fmt::Display for TradeLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TradeLight::Red => "RED",
            TradeLight::Yellow => "YELLOW",
            TradeLight::Green => "GREEN",
        })
    }
}

impl FromStr for TradeLight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(TradeLight::Red),
            "yellow" => Ok(TradeLight::Yellow),
            "green" => Ok(TradeLight::Green),
            other => Err(format!("unknown trade light '{other}', expected red, yellow or green")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_red() {
        assert_eq!(TradeLight::default(), TradeLight::Red);
        assert_eq!("GREEN".parse::<TradeLight>().unwrap(), TradeLight::Green);
        assert!("blue".parse::<TradeLight>().is_err());
    }

    #[test]
    fn transitions_follow_the_granularity() {
        use Granularity::*;
        let cases = [
            (TradeLight::Red, Verdict::Pass(Month), TradeLight::Green),
            (TradeLight::Green, Verdict::Fail(Month), TradeLight::Red),
            (TradeLight::Green, Verdict::Fail(Day), TradeLight::Yellow),
            (TradeLight::Green, Verdict::Fail(Minute), TradeLight::Yellow),
            (TradeLight::Yellow, Verdict::Missing(Month), TradeLight::Yellow),
            (TradeLight::Green, Verdict::Missing(Day), TradeLight::Red),
            (TradeLight::Green, Verdict::Missing(Minute), TradeLight::Yellow),
        ];
        for (from, verdict, to) in cases {
            assert_eq!(from.transition(verdict), to, "{from} --{verdict:?}-->");
        }
    }
}
