// In crates/core-types/src/signal.rs

use serde::{Deserialize, Serialize};

/// A discrete directional opinion for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(into = "i8", try_from = "i8")]
pub enum Signal {
    Short,
    #[default]
    Flat,
    Long,
}

/// One entry per bar. `None` marks a bar whose indicator inputs were undefined;
/// such bars carry no opinion at all, which is different from `Flat`.
pub type SignalSeries = Vec<Option<Signal>>;

impl Signal {
    /// The numeric form used in return accounting: -1, 0 or 1.
    pub fn value(self) -> i8 {
        match self {
            Signal::Short => -1,
            Signal::Flat => 0,
            Signal::Long => 1,
        }
    }

    /// The sign of an aggregate vote; zero maps to `Flat`.
    pub fn from_sign(sum: i64) -> Self {
        match sum.signum() {
            1 => Signal::Long,
            -1 => Signal::Short,
            _ => Signal::Flat,
        }
    }

    /// The opposite direction; `Flat` stays flat.
    pub fn inverse(self) -> Self {
        match self {
            Signal::Short => Signal::Long,
            Signal::Flat => Signal::Flat,
            Signal::Long => Signal::Short,
        }
    }
}

impl From<Signal> for i8 {
    fn from(signal: Signal) -> Self {
        signal.value()
    }
}

impl TryFrom<i8> for Signal {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Signal::Short),
            0 => Ok(Signal::Flat),
            1 => Ok(Signal::Long),
            other => Err(format!("signal must be -1, 0 or 1, got {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_sign_maps_ties_to_flat() {
        assert_eq!(Signal::from_sign(3), Signal::Long);
        assert_eq!(Signal::from_sign(-2), Signal::Short);
        assert_eq!(Signal::from_sign(0), Signal::Flat);
    }

    #[test]
    fn inverse_flips_direction_only() {
        assert_eq!(Signal::Long.inverse(), Signal::Short);
        assert_eq!(Signal::Short.inverse(), Signal::Long);
        assert_eq!(Signal::Flat.inverse(), Signal::Flat);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Signal::try_from(2).is_err());
        assert_eq!(Signal::try_from(-1).unwrap(), Signal::Short);
    }
}
