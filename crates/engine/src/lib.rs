// In crates/engine/src/lib.rs

//! The trade-light control loop step.
//!
//! The light is a plain value owned by the caller. Each step backtests the
//! control strategy at monthly, daily and minute granularity and returns the
//! next light together with the signal an order-execution loop may act on.

pub mod assessor;
pub mod control;
pub mod error;
pub mod light;

pub use assessor::Assessor;
pub use control::{ControlOutcome, ControlStep, GranularityReport};
pub use error::{Error, Result};
pub use light::{TradeLight, Verdict};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use core_types::{Bar, Granularity, Instrument, PriceSeries, Signal};
    use market_data::InMemoryProvider;
    use strategies::{ParameterSet, Strategy, StrategyFamily};

    fn trend(len: usize, step: f64) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let bars = (0..len)
            .map(|i| {
                let c = 100.0 + step * i as f64;
                Bar::new(start + Duration::minutes(i as i64), c, c + 0.1, c - 0.1, c)
            })
            .collect();
        PriceSeries::new(bars).unwrap()
    }

    fn zigzag(len: usize) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let bars = (0..len)
            .map(|i| {
                let c = if i % 2 == 0 { 100.0 } else { 102.0 };
                Bar::new(start + Duration::days(i as i64), c, c + 0.1, c - 0.1, c)
            })
            .collect();
        PriceSeries::new(bars).unwrap()
    }

    fn rule() -> Strategy {
        Strategy::from_params(StrategyFamily::Sma, &ParameterSet::new().with("period", 3)).unwrap()
    }

    #[test]
    fn uptrend_everywhere_goes_green_with_a_long_signal() {
        let provider = InMemoryProvider::new()
            .with("EUR_USD", Granularity::Month, trend(40, 1.0))
            .with("EUR_USD", Granularity::Day, trend(40, 1.0))
            .with("EUR_USD", Granularity::Minute, trend(40, 0.5));
        let assessor = Assessor::new(provider, rule(), ControlStep::default());

        let outcome = assessor.assess(&Instrument::from("EUR_USD"), TradeLight::Red).unwrap();
        assert_eq!(outcome.state, TradeLight::Green);
        assert!(outcome.should_trade);
        assert_eq!(outcome.signal, Some(Signal::Long));
    }

    #[test]
    fn whipsawed_daily_view_turns_yellow() {
        // price-cross on a zigzag is always one bar late, so every bar loses
        let provider = InMemoryProvider::new()
            .with("EUR_USD", Granularity::Month, trend(40, 1.0))
            .with("EUR_USD", Granularity::Day, zigzag(40))
            .with("EUR_USD", Granularity::Minute, trend(40, 0.5));
        let assessor = Assessor::new(provider, rule(), ControlStep::default());

        let outcome = assessor.assess(&Instrument::from("EUR_USD"), TradeLight::Green).unwrap();
        assert_eq!(outcome.state, TradeLight::Yellow);
        assert_eq!(outcome.verdicts.len(), 2);
        assert_eq!(outcome.signal, None);
    }

    #[test]
    fn unknown_instrument_keeps_the_light() {
        let assessor = Assessor::new(InMemoryProvider::new(), rule(), ControlStep::default());
        let outcome = assessor.assess(&Instrument::from("USD_JPY"), TradeLight::Yellow).unwrap();
        assert_eq!(outcome.state, TradeLight::Yellow);
        assert!(!outcome.should_trade);
    }
}
