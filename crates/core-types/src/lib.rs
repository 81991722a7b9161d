// In crates/core-types/src/lib.rs

pub mod error;
pub mod series;
pub mod signal;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use series::PriceSeries;
pub use signal::{Signal, SignalSeries};
pub use types::{Bar, Granularity, Instrument};
