// In crates/indicators/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] core_types::Error),

    #[error("Indicator backend rejected its input: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Periods and window lengths must be strictly positive.
pub(crate) fn ensure_positive(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(core_types::Error::invalid_parameter(name, "must be a positive integer").into());
    }
    Ok(())
}
