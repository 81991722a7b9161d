// In crates/backtester/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Signal series has {signals} entries but the price series has {bars} bars")]
    LengthMismatch { bars: usize, signals: usize },

    #[error(transparent)]
    Strategy(#[from] strategies::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
