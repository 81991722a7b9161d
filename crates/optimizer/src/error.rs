// In crates/optimizer/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Parameter grid has no parameters")]
    EmptyGrid,

    #[error("Invalid range for '{param}': {reason}")]
    InvalidRange { param: String, reason: String },

    #[error("None of the {combinations} parameter combinations for {family} is valid")]
    NoValidCombinations { family: String, combinations: usize },

    #[error("Failed to build optimizer thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Strategy(#[from] strategies::Error),
}

impl Error {
    pub(crate) fn invalid_range(param: &str, reason: impl Into<String>) -> Self {
        Error::InvalidRange {
            param: param.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
