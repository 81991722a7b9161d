// In crates/core-types/src/error.rs

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Bars are not in ascending timestamp order at index {index}")]
    UnsortedSeries { index: usize },

    #[error("Duplicate bar timestamp {timestamp}")]
    DuplicateTimestamp { timestamp: DateTime<Utc> },

    #[error("Invalid bar at {timestamp}: {reason}")]
    InvalidBar { timestamp: DateTime<Utc>, reason: String },

    #[error("Unknown granularity '{0}'")]
    UnknownGranularity(String),
}

impl Error {
    /// Shorthand used by every crate that validates user supplied parameters.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
