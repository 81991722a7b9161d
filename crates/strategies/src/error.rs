// In crates/strategies/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Unknown strategy family '{0}'")]
    UnknownFamily(String),

    #[error("Could not read parameters [{params}]: {source}")]
    Parameters {
        params: String,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Indicator(#[from] indicators::Error),

    #[error("Indicator {0} was requested before it was computed")]
    MissingIndicator(String),

    #[error("A combined strategy needs at least one member")]
    EmptyCombination,
}

impl Error {
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
