// In crates/app-config/src/lib.rs

use std::path::Path;

use config::{Config, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{
    AppSettings, ControlSettings, DataSettings, OptimizerConfig, OptimizerSettings, Settings, StrategyConfig,
};

/// Loads the application settings from the `config` directory.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from(Path::new("config"), &environment)
}

/// [`load_settings`] against an explicit directory and environment.
pub fn load_settings_from(directory: &Path, environment: &str) -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::from(directory.join("base.toml")))
        .add_source(File::from(directory.join(format!("{environment}.toml"))).required(false))
        // Environment variables, e.g. `APP__OPTIMIZER__TOP_K=5`.
        // The prefix is `APP`, separator is `__`.
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}

/// Loads per-family sweep ranges, e.g. `config/optimizer.toml`.
pub fn load_optimizer_config(path: &Path) -> Result<OptimizerConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::IoError {
        path: path.to_path_buf(),
        source,
    })?;

    let config: OptimizerConfig = toml::from_str(&content)?;
    Ok(config)
}
