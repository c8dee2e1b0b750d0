//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, BatchSettings, DataSettings, LoggingConfig};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Prefix of environment overrides, e.g. `ADVISOR__BATCH__MAX_CONCURRENCY=4`.
pub const ENV_PREFIX: &str = "ADVISOR";

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(environment())
        .build()?;

    config.try_deserialize()
}

/// Load from `path` when given, otherwise from defaults and environment only.
pub fn load_config_or_default(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Config::builder()
            .add_source(environment())
            .build()?
            .try_deserialize(),
    }
}

/// Render a configuration as TOML, e.g. to write a starter file.
pub fn to_toml(config: &AppConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}
