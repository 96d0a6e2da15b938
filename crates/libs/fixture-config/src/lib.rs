use std::path::PathBuf;
use std::time::Duration;
use std::{env, io};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

const DEV_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../../config");

/// Environment variable pointing at an alternative config directory.
pub const CONFIG_DIR_VAR: &str = "CANNED_CONFIG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    ConfigCompilation(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    IOError(#[from] io::Error),

    #[error("Expected '=' separator in config override '{0}'")]
    MalformedConfigOverride(String),
}

pub fn config_dir() -> PathBuf {
    match env::var(CONFIG_DIR_VAR) {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => PathBuf::from(DEV_CONFIG_PATH),
    }
}

/// Settings assembled from, in increasing priority: the built-in `DEFAULTS`,
/// the optional `file_sources` found in [`config_dir`], `<ENV_PREFIX>__*`
/// environment variables and `key=value` overrides.
pub trait FixtureConfig<'a>: Deserialize<'a> {
    const ENV_PREFIX: &'static str;

    /// TOML document holding the defaults, rooted at `root_key` if any.
    const DEFAULTS: &'static str = "";

    fn file_sources() -> Vec<&'static str> {
        vec![]
    }

    fn root_key() -> Option<&'static str> {
        None
    }

    fn get(overrides: &[String]) -> Result<Self, ConfigError>
    where
        Self: Sized,
    {
        let mut override_sources = vec![];
        for value in overrides {
            if !value.contains('=') {
                return Err(ConfigError::MalformedConfigOverride(value.clone()));
            }
            // "startup_timeout=100" -> "wait.startup_timeout=100"
            let value = match Self::root_key() {
                None => value.clone(),
                Some(key) => format!("{key}.{value}"),
            };
            override_sources.push(File::from_str(&value, FileFormat::Toml));
        }

        let file_sources: Vec<_> = Self::file_sources()
            .iter()
            .map(|path| File::from(config_dir().join(path)).required(false))
            .collect();

        let config = Config::builder()
            .add_source(File::from_str(Self::DEFAULTS, FileFormat::Toml))
            .add_source(file_sources)
            .add_source(
                Environment::with_prefix(Self::ENV_PREFIX)
                    .separator("__")
                    .prefix_separator("__")
                    .try_parsing(true),
            )
            .add_source(override_sources)
            .build()?;

        match Self::root_key() {
            None => Ok(config.try_deserialize()?),
            Some(key) => Ok(config.get::<Self>(key)?),
        }
    }
}

/// Reads a duration expressed in milliseconds.
pub fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let ms: u64 = Deserialize::deserialize(deserializer)?;
    Ok(Duration::from_millis(ms))
}
