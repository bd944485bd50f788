//! Service configuration, read from an optional `settings.toml` in the working
//! directory and overridden by `TRAVELSPLIT__<SECTION>__<KEY>` variables.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::rates::{default_rates, ExchangeRate};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Log {
    pub level: String,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: Server,
    pub log: Log,
    pub rates: Vec<ExchangeRate>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: Server::default(),
            log: Log::default(),
            rates: default_rates(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_file("settings")
    }

    pub fn from_file(name: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("TRAVELSPLIT").separator("__"))
            .build()?
            .try_deserialize()
    }
}
