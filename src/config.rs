use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::{default_rates_date, NBP_BASE_URL};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub nbp: NbpConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NbpConfig {
    pub base_url: String,
    pub rates_date: NaiveDate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://currencies.db".to_string(),
            nbp: NbpConfig::default(),
        }
    }
}

impl Default for NbpConfig {
    fn default() -> Self {
        Self {
            base_url: NBP_BASE_URL.to_string(),
            rates_date: default_rates_date(),
        }
    }
}

pub fn get_config_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("config.toml");
    path
}

pub fn load_config_from(path: &Path) -> anyhow::Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

/// Load `path`, or `config.toml` next to the manifest, falling back to
/// defaults when the default file is missing. `DATABASE_URL` wins over the
/// file.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => load_config_from(path)?,
        None => {
            let default_path = get_config_path();
            if default_path.exists() {
                load_config_from(&default_path)?
            } else {
                Config::default()
            }
        }
    };

    if let Ok(database_url) = std::env::var("DATABASE_URL") {
        config.database_url = database_url;
    }

    Ok(config)
}
