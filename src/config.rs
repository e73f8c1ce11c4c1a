//! Application configuration.
//!
//! A JSON file under `~/.chainwatch` holds optional defaults. [`Settings::resolve`]
//! merges it with the environment and command-line flags into the values the
//! session runs with.

use crate::consts::cli_consts::chain;
use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::{fs, path::Path};

/// Environment variable selecting the node endpoint.
pub const RPC_URL_ENV: &str = "CHAINWATCH_RPC_URL";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_time_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_list_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_list_length: Option<u64>,
}

impl Config {
    /// A config file spelling out every default.
    pub fn with_defaults() -> Self {
        Config {
            rpc_url: Some(Environment::Local.rpc_url()),
            block_time_secs: Some(chain::BLOCK_TIME_SECS),
            history_length: Some(chain::BLOCK_HISTORY_LENGTH),
            block_list_length: Some(chain::BLOCK_LIST_LENGTH),
            node_list_length: Some(chain::NODE_LIST_LENGTH),
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns an empty config.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Location of the config file: `~/.chainwatch/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine the home directory",
        )
    })?;
    Ok(home.join(".chainwatch").join("config.json"))
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid RPC endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Block time must be at least 1 second")]
    InvalidBlockTime,

    #[error("{name} must be at least 1 block")]
    InvalidLength { name: &'static str },
}

/// Values given on the command line. `None` falls through to the next source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub rpc_url: Option<String>,
    pub block_time_secs: Option<u64>,
    pub history_length: Option<u64>,
    pub with_background_color: bool,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub environment: Environment,
    pub block_time_secs: u64,
    pub history_length: u64,
    pub block_list_length: u64,
    pub node_list_length: u64,
    pub with_background_color: bool,
}

impl Settings {
    /// Merges the sources, highest precedence first: flags, `env_rpc_url`, file, defaults.
    pub fn resolve(
        overrides: Overrides,
        env_rpc_url: Option<String>,
        file: &Config,
    ) -> Result<Self, SettingsError> {
        let rpc_url = overrides
            .rpc_url
            .or(env_rpc_url.filter(|url| !url.trim().is_empty()))
            .or_else(|| file.rpc_url.clone());
        let environment = match rpc_url {
            Some(url) => url.parse().map_err(SettingsError::InvalidEndpoint)?,
            None => Environment::default(),
        };

        let block_time_secs = overrides
            .block_time_secs
            .or(file.block_time_secs)
            .unwrap_or(chain::BLOCK_TIME_SECS);
        if block_time_secs == 0 {
            return Err(SettingsError::InvalidBlockTime);
        }

        let history_length = positive(
            "History length",
            overrides.history_length.or(file.history_length),
            chain::BLOCK_HISTORY_LENGTH,
        )?;
        let block_list_length = positive(
            "Block list length",
            file.block_list_length,
            chain::BLOCK_LIST_LENGTH,
        )?;
        let node_list_length = positive(
            "Node list length",
            file.node_list_length,
            chain::NODE_LIST_LENGTH,
        )?;

        Ok(Settings {
            environment,
            block_time_secs,
            history_length,
            block_list_length,
            node_list_length,
            with_background_color: overrides.with_background_color,
        })
    }
}

fn positive(name: &'static str, value: Option<u64>, default: u64) -> Result<u64, SettingsError> {
    match value.unwrap_or(default) {
        0 => Err(SettingsError::InvalidLength { name }),
        n => Ok(n),
    }
}
