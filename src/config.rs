//! Optional TOML configuration file.
//!
//! Values here override built-in defaults and are overridden in turn by
//! command-line flags.
//!
//! ```toml
//! algorithm = "blake3"
//! block_size = 131072
//! verify = true
//! min_size = 1
//! exclude = ["*.log", "node_modules"]
//! keep = "shortest-path"
//! log_file = "./assets/dupescan.log"
//! log_level = "info"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::actions::KeepPolicy;
use crate::hasher::HashAlgorithm;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config file {}: block_size must be greater than zero", path.display())]
    ZeroBlockSize { path: PathBuf },
}

/// Settings loaded from a config file. Unset keys fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub algorithm: Option<HashAlgorithm>,
    pub block_size: Option<usize>,
    pub verify: Option<bool>,
    pub min_size: Option<u64>,
    pub max_size: Option<u64>,
    #[serde(default)]
    pub exclude: Vec<String>,
    pub keep: Option<KeepPolicy>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load `path` if given, otherwise return the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if config.block_size == Some(0) {
            return Err(ConfigError::ZeroBlockSize {
                path: path.to_path_buf(),
            });
        }

        Ok(config)
    }
}
