//! Node configuration.
//!
//! [`NodeConfig`] is layered: built-in defaults, then an optional TOML file,
//! then `KEEL_*` environment variables (`KEEL_NETWORK=testnet`,
//! `KEEL_LOG_LEVEL=debug`, ...). Command-line flags are applied on top by the
//! binaries.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use keel_core::constants::{DEFAULT_LOG_LEVEL, ENV_PREFIX, NetworkType};
use keel_core::error::ConfigError;

use crate::logging::LogFormat;

/// Configuration for a node instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Network profile; selects the checkpoint table.
    pub network: NetworkType,
    /// Root directory for all persistent data.
    pub data_dir: PathBuf,
    /// Log level filter string (e.g. "info", "debug", "keel_consensus=trace").
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keel");

        Self {
            network: NetworkType::default(),
            data_dir,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl NodeConfig {
    /// Load defaults, then `path` (if given), then the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if the file is missing or malformed, or a
    /// value cannot be deserialised.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Self::load) but reads overrides from `env` instead of
    /// the process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let defaults = Config::try_from(&Self::default()).map_err(load_err)?;
        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).source(env));

        let cfg: Self = builder
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .map_err(load_err)?;
        tracing::debug!(network = %cfg.network, data_dir = ?cfg.data_dir, "configuration loaded");
        Ok(cfg)
    }

    /// Per-network data directory.
    pub fn network_dir(&self) -> PathBuf {
        self.data_dir.join(self.network.data_dir_suffix())
    }
}

fn load_err(e: config::ConfigError) -> ConfigError {
    ConfigError::Load(e.to_string())
}
