use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;
use url::Url;

use crate::types::network::{Network, NetworkConfig, list_network_configs};

/// Environment variable that takes precedence over the stored explorer key.
pub const EXPLORER_API_KEY_ENV: &str = "EXPLORER_API_KEY";

/// User settings, edited by hand in `config.json`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Chain id offered when the network prompt is left empty.
    pub default_chain_id: Option<u64>,
    /// RPC endpoints replacing the built-in ones, keyed by chain id.
    #[serde(default)]
    pub rpc_overrides: HashMap<u64, String>,
    pub explorer_api_key: Option<String>,
}

impl Config {
    /// Explorer API key, environment first.
    pub fn explorer_api_key(&self) -> Option<String> {
        std::env::var(EXPLORER_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.explorer_api_key.clone())
    }

    /// The network table with configured RPC overrides applied.
    ///
    /// Overrides that are not valid URLs are ignored with a warning.
    pub fn networks(&self) -> Vec<NetworkConfig> {
        let mut networks = list_network_configs();
        for network in networks.iter_mut() {
            if let Some(rpc_url) = self.rpc_overrides.get(&network.chain_id) {
                match Url::parse(rpc_url) {
                    Ok(_) => network.rpc_url = rpc_url.clone(),
                    Err(e) => warn!(
                        "ignoring RPC override for chain {}: {} ({})",
                        network.chain_id, rpc_url, e
                    ),
                }
            }
        }
        networks
    }

    /// Default chain id, if it names a known network.
    pub fn default_network(&self) -> Option<Network> {
        self.default_chain_id.and_then(Network::from_chain_id)
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("contract-console");

        fs::create_dir_all(&config_dir)?;

        Ok(Self {
            config_path: config_dir.join("config.json"),
        })
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read config file")?;

        serde_json::from_str(&content).context("Failed to parse config file")
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_default() -> Result<()> {
        let dir = tempdir()?;
        let manager = ConfigManager::with_path(dir.path().join("config.json"));
        let config = manager.load()?;
        assert!(config.default_chain_id.is_none());
        assert!(config.rpc_overrides.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_hand_written_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"default_chain_id": 31, "rpc_overrides": {"31": "http://localhost:4444"}}"#,
        )?;

        let loaded = ConfigManager::with_path(&path).load()?;
        assert_eq!(loaded.default_chain_id, Some(31));
        assert_eq!(loaded.default_network(), Some(Network::RootStockTestnet));
        assert_eq!(
            loaded.rpc_overrides.get(&31).map(String::as_str),
            Some("http://localhost:4444")
        );
        assert!(loaded.explorer_api_key.is_none());
        Ok(())
    }

    #[test]
    fn test_malformed_file_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.json");
        fs::write(&path, "default_chain_id = 31")?;
        assert!(ConfigManager::with_path(&path).load().is_err());
        Ok(())
    }

    #[test]
    fn test_networks_apply_valid_overrides_only() {
        let mut config = Config::default();
        config
            .rpc_overrides
            .insert(30, "http://localhost:4444".to_string());
        config.rpc_overrides.insert(31, "not a url".to_string());

        let networks = config.networks();
        let mainnet = networks.iter().find(|n| n.chain_id == 30).unwrap();
        let testnet = networks.iter().find(|n| n.chain_id == 31).unwrap();
        assert_eq!(mainnet.rpc_url, "http://localhost:4444");
        assert_eq!(testnet.rpc_url, "https://public-node.testnet.rsk.co");
    }
}
