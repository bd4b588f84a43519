use crate::{
    errors::{ClientError, ClientResult},
    types::ChainId,
};
use backoff::ExponentialBackoff;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Client configuration file structure (YAML)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Directory holding the contract artifacts and address map
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub confirmation: ConfirmationConfig,
}

/// Chains the client is willing to talk to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Chain id to display name
    #[serde(default = "default_allowed_chains")]
    pub allowed_chains: BTreeMap<ChainId, String>,
}

/// How long to wait for a submitted transaction to be mined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationConfig {
    /// First delay between receipt polls
    #[serde(default = "default_initial_interval_ms")]
    pub initial_interval_ms: u64,

    /// Upper bound on the delay between polls
    #[serde(default = "default_max_interval_ms")]
    pub max_interval_ms: u64,

    /// Give up after this long
    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: u64,
}

impl ClientConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> ClientResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.network.allowed_chains.is_empty() {
            return Err(ClientError::InvalidInput(
                "network.allowed_chains must list at least one chain".to_string(),
            ));
        }
        if self.confirmation.initial_interval_ms == 0 {
            return Err(ClientError::InvalidInput(
                "confirmation.initial_interval_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            artifacts_dir: default_artifacts_dir(),
            network: NetworkConfig::default(),
            confirmation: ConfirmationConfig::default(),
        }
    }
}

impl NetworkConfig {
    pub fn chain_name(&self, chain_id: ChainId) -> Option<&str> {
        self.allowed_chains.get(&chain_id).map(String::as_str)
    }

    pub fn is_allowed(&self, chain_id: ChainId) -> bool {
        self.allowed_chains.contains_key(&chain_id)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            allowed_chains: default_allowed_chains(),
        }
    }
}

impl ConfirmationConfig {
    /// Polling schedule for receipt lookups
    pub fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: Duration::from_millis(self.initial_interval_ms),
            current_interval: Duration::from_millis(self.initial_interval_ms),
            max_interval: Duration::from_millis(self.max_interval_ms.max(self.initial_interval_ms)),
            max_elapsed_time: Some(Duration::from_secs(self.max_wait_secs)),
            multiplier: 1.5,
            ..Default::default()
        }
    }
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: default_initial_interval_ms(),
            max_interval_ms: default_max_interval_ms(),
            max_wait_secs: default_max_wait_secs(),
        }
    }
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_allowed_chains() -> BTreeMap<ChainId, String> {
    crate::network::ALLOWED_CHAINS
        .iter()
        .map(|(id, name)| (*id, name.to_string()))
        .collect()
}

fn default_initial_interval_ms() -> u64 {
    500
}

fn default_max_interval_ms() -> u64 {
    4_000
}

fn default_max_wait_secs() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.artifacts_dir, PathBuf::from("artifacts"));
        assert!(config.network.is_allowed(11_155_111));
        assert!(config.network.is_allowed(31_337));
        assert!(config.network.is_allowed(1_337));
        assert!(!config.network.is_allowed(1));
        assert_eq!(config.confirmation.initial_interval_ms, 500);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "artifacts_dir: ./build\nconfirmation:\n  max_wait_secs: 30\n";
        let config: ClientConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.artifacts_dir, PathBuf::from("./build"));
        assert_eq!(config.confirmation.max_wait_secs, 30);
        assert_eq!(config.confirmation.initial_interval_ms, 500);
        assert_eq!(config.network, NetworkConfig::default());
    }

    #[test]
    fn test_custom_chains() {
        let yaml = "network:\n  allowed_chains:\n    31337: Local\n";
        let config: ClientConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.network.chain_name(31_337), Some("Local"));
        assert!(!config.network.is_allowed(11_155_111));
    }

    #[test]
    fn test_validate_rejects_empty_chain_list() {
        let mut config = ClientConfig::default();
        config.network.allowed_chains.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backoff_bounds() {
        let backoff = ConfirmationConfig {
            initial_interval_ms: 10,
            max_interval_ms: 5,
            max_wait_secs: 2,
        }
        .backoff();
        assert_eq!(backoff.initial_interval, Duration::from_millis(10));
        assert_eq!(backoff.max_interval, Duration::from_millis(10));
        assert_eq!(backoff.max_elapsed_time, Some(Duration::from_secs(2)));
    }
}
