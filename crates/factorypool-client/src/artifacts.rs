/*!
# Contract Artifacts

Static JSON emitted by the contract toolchain, loaded once at startup:

- `Crowdfunding.json` and `RewardToken.json`: build artifacts with an `abi` array
- `contract-address.json`: deployed addresses keyed by contract name

Any failure here is fatal for the session.
*/

use crate::errors::{ClientError, ClientResult};
use factorypool_view::Address;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CROWDFUNDING_ARTIFACT: &str = "Crowdfunding.json";
pub const REWARD_TOKEN_ARTIFACT: &str = "RewardToken.json";
pub const ADDRESSES_FILE: &str = "contract-address.json";

/// Methods the client calls on the Crowdfunding contract
pub const CROWDFUNDING_METHODS: &[&str] = &[
    "campaignCount",
    "getCampaign",
    "createCampaign",
    "contribute",
    "finalizeCampaign",
];

/// Methods the client calls on the reward token
pub const REWARD_TOKEN_METHODS: &[&str] = &["balanceOf"];

/// A contract build artifact; only the ABI is read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractArtifact {
    #[serde(default, rename = "contractName", skip_serializing_if = "Option::is_none")]
    pub contract_name: Option<String>,

    pub abi: Vec<serde_json::Value>,
}

impl ContractArtifact {
    /// Names of the functions the ABI declares
    pub fn function_names(&self) -> Vec<&str> {
        self.abi
            .iter()
            .filter(|entry| entry.get("type").and_then(|t| t.as_str()) == Some("function"))
            .filter_map(|entry| entry.get("name").and_then(|n| n.as_str()))
            .collect()
    }

    pub fn declares(&self, method: &str) -> bool {
        self.function_names().contains(&method)
    }

    /// Fail unless every listed method is present
    pub fn require_methods(&self, label: &str, methods: &[&str]) -> ClientResult<()> {
        let missing: Vec<&str> = methods
            .iter()
            .copied()
            .filter(|method| !self.declares(method))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ClientError::Artifacts(format!(
                "{} ABI is missing: {}",
                label,
                missing.join(", ")
            )))
        }
    }
}

/// Deployed contract addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedAddresses {
    #[serde(rename = "Crowdfunding")]
    pub crowdfunding: Address,

    #[serde(rename = "RewardToken")]
    pub reward_token: Address,
}

/// Everything needed to bind contract handles
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub crowdfunding: ContractArtifact,
    pub reward_token: ContractArtifact,
    pub addresses: DeployedAddresses,
}

impl Artifacts {
    /// Load and check all three files from `dir`
    pub fn load<P: AsRef<Path>>(dir: P) -> ClientResult<Self> {
        let dir = dir.as_ref();
        debug!("Loading contract artifacts from {}", dir.display());

        let crowdfunding: ContractArtifact = read_json(dir.join(CROWDFUNDING_ARTIFACT))?;
        let reward_token: ContractArtifact = read_json(dir.join(REWARD_TOKEN_ARTIFACT))?;
        let addresses: DeployedAddresses = read_json(dir.join(ADDRESSES_FILE))?;

        let artifacts = Self {
            crowdfunding,
            reward_token,
            addresses,
        };
        artifacts.validate()?;

        info!(
            "Artifacts loaded: Crowdfunding={} RewardToken={}",
            artifacts.addresses.crowdfunding, artifacts.addresses.reward_token
        );
        Ok(artifacts)
    }

    pub fn validate(&self) -> ClientResult<()> {
        self.crowdfunding
            .require_methods("Crowdfunding", CROWDFUNDING_METHODS)?;
        self.reward_token
            .require_methods("RewardToken", REWARD_TOKEN_METHODS)?;
        Ok(())
    }

    /// Write the three files into `dir`, creating it if needed
    pub fn write<P: AsRef<Path>>(&self, dir: P) -> ClientResult<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        write_json(dir.join(CROWDFUNDING_ARTIFACT), &self.crowdfunding)?;
        write_json(dir.join(REWARD_TOKEN_ARTIFACT), &self.reward_token)?;
        write_json(dir.join(ADDRESSES_FILE), &self.addresses)?;
        Ok(())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: PathBuf) -> ClientResult<T> {
    let contents = fs::read_to_string(&path)
        .map_err(|e| ClientError::Artifacts(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&contents)
        .map_err(|e| ClientError::Artifacts(format!("{}: {}", path.display(), e)))
}

fn write_json<T: Serialize>(path: PathBuf, value: &T) -> ClientResult<()> {
    let contents = serde_json::to_string_pretty(value)?;
    fs::write(path, contents)?;
    Ok(())
}
