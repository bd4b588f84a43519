/*!
# Sandbox Chain State

Everything the local chain knows, as one serializable value. The CLI keeps it
in a JSON file between invocations; tests keep it in memory.
*/

use crate::errors::SandboxResult;
use factorypool_client::{ChainId, TxHash, TxReceipt, WatchAsset, HARDHAT_CHAIN_ID};
use factorypool_view::{Address, CampaignRecord, Timestamp, Wei, WEI_PER_ETHER};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Default Hardhat development accounts
pub const DEV_ACCOUNTS: &[&str] = &[
    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
    "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
];

/// Addresses the first two deployments from the first dev account land on
pub const CROWDFUNDING_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const REWARD_TOKEN_ADDRESS: &str = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512";

/// Starting balance of every dev account
pub const DEV_ACCOUNT_BALANCE: Wei = 10_000 * WEI_PER_ETHER;

/// A receipt that becomes visible after some number of lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingReceipt {
    pub receipt: TxReceipt,
    pub polls_remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainState {
    pub chain_id: ChainId,
    /// Chains the wallet can switch to without adding them first
    pub known_chains: BTreeSet<ChainId>,

    /// Added to the wall clock, or to `frozen_time` when set
    #[serde(default)]
    pub clock_offset_secs: i64,
    #[serde(default)]
    pub frozen_time: Option<Timestamp>,

    pub accounts: Vec<Address>,
    pub selected_account: usize,

    pub crowdfunding: Address,
    pub reward_token: Address,

    pub balances: BTreeMap<Address, Wei>,
    pub token_balances: BTreeMap<Address, Wei>,

    pub campaigns: Vec<CampaignRecord>,
    /// Campaign index to contributor to amount, cleared by refunds
    #[serde(default)]
    pub contributions: BTreeMap<u64, BTreeMap<Address, Wei>>,

    #[serde(default)]
    pub receipts: BTreeMap<TxHash, PendingReceipt>,
    #[serde(default)]
    pub next_nonce: u64,
    #[serde(default)]
    pub block_number: u64,

    #[serde(default)]
    pub watched_assets: Vec<WatchAsset>,
}

impl ChainState {
    /// Fresh Hardhat-like chain: funded dev accounts, contracts deployed, no campaigns
    pub fn genesis() -> SandboxResult<Self> {
        let accounts = DEV_ACCOUNTS
            .iter()
            .map(|a| Address::from_str(a))
            .collect::<Result<Vec<_>, _>>()?;
        let balances = accounts
            .iter()
            .map(|account| (*account, DEV_ACCOUNT_BALANCE))
            .collect();

        Ok(Self {
            chain_id: HARDHAT_CHAIN_ID,
            known_chains: BTreeSet::from([HARDHAT_CHAIN_ID]),
            clock_offset_secs: 0,
            frozen_time: None,
            accounts,
            selected_account: 0,
            crowdfunding: Address::from_str(CROWDFUNDING_ADDRESS)?,
            reward_token: Address::from_str(REWARD_TOKEN_ADDRESS)?,
            balances,
            token_balances: BTreeMap::new(),
            campaigns: Vec::new(),
            contributions: BTreeMap::new(),
            receipts: BTreeMap::new(),
            next_nonce: 0,
            block_number: 0,
            watched_assets: Vec::new(),
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> SandboxResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let state = serde_json::from_str(&contents)?;
        debug!("Loaded sandbox state from {}", path.as_ref().display());
        Ok(state)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> SandboxResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!("Saved sandbox state to {}", path.display());
        Ok(())
    }

    /// Chain time: frozen or wall clock, plus the offset
    pub fn now(&self) -> Timestamp {
        let base = self
            .frozen_time
            .unwrap_or_else(|| chrono::Utc::now().timestamp());
        base + self.clock_offset_secs
    }

    /// The account the wallet exposes, if any
    pub fn selected(&self) -> Option<Address> {
        self.accounts.get(self.selected_account).copied()
    }

    pub fn balance(&self, account: &Address) -> Wei {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn token_balance(&self, account: &Address) -> Wei {
        self.token_balances.get(account).copied().unwrap_or(0)
    }

    pub fn contribution(&self, index: u64, contributor: &Address) -> Wei {
        self.contributions
            .get(&index)
            .and_then(|by_account| by_account.get(contributor))
            .copied()
            .unwrap_or(0)
    }
}
