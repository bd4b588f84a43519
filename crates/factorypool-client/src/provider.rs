/*!
# External Collaborators

The wallet provider and the deployed contracts are consumed as-is. These traits
name exactly the calls the client makes, so any backend (an injected browser
wallet, a JSON-RPC node, the local sandbox) can sit behind them.

Contract handles are bound to a signer when created, the way a contract object
is bound to the wallet's signer, so mutating calls take no `from` argument.
*/
#![allow(async_fn_in_trait)]

use crate::{
    artifacts::ContractArtifact,
    errors::ClientResult,
    types::{ChainId, ChainSpec, TxHash, TxReceipt, WatchAsset},
};
use factorypool_view::{Address, CampaignRecord, Timestamp, Wei};

/// Wallet-injected provider
pub trait WalletProvider {
    type Crowdfunding: CrowdfundingContract;
    type RewardToken: RewardTokenContract;

    /// Ask the user to expose accounts (`eth_requestAccounts`); the first is active
    async fn request_accounts(&self) -> ClientResult<Vec<Address>>;

    async fn chain_id(&self) -> ClientResult<ChainId>;

    /// `wallet_switchEthereumChain`; fails with code 4902 for unknown chains
    async fn switch_chain(&self, chain_id: ChainId) -> ClientResult<()>;

    /// `wallet_addEthereumChain`
    async fn add_chain(&self, chain: &ChainSpec) -> ClientResult<()>;

    async fn balance(&self, account: &Address) -> ClientResult<Wei>;

    /// `None` until the transaction is mined
    async fn transaction_receipt(&self, hash: &TxHash) -> ClientResult<Option<TxReceipt>>;

    /// `wallet_watchAsset`; `false` when the user declines
    async fn watch_asset(&self, asset: &WatchAsset) -> ClientResult<bool>;

    fn crowdfunding(
        &self,
        address: Address,
        artifact: &ContractArtifact,
        signer: Address,
    ) -> ClientResult<Self::Crowdfunding>;

    fn reward_token(
        &self,
        address: Address,
        artifact: &ContractArtifact,
        signer: Address,
    ) -> ClientResult<Self::RewardToken>;
}

/// Deployed Crowdfunding contract, bound to a signer
pub trait CrowdfundingContract {
    async fn campaign_count(&self) -> ClientResult<u64>;

    async fn get_campaign(&self, index: u64) -> ClientResult<CampaignRecord>;

    async fn create_campaign(
        &self,
        title: &str,
        funding_goal: Wei,
        duration_seconds: u64,
    ) -> ClientResult<TxHash>;

    /// Payable; `value` is sent with the call
    async fn contribute(&self, index: u64, value: Wei) -> ClientResult<TxHash>;

    async fn finalize_campaign(&self, index: u64) -> ClientResult<TxHash>;
}

/// Reward token minted to contributors
pub trait RewardTokenContract {
    async fn balance_of(&self, owner: &Address) -> ClientResult<Wei>;
}

/// Source of the current time used for deadlines
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        chrono::Utc::now().timestamp()
    }
}
