/*!
# Local Chain

An in-process wallet provider backed by [`ChainState`]. It answers the same
calls a browser wallet and a Hardhat node would, and exposes hooks for the
situations that are hard to produce on a real chain: a declined signature, a
slow block, a clock past the deadline.
*/

use crate::{
    artifacts::sandbox_artifacts,
    errors::{SandboxError, SandboxResult},
    state::{ChainState, PendingReceipt},
};
use factorypool_client::{
    artifacts::{CROWDFUNDING_METHODS, REWARD_TOKEN_METHODS},
    errors::UNRECOGNIZED_CHAIN_CODE,
    Artifacts, ChainId, ChainSpec, ClientError, ClientResult, Clock, ContractArtifact,
    CrowdfundingContract, RewardTokenContract, TxHash, TxReceipt, TxStatus, WalletEvent,
    WalletProvider, WatchAsset,
};
use factorypool_view::{Address, CampaignRecord, Timestamp, Wei};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Error code nodes return when the sender cannot cover the value
const INSUFFICIENT_FUNDS_CODE: i64 = -32000;

#[derive(Debug, Default)]
struct Hooks {
    reject_next_signature: bool,
    reject_connection: bool,
    decline_watch_asset: bool,
    receipt_delay: u32,
    revert_next_receipt: Option<String>,
    reported_campaign_count: Option<u64>,
}

/// Shared handle to the sandbox chain. Clones see the same state.
#[derive(Debug, Clone)]
pub struct LocalChain {
    state: Arc<Mutex<ChainState>>,
    hooks: Arc<Mutex<Hooks>>,
}

impl LocalChain {
    pub fn new(state: ChainState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            hooks: Arc::new(Mutex::new(Hooks::default())),
        }
    }

    pub fn genesis() -> SandboxResult<Self> {
        Ok(Self::new(ChainState::genesis()?))
    }

    /// Resume a chain saved with [`LocalChain::save`]
    pub fn open<P: AsRef<Path>>(path: P) -> SandboxResult<Self> {
        Ok(Self::new(ChainState::load(path)?))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> SandboxResult<()> {
        self.state().save(path)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ChainState {
        self.state().clone()
    }

    /// Artifacts for the contracts deployed on this chain
    pub fn artifacts(&self) -> Artifacts {
        sandbox_artifacts(&self.state())
    }

    fn state(&self) -> MutexGuard<'_, ChainState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn hooks(&self) -> MutexGuard<'_, Hooks> {
        self.hooks.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ================================================================================================
    // Test hooks
    // ================================================================================================

    /// Move the chain clock forward (or back, for negative values)
    pub fn advance_time(&self, seconds: i64) {
        let mut state = self.state();
        state.clock_offset_secs += seconds;
        info!("Sandbox clock now {}", state.now());
    }

    /// Stop the clock at `at`; later advances are relative to it
    pub fn freeze_time(&self, at: Timestamp) {
        let mut state = self.state();
        state.frozen_time = Some(at);
        state.clock_offset_secs = 0;
    }

    /// The next signature or chain prompt is declined by the user
    pub fn reject_next_signature(&self) {
        self.hooks().reject_next_signature = true;
    }

    pub fn reject_connection(&self, reject: bool) {
        self.hooks().reject_connection = reject;
    }

    pub fn decline_watch_asset(&self, decline: bool) {
        self.hooks().decline_watch_asset = decline;
    }

    /// Receipts of transactions submitted from now on stay hidden for `polls` lookups
    pub fn delay_receipts(&self, polls: u32) {
        self.hooks().receipt_delay = polls;
    }

    /// The next transaction is mined but reverts with `reason`, leaving state untouched
    pub fn revert_next_receipt(&self, reason: impl Into<String>) {
        self.hooks().revert_next_receipt = Some(reason.into());
    }

    /// Make `campaignCount()` answer `count` regardless of the stored campaigns
    pub fn report_campaign_count(&self, count: Option<u64>) {
        self.hooks().reported_campaign_count = count;
    }

    /// Expose a different account and return the event the wallet would emit
    pub fn select_account(&self, account: &Address) -> SandboxResult<WalletEvent> {
        let mut state = self.state();
        let position = state
            .accounts
            .iter()
            .position(|a| a == account)
            .ok_or_else(|| SandboxError::UnknownAccount(account.to_string()))?;
        state.selected_account = position;
        info!("Sandbox account switched to {}", account);
        Ok(WalletEvent::AccountsChanged(vec![*account]))
    }

    /// The event the wallet emits when the user disconnects the site
    pub fn disconnect(&self) -> WalletEvent {
        WalletEvent::AccountsChanged(Vec::new())
    }

    /// Move the wallet to another chain, as if the user picked it in the wallet
    pub fn set_chain(&self, chain_id: ChainId) -> WalletEvent {
        let mut state = self.state();
        state.known_chains.insert(chain_id);
        state.chain_id = chain_id;
        WalletEvent::ChainChanged(chain_id)
    }

    fn take_rejection(&self) -> bool {
        std::mem::take(&mut self.hooks().reject_next_signature)
    }

    // ================================================================================================
    // Transactions
    // ================================================================================================

    /// Sign, apply, and queue a receipt for one transaction
    fn submit<F>(&self, signer: Address, method: &str, apply: F) -> ClientResult<TxHash>
    where
        F: FnOnce(&mut ChainState, Timestamp) -> ClientResult<()>,
    {
        if self.take_rejection() {
            debug!("User rejected {} signature", method);
            return Err(ClientError::wallet(
                factorypool_client::errors::USER_REJECTED_CODE,
                "User denied transaction signature",
            ));
        }
        let delay = self.hooks().receipt_delay;
        let revert = self.hooks().revert_next_receipt.take();

        let mut state = self.state();
        let now = state.now();
        let status = match revert {
            Some(reason) => TxStatus::Reverted {
                reason: Some(reason),
            },
            None => {
                apply(&mut *state, now)?;
                TxStatus::Success
            }
        };

        let hash = tx_hash(state.chain_id, state.next_nonce, &signer, method);
        state.next_nonce += 1;
        state.block_number += 1;
        let receipt = TxReceipt {
            hash,
            block_number: state.block_number,
            status,
        };
        state.receipts.insert(
            hash,
            PendingReceipt {
                receipt,
                polls_remaining: delay,
            },
        );

        debug!("{} from {} submitted as {}", method, signer, hash);
        Ok(hash)
    }
}

fn tx_hash(chain_id: ChainId, nonce: u64, signer: &Address, method: &str) -> TxHash {
    let mut hasher = Sha256::new();
    hasher.update(chain_id.to_be_bytes());
    hasher.update(nonce.to_be_bytes());
    hasher.update(signer.as_bytes());
    hasher.update(method.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hasher.finalize());
    TxHash::new(bytes)
}

impl Clock for LocalChain {
    fn now(&self) -> Timestamp {
        self.state().now()
    }
}

impl WalletProvider for LocalChain {
    type Crowdfunding = LocalCrowdfunding;
    type RewardToken = LocalRewardToken;

    async fn request_accounts(&self) -> ClientResult<Vec<Address>> {
        if self.hooks().reject_connection {
            return Err(ClientError::UserRejected);
        }
        Ok(self.state().selected().into_iter().collect())
    }

    async fn chain_id(&self) -> ClientResult<ChainId> {
        Ok(self.state().chain_id)
    }

    async fn switch_chain(&self, chain_id: ChainId) -> ClientResult<()> {
        if self.take_rejection() {
            return Err(ClientError::UserRejected);
        }
        let mut state = self.state();
        if !state.known_chains.contains(&chain_id) {
            return Err(ClientError::wallet(
                UNRECOGNIZED_CHAIN_CODE,
                format!("Unrecognized chain ID 0x{:x}", chain_id),
            ));
        }
        state.chain_id = chain_id;
        Ok(())
    }

    async fn add_chain(&self, chain: &ChainSpec) -> ClientResult<()> {
        if self.take_rejection() {
            return Err(ClientError::UserRejected);
        }
        self.state().known_chains.insert(chain.chain_id);
        info!("Sandbox wallet added {}", chain.chain_name);
        Ok(())
    }

    async fn balance(&self, account: &Address) -> ClientResult<Wei> {
        Ok(self.state().balance(account))
    }

    async fn transaction_receipt(&self, hash: &TxHash) -> ClientResult<Option<TxReceipt>> {
        let mut state = self.state();
        let pending = state
            .receipts
            .get_mut(hash)
            .ok_or_else(|| ClientError::Rpc(format!("Unknown transaction {}", hash)))?;

        if pending.polls_remaining > 0 {
            pending.polls_remaining -= 1;
            return Ok(None);
        }
        Ok(Some(pending.receipt.clone()))
    }

    async fn watch_asset(&self, asset: &WatchAsset) -> ClientResult<bool> {
        let declined = self.hooks().decline_watch_asset;
        if declined || self.take_rejection() {
            return Ok(false);
        }
        let mut state = self.state();
        if !state.watched_assets.contains(asset) {
            state.watched_assets.push(asset.clone());
        }
        Ok(true)
    }

    fn crowdfunding(
        &self,
        address: Address,
        artifact: &ContractArtifact,
        signer: Address,
    ) -> ClientResult<Self::Crowdfunding> {
        artifact.require_methods("Crowdfunding", CROWDFUNDING_METHODS)?;
        if address != self.state().crowdfunding {
            return Err(ClientError::Rpc(format!("No contract deployed at {}", address)));
        }
        Ok(LocalCrowdfunding {
            chain: self.clone(),
            signer,
        })
    }

    fn reward_token(
        &self,
        address: Address,
        artifact: &ContractArtifact,
        _signer: Address,
    ) -> ClientResult<Self::RewardToken> {
        artifact.require_methods("RewardToken", REWARD_TOKEN_METHODS)?;
        if address != self.state().reward_token {
            return Err(ClientError::Rpc(format!("No contract deployed at {}", address)));
        }
        Ok(LocalRewardToken {
            chain: self.clone(),
        })
    }
}

/// Crowdfunding contract handle bound to a signer
#[derive(Debug, Clone)]
pub struct LocalCrowdfunding {
    chain: LocalChain,
    signer: Address,
}

impl CrowdfundingContract for LocalCrowdfunding {
    async fn campaign_count(&self) -> ClientResult<u64> {
        let reported = self.chain.hooks().reported_campaign_count;
        Ok(reported.unwrap_or_else(|| self.chain.state().campaigns.len() as u64))
    }

    async fn get_campaign(&self, index: u64) -> ClientResult<CampaignRecord> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.chain.state().campaigns.get(i).cloned())
            .ok_or(ClientError::CampaignNotFound(index))
    }

    async fn create_campaign(
        &self,
        title: &str,
        funding_goal: Wei,
        duration_seconds: u64,
    ) -> ClientResult<TxHash> {
        let signer = self.signer;
        self.chain.submit(signer, "createCampaign", |state, now| {
            state.create_campaign(signer, title, funding_goal, duration_seconds, now)?;
            Ok(())
        })
    }

    async fn contribute(&self, index: u64, value: Wei) -> ClientResult<TxHash> {
        let signer = self.signer;
        self.chain.submit(signer, "contribute", |state, now| {
            if state.balance(&signer) < value {
                return Err(ClientError::wallet(
                    INSUFFICIENT_FUNDS_CODE,
                    "insufficient funds for gas * price + value",
                ));
            }
            state.contribute(signer, index, value, now)?;
            Ok(())
        })
    }

    async fn finalize_campaign(&self, index: u64) -> ClientResult<TxHash> {
        let signer = self.signer;
        self.chain.submit(signer, "finalizeCampaign", |state, now| {
            state.finalize_campaign(signer, index, now)?;
            Ok(())
        })
    }
}

/// Reward token handle
#[derive(Debug, Clone)]
pub struct LocalRewardToken {
    chain: LocalChain,
}

impl RewardTokenContract for LocalRewardToken {
    async fn balance_of(&self, owner: &Address) -> ClientResult<Wei> {
        Ok(self.chain.state().token_balance(owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factorypool_client::sepolia_chain_spec;

    #[tokio::test]
    async fn test_receipt_delay_counts_down() {
        let chain = LocalChain::genesis().unwrap();
        chain.freeze_time(1_000);
        chain.delay_receipts(2);

        let artifacts = chain.artifacts();
        let signer = chain.snapshot().accounts[0];
        let crowdfunding = chain
            .crowdfunding(artifacts.addresses.crowdfunding, &artifacts.crowdfunding, signer)
            .unwrap();

        let hash = crowdfunding
            .create_campaign("A - B (1 pcs)", 10, 60)
            .await
            .unwrap();
        assert_eq!(chain.transaction_receipt(&hash).await.unwrap(), None);
        assert_eq!(chain.transaction_receipt(&hash).await.unwrap(), None);
        let receipt = chain.transaction_receipt(&hash).await.unwrap().unwrap();
        assert_eq!(receipt.status, TxStatus::Success);
        assert_eq!(receipt.block_number, 1);
    }

    #[tokio::test]
    async fn test_unknown_chain_needs_adding() {
        let chain = LocalChain::genesis().unwrap();
        let sepolia = sepolia_chain_spec();

        let err = chain.switch_chain(sepolia.chain_id).await.unwrap_err();
        assert!(err.is_unrecognized_chain());

        chain.add_chain(&sepolia).await.unwrap();
        chain.switch_chain(sepolia.chain_id).await.unwrap();
        assert_eq!(chain.chain_id().await.unwrap(), sepolia.chain_id);
    }

    #[tokio::test]
    async fn test_rejected_signature_leaves_state_untouched() {
        let chain = LocalChain::genesis().unwrap();
        let artifacts = chain.artifacts();
        let signer = chain.snapshot().accounts[0];
        let crowdfunding = chain
            .crowdfunding(artifacts.addresses.crowdfunding, &artifacts.crowdfunding, signer)
            .unwrap();

        chain.reject_next_signature();
        let before = chain.snapshot();
        let err = crowdfunding
            .create_campaign("A - B (1 pcs)", 10, 60)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::UserRejected));
        assert_eq!(chain.snapshot(), before);

        // only the next prompt is rejected
        assert!(crowdfunding
            .create_campaign("A - B (1 pcs)", 10, 60)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_reverted_receipt_leaves_state_untouched() {
        let chain = LocalChain::genesis().unwrap();
        let artifacts = chain.artifacts();
        let signer = chain.snapshot().accounts[0];
        let crowdfunding = chain
            .crowdfunding(artifacts.addresses.crowdfunding, &artifacts.crowdfunding, signer)
            .unwrap();

        chain.revert_next_receipt("Campaign has ended");
        let hash = crowdfunding
            .create_campaign("A - B (1 pcs)", 10, 60)
            .await
            .unwrap();
        let receipt = chain.transaction_receipt(&hash).await.unwrap().unwrap();
        assert_eq!(
            receipt.status,
            TxStatus::Reverted {
                reason: Some("Campaign has ended".to_string())
            }
        );
        assert!(chain.snapshot().campaigns.is_empty());

        // only the next transaction reverts
        let hash = crowdfunding
            .create_campaign("A - B (1 pcs)", 10, 60)
            .await
            .unwrap();
        let receipt = chain.transaction_receipt(&hash).await.unwrap().unwrap();
        assert_eq!(receipt.status, TxStatus::Success);
        assert_eq!(chain.snapshot().campaigns.len(), 1);
    }

    #[test]
    fn test_select_unknown_account() {
        let chain = LocalChain::genesis().unwrap();
        let stranger = Address::new([7u8; 20]);
        assert!(matches!(
            chain.select_account(&stranger),
            Err(SandboxError::UnknownAccount(_))
        ));
    }

    #[test]
    fn test_tx_hashes_are_distinct() {
        let signer = Address::new([1u8; 20]);
        assert_ne!(
            tx_hash(31_337, 0, &signer, "contribute"),
            tx_hash(31_337, 1, &signer, "contribute")
        );
    }
}
