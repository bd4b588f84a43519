/*!
# FactoryPool Client Implementation

Owns the session slot and runs every user operation. Mutations follow one
shape: submit a single transaction, wait for it to be mined, re-fetch the
whole campaign list, re-derive every view. Nothing is patched locally.
*/

use crate::{
    artifacts::Artifacts,
    board::{ActionRequest, BuyOrder, CampaignBoard},
    config::ClientConfig,
    confirm::wait_for_receipt,
    draft::CampaignDraft,
    errors::{ClientError, ClientResult},
    guard::{ButtonId, InFlight},
    network::{ensure_allowed, sepolia_chain_spec, switch_chain},
    provider::{Clock, CrowdfundingContract, RewardTokenContract, SystemClock, WalletProvider},
    session::Session,
    stats::UserStats,
    types::{ChainSpec, SessionChange, TxReceipt, WalletEvent, WatchAsset},
};
use factorypool_view::{derive_view, format_ether, CampaignView, Timestamp, ViewError};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Symbol the reward token is registered under in the wallet
pub const REWARD_TOKEN_SYMBOL: &str = "FPT";
pub const REWARD_TOKEN_DECIMALS: u8 = 18;

/// Result of a mined transaction, with the refreshed state
#[derive(Debug)]
pub struct ActionOutcome {
    pub receipt: TxReceipt,
    /// Success text for the user
    pub notice: String,
    pub board: CampaignBoard,
    /// `None` when the balance refresh failed; that failure is only logged
    pub stats: Option<UserStats>,
}

/// Unified client for FactoryPool wallet and contract operations
pub struct FactoryPoolClient<P: WalletProvider> {
    provider: P,
    artifacts: Artifacts,
    config: ClientConfig,
    clock: Box<dyn Clock>,
    session: RwLock<Option<Arc<Session<P>>>>,
    in_flight: InFlight,
}

impl<P: WalletProvider> FactoryPoolClient<P> {
    /// Create a client using the wall clock
    pub fn new(provider: P, artifacts: Artifacts, config: ClientConfig) -> Self {
        Self {
            provider,
            artifacts,
            config,
            clock: Box::new(SystemClock),
            session: RwLock::new(None),
            in_flight: InFlight::default(),
        }
    }

    /// Replace the clock used for deadlines
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    // ================================================================================================
    // Session
    // ================================================================================================

    /// Current session, if a wallet is connected
    pub fn session(&self) -> ClientResult<Arc<Session<P>>> {
        self.session
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(ClientError::NotConnected)
    }

    pub fn is_connected(&self) -> bool {
        self.session().is_ok()
    }

    fn replace_session(&self, session: Option<Arc<Session<P>>>) {
        *self.session.write().unwrap_or_else(|e| e.into_inner()) = session;
    }

    /// Request accounts, check the chain, bind contracts, and open a session
    pub async fn connect(&self) -> ClientResult<Arc<Session<P>>> {
        info!("Connecting wallet...");

        let accounts = self.provider.request_accounts().await?;
        let account = *accounts.first().ok_or(ClientError::NotConnected)?;

        let chain_id = self.provider.chain_id().await?;
        let chain_name = match ensure_allowed(&self.config.network, chain_id) {
            Ok(name) => name.to_string(),
            Err(e) => {
                self.replace_session(None);
                return Err(e);
            }
        };

        let session = Arc::new(Session::open(
            &self.provider,
            &self.artifacts,
            account,
            chain_id,
            chain_name,
        )?);
        self.replace_session(Some(Arc::clone(&session)));

        info!("Wallet connected: {} on {}", account, session.chain_name());
        Ok(session)
    }

    /// Apply a wallet notification to the session slot
    pub fn handle_wallet_event(&self, event: WalletEvent) -> ClientResult<SessionChange> {
        match event {
            WalletEvent::AccountsChanged(accounts) => match accounts.first() {
                None => {
                    info!("Wallet disconnected");
                    self.replace_session(None);
                    Ok(SessionChange::Disconnected)
                }
                Some(account) => {
                    let Ok(current) = self.session() else {
                        return Ok(SessionChange::Unchanged);
                    };
                    let session = Session::open(
                        &self.provider,
                        &self.artifacts,
                        *account,
                        current.chain_id(),
                        current.chain_name(),
                    )?;
                    self.replace_session(Some(Arc::new(session)));
                    info!("Account changed: {}", account);
                    Ok(SessionChange::AccountChanged(*account))
                }
            },
            WalletEvent::ChainChanged(chain_id) => {
                info!("Chain changed to {}", chain_id);
                let had_session = self.is_connected();
                self.replace_session(None);
                if had_session {
                    Ok(SessionChange::Reset)
                } else {
                    Ok(SessionChange::Unchanged)
                }
            }
        }
    }

    /// Move the wallet to Sepolia. The session is dropped; reconnect afterwards.
    pub async fn switch_to_sepolia(&self) -> ClientResult<()> {
        self.switch_network(&sepolia_chain_spec()).await
    }

    pub async fn switch_network(&self, chain: &ChainSpec) -> ClientResult<()> {
        switch_chain(&self.provider, chain).await?;
        self.replace_session(None);
        Ok(())
    }

    // ================================================================================================
    // Reads
    // ================================================================================================

    /// Read every campaign and derive its view with a single `now`
    pub async fn fetch_views(&self) -> ClientResult<Vec<CampaignView>> {
        let session = self.session()?;
        let crowdfunding = session.crowdfunding();

        let count = crowdfunding.campaign_count().await?;
        debug!("Total campaigns: {}", count);

        let mut records = Vec::new();
        for index in 0..count {
            records.push(crowdfunding.get_campaign(index).await?);
        }

        let now = self.now();
        Ok(records
            .iter()
            .map(|record| derive_view(record, now, Some(session.account())))
            .collect())
    }

    /// Load the board. Failures become [`CampaignBoard::Failed`]; calling this
    /// again is the retry.
    pub async fn load_campaigns(&self) -> CampaignBoard {
        info!("Loading campaigns...");
        match self.fetch_views().await {
            Ok(views) => {
                info!("Loaded {} campaign(s)", views.len());
                CampaignBoard::from_views(views)
            }
            Err(e) => {
                warn!("Failed to load campaigns: {}", e);
                CampaignBoard::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    pub async fn user_stats(&self) -> ClientResult<UserStats> {
        let session = self.session()?;
        let native_balance = self.provider.balance(session.account()).await?;
        let reward_balance = session
            .reward_token()
            .balance_of(session.account())
            .await?;

        Ok(UserStats {
            native_balance,
            reward_balance,
        })
    }

    async fn refresh_stats(&self) -> Option<UserStats> {
        match self.user_stats().await {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!("Failed to update user stats: {}", e);
                None
            }
        }
    }

    /// Ask the wallet to track the reward token. `false` if the user declined.
    pub async fn add_token_to_wallet(&self) -> ClientResult<bool> {
        let asset = WatchAsset {
            address: self.artifacts.addresses.reward_token,
            symbol: REWARD_TOKEN_SYMBOL.to_string(),
            decimals: REWARD_TOKEN_DECIMALS,
        };

        let added = self.provider.watch_asset(&asset).await?;
        if added {
            info!("{} token added to wallet", REWARD_TOKEN_SYMBOL);
        } else {
            info!("User declined to add {} token", REWARD_TOKEN_SYMBOL);
        }
        Ok(added)
    }

    // ================================================================================================
    // Mutations
    // ================================================================================================

    pub fn is_pending(&self, button: ButtonId) -> bool {
        self.in_flight.is_pending(button)
    }

    /// Launch a new campaign
    pub async fn create_campaign(&self, draft: &CampaignDraft) -> ClientResult<ActionOutcome> {
        let submission = draft.submission()?;
        let session = self.session()?;
        let _guard = self.in_flight.acquire(ButtonId::CreateCampaign)?;

        info!(
            "Creating campaign: title={:?} goal={} wei duration={}s",
            submission.title, submission.funding_goal, submission.duration_seconds
        );

        let hash = session
            .crowdfunding()
            .create_campaign(
                &submission.title,
                submission.funding_goal,
                submission.duration_seconds,
            )
            .await?;
        let receipt = wait_for_receipt(&self.provider, &hash, &self.config.confirmation).await?;
        info!("Campaign created in tx {}", hash);

        let board = self.load_campaigns().await;
        let stats = self.refresh_stats().await;

        Ok(ActionOutcome {
            receipt,
            notice: "Production batch launched successfully!".to_string(),
            board,
            stats,
        })
    }

    /// Run a card action: buy, finalize, or withdraw.
    ///
    /// The campaign is read again and its view re-derived first, so a stale
    /// card cannot submit an action the current state no longer allows.
    pub async fn dispatch(&self, request: ActionRequest) -> ClientResult<ActionOutcome> {
        let session = self.session()?;
        let index = request.index();
        let _guard = self.in_flight.acquire(ButtonId::Campaign {
            index,
            action: request.kind(),
        })?;

        let count = session.crowdfunding().campaign_count().await?;
        if index >= count {
            return Err(ClientError::CampaignNotFound(index));
        }
        let record = session.crowdfunding().get_campaign(index).await?;
        let view = derive_view(&record, self.now(), Some(session.account()));
        if view.allowed_action != request.kind() {
            return Err(ClientError::ActionNotAllowed {
                index,
                requested: request.kind(),
                allowed: view.allowed_action,
            });
        }

        let (hash, notice) = match request {
            ActionRequest::Buy { order, .. } => {
                let (value, notice) = contribution(&view, order)?;
                info!("Contributing {} wei to campaign {}", value, index);
                let hash = session.crowdfunding().contribute(index, value).await?;
                (hash, notice)
            }
            ActionRequest::Finalize { .. } => {
                info!("Finalizing campaign {}", index);
                let hash = session.crowdfunding().finalize_campaign(index).await?;
                (hash, "Campaign finalized successfully!".to_string())
            }
            ActionRequest::Withdraw { .. } => {
                // finalizing a funded campaign pays the creator
                info!("Withdrawing funds from campaign {}", index);
                let hash = session.crowdfunding().finalize_campaign(index).await?;
                (hash, "Funds have been transferred to your wallet!".to_string())
            }
        };

        let receipt = wait_for_receipt(&self.provider, &hash, &self.config.confirmation).await?;
        info!("Transaction {} confirmed", hash);

        let board = self.load_campaigns().await;
        let stats = self.refresh_stats().await;

        Ok(ActionOutcome {
            receipt,
            notice,
            board,
            stats,
        })
    }
}

/// Value to send for a buy order, and the success notice for it
fn contribution(view: &CampaignView, order: BuyOrder) -> ClientResult<(u128, String)> {
    match order {
        BuyOrder::Units { quantity } => {
            if quantity == 0 || quantity > view.total_quantity {
                return Err(ClientError::InvalidInput(format!(
                    "Quantity must be between 1 and {}",
                    view.total_quantity
                )));
            }
            let cost = view.buy_cost(quantity).ok_or_else(|| {
                ClientError::View(ViewError::AmountOverflow(format!(
                    "{} units at {} wei",
                    quantity, view.price_per_unit
                )))
            })?;
            if cost == 0 {
                return Err(ClientError::InvalidInput(
                    "Unit price rounds to zero; contribute an amount instead".to_string(),
                ));
            }
            Ok((
                cost,
                format!(
                    "Successfully bought {} items for {} ETH!",
                    quantity,
                    format_ether(cost, 6)
                ),
            ))
        }
        BuyOrder::Amount { value } => {
            if value == 0 {
                return Err(ClientError::InvalidInput(
                    "Please enter a valid amount!".to_string(),
                ));
            }
            Ok((
                value,
                format!("Successfully contributed {} ETH!", format_ether(value, 6)),
            ))
        }
    }
}
