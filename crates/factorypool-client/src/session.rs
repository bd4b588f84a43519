use crate::{
    artifacts::Artifacts,
    errors::ClientResult,
    provider::WalletProvider,
    types::ChainId,
};
use factorypool_view::Address;

/// A connected wallet: the active account, its chain, and contract handles
/// bound to it.
///
/// Never mutated. Account and chain changes build a new session and swap it in
/// whole, so a handler holding an older one keeps a consistent view.
pub struct Session<P: WalletProvider> {
    account: Address,
    chain_id: ChainId,
    chain_name: String,
    crowdfunding: P::Crowdfunding,
    reward_token: P::RewardToken,
}

impl<P: WalletProvider> std::fmt::Debug for Session<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("account", &self.account)
            .field("chain_id", &self.chain_id)
            .field("chain_name", &self.chain_name)
            .finish_non_exhaustive()
    }
}

impl<P: WalletProvider> Session<P> {
    /// Bind contract handles for `account`
    pub fn open(
        provider: &P,
        artifacts: &Artifacts,
        account: Address,
        chain_id: ChainId,
        chain_name: impl Into<String>,
    ) -> ClientResult<Self> {
        let crowdfunding = provider.crowdfunding(
            artifacts.addresses.crowdfunding,
            &artifacts.crowdfunding,
            account,
        )?;
        let reward_token = provider.reward_token(
            artifacts.addresses.reward_token,
            &artifacts.reward_token,
            account,
        )?;

        Ok(Self {
            account,
            chain_id,
            chain_name: chain_name.into(),
            crowdfunding,
            reward_token,
        })
    }

    pub fn account(&self) -> &Address {
        &self.account
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    pub fn chain_name(&self) -> &str {
        &self.chain_name
    }

    pub fn crowdfunding(&self) -> &P::Crowdfunding {
        &self.crowdfunding
    }

    pub fn reward_token(&self) -> &P::RewardToken {
        &self.reward_token
    }
}
