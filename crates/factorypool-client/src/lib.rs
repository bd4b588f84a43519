/*!
# FactoryPool Client

This crate drives a FactoryPool front end against a wallet provider and the
deployed Crowdfunding and RewardToken contracts.

## Purpose

- **Session Management**: Connect a wallet, gate on the allowed networks, and
  rebuild the session when the account or chain changes
- **Campaign Loading**: Read every campaign and derive its view with one `now`
- **Typed Dispatch**: Cards carry their action as a value; the client re-checks
  it against fresh state before submitting
- **Confirmation**: Wait for each transaction to be mined, then reload everything

## Architecture

`FactoryPoolClient` is generic over a [`WalletProvider`], which also builds the
contract handles. Any backend can sit behind it: a browser wallet bridge, a
JSON-RPC node, or the in-process chain in `factorypool-sandbox`.

## Usage

```rust,ignore
use factorypool_client::{Artifacts, ClientConfig, FactoryPoolClient};

async fn example<P: factorypool_client::WalletProvider>(provider: P) -> factorypool_client::ClientResult<()> {
    let artifacts = Artifacts::load("artifacts")?;
    let client = FactoryPoolClient::new(provider, artifacts, ClientConfig::default());

    client.connect().await?;
    let board = client.load_campaigns().await;

    if let Some(action) = board.cards().iter().find_map(|card| card.action) {
        let request = action.buy_units(1)?;
        let outcome = client.dispatch(request).await?;
        println!("{}", outcome.notice);
    }
    Ok(())
}
```
*/

pub mod artifacts;
pub mod board;
pub mod client;
pub mod config;
pub mod confirm;
pub mod draft;
pub mod errors;
pub mod guard;
pub mod network;
pub mod provider;
pub mod session;
pub mod stats;
pub mod types;

// Re-export main types for convenience
pub use artifacts::{Artifacts, ContractArtifact, DeployedAddresses};
pub use board::{ActionRequest, BuyOrder, BuyQuote, CampaignAction, CampaignBoard, CampaignCard};
pub use client::{ActionOutcome, FactoryPoolClient, REWARD_TOKEN_DECIMALS, REWARD_TOKEN_SYMBOL};
pub use config::{ClientConfig, ConfirmationConfig, NetworkConfig};
pub use draft::{CampaignDraft, CampaignDuration, CampaignSubmission};
pub use errors::{ClientError, ClientResult, Operation};
pub use guard::{ButtonId, InFlight, InFlightGuard};
pub use network::{sepolia_chain_spec, HARDHAT_CHAIN_ID, SEPOLIA_CHAIN_ID};
pub use provider::{Clock, CrowdfundingContract, RewardTokenContract, SystemClock, WalletProvider};
pub use session::Session;
pub use stats::UserStats;
pub use types::{
    ChainId, ChainSpec, NativeCurrency, SessionChange, TxHash, TxReceipt, TxStatus, WalletEvent,
    WatchAsset,
};

// View types callers need alongside the client
pub use factorypool_view::{Address, CampaignView, Wei};
