/*!
# FactoryPool Sandbox

A local stand-in for a browser wallet, a Hardhat node, and the deployed
Crowdfunding and RewardToken contracts. The CLI runs against it, and the
client's end-to-end tests drive it through the same traits a real backend
implements.

## What It Emulates

- Three funded development accounts; the first is selected
- Chain `31337`, with unknown chains rejected with code 4902 until added
- `createCampaign`, `contribute` (mints reward tokens 1:1 with wei), and
  `finalizeCampaign` (pays the creator or refunds contributors)
- Reverts with reason strings, checked before any state changes

## Test Hooks

`reject_next_signature`, `delay_receipts`, `revert_next_receipt`,
`report_campaign_count`, `advance_time`, `select_account`, and `set_chain` reproduce the paths a real wallet only reaches interactively.
*/

pub mod artifacts;
pub mod chain;
pub mod contract;
pub mod errors;
pub mod state;

pub use artifacts::{crowdfunding_artifact, reward_token_artifact, sandbox_artifacts};
pub use chain::{LocalChain, LocalCrowdfunding, LocalRewardToken};
pub use contract::FinalizeOutcome;
pub use errors::{Revert, SandboxError, SandboxResult};
pub use state::{ChainState, DEV_ACCOUNTS, DEV_ACCOUNT_BALANCE};
