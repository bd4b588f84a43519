use crate::{address::Address, amount::Wei};
use serde::{Deserialize, Serialize};

/// Unix time in seconds
pub type Timestamp = i64;

/// A campaign as returned by `getCampaign(index)` on the Crowdfunding contract.
///
/// Immutable per read. The client never edits one locally; every change is a
/// contract transaction followed by a fresh read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    /// Sequential id assigned by the contract at creation
    pub index: u64,

    /// Campaign owner
    pub creator: Address,

    /// Free text; production batches use `"<Company> - <Product> (<Qty> pcs)"`
    pub title: String,

    /// Target amount in wei
    pub funding_goal: Wei,

    /// Contributed so far in wei
    pub total_raised: Wei,

    /// Absolute end time in seconds
    pub deadline: Timestamp,

    /// Set once by `finalizeCampaign`
    pub finalized: bool,
}
