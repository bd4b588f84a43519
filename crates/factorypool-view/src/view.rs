/*!
# Campaign View Derivation

[`derive_view`] is the whole of the client-side lifecycle logic: a pure
function from a campaign record, the current time and the connected wallet to
everything a campaign card shows.
*/

use crate::{
    address::Address,
    amount::Wei,
    record::{CampaignRecord, Timestamp},
    time_left::format_time_left,
    title::total_quantity,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Badge shown on a campaign card. Precedence, first match wins:
/// finalized, goal reached, expired, otherwise active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampaignStatus {
    Finalized,
    SoldOut,
    Expired,
    Active,
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CampaignStatus::Finalized => "Finalized",
            CampaignStatus::SoldOut => "Sold out",
            CampaignStatus::Expired => "Expired",
            CampaignStatus::Active => "Active",
        };
        f.write_str(label)
    }
}

/// The one thing the connected wallet may do with a campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllowedAction {
    None,
    Buy,
    Finalize,
    Withdraw,
}

impl fmt::Display for AllowedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AllowedAction::None => "none",
            AllowedAction::Buy => "buy",
            AllowedAction::Finalize => "finalize",
            AllowedAction::Withdraw => "withdraw",
        };
        f.write_str(label)
    }
}

/// Card footer: the allowed action together with what the card says about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Footer {
    /// Finalized campaigns have no footer
    Closed,
    /// Owner of an expired, funded campaign
    #[serde(rename_all = "camelCase")]
    ReadyForWithdrawal { amount: Wei },
    /// Expired and funded, viewed by someone other than the owner
    FundedAndCompleted,
    /// Funded before the deadline; withdrawal opens when it passes
    SoldOutAwaitingDeadline,
    /// Live and short of its goal
    #[serde(rename_all = "camelCase")]
    BuyForm { unit_price: Wei, max_quantity: u64 },
    /// Owner of an expired, unfunded campaign
    FinalizeButton,
    /// Expired and unfunded, viewed by someone other than the owner
    EndedGoalNotReached,
}

impl Footer {
    pub fn allowed_action(&self) -> AllowedAction {
        match self {
            Footer::ReadyForWithdrawal { .. } => AllowedAction::Withdraw,
            Footer::BuyForm { .. } => AllowedAction::Buy,
            Footer::FinalizeButton => AllowedAction::Finalize,
            Footer::Closed
            | Footer::FundedAndCompleted
            | Footer::SoldOutAwaitingDeadline
            | Footer::EndedGoalNotReached => AllowedAction::None,
        }
    }
}

/// Everything a campaign card displays, derived per render and never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignView {
    pub record: CampaignRecord,
    pub progress_percent: u8,
    pub is_expired: bool,
    pub is_goal_reached: bool,
    pub is_owner: bool,
    pub status: CampaignStatus,
    pub allowed_action: AllowedAction,
    pub footer: Footer,
    /// Units in the batch, from the title suffix (1 when absent)
    pub total_quantity: u64,
    /// `funding_goal / total_quantity`, truncated to whole wei
    pub price_per_unit: Wei,
    pub seconds_remaining: i64,
    pub time_left: String,
}

impl CampaignView {
    pub fn index(&self) -> u64 {
        self.record.index
    }

    /// `quantity * price_per_unit`. The caller clamps the quantity first.
    pub fn buy_cost(&self, quantity: u64) -> Option<Wei> {
        Wei::from(quantity).checked_mul(self.price_per_unit)
    }
}

/// Derive the card state for one campaign.
///
/// `viewer` is the connected wallet, if any. Deterministic in its inputs.
pub fn derive_view(
    record: &CampaignRecord,
    now: Timestamp,
    viewer: Option<&Address>,
) -> CampaignView {
    let is_expired = now >= record.deadline;
    let is_goal_reached = record.funding_goal > 0 && record.total_raised >= record.funding_goal;
    let is_owner = viewer.is_some_and(|viewer| *viewer == record.creator);

    let status = if record.finalized {
        CampaignStatus::Finalized
    } else if is_goal_reached {
        CampaignStatus::SoldOut
    } else if is_expired {
        CampaignStatus::Expired
    } else {
        CampaignStatus::Active
    };

    let total_quantity = total_quantity(&record.title);
    let price_per_unit = record.funding_goal / Wei::from(total_quantity);

    let footer = if record.finalized {
        Footer::Closed
    } else {
        match (is_goal_reached, is_expired, is_owner) {
            (true, true, true) => Footer::ReadyForWithdrawal {
                amount: record.total_raised,
            },
            (true, true, false) => Footer::FundedAndCompleted,
            (true, false, _) => Footer::SoldOutAwaitingDeadline,
            (false, false, _) => Footer::BuyForm {
                unit_price: price_per_unit,
                max_quantity: total_quantity,
            },
            (false, true, true) => Footer::FinalizeButton,
            (false, true, false) => Footer::EndedGoalNotReached,
        }
    };

    let seconds_remaining = record.deadline.saturating_sub(now);

    CampaignView {
        record: record.clone(),
        progress_percent: progress_percent(record.total_raised, record.funding_goal),
        is_expired,
        is_goal_reached,
        is_owner,
        status,
        allowed_action: footer.allowed_action(),
        footer,
        total_quantity,
        price_per_unit,
        seconds_remaining,
        time_left: format_time_left(seconds_remaining),
    }
}

/// `min(round(raised / goal * 100), 100)`, or 0 for a zero goal. Halves round up.
pub fn progress_percent(total_raised: Wei, funding_goal: Wei) -> u8 {
    if funding_goal == 0 {
        return 0;
    }
    if total_raised >= funding_goal {
        return 100;
    }

    // raised < goal from here, so the result is at most 100
    let doubled = scaled_quotient(total_raised, 200, funding_goal);
    ((doubled + 1) / 2).min(100) as u8
}

/// `floor(numerator * scale / denominator)` for `numerator < denominator`,
/// exact even when the product overflows `u128`
fn scaled_quotient(numerator: Wei, scale: u32, denominator: Wei) -> u128 {
    // quotient * denominator + remainder == numerator * (bits of scale read so far)
    fn add(remainder: Wei, addend: Wei, denominator: Wei, quotient: &mut u128) -> Wei {
        if remainder >= denominator - addend {
            *quotient += 1;
            remainder - (denominator - addend)
        } else {
            remainder + addend
        }
    }

    let mut quotient = 0u128;
    let mut remainder: Wei = 0;
    for bit in (0..u32::BITS).rev() {
        quotient <<= 1;
        remainder = add(remainder, remainder, denominator, &mut quotient);
        if (scale >> bit) & 1 == 1 {
            remainder = add(remainder, numerator, denominator, &mut quotient);
        }
    }
    quotient
}
