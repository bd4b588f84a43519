/*!
# Crowdfunding Contract Emulation

State transitions of the deployed Crowdfunding contract and its reward token,
applied to [`ChainState`]. Each function checks every precondition before
touching state, so a revert leaves the chain unchanged.
*/

use crate::{errors::Revert, state::ChainState};
use factorypool_view::{Address, CampaignRecord, Timestamp, Wei};
use tracing::debug;

/// Effect of a successful `finalizeCampaign`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// Goal reached: everything raised went to the creator
    Paid { creator: Address, amount: Wei },
    /// Goal missed: contributions went back to their senders
    Refunded { contributors: usize, amount: Wei },
}

impl ChainState {
    pub fn create_campaign(
        &mut self,
        creator: Address,
        title: &str,
        funding_goal: Wei,
        duration_seconds: u64,
        now: Timestamp,
    ) -> Result<u64, Revert> {
        if title.trim().is_empty() {
            return Err(Revert::EmptyTitle);
        }
        if funding_goal == 0 {
            return Err(Revert::InvalidFundingGoal);
        }
        if duration_seconds == 0 {
            return Err(Revert::InvalidDuration);
        }
        let deadline = i64::try_from(duration_seconds)
            .ok()
            .and_then(|duration| now.checked_add(duration))
            .ok_or(Revert::AmountOverflow)?;

        let index = self.campaigns.len() as u64;
        self.campaigns.push(CampaignRecord {
            index,
            creator,
            title: title.to_string(),
            funding_goal,
            total_raised: 0,
            deadline,
            finalized: false,
        });

        debug!("Campaign {} created by {} until {}", index, creator, deadline);
        Ok(index)
    }

    /// Accept `value` from `contributor` and mint the same amount of reward
    /// token. The caller has already checked the sender's balance.
    pub fn contribute(
        &mut self,
        contributor: Address,
        index: u64,
        value: Wei,
        now: Timestamp,
    ) -> Result<(), Revert> {
        let campaign = self.campaign(index)?;
        if campaign.finalized {
            return Err(Revert::AlreadyFinalized);
        }
        if now >= campaign.deadline {
            return Err(Revert::CampaignEnded);
        }
        if value == 0 {
            return Err(Revert::InvalidContribution);
        }

        let total_raised = campaign
            .total_raised
            .checked_add(value)
            .ok_or(Revert::AmountOverflow)?;
        let contributed = self
            .contribution(index, &contributor)
            .checked_add(value)
            .ok_or(Revert::AmountOverflow)?;
        let minted = self
            .token_balance(&contributor)
            .checked_add(value)
            .ok_or(Revert::AmountOverflow)?;
        let remaining = self
            .balance(&contributor)
            .checked_sub(value)
            .ok_or(Revert::AmountOverflow)?;

        self.campaigns[index as usize].total_raised = total_raised;
        self.contributions
            .entry(index)
            .or_default()
            .insert(contributor, contributed);
        self.token_balances.insert(contributor, minted);
        self.balances.insert(contributor, remaining);

        debug!("{} contributed {} wei to campaign {}", contributor, value, index);
        Ok(())
    }

    /// Close a campaign after its deadline. Pays the creator when the goal was
    /// reached, refunds contributors otherwise. Reward tokens are kept.
    pub fn finalize_campaign(
        &mut self,
        caller: Address,
        index: u64,
        now: Timestamp,
    ) -> Result<FinalizeOutcome, Revert> {
        let campaign = self.campaign(index)?;
        if campaign.finalized {
            return Err(Revert::AlreadyFinalized);
        }
        if now < campaign.deadline {
            return Err(Revert::NotEnded);
        }
        if caller != campaign.creator {
            return Err(Revert::NotCreator);
        }

        let creator = campaign.creator;
        let raised = campaign.total_raised;
        let outcome = if raised >= campaign.funding_goal {
            let paid = self
                .balance(&creator)
                .checked_add(raised)
                .ok_or(Revert::AmountOverflow)?;
            self.balances.insert(creator, paid);
            FinalizeOutcome::Paid {
                creator,
                amount: raised,
            }
        } else {
            let refunds = self.contributions.remove(&index).unwrap_or_default();
            let contributors = refunds.len();
            for (contributor, amount) in refunds {
                let refunded = self.balance(&contributor).saturating_add(amount);
                self.balances.insert(contributor, refunded);
            }
            FinalizeOutcome::Refunded {
                contributors,
                amount: raised,
            }
        };

        self.campaigns[index as usize].finalized = true;
        debug!("Campaign {} finalized: {:?}", index, outcome);
        Ok(outcome)
    }

    fn campaign(&self, index: u64) -> Result<&CampaignRecord, Revert> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.campaigns.get(i))
            .ok_or(Revert::CampaignNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factorypool_view::WEI_PER_ETHER;

    const NOW: Timestamp = 1_700_000_000;

    fn chain() -> (ChainState, Address, Address) {
        let state = ChainState::genesis().unwrap();
        let creator = state.accounts[0];
        let buyer = state.accounts[1];
        (state, creator, buyer)
    }

    #[test]
    fn test_create_validates_inputs() {
        let (mut state, creator, _) = chain();
        assert_eq!(
            state.create_campaign(creator, "Acme - Widget (5 pcs)", 0, 60, NOW),
            Err(Revert::InvalidFundingGoal)
        );
        assert_eq!(
            state.create_campaign(creator, "Acme - Widget (5 pcs)", 100, 0, NOW),
            Err(Revert::InvalidDuration)
        );
        assert_eq!(
            state.create_campaign(creator, "  ", 100, 60, NOW),
            Err(Revert::EmptyTitle)
        );
        assert!(state.campaigns.is_empty());

        assert_eq!(state.create_campaign(creator, "A - B (5 pcs)", 100, 60, NOW), Ok(0));
        assert_eq!(state.create_campaign(creator, "C - D (5 pcs)", 100, 60, NOW), Ok(1));
        assert_eq!(state.campaigns[1].deadline, NOW + 60);
    }

    #[test]
    fn test_contribute_mints_reward_tokens() {
        let (mut state, creator, buyer) = chain();
        state
            .create_campaign(creator, "A - B (5 pcs)", 5 * WEI_PER_ETHER, 60, NOW)
            .unwrap();

        state.contribute(buyer, 0, 2 * WEI_PER_ETHER, NOW).unwrap();
        state.contribute(buyer, 0, WEI_PER_ETHER, NOW + 1).unwrap();

        assert_eq!(state.campaigns[0].total_raised, 3 * WEI_PER_ETHER);
        assert_eq!(state.contribution(0, &buyer), 3 * WEI_PER_ETHER);
        assert_eq!(state.token_balance(&buyer), 3 * WEI_PER_ETHER);
        assert_eq!(
            state.balance(&buyer),
            crate::state::DEV_ACCOUNT_BALANCE - 3 * WEI_PER_ETHER
        );
    }

    #[test]
    fn test_contribute_reverts() {
        let (mut state, creator, buyer) = chain();
        state.create_campaign(creator, "A - B (5 pcs)", 100, 60, NOW).unwrap();

        assert_eq!(state.contribute(buyer, 0, 0, NOW), Err(Revert::InvalidContribution));
        assert_eq!(state.contribute(buyer, 0, 10, NOW + 60), Err(Revert::CampaignEnded));
        assert_eq!(state.contribute(buyer, 7, 10, NOW), Err(Revert::CampaignNotFound));

        let before = state.clone();
        assert!(state.contribute(buyer, 0, 10, NOW + 61).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_finalize_pays_creator_when_funded() {
        let (mut state, creator, buyer) = chain();
        state.create_campaign(creator, "A - B (2 pcs)", 100, 60, NOW).unwrap();
        state.contribute(buyer, 0, 100, NOW).unwrap();

        assert_eq!(state.finalize_campaign(creator, 0, NOW + 59), Err(Revert::NotEnded));
        assert_eq!(state.finalize_campaign(buyer, 0, NOW + 60), Err(Revert::NotCreator));

        let before = state.balance(&creator);
        assert_eq!(
            state.finalize_campaign(creator, 0, NOW + 60),
            Ok(FinalizeOutcome::Paid {
                creator,
                amount: 100
            })
        );
        assert_eq!(state.balance(&creator), before + 100);
        assert!(state.campaigns[0].finalized);

        assert_eq!(
            state.finalize_campaign(creator, 0, NOW + 61),
            Err(Revert::AlreadyFinalized)
        );
        assert_eq!(state.contribute(buyer, 0, 1, NOW), Err(Revert::AlreadyFinalized));
    }

    #[test]
    fn test_finalize_refunds_when_goal_missed() {
        let (mut state, creator, buyer) = chain();
        let other = state.accounts[2];
        state.create_campaign(creator, "A - B (10 pcs)", 1_000, 60, NOW).unwrap();
        state.contribute(buyer, 0, 100, NOW).unwrap();
        state.contribute(other, 0, 200, NOW).unwrap();

        let outcome = state.finalize_campaign(creator, 0, NOW + 60).unwrap();
        assert_eq!(
            outcome,
            FinalizeOutcome::Refunded {
                contributors: 2,
                amount: 300
            }
        );
        assert_eq!(state.balance(&buyer), crate::state::DEV_ACCOUNT_BALANCE);
        assert_eq!(state.balance(&other), crate::state::DEV_ACCOUNT_BALANCE);
        assert_eq!(state.token_balance(&buyer), 100);
        assert_eq!(state.contribution(0, &buyer), 0);
    }
}
