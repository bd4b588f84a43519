/*!
# Campaign Board

The rendered campaign list. Each card pairs a derived view with the one typed
action it offers, so the UI binds handlers to values instead of parsing ids
back out of generated markup.
*/

use crate::errors::{ClientError, ClientResult};
use factorypool_view::{AllowedAction, CampaignView, Footer, Wei};
use serde::Serialize;

/// Result of loading the campaign list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum CampaignBoard {
    /// The contract has no campaigns yet
    Empty,
    Loaded { cards: Vec<CampaignCard> },
    /// Fetch failed; loading again is the retry
    Failed { message: String },
}

impl CampaignBoard {
    pub fn from_views(views: Vec<CampaignView>) -> Self {
        if views.is_empty() {
            CampaignBoard::Empty
        } else {
            CampaignBoard::Loaded {
                cards: views.into_iter().map(CampaignCard::new).collect(),
            }
        }
    }

    pub fn cards(&self) -> &[CampaignCard] {
        match self {
            CampaignBoard::Loaded { cards } => cards,
            CampaignBoard::Empty | CampaignBoard::Failed { .. } => &[],
        }
    }

    pub fn card(&self, index: u64) -> Option<&CampaignCard> {
        self.cards().iter().find(|card| card.view.index() == index)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CampaignBoard::Failed { .. })
    }
}

/// One campaign and its action, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignCard {
    pub view: CampaignView,
    pub action: Option<CampaignAction>,
}

impl CampaignCard {
    pub fn new(view: CampaignView) -> Self {
        let index = view.index();
        let action = match &view.footer {
            Footer::BuyForm {
                unit_price,
                max_quantity,
            } => Some(CampaignAction::Buy {
                index,
                unit_price: *unit_price,
                max_quantity: *max_quantity,
            }),
            Footer::FinalizeButton => Some(CampaignAction::Finalize { index }),
            Footer::ReadyForWithdrawal { amount } => Some(CampaignAction::Withdraw {
                index,
                amount: *amount,
            }),
            Footer::Closed
            | Footer::FundedAndCompleted
            | Footer::SoldOutAwaitingDeadline
            | Footer::EndedGoalNotReached => None,
        };

        Self { view, action }
    }
}

/// An action a card offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CampaignAction {
    #[serde(rename_all = "camelCase")]
    Buy {
        index: u64,
        unit_price: Wei,
        max_quantity: u64,
    },
    Finalize { index: u64 },
    Withdraw { index: u64, amount: Wei },
}

impl CampaignAction {
    pub fn index(&self) -> u64 {
        match self {
            CampaignAction::Buy { index, .. }
            | CampaignAction::Finalize { index }
            | CampaignAction::Withdraw { index, .. } => *index,
        }
    }

    pub fn kind(&self) -> AllowedAction {
        match self {
            CampaignAction::Buy { .. } => AllowedAction::Buy,
            CampaignAction::Finalize { .. } => AllowedAction::Finalize,
            CampaignAction::Withdraw { .. } => AllowedAction::Withdraw,
        }
    }

    /// Live cost preview for the buy form. The quantity is clamped to
    /// `[1, max_quantity]`; empty or zero input previews nothing.
    pub fn quote(&self, quantity: u64) -> Option<BuyQuote> {
        match self {
            CampaignAction::Buy {
                unit_price,
                max_quantity,
                ..
            } if quantity > 0 => {
                let quantity = quantity.min(*max_quantity);
                Some(BuyQuote {
                    quantity,
                    unit_price: *unit_price,
                    total_cost: Wei::from(quantity).checked_mul(*unit_price)?,
                })
            }
            _ => None,
        }
    }

    /// Request to buy `quantity` units, clamped to the batch size
    pub fn buy_units(&self, quantity: u64) -> ClientResult<ActionRequest> {
        match self {
            CampaignAction::Buy {
                index,
                max_quantity,
                ..
            } => {
                if quantity == 0 {
                    return Err(ClientError::InvalidInput(
                        "Please enter a valid quantity!".to_string(),
                    ));
                }
                Ok(ActionRequest::Buy {
                    index: *index,
                    order: BuyOrder::Units {
                        quantity: quantity.min(*max_quantity),
                    },
                })
            }
            other => Err(other.mismatch(AllowedAction::Buy)),
        }
    }

    /// Request to contribute a flat amount
    pub fn contribute(&self, value: Wei) -> ClientResult<ActionRequest> {
        match self {
            CampaignAction::Buy { index, .. } => {
                if value == 0 {
                    return Err(ClientError::InvalidInput(
                        "Please enter a valid amount!".to_string(),
                    ));
                }
                Ok(ActionRequest::Buy {
                    index: *index,
                    order: BuyOrder::Amount { value },
                })
            }
            other => Err(other.mismatch(AllowedAction::Buy)),
        }
    }

    /// Request for a finalize or withdraw button
    pub fn press(&self) -> ClientResult<ActionRequest> {
        match self {
            CampaignAction::Finalize { index } => Ok(ActionRequest::Finalize { index: *index }),
            CampaignAction::Withdraw { index, .. } => Ok(ActionRequest::Withdraw { index: *index }),
            CampaignAction::Buy { .. } => Err(ClientError::InvalidInput(
                "Buying needs a quantity or amount".to_string(),
            )),
        }
    }

    fn mismatch(&self, requested: AllowedAction) -> ClientError {
        ClientError::ActionNotAllowed {
            index: self.index(),
            requested,
            allowed: self.kind(),
        }
    }
}

/// Cost preview for a number of units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyQuote {
    pub quantity: u64,
    pub unit_price: Wei,
    pub total_cost: Wei,
}

/// How much to contribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuyOrder {
    /// Production batches: units times the unit price
    Units { quantity: u64 },
    /// Flat campaigns: an amount entered directly
    Amount { value: Wei },
}

/// What the UI asks the client to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRequest {
    Buy { index: u64, order: BuyOrder },
    Finalize { index: u64 },
    Withdraw { index: u64 },
}

impl ActionRequest {
    pub fn index(&self) -> u64 {
        match self {
            ActionRequest::Buy { index, .. }
            | ActionRequest::Finalize { index }
            | ActionRequest::Withdraw { index } => *index,
        }
    }

    pub fn kind(&self) -> AllowedAction {
        match self {
            ActionRequest::Buy { .. } => AllowedAction::Buy,
            ActionRequest::Finalize { .. } => AllowedAction::Finalize,
            ActionRequest::Withdraw { .. } => AllowedAction::Withdraw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factorypool_view::{derive_view, Address, CampaignRecord};
    use std::str::FromStr;

    const NOW: i64 = 1_700_000_000;

    fn owner() -> Address {
        Address::from_str("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap()
    }

    fn view(raised: Wei, deadline: i64) -> CampaignView {
        let record = CampaignRecord {
            index: 4,
            creator: owner(),
            title: "Acme - Widget (10 pcs)".to_string(),
            funding_goal: 1_000,
            total_raised: raised,
            deadline,
            finalized: false,
        };
        derive_view(&record, NOW, Some(&owner()))
    }

    #[test]
    fn test_cards_carry_matching_actions() {
        let buy = CampaignCard::new(view(0, NOW + 60));
        assert_eq!(
            buy.action,
            Some(CampaignAction::Buy {
                index: 4,
                unit_price: 100,
                max_quantity: 10
            })
        );

        let finalize = CampaignCard::new(view(0, NOW - 60));
        assert_eq!(finalize.action, Some(CampaignAction::Finalize { index: 4 }));

        let withdraw = CampaignCard::new(view(1_000, NOW - 60));
        assert_eq!(
            withdraw.action,
            Some(CampaignAction::Withdraw {
                index: 4,
                amount: 1_000
            })
        );

        let waiting = CampaignCard::new(view(1_000, NOW + 60));
        assert_eq!(waiting.action, None);
    }

    #[test]
    fn test_card_action_kind_matches_view() {
        for (raised, deadline) in [(0, NOW + 1), (0, NOW - 1), (1_000, NOW - 1), (1_000, NOW + 1)] {
            let card = CampaignCard::new(view(raised, deadline));
            let kind = card.action.map(|a| a.kind()).unwrap_or(AllowedAction::None);
            assert_eq!(kind, card.view.allowed_action);
        }
    }

    #[test]
    fn test_quote_clamps_quantity() {
        let action = CampaignCard::new(view(0, NOW + 60)).action.unwrap();
        assert_eq!(action.quote(0), None);
        assert_eq!(
            action.quote(3),
            Some(BuyQuote {
                quantity: 3,
                unit_price: 100,
                total_cost: 300
            })
        );
        assert_eq!(action.quote(99).unwrap().quantity, 10);
        assert_eq!(action.quote(99).unwrap().total_cost, 1_000);
    }

    #[test]
    fn test_buy_units_validates_and_clamps() {
        let action = CampaignCard::new(view(0, NOW + 60)).action.unwrap();
        assert!(matches!(action.buy_units(0), Err(ClientError::InvalidInput(_))));
        assert_eq!(
            action.buy_units(25).unwrap(),
            ActionRequest::Buy {
                index: 4,
                order: BuyOrder::Units { quantity: 10 }
            }
        );
        assert!(matches!(action.contribute(0), Err(ClientError::InvalidInput(_))));
        assert!(action.press().is_err());
    }

    #[test]
    fn test_press_only_for_buttons() {
        let finalize = CampaignAction::Finalize { index: 1 };
        assert_eq!(finalize.press().unwrap(), ActionRequest::Finalize { index: 1 });
        assert!(matches!(
            finalize.buy_units(1),
            Err(ClientError::ActionNotAllowed {
                requested: AllowedAction::Buy,
                allowed: AllowedAction::Finalize,
                ..
            })
        ));

        let withdraw = CampaignAction::Withdraw { index: 1, amount: 5 };
        assert_eq!(withdraw.press().unwrap(), ActionRequest::Withdraw { index: 1 });
    }

    #[test]
    fn test_board_states() {
        assert_eq!(CampaignBoard::from_views(vec![]), CampaignBoard::Empty);

        let board = CampaignBoard::from_views(vec![view(0, NOW + 60)]);
        assert_eq!(board.cards().len(), 1);
        assert!(board.card(4).is_some());
        assert!(board.card(5).is_none());

        let failed = CampaignBoard::Failed {
            message: "rpc down".to_string(),
        };
        assert!(failed.is_failed());
        assert!(failed.cards().is_empty());
    }
}
