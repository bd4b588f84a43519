use factorypool_client::{CampaignBoard, CampaignCard, UserStats};
use factorypool_view::{format_ether, CampaignStatus, CampaignView, Footer};
use std::fmt::Write;

const PROGRESS_WIDTH: usize = 20;

pub fn badge(status: CampaignStatus) -> &'static str {
    match status {
        CampaignStatus::Finalized => "✓ Finalized",
        CampaignStatus::SoldOut => "🎉 SOLD OUT",
        CampaignStatus::Expired => "⏰ Expired",
        CampaignStatus::Active => "🔥 Active",
    }
}

pub fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * PROGRESS_WIDTH / 100;
    format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(PROGRESS_WIDTH - filled),
        percent
    )
}

/// What the card offers, with the command that does it
pub fn footer(view: &CampaignView) -> Option<String> {
    let index = view.index();
    match &view.footer {
        Footer::Closed => None,
        Footer::ReadyForWithdrawal { amount } => Some(format!(
            "🎉 Ready for Withdrawal! 💰 Withdraw {} ETH: factorypool withdraw {}",
            format_ether(*amount, 4),
            index
        )),
        Footer::FundedAndCompleted => {
            Some("✅ Funded & Completed - Production Started!".to_string())
        }
        Footer::SoldOutAwaitingDeadline => Some(format!(
            "🎉 SOLD OUT! Withdrawal available after campaign ends ({})",
            view.time_left
        )),
        Footer::BuyForm { max_quantity, .. } => Some(format!(
            "🛒 Buy Items: factorypool buy {} <quantity>  (1-{} pcs)",
            index, max_quantity
        )),
        Footer::FinalizeButton => Some(format!(
            "✅ Finalize Campaign: factorypool finalize {}",
            index
        )),
        Footer::EndedGoalNotReached => Some("⏰ Campaign Ended - Goal Not Reached".to_string()),
    }
}

pub fn card(card: &CampaignCard) -> String {
    let view = &card.view;
    let record = &view.record;
    let mut out = String::new();

    let _ = writeln!(out, "#{}  {}  [{}]", record.index, record.title, badge(view.status));
    let _ = writeln!(
        out,
        "    by {}{}",
        record.creator.short(),
        if view.is_owner { " (You)" } else { "" }
    );
    let _ = writeln!(out, "    Progress   {}", progress_bar(view.progress_percent));
    let _ = writeln!(
        out,
        "    Raised     {} ETH of {} ETH",
        format_ether(record.total_raised, 4),
        format_ether(record.funding_goal, 4)
    );
    let _ = writeln!(
        out,
        "    Price/Unit {} ETH  x {} pcs",
        format_ether(view.price_per_unit, 6),
        view.total_quantity
    );
    let _ = writeln!(out, "    Time Left  {}", view.time_left);
    if let Some(footer) = footer(view) {
        let _ = writeln!(out, "    {}", footer);
    }
    out
}

pub fn board(board: &CampaignBoard) -> String {
    match board {
        CampaignBoard::Empty => "📭 No campaigns yet. Launch one with `factorypool create`.\n".to_string(),
        CampaignBoard::Failed { message } => format!(
            "❌ Failed to load campaigns: {}\n🔁 Run the command again to retry.\n",
            message
        ),
        CampaignBoard::Loaded { cards } => cards
            .iter()
            .map(card)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn stats(stats: &UserStats) -> String {
    format!(
        "💰 Balance: {} ETH   🎁 Rewards: {} FPT",
        stats.native_display(),
        stats.reward_tokens()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use factorypool_view::{derive_view, Address, CampaignRecord, WEI_PER_ETHER};
    use std::str::FromStr;

    const NOW: i64 = 1_700_000_000;

    fn owner() -> Address {
        Address::from_str("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap()
    }

    fn view(raised: u128, deadline: i64, viewer: Address) -> CampaignView {
        let record = CampaignRecord {
            index: 3,
            creator: owner(),
            title: "Acme - Widget (10 pcs)".to_string(),
            funding_goal: WEI_PER_ETHER,
            total_raised: raised,
            deadline,
            finalized: false,
        };
        derive_view(&record, NOW, Some(&viewer))
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0), format!("[{}] 0%", "░".repeat(20)));
        assert_eq!(progress_bar(50), format!("[{}{}] 50%", "█".repeat(10), "░".repeat(10)));
        assert_eq!(progress_bar(100), format!("[{}] 100%", "█".repeat(20)));
    }

    #[test]
    fn test_active_card() {
        let text = card(&CampaignCard::new(view(WEI_PER_ETHER / 4, NOW + 3_661, owner())));
        assert!(text.starts_with("#3  Acme - Widget (10 pcs)  [🔥 Active]"));
        assert!(text.contains("by 0xf39f...2266 (You)"));
        assert!(text.contains("Raised     0.2500 ETH of 1.0000 ETH"));
        assert!(text.contains("Price/Unit 0.100000 ETH  x 10 pcs"));
        assert!(text.contains("Time Left  1h 1m"));
        assert!(text.contains("factorypool buy 3 <quantity>"));
    }

    #[test]
    fn test_footers() {
        let stranger = Address::new([9u8; 20]);

        let withdraw = view(WEI_PER_ETHER, NOW - 1, owner());
        assert!(footer(&withdraw).unwrap().contains("Withdraw 1.0000 ETH"));

        let completed = view(WEI_PER_ETHER, NOW - 1, stranger);
        assert_eq!(
            footer(&completed).unwrap(),
            "✅ Funded & Completed - Production Started!"
        );

        let finalize = view(0, NOW - 1, owner());
        assert!(footer(&finalize).unwrap().contains("factorypool finalize 3"));

        let sold_out = view(WEI_PER_ETHER, NOW + 120, stranger);
        assert!(footer(&sold_out).unwrap().ends_with("(2m)"));
    }

    #[test]
    fn test_empty_and_failed_boards() {
        assert!(board(&CampaignBoard::Empty).contains("No campaigns yet"));
        let failed = board(&CampaignBoard::Failed {
            message: "Wallet is not connected".to_string(),
        });
        assert!(failed.contains("Wallet is not connected"));
        assert!(failed.contains("retry"));
    }
}
