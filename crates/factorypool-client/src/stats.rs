use factorypool_view::{format_ether, whole_tokens, Wei};
use serde::Serialize;

/// Balances shown in the header once a wallet is connected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub native_balance: Wei,
    /// Reward tokens held; one per order, 18 decimals on-chain
    pub reward_balance: Wei,
}

impl UserStats {
    /// Native balance to four places
    pub fn native_display(&self) -> String {
        format_ether(self.native_balance, 4)
    }

    /// Whole reward tokens, fraction dropped
    pub fn reward_tokens(&self) -> u128 {
        whole_tokens(self.reward_balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factorypool_view::WEI_PER_ETHER;

    #[test]
    fn test_display() {
        let stats = UserStats {
            native_balance: 9_999_876_540_000_000_000_000,
            reward_balance: 12 * WEI_PER_ETHER + WEI_PER_ETHER / 2,
        };
        assert_eq!(stats.native_display(), "9999.8765");
        assert_eq!(stats.reward_tokens(), 12);
    }
}
