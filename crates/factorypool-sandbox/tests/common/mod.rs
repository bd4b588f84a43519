#![allow(dead_code)]

use factorypool_client::{
    CampaignDraft, CampaignDuration, ClientConfig, ConfirmationConfig, FactoryPoolClient,
};
use factorypool_sandbox::LocalChain;
use factorypool_view::{Address, Timestamp};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Frozen chain time every test starts from
pub const NOW: Timestamp = 1_700_000_000;

/// A sandbox chain and a client wired to it
pub struct TestHarness {
    pub chain: LocalChain,
    pub client: FactoryPoolClient<LocalChain>,
}

impl TestHarness {
    /// Fresh chain with the clock frozen at [`NOW`], not yet connected
    pub fn new() -> Self {
        let chain = LocalChain::genesis().unwrap();
        chain.freeze_time(NOW);
        Self::with_chain(chain)
    }

    pub fn with_chain(chain: LocalChain) -> Self {
        Self::with_config(chain, fast_config())
    }

    pub fn with_config(chain: LocalChain, config: ClientConfig) -> Self {
        let client = FactoryPoolClient::new(chain.clone(), chain.artifacts(), config)
            .with_clock(chain.clone());
        Self { chain, client }
    }

    /// Fresh chain with the first dev account connected
    pub async fn connected() -> Self {
        let harness = Self::new();
        harness.client.connect().await.unwrap();
        harness
    }

    pub fn account(&self, index: usize) -> Address {
        self.chain.snapshot().accounts[index]
    }

    /// Connect as another dev account
    pub fn switch_to(&self, index: usize) {
        let event = self.chain.select_account(&self.account(index)).unwrap();
        self.client.handle_wallet_event(event).unwrap();
    }
}

/// Receipt polling fast enough for tests
pub fn fast_config() -> ClientConfig {
    ClientConfig {
        confirmation: ConfirmationConfig {
            initial_interval_ms: 1,
            max_interval_ms: 5,
            max_wait_secs: 5,
        },
        ..ClientConfig::default()
    }
}

/// `quantity` units at `price` ether each, open for `minutes`
pub fn batch_draft(quantity: u64, price: &str, minutes: u64) -> CampaignDraft {
    CampaignDraft::ProductionBatch {
        company: "Acme".to_string(),
        product: "Widget".to_string(),
        quantity,
        price_per_unit: Decimal::from_str(price).unwrap(),
        duration: CampaignDuration::new(0, 0, minutes),
    }
}
