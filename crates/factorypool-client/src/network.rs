use crate::{
    config::NetworkConfig,
    errors::{ClientError, ClientResult},
    provider::WalletProvider,
    types::{ChainId, ChainSpec, NativeCurrency},
};
use tracing::{info, warn};

pub const SEPOLIA_CHAIN_ID: ChainId = 11_155_111;
pub const HARDHAT_CHAIN_ID: ChainId = 31_337;
pub const HARDHAT_LEGACY_CHAIN_ID: ChainId = 1_337;

/// Chains accepted when no configuration overrides them
pub const ALLOWED_CHAINS: &[(ChainId, &str)] = &[
    (SEPOLIA_CHAIN_ID, "Sepolia"),
    (HARDHAT_CHAIN_ID, "Hardhat Localhost"),
    (HARDHAT_LEGACY_CHAIN_ID, "Hardhat Localhost"),
];

/// Parameters offered to the wallet when it does not know Sepolia yet
pub fn sepolia_chain_spec() -> ChainSpec {
    ChainSpec {
        chain_id: SEPOLIA_CHAIN_ID,
        chain_name: "Sepolia Testnet".to_string(),
        native_currency: NativeCurrency {
            name: "SepoliaETH".to_string(),
            symbol: "SEP".to_string(),
            decimals: 18,
        },
        rpc_urls: vec!["https://rpc.sepolia.org".to_string()],
        block_explorer_urls: vec!["https://sepolia.etherscan.io".to_string()],
    }
}

/// Block contract interaction on chains outside the allow-list
pub fn ensure_allowed(network: &NetworkConfig, chain_id: ChainId) -> ClientResult<&str> {
    match network.chain_name(chain_id) {
        Some(name) => Ok(name),
        None => {
            warn!("Wrong network detected: {}", chain_id);
            Err(ClientError::WrongNetwork { chain_id })
        }
    }
}

/// Switch the wallet to `chain`, adding it first if the wallet reports it unknown
pub async fn switch_chain<P: WalletProvider>(provider: &P, chain: &ChainSpec) -> ClientResult<()> {
    match provider.switch_chain(chain.chain_id).await {
        Ok(()) => {}
        Err(e) if e.is_unrecognized_chain() => {
            info!("Chain {} unknown to wallet, adding it", chain.chain_id_hex());
            provider.add_chain(chain).await?;
            provider.switch_chain(chain.chain_id).await?;
        }
        Err(e) => return Err(e),
    }

    info!("Switched to {}", chain.chain_name);
    Ok(())
}
