/*!
# Client Data Types

Values exchanged with the wallet provider: transaction hashes and receipts,
chain descriptors for `wallet_addEthereumChain`, assets for
`wallet_watchAsset`, and wallet change notifications.
*/

use crate::errors::ClientError;
use factorypool_view::Address;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub type ChainId = u64;

/// 32-byte transaction hash
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TxHash([u8; 32]);

impl TxHash {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", self)
    }
}

impl FromStr for TxHash {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits)
            .map_err(|e| ClientError::InvalidInput(format!("Invalid tx hash {}: {}", s, e)))?;
        let hash: [u8; 32] = bytes.try_into().map_err(|_| {
            ClientError::InvalidInput(format!("Tx hash must be 32 bytes: {}", s))
        })?;
        Ok(Self(hash))
    }
}

impl Serialize for TxHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TxHash::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Outcome of a mined transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TxStatus {
    Success,
    Reverted { reason: Option<String> },
}

/// Receipt of a mined transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub hash: TxHash,
    pub block_number: u64,
    pub status: TxStatus,
}

/// Native currency of a chain, as the wallet displays it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Parameters for adding a chain to the wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSpec {
    pub chain_id: ChainId,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl ChainSpec {
    /// Chain id in the `0x`-prefixed hex form wallets expect
    pub fn chain_id_hex(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }
}

/// ERC-20 token the wallet should track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchAsset {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

/// Notifications pushed by the wallet provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged(ChainId),
}

/// What happened to the session after a wallet event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    /// A new account is active; the session was rebuilt for it
    AccountChanged(Address),
    /// The wallet disconnected every account
    Disconnected,
    /// The chain changed; the session was dropped and must be reconnected
    Reset,
    /// Nothing to do (no session was open)
    Unchanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_hash_round_trip() {
        let hash = TxHash::new([0xab; 32]);
        let text = hash.to_string();
        assert_eq!(text.len(), 66);
        assert_eq!(TxHash::from_str(&text).unwrap(), hash);
        assert!(TxHash::from_str("0x1234").is_err());
    }

    #[test]
    fn test_chain_id_hex() {
        let spec = ChainSpec {
            chain_id: 11_155_111,
            chain_name: "Sepolia Testnet".to_string(),
            native_currency: NativeCurrency {
                name: "SepoliaETH".to_string(),
                symbol: "SEP".to_string(),
                decimals: 18,
            },
            rpc_urls: vec![],
            block_explorer_urls: vec![],
        };
        assert_eq!(spec.chain_id_hex(), "0xaa36a7");
    }
}
