use crate::types::{ChainId, TxHash};
use factorypool_view::{AllowedAction, ViewError};
use std::fmt;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// Wallet error code for a request the user declined
pub const USER_REJECTED_CODE: i64 = 4001;

/// Wallet error code for a chain the wallet does not know about
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to load contract artifacts: {0}")]
    Artifacts(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error("No wallet provider available")]
    NoWallet,

    #[error("Wallet is not connected")]
    NotConnected,

    #[error("User rejected the request")]
    UserRejected,

    #[error("Wallet error {code}: {message}")]
    Wallet { code: i64, message: String },

    #[error("Wrong network: chain {chain_id} is not supported")]
    WrongNetwork { chain_id: ChainId },

    #[error("Transaction reverted{}", reason_suffix(.reason))]
    Reverted { reason: Option<String> },

    #[error("Transaction {hash} was not mined in time")]
    ConfirmationTimeout { hash: TxHash },

    #[error("Campaign {0} does not exist")]
    CampaignNotFound(u64),

    #[error("Campaign {index} does not allow {requested} (allowed: {allowed})")]
    ActionNotAllowed {
        index: u64,
        requested: AllowedAction,
        allowed: AllowedAction,
    },

    #[error("A {0} transaction is already in flight")]
    Busy(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("RPC error: {0}")]
    Rpc(String),
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_ref()
        .map(|r| format!(": {}", r))
        .unwrap_or_default()
}

/// User-facing operations, used to word notices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Connect,
    LoadCampaigns,
    CreateCampaign,
    Buy,
    Finalize,
    Withdraw,
    SwitchNetwork,
    AddToken,
    UserStats,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Operation::Connect => "connect wallet",
            Operation::LoadCampaigns => "load campaigns",
            Operation::CreateCampaign => "create campaign",
            Operation::Buy => "buy items",
            Operation::Finalize => "finalize campaign",
            Operation::Withdraw => "withdraw funds",
            Operation::SwitchNetwork => "switch network",
            Operation::AddToken => "add token",
            Operation::UserStats => "update user stats",
        };
        f.write_str(text)
    }
}

impl ClientError {
    /// Map a wallet error code onto the taxonomy
    pub fn wallet(code: i64, message: impl Into<String>) -> Self {
        match code {
            USER_REJECTED_CODE => ClientError::UserRejected,
            code => ClientError::Wallet {
                code,
                message: message.into(),
            },
        }
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        matches!(
            self,
            ClientError::Wallet {
                code: UNRECOGNIZED_CHAIN_CODE,
                ..
            }
        )
    }

    /// Artifact failures end the session; the user has to restart
    pub fn is_fatal(&self) -> bool {
        matches!(self, ClientError::Artifacts(_))
    }

    /// Text for the blocking notification shown after a failed operation
    pub fn notice(&self, operation: Operation) -> String {
        match (self, operation) {
            (ClientError::UserRejected, Operation::Connect) => {
                "Connection rejected. Please approve the connection request.".to_string()
            }
            (ClientError::UserRejected, _) => "Transaction was rejected by user.".to_string(),
            (ClientError::Reverted { reason: Some(reason) }, _) => format!("Error: {}", reason),
            (ClientError::WrongNetwork { .. }, _) => {
                "Wrong network! Please switch to Sepolia or Hardhat Localhost.".to_string()
            }
            (ClientError::NoWallet, _) => {
                "Please install a wallet extension to use this application!".to_string()
            }
            (ClientError::Artifacts(_), _) => {
                "Failed to load contract artifacts. Check logs for details.".to_string()
            }
            (ClientError::InvalidInput(message), _) => message.clone(),
            (ClientError::Busy(_), _) => "Please wait for the pending transaction.".to_string(),
            (_, operation) => format!("Failed to {}. Check logs for details.", operation),
        }
    }
}
