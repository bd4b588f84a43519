use factorypool_client::ClientError;
use factorypool_view::ViewError;
use thiserror::Error;

pub type SandboxResult<T> = Result<T, SandboxError>;

#[derive(Error, Debug)]
pub enum SandboxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("State file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error("Unknown account: {0}")]
    UnknownAccount(String),
}

/// Reasons the emulated Crowdfunding contract reverts with
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revert {
    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Funding goal must be greater than zero")]
    InvalidFundingGoal,

    #[error("Duration must be greater than zero")]
    InvalidDuration,

    #[error("Campaign does not exist")]
    CampaignNotFound,

    #[error("Contribution must be greater than zero")]
    InvalidContribution,

    #[error("Campaign has ended")]
    CampaignEnded,

    #[error("Campaign already finalized")]
    AlreadyFinalized,

    #[error("Campaign has not ended yet")]
    NotEnded,

    #[error("Only the creator can finalize the campaign")]
    NotCreator,

    #[error("Amount overflow occurred")]
    AmountOverflow,
}

impl From<Revert> for ClientError {
    fn from(revert: Revert) -> Self {
        ClientError::Reverted {
            reason: Some(revert.to_string()),
        }
    }
}
