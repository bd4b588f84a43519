use crate::errors::{ClientError, ClientResult};
use factorypool_view::{encode_title, ether_to_wei, format_decimal, Wei};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Campaign length as entered in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CampaignDuration {
    #[serde(default)]
    pub days: u64,
    #[serde(default)]
    pub hours: u64,
    #[serde(default)]
    pub minutes: u64,
}

impl CampaignDuration {
    pub fn new(days: u64, hours: u64, minutes: u64) -> Self {
        Self {
            days,
            hours,
            minutes,
        }
    }

    pub fn as_seconds(&self) -> Option<u64> {
        self.days
            .checked_mul(86_400)?
            .checked_add(self.hours.checked_mul(3_600)?)?
            .checked_add(self.minutes.checked_mul(60)?)
    }

    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0
    }
}

/// A new campaign as filled in by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CampaignDraft {
    /// Units of a product pre-sold at a fixed unit price
    ProductionBatch {
        company: String,
        product: String,
        quantity: u64,
        /// Ether per unit
        price_per_unit: Decimal,
        duration: CampaignDuration,
    },
    /// A plain goal with no unit structure
    Flat {
        title: String,
        /// Ether
        goal: Decimal,
        duration: CampaignDuration,
    },
}

/// Validated `createCampaign` arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignSubmission {
    pub title: String,
    pub funding_goal: Wei,
    pub duration_seconds: u64,
}

impl CampaignDraft {
    /// Goal in ether. For batches this is `quantity * price_per_unit`, shown
    /// live while the form is edited.
    pub fn total_goal(&self) -> Option<Decimal> {
        match self {
            CampaignDraft::ProductionBatch {
                quantity,
                price_per_unit,
                ..
            } => Decimal::from(*quantity).checked_mul(*price_per_unit),
            CampaignDraft::Flat { goal, .. } => Some(*goal),
        }
    }

    /// Goal formatted the way the form displays it
    pub fn total_goal_display(&self) -> String {
        format!(
            "{} ETH",
            format_decimal(self.total_goal().unwrap_or(Decimal::ZERO), 4)
        )
    }

    pub fn duration(&self) -> CampaignDuration {
        match self {
            CampaignDraft::ProductionBatch { duration, .. } | CampaignDraft::Flat { duration, .. } => {
                *duration
            }
        }
    }

    /// Validate the form and produce the contract arguments
    pub fn submission(&self) -> ClientResult<CampaignSubmission> {
        let title = match self {
            CampaignDraft::ProductionBatch {
                company,
                product,
                quantity,
                price_per_unit,
                ..
            } => {
                let company = company.trim();
                let product = product.trim();
                if company.is_empty() || product.is_empty() {
                    return Err(invalid("Please fill in Company Name and Product Name!"));
                }
                if *quantity == 0 || *price_per_unit <= Decimal::ZERO {
                    return Err(invalid("Please enter valid Quantity and Price Per Unit!"));
                }
                encode_title(company, product, *quantity)
            }
            CampaignDraft::Flat { title, goal, .. } => {
                let title = title.trim();
                if title.is_empty() {
                    return Err(invalid("Please enter a campaign title!"));
                }
                if *goal <= Decimal::ZERO {
                    return Err(invalid("Please enter a valid funding goal!"));
                }
                title.to_string()
            }
        };

        let duration = self.duration();
        if duration.is_zero() {
            return Err(invalid("Please set a duration (at least 1 minute)!"));
        }
        let duration_seconds = duration
            .as_seconds()
            .ok_or_else(|| invalid("Campaign duration is too long!"))?;

        let goal = self
            .total_goal()
            .ok_or_else(|| invalid("Funding goal is too large!"))?;
        let funding_goal = ether_to_wei(goal)?;
        if funding_goal == 0 {
            return Err(invalid("Funding goal rounds to zero!"));
        }

        Ok(CampaignSubmission {
            title,
            funding_goal,
            duration_seconds,
        })
    }
}

fn invalid(message: &str) -> ClientError {
    ClientError::InvalidInput(message.to_string())
}
