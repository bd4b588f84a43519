/*!
# FactoryPool Campaign Views

This crate turns raw campaign records read from the Crowdfunding contract into
what a front end displays: a status badge, a progress figure, a time-left
label, and the single action the connected wallet may take.

## Lifecycle Rules

The contract is the authority. The rules below mirror it so the UI never offers
an action the contract would reject:

- A finalized campaign is closed for good.
- A campaign whose goal is reached is **sold out**, even after its deadline.
- The owner of an expired, funded campaign may **withdraw**.
- The owner of an expired, unfunded campaign may **finalize** (refunds).
- Anyone may **buy** while a campaign is live and short of its goal.

## Usage

```rust
use factorypool_view::{derive_view, Address, AllowedAction, CampaignRecord, CampaignStatus};
use std::str::FromStr;

let creator = Address::from_str("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap();
let record = CampaignRecord {
    index: 0,
    creator,
    title: "Acme - Widget (50 pcs)".to_string(),
    funding_goal: 100,
    total_raised: 100,
    deadline: 1_000,
    finalized: false,
};

let view = derive_view(&record, 1_001, Some(&creator));
assert_eq!(view.status, CampaignStatus::SoldOut);
assert_eq!(view.allowed_action, AllowedAction::Withdraw);
assert_eq!(view.price_per_unit, 2);
```
*/

pub mod address;
pub mod amount;
pub mod errors;
pub mod record;
pub mod time_left;
pub mod title;
pub mod view;

// Re-export main types for convenience
pub use address::Address;
pub use amount::{
    ether_to_wei, format_decimal, format_ether, parse_ether, wei_to_ether, whole_tokens, Wei,
    ETHER_DECIMALS, WEI_PER_ETHER,
};
pub use errors::{ViewError, ViewResult};
pub use record::{CampaignRecord, Timestamp};
pub use time_left::format_time_left;
pub use title::{encode_title, parse_title, parse_total_quantity, total_quantity, ProductTitle};
pub use view::{derive_view, progress_percent, AllowedAction, CampaignStatus, CampaignView, Footer};
