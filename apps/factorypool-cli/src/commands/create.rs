use super::print_outcome;
use crate::config::{report, CliContext};
use crate::error::{CliError, CliResult};
use crate::render;
use factorypool_client::{CampaignDraft, CampaignDuration, Operation};
use rust_decimal::Decimal;
use std::str::FromStr;

fn parse_ether_amount(label: &str, value: &str) -> CliResult<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|e| CliError::InvalidArgument(format!("{} {:?}: {}", label, value, e)))
}

/// Launch a production batch: `quantity` units at `price` ether each
pub async fn execute_batch(
    ctx: &CliContext,
    company: String,
    product: String,
    quantity: u64,
    price: String,
    duration: CampaignDuration,
) -> CliResult<()> {
    let draft = CampaignDraft::ProductionBatch {
        company,
        product,
        quantity,
        price_per_unit: parse_ether_amount("--price", &price)?,
        duration,
    };
    submit(ctx, draft).await
}

/// Launch a campaign with a plain goal
pub async fn execute_flat(
    ctx: &CliContext,
    title: String,
    goal: String,
    duration: CampaignDuration,
) -> CliResult<()> {
    let draft = CampaignDraft::Flat {
        title,
        goal: parse_ether_amount("--goal", &goal)?,
        duration,
    };
    submit(ctx, draft).await
}

async fn submit(ctx: &CliContext, draft: CampaignDraft) -> CliResult<()> {
    println!("🚀 Launching production batch...");
    println!("  Total goal: {}", draft.total_goal_display());

    let submission = draft
        .submission()
        .map_err(report(Operation::CreateCampaign))?;
    println!("  Title:      {}", submission.title);
    println!("  Duration:   {}s", submission.duration_seconds);

    let connected = ctx.connect().await?;
    let result = connected.client.create_campaign(&draft).await;
    let outcome = ctx.settle(&connected.chain, Operation::CreateCampaign, result)?;

    print_outcome(&outcome);
    println!();
    print!("{}", render::board(&outcome.board));
    Ok(())
}
