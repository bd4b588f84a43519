use super::print_outcome;
use crate::config::{report, CliContext, Connected};
use crate::error::{CliError, CliResult};
use factorypool_client::{CampaignAction, CampaignBoard, ClientError, Operation};
use factorypool_view::{format_ether, parse_ether, AllowedAction};

/// Buy `quantity` units from a production batch
pub async fn execute_units(ctx: &CliContext, index: u64, quantity: u64) -> CliResult<()> {
    let connected = ctx.connect().await?;
    let action = buy_action(&connected, index).await?;

    let request = action
        .buy_units(quantity)
        .map_err(report(Operation::Buy))?;
    if let Some(quote) = action.quote(quantity) {
        if quote.quantity < quantity {
            println!("⚠️  Only {} pcs in this batch", quote.quantity);
        }
        println!(
            "🛒 Buying {} item(s) at {} ETH = {} ETH",
            quote.quantity,
            format_ether(quote.unit_price, 6),
            format_ether(quote.total_cost, 6)
        );
    }

    let result = connected.client.dispatch(request).await;
    let outcome = ctx.settle(&connected.chain, Operation::Buy, result)?;

    print_outcome(&outcome);
    Ok(())
}

/// Contribute a flat amount of ether
pub async fn execute_amount(ctx: &CliContext, index: u64, amount: String) -> CliResult<()> {
    let value = parse_ether(amount.trim())
        .map_err(|e| CliError::InvalidArgument(format!("amount {:?}: {}", amount, e)))?;

    let connected = ctx.connect().await?;
    let action = buy_action(&connected, index).await?;
    let request = action
        .contribute(value)
        .map_err(report(Operation::Buy))?;

    println!("💸 Contributing {} ETH to campaign #{}...", format_ether(value, 6), index);
    let result = connected.client.dispatch(request).await;
    let outcome = ctx.settle(&connected.chain, Operation::Buy, result)?;

    print_outcome(&outcome);
    Ok(())
}

async fn buy_action(connected: &Connected, index: u64) -> CliResult<CampaignAction> {
    let board = connected.client.load_campaigns().await;
    if let CampaignBoard::Failed { message } = &board {
        return Err(CliError::CommandExecution(message.clone()));
    }

    let card = board
        .card(index)
        .ok_or(ClientError::CampaignNotFound(index))
        .map_err(report(Operation::Buy))?;

    match card.action {
        Some(action @ CampaignAction::Buy { .. }) => Ok(action),
        _ => Err(report(Operation::Buy)(ClientError::ActionNotAllowed {
            index,
            requested: AllowedAction::Buy,
            allowed: card.view.allowed_action,
        })),
    }
}
