use super::print_outcome;
use crate::config::{report, CliContext};
use crate::error::{CliError, CliResult};
use factorypool_client::{CampaignBoard, ClientError, Operation};
use factorypool_view::AllowedAction;

/// Press the finalize or withdraw button on a campaign owned by the
/// connected account
pub async fn execute(ctx: &CliContext, index: u64, wanted: AllowedAction) -> CliResult<()> {
    let operation = match wanted {
        AllowedAction::Withdraw => Operation::Withdraw,
        _ => Operation::Finalize,
    };

    let connected = ctx.connect().await?;
    let board = connected.client.load_campaigns().await;
    if let CampaignBoard::Failed { message } = &board {
        return Err(CliError::CommandExecution(message.clone()));
    }

    let card = board
        .card(index)
        .ok_or(ClientError::CampaignNotFound(index))
        .map_err(report(operation))?;
    let action = card
        .action
        .filter(|action| action.kind() == wanted)
        .ok_or(ClientError::ActionNotAllowed {
            index,
            requested: wanted,
            allowed: card.view.allowed_action,
        })
        .map_err(report(operation))?;

    match wanted {
        AllowedAction::Withdraw => println!("💰 Withdrawing funds from campaign #{}...", index),
        _ => println!("🏁 Finalizing campaign #{}...", index),
    }

    let request = action.press().map_err(report(operation))?;
    let result = connected.client.dispatch(request).await;
    let outcome = ctx.settle(&connected.chain, operation, result)?;

    print_outcome(&outcome);
    Ok(())
}
