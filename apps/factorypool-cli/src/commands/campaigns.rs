use crate::config::CliContext;
use crate::error::{CliError, CliResult};
use crate::render;

pub async fn execute(ctx: &CliContext, json: bool) -> CliResult<()> {
    let connected = ctx.connect().await?;
    let board = connected.client.load_campaigns().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        println!("\n📦 Production batches:\n");
        print!("{}", render::board(&board));
    }

    if board.is_failed() {
        return Err(CliError::CommandExecution(
            "Failed to load campaigns".to_string(),
        ));
    }
    Ok(())
}
