use crate::config::{report, CliContext};
use crate::error::CliResult;
use factorypool_client::{Operation, REWARD_TOKEN_SYMBOL};

pub async fn execute(ctx: &CliContext) -> CliResult<()> {
    let connected = ctx.connect().await?;

    println!("🎁 Adding {} to wallet...", REWARD_TOKEN_SYMBOL);
    let added = connected
        .client
        .add_token_to_wallet()
        .await
        .map_err(report(Operation::AddToken))?;
    ctx.save(&connected.chain)?;

    if added {
        println!("✅ {} token added to wallet!", REWARD_TOKEN_SYMBOL);
    } else {
        println!("⚠️  Request declined");
    }
    Ok(())
}
