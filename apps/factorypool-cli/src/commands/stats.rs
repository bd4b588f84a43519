use crate::config::{report, CliContext};
use crate::error::CliResult;
use crate::render;
use factorypool_client::Operation;

pub async fn execute(ctx: &CliContext) -> CliResult<()> {
    let connected = ctx.connect().await?;
    let stats = connected
        .client
        .user_stats()
        .await
        .map_err(report(Operation::UserStats))?;

    println!("{}", render::stats(&stats));
    Ok(())
}
