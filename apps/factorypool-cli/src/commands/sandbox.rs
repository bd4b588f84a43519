use crate::config::CliContext;
use crate::error::{CliError, CliResult};
use factorypool_client::CampaignDuration;
use factorypool_view::{format_time_left, Address};
use std::str::FromStr;

/// Move the sandbox clock forward
pub fn warp(ctx: &CliContext, duration: CampaignDuration, seconds: u64) -> CliResult<()> {
    let total = duration
        .as_seconds()
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| i64::try_from(s).ok())
        .ok_or_else(|| CliError::InvalidArgument("warp duration is too long".to_string()))?;
    if total == 0 {
        return Err(CliError::InvalidArgument(
            "Give a duration with --days, --hours, --minutes or --seconds".to_string(),
        ));
    }

    let chain = ctx.open_chain()?;
    chain.advance_time(total);
    ctx.save(&chain)?;

    println!("⏩ Advanced sandbox clock by {}s ({})", total, format_time_left(total));
    Ok(())
}

/// Select a dev account as the connected wallet
pub fn use_account(ctx: &CliContext, account: String) -> CliResult<()> {
    let chain = ctx.open_chain()?;
    let state = chain.snapshot();

    let address = match account.parse::<usize>() {
        Ok(i) => *state.accounts.get(i).ok_or_else(|| {
            CliError::InvalidArgument(format!(
                "No account #{} (sandbox has {})",
                i,
                state.accounts.len()
            ))
        })?,
        Err(_) => Address::from_str(&account)
            .map_err(|e| CliError::InvalidArgument(format!("{}: {}", account, e)))?,
    };

    chain.select_account(&address)?;
    ctx.save(&chain)?;

    println!("👤 Now acting as {}", address);
    Ok(())
}
