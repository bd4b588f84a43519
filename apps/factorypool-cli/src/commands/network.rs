use crate::config::{report, CliContext};
use crate::error::CliResult;
use factorypool_client::{sepolia_chain_spec, Operation};

/// Move the wallet to Sepolia, adding the network first if it is unknown
pub async fn execute(ctx: &CliContext) -> CliResult<()> {
    let chain = ctx.open_chain()?;
    let client = ctx.client(&chain)?;
    let sepolia = sepolia_chain_spec();

    println!(
        "🌐 Switching to {} ({})...",
        sepolia.chain_name,
        sepolia.chain_id_hex()
    );
    client
        .switch_to_sepolia()
        .await
        .map_err(report(Operation::SwitchNetwork))?;
    ctx.save(&chain)?;

    println!("✅ Switched to {}", sepolia.chain_name);
    Ok(())
}
