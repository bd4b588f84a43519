use crate::config::CliContext;
use crate::error::{CliError, CliResult};
use factorypool_sandbox::LocalChain;

pub fn execute(ctx: &CliContext, force: bool) -> CliResult<()> {
    println!("🏗️  Initializing sandbox chain...");

    if ctx.state_path.exists() && !force {
        return Err(CliError::InvalidConfig(format!(
            "Sandbox state already exists at {}. Pass --force to reset it.",
            ctx.state_path.display()
        )));
    }

    let chain = LocalChain::genesis()?;
    ctx.save(&chain)?;
    println!("✅ Chain state written to {}", ctx.state_path.display());

    let artifacts = chain.artifacts();
    artifacts.write(ctx.artifacts_dir())?;
    println!("✅ Artifacts written to {}", ctx.artifacts_dir().display());

    let state = chain.snapshot();
    println!("\n📋 Contracts:");
    println!("  Crowdfunding: {}", artifacts.addresses.crowdfunding);
    println!("  RewardToken:  {}", artifacts.addresses.reward_token);

    println!("\n👤 Accounts (chain {}):", state.chain_id);
    for (i, account) in state.accounts.iter().enumerate() {
        let marker = if i == state.selected_account { " (selected)" } else { "" };
        println!("  [{}] {}{}", i, account, marker);
    }

    println!("\n🎉 Sandbox ready. Try `factorypool campaigns`.");
    Ok(())
}
