use clap::{Args, Parser, Subcommand};
use factorypool_client::CampaignDuration;
use factorypool_view::AllowedAction;
use std::path::PathBuf;
use tracing::Level;

mod commands;
mod config;
mod error;
mod render;

use config::{CliContext, DEFAULT_STATE_FILE};
use error::CliResult;

#[derive(Parser)]
#[command(name = "factorypool")]
#[command(about = "Crowdfunding for production batches, against a local sandbox chain")]
#[command(version)]
struct Cli {
    /// Client configuration file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Sandbox chain state file
    #[arg(long, global = true, default_value = DEFAULT_STATE_FILE)]
    state: PathBuf,

    /// Directory holding the contract artifacts
    #[arg(long, global = true)]
    artifacts: Option<PathBuf>,

    /// Act as this dev account for this invocation only
    #[arg(long, global = true)]
    account: Option<String>,

    /// Log wallet and RPC activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Copy)]
struct DurationArgs {
    #[arg(long, default_value_t = 0)]
    days: u64,
    #[arg(long, default_value_t = 0)]
    hours: u64,
    #[arg(long, default_value_t = 0)]
    minutes: u64,
}

impl From<DurationArgs> for CampaignDuration {
    fn from(args: DurationArgs) -> Self {
        CampaignDuration::new(args.days, args.hours, args.minutes)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start a fresh sandbox chain and write the contract artifacts
    Init {
        /// Overwrite an existing sandbox
        #[arg(long)]
        force: bool,
    },
    /// List campaigns with their status and available action
    Campaigns {
        /// Print the derived views as JSON
        #[arg(long)]
        json: bool,
    },
    /// Launch a production batch
    Create {
        #[arg(long)]
        company: String,
        #[arg(long)]
        product: String,
        /// Units in the batch
        #[arg(long)]
        quantity: u64,
        /// Price per unit in ETH
        #[arg(long)]
        price: String,
        #[command(flatten)]
        duration: DurationArgs,
    },
    /// Launch a campaign with a plain ETH goal
    CreateFlat {
        #[arg(long)]
        title: String,
        /// Funding goal in ETH
        #[arg(long)]
        goal: String,
        #[command(flatten)]
        duration: DurationArgs,
    },
    /// Buy units from a production batch
    Buy { campaign: u64, quantity: u64 },
    /// Contribute an ETH amount to a campaign
    Contribute { campaign: u64, amount: String },
    /// Finalize an ended campaign you created
    Finalize { campaign: u64 },
    /// Withdraw the funds of a successful campaign you created
    Withdraw { campaign: u64 },
    /// Show the connected account's balance and rewards
    Stats,
    /// Switch the wallet to Sepolia, adding it if needed
    SwitchNetwork,
    /// Ask the wallet to track the reward token
    AddToken,
    /// Move the sandbox clock forward
    Warp {
        #[command(flatten)]
        duration: DurationArgs,
        #[arg(long, default_value_t = 0)]
        seconds: u64,
    },
    /// Select the sandbox account to act as (index or address)
    UseAccount {
        #[arg(value_name = "ACCOUNT")]
        selector: String,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = CliContext::new(cli.config, cli.state, cli.artifacts, cli.account)?;

    match cli.command {
        Commands::Init { force } => commands::init::execute(&ctx, force),
        Commands::Campaigns { json } => commands::campaigns::execute(&ctx, json).await,
        Commands::Create {
            company,
            product,
            quantity,
            price,
            duration,
        } => {
            commands::create::execute_batch(&ctx, company, product, quantity, price, duration.into())
                .await
        }
        Commands::CreateFlat {
            title,
            goal,
            duration,
        } => commands::create::execute_flat(&ctx, title, goal, duration.into()).await,
        Commands::Buy { campaign, quantity } => {
            commands::buy::execute_units(&ctx, campaign, quantity).await
        }
        Commands::Contribute { campaign, amount } => {
            commands::buy::execute_amount(&ctx, campaign, amount).await
        }
        Commands::Finalize { campaign } => {
            commands::finalize::execute(&ctx, campaign, AllowedAction::Finalize).await
        }
        Commands::Withdraw { campaign } => {
            commands::finalize::execute(&ctx, campaign, AllowedAction::Withdraw).await
        }
        Commands::Stats => commands::stats::execute(&ctx).await,
        Commands::SwitchNetwork => commands::network::execute(&ctx).await,
        Commands::AddToken => commands::add_token::execute(&ctx).await,
        Commands::Warp { duration, seconds } => {
            commands::sandbox::warp(&ctx, duration.into(), seconds)
        }
        Commands::UseAccount { selector } => commands::sandbox::use_account(&ctx, selector),
    }
}
