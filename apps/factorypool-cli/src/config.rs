use crate::error::{CliError, CliResult};
use factorypool_client::{
    Artifacts, ClientConfig, ClientError, ClientResult, FactoryPoolClient, Operation,
};
use factorypool_sandbox::LocalChain;
use factorypool_view::Address;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// Default location of the sandbox chain state
pub const DEFAULT_STATE_FILE: &str = ".factorypool/sandbox.json";

/// Paths and settings shared by every command
#[derive(Debug, Clone)]
pub struct CliContext {
    pub state_path: PathBuf,
    pub client_config: ClientConfig,
    /// Act as this dev account for one invocation
    pub account: Option<Address>,
}

/// An open sandbox chain and a client connected to it
pub struct Connected {
    pub chain: LocalChain,
    pub client: FactoryPoolClient<LocalChain>,
}

impl CliContext {
    pub fn new(
        config: Option<PathBuf>,
        state_path: PathBuf,
        artifacts_dir: Option<PathBuf>,
        account: Option<String>,
    ) -> CliResult<Self> {
        let mut client_config = match config {
            Some(path) => {
                debug!("Loading client config from {}", path.display());
                ClientConfig::load(&path)?
            }
            None => ClientConfig::default(),
        };
        if let Some(dir) = artifacts_dir {
            client_config.artifacts_dir = dir;
        }

        let account = account
            .map(|a| {
                Address::from_str(&a)
                    .map_err(|e| CliError::InvalidArgument(format!("--account {}: {}", a, e)))
            })
            .transpose()?;

        Ok(Self {
            state_path,
            client_config,
            account,
        })
    }

    pub fn artifacts_dir(&self) -> &PathBuf {
        &self.client_config.artifacts_dir
    }

    /// Open the sandbox chain written by `init`
    pub fn open_chain(&self) -> CliResult<LocalChain> {
        if !self.state_path.exists() {
            return Err(CliError::InvalidConfig(format!(
                "No sandbox state at {}. Run `factorypool init` first.",
                self.state_path.display()
            )));
        }
        let chain = LocalChain::open(&self.state_path)?;
        if let Some(account) = &self.account {
            chain.select_account(account)?;
        }
        Ok(chain)
    }

    /// Build a client for `chain` without connecting it
    pub fn client(&self, chain: &LocalChain) -> CliResult<FactoryPoolClient<LocalChain>> {
        let artifacts = Artifacts::load(self.artifacts_dir()).map_err(report(Operation::Connect))?;
        Ok(
            FactoryPoolClient::new(chain.clone(), artifacts, self.client_config.clone())
                .with_clock(chain.clone()),
        )
    }

    /// Open the chain, load artifacts, and connect the selected account
    pub async fn connect(&self) -> CliResult<Connected> {
        let chain = self.open_chain()?;
        let client = self.client(&chain)?;

        let session = client
            .connect()
            .await
            .map_err(report(Operation::Connect))?;
        println!(
            "🔗 Connected as {} on {}",
            session.account().short(),
            session.chain_name()
        );

        Ok(Connected { chain, client })
    }

    /// Write the chain state back so the next command sees this one's effects
    pub fn save(&self, chain: &LocalChain) -> CliResult<()> {
        chain.save(&self.state_path)?;
        Ok(())
    }

    /// Save the chain, then report `result`. A transaction can land on the
    /// chain even when its confirmation fails.
    pub fn settle<T>(
        &self,
        chain: &LocalChain,
        operation: Operation,
        result: ClientResult<T>,
    ) -> CliResult<T> {
        self.save(chain)?;
        result.map_err(report(operation))
    }
}

/// Print the user-facing notice for a failed operation and keep the error
pub fn report(operation: Operation) -> impl FnOnce(ClientError) -> CliError {
    move |e| {
        println!("❌ {}", e.notice(operation));
        CliError::Client(e)
    }
}
