use {
    alloy::signers::local::PrivateKeySigner,
    clap::Parser,
    ethrpc::wallet::SignerSource,
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
    },
    tracing::level_filters::LevelFilter,
    url::Url,
};

#[derive(Parser)]
#[clap(about = "Deploys a compiled contract and reports its address")]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Directory containing the compiled contract artifacts
    /// (`<CONTRACT>.json` with `abi` and `bytecode`).
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// Name of the contract to deploy.
    #[clap(long, env, default_value = contracts::REGISTRY_NFT)]
    pub contract: String,

    /// BIP-39 mnemonic to derive the signer accounts from. Without a mnemonic
    /// or private keys the accounts of the node are used.
    #[clap(long, env, conflicts_with = "private_keys")]
    pub mnemonic: Option<String>,

    /// How many accounts to derive from the mnemonic.
    #[clap(long, env, default_value = "10")]
    pub mnemonic_accounts: u32,

    /// Comma separated private keys of the signer accounts. The first one
    /// deploys the contract.
    #[clap(long, env, use_value_delimiter = true)]
    pub private_keys: Vec<PrivateKeySigner>,

    /// Number of blocks the creation transaction needs (including the one it
    /// was mined in) before it counts as confirmed.
    #[clap(long, env, default_value = "1")]
    pub confirmations: u64,

    /// Gas limit of the creation transaction. Estimated by the node if
    /// unset.
    #[clap(long, env)]
    pub gas_limit: Option<u64>,

    /// Write a JSON summary of the deployment to this file.
    #[clap(long, env)]
    pub deployment_file: Option<PathBuf>,
}

#[derive(Parser)]
pub struct LoggingArguments {
    /// Log filter directives. Filtering out `deployer` errors also hides the
    /// reason of a failed run, which is then printed to stderr directly.
    #[clap(long, env, default_value = "warn,deployer=debug,ethrpc=debug")]
    pub log_filter: String,

    /// Events at this level or more severe go to stderr instead of stdout.
    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: LevelFilter,

    #[clap(long, env, action = clap::ArgAction::Set, default_value = "false")]
    pub use_json_logs: bool,
}

impl Arguments {
    pub fn signers(&self) -> SignerSource {
        match &self.mnemonic {
            Some(phrase) => SignerSource::Mnemonic {
                phrase: phrase.clone(),
                count: self.mnemonic_accounts,
            },
            None if !self.private_keys.is_empty() => {
                SignerSource::PrivateKeys(self.private_keys.clone())
            }
            None => SignerSource::Node,
        }
    }

    pub fn ethrpc(&self) -> ethrpc::Config {
        ethrpc::Config {
            node_url: self.node_url.clone(),
            signers: self.signers(),
        }
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            logging,
            node_url,
            artifacts,
            contract,
            mnemonic,
            mnemonic_accounts,
            private_keys,
            confirmations,
            gas_limit,
            deployment_file,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "artifacts: {}", artifacts.display())?;
        writeln!(f, "contract: {contract}")?;
        writeln!(f, "mnemonic: {}", mnemonic.as_ref().map(|_| "SECRET").unwrap_or("None"))?;
        writeln!(f, "mnemonic_accounts: {mnemonic_accounts}")?;
        writeln!(
            f,
            "private_keys: {:?}",
            private_keys.iter().map(|key| key.address()).collect::<Vec<_>>()
        )?;
        writeln!(f, "confirmations: {confirmations}")?;
        writeln!(f, "gas_limit: {gas_limit:?}")?;
        writeln!(f, "deployment_file: {deployment_file:?}")?;
        Ok(())
    }
}

impl Display for LoggingArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            use_json_logs,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}
