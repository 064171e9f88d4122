//! A single contract deployment: pick a signer, submit the creation
//! transaction, wait for it to be mined and check the outcome.
//!
//! The node and the accounts are reached through the [`Accounts`] and
//! [`Chain`] traits so the flow can be tested without a running chain.

use {
    alloy::{
        primitives::{Address, TxHash},
        rpc::types::TransactionRequest,
    },
    contracts::{ContractFactory, Instance},
    ethrpc::AlloyProvider,
    std::{
        fmt::{self, Debug, Formatter},
        sync::Arc,
    },
};

/// Provides the identities transactions can be signed with.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Accounts: Send + Sync {
    /// All available signers. The first one deploys.
    async fn signers(&self) -> anyhow::Result<Vec<Address>>;
}

/// Submits transactions and observes their outcome.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Chain: Send + Sync {
    /// Sends the transaction and returns its hash as soon as the node
    /// accepted it.
    async fn submit(&self, tx: TransactionRequest) -> anyhow::Result<TxHash>;

    /// Waits until the transaction is mined.
    async fn confirm(&self, tx_hash: TxHash) -> anyhow::Result<Receipt>;

    /// Provider that handles of deployed contracts use.
    fn provider(&self) -> AlloyProvider;
}

/// Mined outcome of a contract creation transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receipt {
    /// The contract now lives at this address.
    Deployed(Address),
    /// The transaction reverted, no contract was created.
    Reverted,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to deploy {0}")]
    DeploymentFailed(String),
    #[error("no signer account available")]
    NoSigners,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A successful deployment.
pub struct Deployment {
    /// Every signer that was available. The first one deployed the contract.
    pub accounts: Vec<Address>,
    pub contract: Instance,
    pub transaction_hash: TxHash,
}

impl Debug for Deployment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deployment")
            .field("accounts", &self.accounts)
            .field("contract", self.contract.address())
            .field("transaction_hash", &self.transaction_hash)
            .finish()
    }
}

pub struct Deployer {
    factory: ContractFactory,
    accounts: Arc<dyn Accounts>,
    chain: Arc<dyn Chain>,
}

impl Deployer {
    pub fn new(
        factory: ContractFactory,
        accounts: Arc<dyn Accounts>,
        chain: Arc<dyn Chain>,
    ) -> Self {
        Self {
            factory,
            accounts,
            chain,
        }
    }

    /// Deploys the contract once. Nothing is retried: a reverted creation
    /// transaction fails with [`Error::DeploymentFailed`] and every error of
    /// the node or the accounts is returned as is.
    pub async fn deploy(&self) -> Result<Deployment, Error> {
        let name = self.factory.name();
        let accounts = self.accounts.signers().await?;
        let deployer = *accounts.first().ok_or(Error::NoSigners)?;

        tracing::info!("Deploying {name}.....");
        let tx_hash = self
            .chain
            .submit(self.factory.deploy_request(deployer))
            .await?;
        tracing::debug!(?tx_hash, ?deployer, "submitted creation transaction");

        match self.chain.confirm(tx_hash).await? {
            Receipt::Deployed(address) => {
                tracing::info!("{name} deploy transaction hash: {tx_hash}");
                tracing::info!("{name} deployed to: {address}");
                Ok(Deployment {
                    accounts,
                    contract: self.factory.at(address, self.chain.provider()),
                    transaction_hash: tx_hash,
                })
            }
            Receipt::Reverted => {
                tracing::error!("Deploying {name} TRANSACTION FAILED!!!");
                tracing::info!("Transaction hash: {tx_hash}");
                Err(Error::DeploymentFailed(name.to_string()))
            }
        }
    }
}
