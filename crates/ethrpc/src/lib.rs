//! Connection to an Ethereum node and the accounts used to sign transactions
//! sent through it.

pub mod wallet;

#[cfg(any(test, feature = "test-util"))]
use alloy::providers::mock;
use {
    alloy::{
        primitives::Address,
        providers::{DynProvider, Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
    },
    anyhow::Result,
    url::Url,
    wallet::{LocalWallet, SignerSource},
};

pub type AlloyProvider = DynProvider;

#[derive(Debug, Clone)]
pub struct Config {
    /// The Ethereum node URL to connect to.
    pub node_url: Url,
    /// Where signing keys come from.
    pub signers: SignerSource,
}

/// A provider together with the accounts it is able to send transactions
/// from.
#[derive(Debug, Clone)]
pub struct Web3 {
    pub provider: AlloyProvider,
    accounts: Accounts,
}

#[derive(Debug, Clone)]
enum Accounts {
    /// Accounts unlocked on the node itself, transactions get signed
    /// remotely through `eth_sendTransaction`.
    Node,
    /// Accounts backed by keys held in this process, in configuration order.
    Local(Vec<Address>),
}

impl Web3 {
    pub fn new(config: &Config) -> Result<Self> {
        let rpc = ClientBuilder::default().http(config.node_url.clone());
        let web3 = match LocalWallet::from_source(&config.signers)? {
            Some(local) => {
                tracing::debug!(accounts = ?local.addresses, "using local signers");
                Self {
                    provider: ProviderBuilder::new()
                        .wallet(local.wallet)
                        .connect_client(rpc)
                        .erased(),
                    accounts: Accounts::Local(local.addresses),
                }
            }
            None => {
                tracing::debug!("using node managed accounts");
                Self {
                    provider: ProviderBuilder::new().connect_client(rpc).erased(),
                    accounts: Accounts::Node,
                }
            }
        };
        Ok(web3)
    }

    /// Returns every account transactions can be sent from. The first entry
    /// is the default sender.
    pub async fn accounts(&self) -> Result<Vec<Address>> {
        match &self.accounts {
            Accounts::Node => Ok(self.provider.get_accounts().await?),
            Accounts::Local(addresses) => Ok(addresses.clone()),
        }
    }
}

/// Provider backed by a mocked transport. Every request fails unless a
/// response was pushed to the asserter first.
#[cfg(any(test, feature = "test-util"))]
pub fn dummy_provider() -> AlloyProvider {
    let asserter = mock::Asserter::new();
    ProviderBuilder::new()
        .connect_mocked_client(asserter)
        .erased()
}
