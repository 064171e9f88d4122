//! [`Accounts`] and [`Chain`] backed by a real node.

use {
    crate::deploy::{Accounts, Chain, Receipt},
    alloy::{
        network::{ReceiptResponse, TransactionBuilder},
        primitives::{Address, TxHash},
        providers::{PendingTransactionBuilder, Provider},
        rpc::types::TransactionRequest,
    },
    anyhow::{Context, Result},
    ethrpc::{AlloyProvider, Web3},
};

pub struct Node {
    web3: Web3,
    /// Number of blocks (including the one it was mined in) a transaction
    /// needs before it counts as confirmed.
    confirmations: u64,
    /// Fixed gas limit for submitted transactions. Estimated by the node
    /// when unset.
    gas_limit: Option<u64>,
}

impl Node {
    pub fn new(web3: Web3, confirmations: u64, gas_limit: Option<u64>) -> Self {
        Self {
            web3,
            confirmations,
            gas_limit,
        }
    }
}

#[async_trait::async_trait]
impl Accounts for Node {
    async fn signers(&self) -> Result<Vec<Address>> {
        self.web3.accounts().await
    }
}

#[async_trait::async_trait]
impl Chain for Node {
    async fn submit(&self, mut tx: TransactionRequest) -> Result<TxHash> {
        if let Some(gas_limit) = self.gas_limit {
            tx.set_gas_limit(gas_limit);
        }
        let pending = self.web3.provider.send_transaction(tx).await?;
        Ok(*pending.tx_hash())
    }

    async fn confirm(&self, tx_hash: TxHash) -> Result<Receipt> {
        let receipt = PendingTransactionBuilder::new(self.web3.provider.root().clone(), tx_hash)
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await?;
        tracing::debug!(
            ?tx_hash,
            block = ?receipt.block_number(),
            gas_used = receipt.gas_used(),
            "creation transaction mined"
        );
        outcome(tx_hash, receipt.status(), receipt.contract_address())
    }

    fn provider(&self) -> AlloyProvider {
        self.web3.provider.clone()
    }
}

/// Interprets the status and created address of a mined creation
/// transaction. The address of a reverted transaction is ignored.
fn outcome(tx_hash: TxHash, status: bool, contract_address: Option<Address>) -> Result<Receipt> {
    if !status {
        return Ok(Receipt::Reverted);
    }
    let address =
        contract_address.with_context(|| format!("receipt of {tx_hash} has no contract address"))?;
    Ok(Receipt::Deployed(address))
}
