use {
    crate::deploy::Deployment,
    alloy::primitives::{Address, TxHash},
    anyhow::{Context, Result},
    serde::{Deserialize, Serialize},
    std::path::Path,
};

/// Machine readable record of a deployment so other tooling can pick up the
/// deployed address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSummary {
    pub contract: String,
    pub address: Address,
    pub transaction_hash: TxHash,
    pub deployer: Address,
    pub accounts: Vec<Address>,
}

impl DeploymentSummary {
    pub fn new(contract: &str, deployment: &Deployment) -> Self {
        Self {
            contract: contract.to_string(),
            address: *deployment.contract.address(),
            transaction_hash: deployment.transaction_hash,
            // A deployment always carries the account that sent it.
            deployer: deployment.accounts[0],
            accounts: deployment.accounts.clone(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("could not write deployment file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::primitives::{address, b256},
    };

    #[test]
    fn writes_camel_case_json() {
        let summary = DeploymentSummary {
            contract: "RegistryNFT".to_string(),
            address: address!("0x0000000000000000000000000000000000000def"),
            transaction_hash: b256!(
                "0x1111111111111111111111111111111111111111111111111111111111111111"
            ),
            deployer: address!("0x0000000000000000000000000000000000000abc"),
            accounts: vec![address!("0x0000000000000000000000000000000000000abc")],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployment.json");

        summary.write(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["contract"], "RegistryNFT");
        assert_eq!(
            json["transactionHash"],
            "0x1111111111111111111111111111111111111111111111111111111111111111"
        );
        let read: DeploymentSummary = serde_json::from_value(json).unwrap();
        assert_eq!(read, summary);
    }
}
