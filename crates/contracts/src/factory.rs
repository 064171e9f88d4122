use {
    alloy::{
        contract::{ContractInstance, Interface},
        json_abi::JsonAbi,
        network::TransactionBuilder,
        primitives::{Address, Bytes},
        providers::DynProvider,
        rpc::types::TransactionRequest,
    },
    anyhow::{Context, Result, ensure},
    serde::Deserialize,
    std::path::Path,
};

/// Handle to a deployed contract, bound to its address and ABI.
pub type Instance = ContractInstance<DynProvider>;

/// Knows how to create a specific contract: its ABI and creation bytecode.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    name: String,
    abi: JsonAbi,
    bytecode: Bytes,
}

/// The parts of a hardhat or foundry artifact we care about.
#[derive(Deserialize)]
struct Artifact {
    abi: JsonAbi,
    bytecode: Bytecode,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Bytecode {
    /// Hardhat: `"bytecode": "0x..."`
    Hex(Bytes),
    /// Foundry: `"bytecode": { "object": "0x...", ... }`
    Object { object: Bytes },
}

impl From<Bytecode> for Bytes {
    fn from(value: Bytecode) -> Self {
        match value {
            Bytecode::Hex(bytes) | Bytecode::Object { object: bytes } => bytes,
        }
    }
}

impl ContractFactory {
    /// Loads the artifact `<dir>/<name>.json`.
    pub fn load(dir: &Path, name: &str) -> Result<Self> {
        let path = dir.join(format!("{name}.json"));
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("could not read artifact {}", path.display()))?;
        Self::from_json(name, &json)
            .with_context(|| format!("invalid artifact {}", path.display()))
    }

    pub fn from_json(name: &str, json: &str) -> Result<Self> {
        let artifact: Artifact = serde_json::from_str(json)?;
        let bytecode = Bytes::from(artifact.bytecode);
        // Interfaces and abstract contracts compile to an empty bytecode.
        ensure!(!bytecode.is_empty(), "{name} has no creation code");
        Ok(Self {
            name: name.to_string(),
            abi: artifact.abi,
            bytecode,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// Contract creation transaction sent from `from`. Gas, nonce and fees are
    /// left for the provider to fill in.
    pub fn deploy_request(&self, from: Address) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(self.bytecode.clone())
    }

    /// Binds a handle to an already deployed instance of this contract.
    pub fn at(&self, address: Address, provider: DynProvider) -> Instance {
        Instance::new(address, provider, Interface::new(self.abi.clone()))
    }
}
