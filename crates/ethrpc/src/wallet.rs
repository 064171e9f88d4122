use {
    alloy::{
        network::EthereumWallet,
        primitives::Address,
        signers::local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English},
    },
    anyhow::{Context, Result},
    std::fmt::{self, Debug, Formatter},
};

/// Mnemonic of the accounts every anvil and hardhat dev node starts with.
pub const ANVIL_MNEMONIC: &str = "test test test test test test test test test test test junk";

/// Where the keys for signing transactions come from.
#[derive(Clone, Default)]
pub enum SignerSource {
    /// Use the accounts the node manages (`eth_accounts`).
    #[default]
    Node,
    /// Derive the first `count` accounts of a BIP-39 mnemonic along the
    /// default Ethereum derivation path.
    Mnemonic { phrase: String, count: u32 },
    /// Use these keys, in this order.
    PrivateKeys(Vec<PrivateKeySigner>),
}

impl Debug for SignerSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node => f.write_str("Node"),
            Self::Mnemonic { count, .. } => f
                .debug_struct("Mnemonic")
                .field("phrase", &"SECRET")
                .field("count", count)
                .finish(),
            Self::PrivateKeys(keys) => f
                .debug_tuple("PrivateKeys")
                .field(&keys.iter().map(|key| key.address()).collect::<Vec<_>>())
                .finish(),
        }
    }
}

/// Signers held by this process.
///
/// `EthereumWallet` keeps its signers in a map, so the configuration order
/// is tracked separately in `addresses`.
pub struct LocalWallet {
    pub wallet: EthereumWallet,
    pub addresses: Vec<Address>,
}

impl LocalWallet {
    /// Builds the wallet for a signer source. Returns `None` if signing is
    /// left to the node.
    pub fn from_source(source: &SignerSource) -> Result<Option<Self>> {
        let signers = match source {
            SignerSource::Node => return Ok(None),
            SignerSource::Mnemonic { phrase, count } => mnemonic_signers(phrase, *count)?,
            SignerSource::PrivateKeys(keys) => keys.clone(),
        };
        Ok(Some(Self::new(signers)))
    }

    /// The first signer becomes the wallet's default signer.
    pub fn new(signers: Vec<PrivateKeySigner>) -> Self {
        let addresses = signers.iter().map(|signer| signer.address()).collect();
        let mut wallet = EthereumWallet::default();
        for (i, signer) in signers.into_iter().enumerate() {
            if i == 0 {
                wallet.register_default_signer(signer);
            } else {
                wallet.register_signer(signer);
            }
        }
        Self { wallet, addresses }
    }
}

fn mnemonic_signers(phrase: &str, count: u32) -> Result<Vec<PrivateKeySigner>> {
    (0..count)
        .map(|index| {
            MnemonicBuilder::<English>::default()
                .phrase(phrase)
                .index(index)?
                .build()
                .with_context(|| format!("could not derive account {index} from mnemonic"))
        })
        .collect()
}
