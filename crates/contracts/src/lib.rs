//! Contract factories built from compiled artifacts and the handles bound to
//! deployed instances.

pub mod factory;

pub use factory::{ContractFactory, Instance};

/// Name of the contract deployed when nothing else is configured.
pub const REGISTRY_NFT: &str = "RegistryNFT";
