//! Records produced by a deployment run

use alloy_primitives::{Address, B256};

/// A contract that was created and mined successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
	pub name: String,
	pub address: Address,
	pub transaction_hash: B256,
	pub gas_used: u64,
	pub block_number: Option<u64>,
}

/// The marketplace authorized as verifier on the NFT contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierRegistration {
	pub verifier: Address,
	pub transaction_hash: B256,
}

/// Everything a successful run produced on chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentOutcome {
	pub deployer: Address,
	pub ticket_nft: DeployedContract,
	pub marketplace: DeployedContract,
	pub verifier: Option<VerifierRegistration>,
}
