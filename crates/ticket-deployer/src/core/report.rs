//! Deployment report
//!
//! JSON summary of a finished run, written next to the project so frontends
//! and operators can pick up addresses and transaction hashes.

use crate::{
	core::config::NetworkProfile,
	types::{
		deployment::{DeployedContract, DeploymentOutcome},
		error::{Error, Result},
	},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentReport {
	pub timestamp: String,
	pub network: String,
	pub chain_id: u64,
	pub rpc_url: String,
	pub deployer: String,
	pub contracts: ReportContracts,
	pub block_explorer: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub verification: Option<VerificationRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportContracts {
	#[serde(rename = "TicketNFT")]
	pub ticket_nft: ContractRecord,
	#[serde(rename = "TicketMarketplace")]
	pub ticket_marketplace: ContractRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
	pub address: String,
	pub deployment_tx: String,
}

impl From<&DeployedContract> for ContractRecord {
	fn from(contract: &DeployedContract) -> Self {
		Self {
			address: contract.address.to_checksum(None),
			deployment_tx: contract.transaction_hash.to_string(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
	#[serde(rename = "ticketNFTVerifier")]
	pub ticket_nft_verifier: String,
	pub transaction_hash: String,
	pub status: String,
}

impl DeploymentReport {
	/// Assemble the report of a successful run
	pub fn new(network: &NetworkProfile, outcome: &DeploymentOutcome, at: DateTime<Utc>) -> Self {
		Self {
			timestamp: at.to_rfc3339_opts(SecondsFormat::Secs, true),
			network: network.name.clone(),
			chain_id: network.chain_id,
			rpc_url: network.rpc_url.clone(),
			deployer: outcome.deployer.to_checksum(None),
			contracts: ReportContracts {
				ticket_nft: (&outcome.ticket_nft).into(),
				ticket_marketplace: (&outcome.marketplace).into(),
			},
			block_explorer: network.explorer_url.clone(),
			verification: outcome.verifier.as_ref().map(|registration| VerificationRecord {
				ticket_nft_verifier: registration.verifier.to_checksum(None),
				transaction_hash: registration.transaction_hash.to_string(),
				status: format!("{} added as verifier", outcome.marketplace.name),
			}),
		}
	}

	/// Write the report as pretty JSON, replacing any earlier report
	pub fn write(&self, path: &Path) -> Result<()> {
		let json = serde_json::to_string_pretty(self)?;
		std::fs::write(path, json).map_err(|e| Error::io(path, e))
	}
}
