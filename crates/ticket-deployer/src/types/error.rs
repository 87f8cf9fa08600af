//! Error types and result handling for the deployer
//!
//! Variants follow the failure categories of a deployment run: missing or
//! invalid configuration, connectivity, funds, artifacts, on-chain failures
//! and errors raised while signing, broadcasting or waiting. All of them end
//! the run with exit status 1.

use alloy_primitives::{Address, B256};
use std::path::PathBuf;

/// Convenience Result type alias using the local Error type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
	// Config errors
	#[error("{0} not set")]
	MissingConfig(&'static str),

	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),

	// Chain errors
	#[error("Failed to connect to RPC URL {0}")]
	Connection(String),

	#[error("RPC endpoint reports chain {actual}, expected {expected}")]
	ChainMismatch { expected: u64, actual: u64 },

	#[error("Account {address} has no balance. Send {symbol} to it and retry")]
	InsufficientFunds { address: Address, symbol: String },

	// Artifact errors
	#[error("Compiled contracts not found in {0}")]
	ArtifactsNotFound(PathBuf),

	#[error("Artifact {name} not found in {dir}")]
	ArtifactMissing { name: String, dir: PathBuf },

	#[error("{0} bytecode not found")]
	EmptyBytecode(String),

	#[error("Invalid artifact {name}: {reason}")]
	InvalidArtifact { name: String, reason: String },

	// Transaction errors
	#[error("{contract} transaction {tx_hash} reverted")]
	DeploymentFailed { contract: String, tx_hash: B256 },

	#[error("{contract} receipt {tx_hash} has no contract address")]
	MissingContractAddress { contract: String, tx_hash: B256 },

	#[error("Account error: {0}")]
	Account(#[from] deploy_account::AccountError),

	#[error("Delivery error: {0}")]
	Delivery(#[from] deploy_delivery::DeliveryError),

	// IO errors
	#[error("IO error on {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),
}

impl Error {
	/// Wraps an IO error with the path it happened on.
	pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Error::Io {
			path: path.into(),
			source,
		}
	}
}
