//! Chain access for the deployer.
//!
//! This module defines the narrow client interface the deployment sequence
//! talks to: connectivity, account state, gas price, raw transaction
//! submission and receipt retrieval. Everything above it is plain sequencing
//! over these calls, which lets tests swap in deterministic mocks.

use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

pub use implementations::evm::alloy::AlloyDelivery;

/// Errors that can occur while talking to the chain.
#[derive(Debug, Error)]
pub enum DeliveryError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// The transaction was not mined before the receipt timeout elapsed.
	#[error("Transaction {hash} not mined within {seconds}s")]
	Timeout { hash: B256, seconds: u64 },
}

/// Receipt fields the deployer cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReceipt {
	/// Hash of the mined transaction.
	pub transaction_hash: B256,
	/// Whether execution succeeded (status 1).
	pub success: bool,
	/// Address of the created contract, set for creation transactions.
	pub contract_address: Option<Address>,
	/// Gas consumed by the transaction.
	pub gas_used: u64,
	/// Block the transaction was included in.
	pub block_number: Option<u64>,
}

/// Trait defining the interface for chain clients.
///
/// Implementations are bound to a single RPC endpoint. Requests are issued
/// one at a time by the caller; no client-side nonce management happens here.
#[async_trait]
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait ChainClient: Send + Sync {
	/// Returns true if the endpoint answers a chain id request.
	async fn is_connected(&self) -> bool;

	/// Returns the chain id reported by the node.
	async fn chain_id(&self) -> Result<u64, DeliveryError>;

	/// Returns the native balance of an address in wei.
	async fn get_balance(&self, address: Address) -> Result<U256, DeliveryError>;

	/// Returns the transaction count of an address, used as the next nonce.
	async fn get_nonce(&self, address: Address) -> Result<u64, DeliveryError>;

	/// Returns the current network gas price in wei.
	async fn get_gas_price(&self) -> Result<u128, DeliveryError>;

	/// Broadcasts a signed, EIP-2718 encoded transaction and returns its hash.
	async fn send_raw_transaction(&self, raw: Bytes) -> Result<B256, DeliveryError>;

	/// Blocks until the transaction is mined or `timeout` elapses.
	async fn wait_for_receipt(
		&self,
		hash: B256,
		timeout: Duration,
	) -> Result<DeployReceipt, DeliveryError>;
}
