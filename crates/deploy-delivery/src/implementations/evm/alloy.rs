//! Alloy-based chain client.
//!
//! Talks JSON-RPC over HTTP through an Alloy provider with a retry/backoff
//! transport layer. Transactions arrive already signed, so the provider is
//! built without fillers or a wallet.

use crate::{ChainClient, DeliveryError, DeployReceipt};
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types::TransactionReceipt;
use alloy_transport::layers::RetryBackoffLayer;
use async_trait::async_trait;
use std::time::Duration;

/// Interval between receipt polls while waiting for a transaction.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Chain client backed by an Alloy HTTP provider.
pub struct AlloyDelivery {
	provider: DynProvider,
	rpc_url: String,
	poll_interval: Duration,
}

impl std::fmt::Debug for AlloyDelivery {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AlloyDelivery")
			.field("rpc_url", &self.rpc_url)
			.field("poll_interval", &self.poll_interval)
			.finish()
	}
}

impl AlloyDelivery {
	/// Creates a client for the given RPC endpoint.
	///
	/// No request is made here; connectivity is checked separately through
	/// [`ChainClient::is_connected`].
	pub fn new(rpc_url: &str) -> Result<Self, DeliveryError> {
		let url = rpc_url
			.parse()
			.map_err(|e| DeliveryError::Network(format!("Invalid RPC URL {}: {}", rpc_url, e)))?;

		// Configure retry layer for handling rate limits and transient failures
		let retry_layer = RetryBackoffLayer::new(
			5,    // max_retry: retry up to 5 times
			1000, // backoff: initial backoff in milliseconds
			10,   // cups: compute units per second
		);

		let client = RpcClient::builder().layer(retry_layer).http(url);

		let provider = ProviderBuilder::new()
			.disable_recommended_fillers()
			.connect_client(client)
			.erased();

		Ok(Self {
			provider,
			rpc_url: rpc_url.to_string(),
			poll_interval: DEFAULT_POLL_INTERVAL,
		})
	}

	/// RPC endpoint this client talks to.
	pub fn rpc_url(&self) -> &str {
		&self.rpc_url
	}

	async fn poll_receipt(&self, hash: B256) -> Result<TransactionReceipt, DeliveryError> {
		loop {
			let receipt = self
				.provider
				.get_transaction_receipt(hash)
				.await
				.map_err(|e| DeliveryError::Network(format!("Failed to get receipt: {}", e)))?;

			if let Some(receipt) = receipt {
				return Ok(receipt);
			}

			tracing::debug!(tx_hash = %hash, "Receipt not available yet");
			tokio::time::sleep(self.poll_interval).await;
		}
	}
}

impl From<TransactionReceipt> for DeployReceipt {
	fn from(receipt: TransactionReceipt) -> Self {
		Self {
			transaction_hash: receipt.transaction_hash,
			success: receipt.status(),
			contract_address: receipt.contract_address,
			gas_used: receipt.gas_used,
			block_number: receipt.block_number,
		}
	}
}

#[async_trait]
impl ChainClient for AlloyDelivery {
	async fn is_connected(&self) -> bool {
		match self.provider.get_chain_id().await {
			Ok(_) => true,
			Err(e) => {
				tracing::warn!(rpc_url = %self.rpc_url, error = %e, "RPC endpoint unreachable");
				false
			},
		}
	}

	async fn chain_id(&self) -> Result<u64, DeliveryError> {
		self.provider
			.get_chain_id()
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get chain id: {}", e)))
	}

	async fn get_balance(&self, address: Address) -> Result<U256, DeliveryError> {
		self.provider
			.get_balance(address)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get balance: {}", e)))
	}

	async fn get_nonce(&self, address: Address) -> Result<u64, DeliveryError> {
		self.provider
			.get_transaction_count(address)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get nonce: {}", e)))
	}

	async fn get_gas_price(&self) -> Result<u128, DeliveryError> {
		self.provider
			.get_gas_price()
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get gas price: {}", e)))
	}

	async fn send_raw_transaction(&self, raw: Bytes) -> Result<B256, DeliveryError> {
		tracing::debug!(data_len = raw.len(), "Sending raw transaction");

		let pending = self
			.provider
			.send_raw_transaction(&raw)
			.await
			.map_err(|e| {
				tracing::error!(error = %e, "Transaction submission failed");
				DeliveryError::Network(format!("Failed to send transaction: {}", e))
			})?;

		Ok(*pending.tx_hash())
	}

	async fn wait_for_receipt(
		&self,
		hash: B256,
		timeout: Duration,
	) -> Result<DeployReceipt, DeliveryError> {
		tracing::info!(
			tx_hash = %hash,
			timeout_seconds = timeout.as_secs(),
			"Waiting for transaction receipt"
		);

		let receipt = tokio::time::timeout(timeout, self.poll_receipt(hash))
			.await
			.map_err(|_| DeliveryError::Timeout {
				hash,
				seconds: timeout.as_secs(),
			})??;

		Ok(receipt.into())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_alloy_delivery_new_success() {
		let delivery = AlloyDelivery::new("https://testnet-rpc.mocachain.org/").unwrap();
		assert_eq!(delivery.rpc_url(), "https://testnet-rpc.mocachain.org/");
		assert_eq!(delivery.poll_interval, DEFAULT_POLL_INTERVAL);
	}

	#[tokio::test]
	async fn test_alloy_delivery_new_invalid_url() {
		let result = AlloyDelivery::new("not a url");

		assert!(matches!(result, Err(DeliveryError::Network(_))));
		if let Err(DeliveryError::Network(msg)) = result {
			assert!(msg.contains("Invalid RPC URL"));
		}
	}

	fn receipt_json(status: &str, contract_address: Option<Address>) -> serde_json::Value {
		serde_json::json!({
			"transactionHash": B256::repeat_byte(0x11),
			"transactionIndex": "0x0",
			"blockHash": B256::repeat_byte(0x22),
			"blockNumber": "0x2a",
			"from": Address::repeat_byte(0x33),
			"to": null,
			"cumulativeGasUsed": "0x2dc6c0",
			"gasUsed": "0x2dc6c0",
			"effectiveGasPrice": "0x3b9aca00",
			"contractAddress": contract_address,
			"logs": [],
			"logsBloom": format!("0x{}", "0".repeat(512)),
			"type": "0x0",
			"status": status
		})
	}

	#[test]
	fn test_failed_receipt_maps_to_unsuccessful() {
		let receipt: TransactionReceipt =
			serde_json::from_value(receipt_json("0x0", None)).unwrap();

		let receipt = DeployReceipt::from(receipt);

		assert!(!receipt.success);
		assert_eq!(receipt.transaction_hash, B256::repeat_byte(0x11));
		assert_eq!(receipt.contract_address, None);
		assert_eq!(receipt.gas_used, 3_000_000);
		assert_eq!(receipt.block_number, Some(42));
	}

	#[test]
	fn test_successful_creation_receipt() {
		let created = Address::repeat_byte(0x44);
		let receipt: TransactionReceipt =
			serde_json::from_value(receipt_json("0x1", Some(created))).unwrap();

		let receipt = DeployReceipt::from(receipt);

		assert!(receipt.success);
		assert_eq!(receipt.contract_address, Some(created));
	}
}
