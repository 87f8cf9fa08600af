//! Signed transaction submission
//!
//! Builds legacy transactions from on-chain account state, signs them with the
//! run's account and waits for the receipt. Nonce and gas price are fetched
//! fresh for every transaction, so transactions must be sent one at a time.

use crate::{
	types::error::{Error, Result},
	Context,
};
use alloy_consensus::TxLegacy;
use alloy_primitives::{Bytes, TxKind, U256};
use deploy_delivery::DeployReceipt;
use tracing::{debug, info};

/// Sends transactions from the deploying account
pub struct TxSender<'a> {
	ctx: &'a Context,
}

impl<'a> TxSender<'a> {
	/// Creates a sender for the context's account and chain client
	pub fn new(ctx: &'a Context) -> Self {
		Self { ctx }
	}

	/// Build an unsigned transaction with the current nonce and gas price
	///
	/// # Arguments
	/// * `to` - `TxKind::Create` for a deployment, `TxKind::Call` otherwise
	/// * `input` - Creation payload or calldata
	///
	/// # Errors
	/// Returns Error if the nonce or gas price query fails
	pub async fn build(&self, to: TxKind, input: Bytes) -> Result<TxLegacy> {
		let deployer = self.ctx.deployer();
		let nonce = self.ctx.client.get_nonce(deployer).await?;
		let gas_price = self.ctx.client.get_gas_price().await?;
		let network = &self.ctx.config.network;

		Ok(TxLegacy {
			chain_id: Some(network.chain_id),
			nonce,
			gas_price,
			gas_limit: network.gas_limit,
			to,
			value: U256::ZERO,
			input,
		})
	}

	/// Build, sign and broadcast a transaction, then wait for its receipt
	///
	/// # Errors
	/// Returns Error if any RPC call or signing fails, the receipt does not
	/// arrive within the configured timeout, or the receipt reports failure.
	/// `label` names the transaction in the failure.
	pub async fn send_and_wait(
		&self,
		label: &str,
		to: TxKind,
		input: Bytes,
	) -> Result<DeployReceipt> {
		let tx = self.build(to, input).await?;
		debug!(
			label = label,
			nonce = tx.nonce,
			gas_price = tx.gas_price,
			gas_limit = tx.gas_limit,
			"Signing transaction"
		);

		let raw = self.ctx.account.sign_transaction(tx).await?;
		let tx_hash = self.ctx.client.send_raw_transaction(raw).await?;
		info!(label = label, tx_hash = %tx_hash, "Transaction sent");

		let receipt = self
			.ctx
			.client
			.wait_for_receipt(tx_hash, self.ctx.config.network.receipt_timeout())
			.await?;

		if !receipt.success {
			return Err(Error::DeploymentFailed {
				contract: label.to_string(),
				tx_hash,
			});
		}

		info!(
			label = label,
			tx_hash = %tx_hash,
			gas_used = receipt.gas_used,
			block_number = ?receipt.block_number,
			"Transaction confirmed"
		);
		Ok(receipt)
	}
}
