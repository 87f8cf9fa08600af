//! Local private key account.
//!
//! Signs transactions in-process with Alloy's `PrivateKeySigner`. The key is
//! read once from configuration and kept for the lifetime of the process.

use crate::{AccountError, AccountInterface, SecretString};
use alloy_consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy_eips::eip2718::Encodable2718;
use alloy_network::TxSigner;
use alloy_primitives::{hex, Address, Bytes};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;

/// Local wallet implementation using Alloy's signer.
#[derive(Debug)]
pub struct LocalWallet {
	/// The underlying Alloy signer that handles cryptographic operations.
	signer: PrivateKeySigner,
}

impl LocalWallet {
	/// Creates a new LocalWallet from a hex-encoded private key.
	///
	/// The private key should be provided as a hex string (with or without 0x prefix).
	pub fn new(private_key_hex: &str) -> Result<Self, AccountError> {
		validate_private_key(private_key_hex).map_err(AccountError::InvalidKey)?;

		let signer = private_key_hex
			.trim()
			.parse::<PrivateKeySigner>()
			.map_err(|e| AccountError::InvalidKey(format!("Invalid private key: {}", e)))?;

		Ok(Self { signer })
	}

	/// Creates a LocalWallet from a key held in a [`SecretString`].
	pub fn from_secret(private_key: &SecretString) -> Result<Self, AccountError> {
		private_key.with_exposed(Self::new)
	}
}

/// Checks that a key is 32 bytes of hex, optionally `0x`-prefixed.
fn validate_private_key(key: &str) -> Result<(), String> {
	let key = key.trim();
	let key_without_prefix = key.strip_prefix("0x").unwrap_or(key);

	if key_without_prefix.len() != 64 {
		return Err("Private key must be 64 hex characters (32 bytes)".to_string());
	}

	if hex::decode(key_without_prefix).is_err() {
		return Err("Private key must be valid hexadecimal".to_string());
	}

	Ok(())
}

#[async_trait]
impl AccountInterface for LocalWallet {
	fn address(&self) -> Address {
		self.signer.address()
	}

	async fn sign_transaction(&self, mut tx: TxLegacy) -> Result<Bytes, AccountError> {
		if tx.chain_id.is_none() {
			return Err(AccountError::SigningFailed(
				"Refusing to sign a transaction without chain id".to_string(),
			));
		}

		let signature = self
			.signer
			.sign_transaction(&mut tx)
			.await
			.map_err(|e| {
				AccountError::SigningFailed(format!("Failed to sign transaction: {}", e))
			})?;

		let envelope = TxEnvelope::from(tx.into_signed(signature));
		Ok(envelope.encoded_2718().into())
	}
}
