//! Account management for contract deployments.
//!
//! This module defines the signing seam used by the deployer: an account
//! exposes its address and turns unsigned legacy transactions into raw,
//! broadcast-ready bytes. Key material stays inside the implementation.

use alloy_consensus::TxLegacy;
use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use thiserror::Error;

/// Redacting wrapper for key material.
pub mod secret;

pub use secret::SecretString;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

pub use implementations::local::LocalWallet;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when signing operations fail.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
}

/// Trait defining the interface for deployment accounts.
///
/// Implementations own the signing key. Callers build the transaction, hand it
/// over, and get back the EIP-2718 encoded signed envelope ready for
/// `eth_sendRawTransaction`.
#[async_trait]
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait AccountInterface: Send + Sync {
	/// Returns the address derived from the signing key.
	fn address(&self) -> Address;

	/// Signs a legacy transaction and returns its raw encoding.
	async fn sign_transaction(&self, tx: TxLegacy) -> Result<Bytes, AccountError>;
}
