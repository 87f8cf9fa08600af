//! Shared state of a run: resolved configuration plus the chain client and
//! signing account built from it.

use crate::{core::config::Config, types::error::Result};
use deploy_account::{AccountInterface, LocalWallet};
use deploy_delivery::{AlloyDelivery, ChainClient};
use std::sync::Arc;
use tracing::debug;

/// Everything an operation needs, shared behind an `Arc`
///
/// The chain client and the account are trait objects so tests can swap in
/// mocks through [`Context::with_parts`].
pub struct Context {
	pub config: Config,
	pub client: Arc<dyn ChainClient>,
	pub account: Arc<dyn AccountInterface>,
}

impl Context {
	/// Build the signer and the RPC client for `config`
	///
	/// No request is sent yet; connectivity is checked by the preflight step.
	///
	/// # Errors
	/// Returns Error if the key is malformed or the RPC URL cannot be parsed
	pub fn connect(config: Config) -> Result<Self> {
		let account = LocalWallet::from_secret(&config.private_key)?;
		let client = AlloyDelivery::new(&config.network.rpc_url)?;
		debug!(
			rpc_url = %client.rpc_url(),
			deployer = %account.address(),
			"Context initialized"
		);

		Ok(Self::with_parts(config, Arc::new(client), Arc::new(account)))
	}

	/// Assemble a context from existing parts
	///
	/// # Arguments
	/// * `config` - Resolved settings for the run
	/// * `client` - Chain client bound to `config.network.rpc_url`
	/// * `account` - Signer whose address pays for every transaction
	pub fn with_parts(
		config: Config,
		client: Arc<dyn ChainClient>,
		account: Arc<dyn AccountInterface>,
	) -> Self {
		Self {
			config,
			client,
			account,
		}
	}

	/// Address that signs and pays for every transaction
	pub fn deployer(&self) -> alloy_primitives::Address {
		self.account.address()
	}
}
