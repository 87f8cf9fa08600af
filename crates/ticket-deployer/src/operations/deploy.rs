//! Contract deployment sequence
//!
//! Runs the preflight checks, deploys `TicketNFT` and then `TicketMarketplace`
//! with the NFT address as constructor argument, optionally authorizes the
//! marketplace as verifier on the NFT contract, and finally records the
//! addresses in the environment file and the deployment report. Outputs are
//! written only after every transaction has succeeded.

use crate::{
	cli::output::Display,
	constants::{contracts, env_keys},
	core::{
		artifacts::{ArtifactStore, ContractArtifact},
		env_file::EnvFile,
		logging,
		report::DeploymentReport,
		transaction::TxSender,
	},
	types::{
		deployment::{DeployedContract, DeploymentOutcome, VerifierRegistration},
		error::{Error, Result},
	},
	Context,
};
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{utils::format_ether, Address, TxKind, U256};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

/// Result of the checks run before any transaction is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preflight {
	pub deployer: Address,
	pub chain_id: u64,
	pub balance: U256,
}

/// Both compiled contracts, loaded up front
#[derive(Debug, Clone)]
pub struct DeploymentArtifacts {
	pub ticket_nft: ContractArtifact,
	pub marketplace: ContractArtifact,
}

/// Deployment operations over a shared context
pub struct DeployOps {
	ctx: Arc<Context>,
}

impl DeployOps {
	/// Creates the operations handler
	///
	/// # Arguments
	/// * `ctx` - Shared context holding the configuration, chain client and account
	pub fn new(ctx: Arc<Context>) -> Self {
		Self { ctx }
	}

	/// Check connectivity, chain id and funds of the deploying account
	///
	/// # Errors
	/// Returns Error if the endpoint is unreachable, reports another chain,
	/// or the account balance is zero
	#[instrument(skip(self))]
	pub async fn preflight(&self) -> Result<Preflight> {
		let network = &self.ctx.config.network;
		let deployer = self.ctx.deployer();

		Display::section("Network");
		Display::kv("Network", &network.name);
		Display::kv("RPC URL", &network.rpc_url);

		if !self.ctx.client.is_connected().await {
			return Err(Error::Connection(network.rpc_url.clone()));
		}
		Display::success(&format!("Connected to {}", network.name));

		let chain_id = self.ctx.client.chain_id().await?;
		if chain_id != network.chain_id {
			return Err(Error::ChainMismatch {
				expected: network.chain_id,
				actual: chain_id,
			});
		}
		Display::kv("Chain ID", &chain_id.to_string());

		let balance = self.ctx.client.get_balance(deployer).await?;
		Display::kv("Deployer", &deployer.to_checksum(None));
		Display::kv(
			"Balance",
			&format!("{} {}", format_ether(balance), network.currency_symbol),
		);

		if balance.is_zero() {
			Display::warning(&format!(
				"Send {} to {} on {} and run the deployer again",
				network.currency_symbol,
				deployer.to_checksum(None),
				network.name
			));
			return Err(Error::InsufficientFunds {
				address: deployer,
				symbol: network.currency_symbol.clone(),
			});
		}

		info!(
			deployer = %deployer,
			chain_id = chain_id,
			balance = %balance,
			"Preflight checks passed"
		);
		Ok(Preflight {
			deployer,
			chain_id,
			balance,
		})
	}

	/// Load both artifacts so a missing file fails before anything is sent
	pub fn load_artifacts(&self) -> Result<DeploymentArtifacts> {
		let store = ArtifactStore::open(&self.ctx.config.artifacts_dir)?;
		Ok(DeploymentArtifacts {
			ticket_nft: store.load(contracts::TICKET_NFT)?,
			marketplace: store.load(contracts::TICKET_MARKETPLACE)?,
		})
	}

	/// Deploy one contract and wait until it is mined
	///
	/// # Arguments
	/// * `artifact` - Compiled contract to create
	/// * `args` - Constructor arguments, checked against the artifact's ABI
	///
	/// # Errors
	/// Returns Error if the arguments do not match the ABI, the transaction
	/// fails at any stage, or the receipt carries no contract address
	#[instrument(skip(self, artifact, args), fields(contract = %artifact.name))]
	pub async fn deploy_contract(
		&self,
		artifact: &ContractArtifact,
		args: &[DynSolValue],
	) -> Result<DeployedContract> {
		Display::section(&format!("Deploying {}", artifact.name));
		let data = artifact.deploy_data(args)?;

		let receipt = TxSender::new(&self.ctx)
			.send_and_wait(&artifact.name, TxKind::Create, data)
			.await?;

		let address = receipt
			.contract_address
			.ok_or_else(|| Error::MissingContractAddress {
				contract: artifact.name.clone(),
				tx_hash: receipt.transaction_hash,
			})?;

		Display::success(&format!(
			"{} deployed at {}",
			artifact.name,
			address.to_checksum(None)
		));
		Display::kv("Transaction", &receipt.transaction_hash.to_string());
		Display::kv("Gas used", &receipt.gas_used.to_string());

		Ok(DeployedContract {
			name: artifact.name.clone(),
			address,
			transaction_hash: receipt.transaction_hash,
			gas_used: receipt.gas_used,
			block_number: receipt.block_number,
		})
	}

	/// Call `addVerifier(verifier)` on the NFT contract
	///
	/// # Arguments
	/// * `nft_artifact` - NFT artifact, used for the function ABI
	/// * `nft` - Deployed NFT contract address
	/// * `verifier` - Address to authorize, the marketplace
	#[instrument(skip(self, nft_artifact))]
	pub async fn register_verifier(
		&self,
		nft_artifact: &ContractArtifact,
		nft: Address,
		verifier: Address,
	) -> Result<VerifierRegistration> {
		Display::section("Registering verifier");
		let data =
			nft_artifact.call_data(contracts::ADD_VERIFIER, &[DynSolValue::Address(verifier)])?;
		let label = format!("{}.{}", nft_artifact.name, contracts::ADD_VERIFIER);

		let receipt = TxSender::new(&self.ctx)
			.send_and_wait(&label, TxKind::Call(nft), data)
			.await?;

		Display::success(&format!(
			"{} authorized as verifier",
			verifier.to_checksum(None)
		));
		Ok(VerifierRegistration {
			verifier,
			transaction_hash: receipt.transaction_hash,
		})
	}

	/// Run every on-chain step in order
	///
	/// Nothing is written to disk here.
	pub async fn deploy(&self) -> Result<DeploymentOutcome> {
		let preflight = self.preflight().await?;
		let artifacts = self.load_artifacts()?;

		let ticket_nft = self.deploy_contract(&artifacts.ticket_nft, &[]).await?;
		let marketplace = self
			.deploy_contract(
				&artifacts.marketplace,
				&[DynSolValue::Address(ticket_nft.address)],
			)
			.await?;

		let verifier = if self.ctx.config.register_verifier {
			Some(
				self.register_verifier(
					&artifacts.ticket_nft,
					ticket_nft.address,
					marketplace.address,
				)
				.await?,
			)
		} else {
			None
		};

		Ok(DeploymentOutcome {
			deployer: preflight.deployer,
			ticket_nft,
			marketplace,
			verifier,
		})
	}

	/// Write the addresses to the environment file and the report
	///
	/// # Errors
	/// Returns Error if either file cannot be read or written
	pub fn persist(
		&self,
		outcome: &DeploymentOutcome,
		at: DateTime<Utc>,
	) -> Result<DeploymentReport> {
		let config = &self.ctx.config;

		let mut env = EnvFile::load(&config.env_file)?;
		env.set(
			env_keys::TICKET_NFT_ADDRESS,
			&outcome.ticket_nft.address.to_checksum(None),
		);
		env.set(
			env_keys::TICKET_MARKETPLACE_ADDRESS,
			&outcome.marketplace.address.to_checksum(None),
		);
		env.set(env_keys::RPC_URL, &config.network.rpc_url);
		env.set(env_keys::CHAIN_ID, &config.network.chain_id.to_string());
		env.save()?;
		Display::success(&format!("Updated {}", config.env_file.display()));

		let report = DeploymentReport::new(&config.network, outcome, at);
		report.write(&config.report_file)?;
		Display::success(&format!("Wrote {}", config.report_file.display()));

		Ok(report)
	}

	/// Deploy, persist and print the summary
	pub async fn run(&self) -> Result<DeploymentOutcome> {
		let started = Instant::now();
		logging::operation_start("deploy", &self.ctx.config.network.name);

		let outcome = self.deploy().await?;
		self.persist(&outcome, Utc::now())?;
		self.print_summary(&outcome);

		logging::operation_complete("deploy", started.elapsed().as_millis() as u64);
		Ok(outcome)
	}

	/// Run the preflight and artifact checks without sending anything
	pub async fn check(&self) -> Result<Preflight> {
		logging::operation_start("check", &self.ctx.config.network.name);
		let preflight = self.preflight().await?;

		let artifacts = self.load_artifacts()?;
		Display::section("Artifacts");
		for artifact in [&artifacts.ticket_nft, &artifacts.marketplace] {
			Display::kv(
				&artifact.name,
				&format!("{} bytes of bytecode", artifact.bytecode.len()),
			);
		}

		let config = &self.ctx.config;
		Display::section("Outputs");
		Display::kv("Env file", &config.env_file.display().to_string());
		Display::kv("Report", &config.report_file.display().to_string());
		Display::kv("Gas limit", &config.network.gas_limit.to_string());
		Display::kv("Add verifier", &config.register_verifier.to_string());

		Display::info("Preflight only, no transaction was sent");
		Ok(preflight)
	}

	fn print_summary(&self, outcome: &DeploymentOutcome) {
		let network = &self.ctx.config.network;

		Display::header("Deployment Summary");
		for contract in [&outcome.ticket_nft, &outcome.marketplace] {
			Display::kv(&contract.name, &contract.address.to_checksum(None));
			Display::kv("  Explorer", &network.explorer_address_url(contract.address));
		}
		if let Some(verifier) = &outcome.verifier {
			Display::kv("Verifier tx", &verifier.transaction_hash.to_string());
		}

		Display::next_steps(&[
			"Restart the frontend so it picks up the new environment values",
			"Verify the contract sources on the block explorer",
		]);
	}
}
