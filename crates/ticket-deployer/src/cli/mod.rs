//! Command-line interface definitions and parsing
//!
//! Every flag that names a setting can also come from the environment, so the
//! deployer runs unattended with only `MOCA_PRIVATE_KEY` exported.

pub mod output;

use crate::{constants::env_vars, core::config::ConfigOverrides};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Ticket contract deployer for Moca Chain
#[derive(Parser, Debug)]
#[command(name = "ticket-deployer")]
#[command(about = "Deploy the TicketNFT and TicketMarketplace contracts to Moca Chain")]
#[command(version)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Commands,

	/// Verbose logging (overridden by RUST_LOG)
	#[arg(long, global = true, env = env_vars::DEBUG)]
	pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Deploy both contracts and record their addresses
	Deploy {
		#[command(flatten)]
		args: DeployArgs,

		/// Authorize the marketplace as verifier on the NFT contract
		#[arg(long)]
		add_verifier: bool,
	},

	/// Check connectivity, chain id, balance and artifacts without sending anything
	Check {
		#[command(flatten)]
		args: DeployArgs,
	},
}

/// Settings shared by all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct DeployArgs {
	/// Hex private key of the deploying account
	#[arg(long, env = env_vars::PRIVATE_KEY, hide_env_values = true)]
	pub private_key: Option<String>,

	/// JSON-RPC endpoint
	#[arg(long, env = env_vars::RPC_URL)]
	pub rpc_url: Option<String>,

	/// Expected chain id of the endpoint
	#[arg(long, env = env_vars::CHAIN_ID)]
	pub chain_id: Option<u64>,

	/// TOML network profile replacing the built-in Moca testnet defaults
	#[arg(long, value_name = "FILE")]
	pub network_config: Option<PathBuf>,

	/// Directory holding the compiled contract artifacts
	#[arg(long, value_name = "DIR")]
	pub artifacts: Option<PathBuf>,

	/// Environment file to update with the deployed addresses
	#[arg(long, value_name = "FILE")]
	pub env_file: Option<PathBuf>,

	/// Where to write the deployment report
	#[arg(long, value_name = "FILE")]
	pub report: Option<PathBuf>,
}

impl DeployArgs {
	/// Converts the parsed flags into configuration overrides
	///
	/// # Arguments
	/// * `register_verifier` - Whether the run ends with `addVerifier`
	pub fn into_overrides(self, register_verifier: bool) -> ConfigOverrides {
		ConfigOverrides {
			private_key: self.private_key,
			rpc_url: self.rpc_url,
			chain_id: self.chain_id,
			network_config: self.network_config,
			artifacts_dir: self.artifacts,
			env_file: self.env_file,
			report_file: self.report,
			register_verifier,
		}
	}
}
