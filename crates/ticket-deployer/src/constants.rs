//! Constants and default values used throughout the deployer
//!
//! Contains the default network profile (Moca Chain testnet), contract names,
//! environment variable names and default file locations.

/// Default network profile values
pub mod network {
	pub const NAME: &str = "Moca Chain Testnet";
	pub const RPC_URL: &str = "https://testnet-rpc.mocachain.org/";
	pub const CHAIN_ID: u64 = 222888;
	pub const EXPLORER_URL: &str = "https://testnet-scan.mocachain.org";
	pub const CURRENCY_SYMBOL: &str = "MOCA";

	/// Gas limit used for every transaction the deployer sends
	pub const GAS_LIMIT: u64 = 3_000_000;

	/// Maximum time to wait for a transaction receipt
	pub const RECEIPT_TIMEOUT_SECONDS: u64 = 300;
}

/// Names of the deployed contracts, as found in the build output
pub mod contracts {
	pub const TICKET_NFT: &str = "TicketNFT";
	pub const TICKET_MARKETPLACE: &str = "TicketMarketplace";

	/// Function on the NFT contract that authorizes a verifier
	pub const ADD_VERIFIER: &str = "addVerifier";
}

/// Environment variable names read by the CLI
pub mod env_vars {
	pub const PRIVATE_KEY: &str = "MOCA_PRIVATE_KEY";
	pub const RPC_URL: &str = "MOCA_RPC_URL";
	pub const CHAIN_ID: &str = "MOCA_CHAIN_ID";
	pub const DEBUG: &str = "DEPLOYER_DEBUG";
}

/// Keys written to the frontend environment file
pub mod env_keys {
	pub const TICKET_NFT_ADDRESS: &str = "NEXT_PUBLIC_TICKET_NFT_ADDRESS";
	pub const TICKET_MARKETPLACE_ADDRESS: &str = "NEXT_PUBLIC_TICKET_MARKETPLACE_ADDRESS";
	pub const RPC_URL: &str = "NEXT_PUBLIC_RPC_URL";
	pub const CHAIN_ID: &str = "NEXT_PUBLIC_CHAIN_ID";
}

/// Default file locations, relative to the working directory
pub mod paths {
	pub const ARTIFACTS_DIR: &str = "out";
	pub const ENV_FILE: &str = ".env";
	pub const REPORT_FILE: &str = "DEPLOYMENT_REPORT.json";
}
