//! Configuration management
//!
//! Resolves the settings of a deployment run from three layers: built-in
//! defaults for the Moca Chain testnet, an optional TOML network profile, and
//! explicit overrides coming from flags or environment variables. The signing
//! key has no default and must come from the override layer.

use crate::{
	constants::{env_vars, network, paths},
	types::error::{Error, Result},
};
use alloy_primitives::Address;
use deploy_account::SecretString;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Network the contracts are deployed to
///
/// Every field has a default, so a profile file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkProfile {
	pub name: String,
	pub rpc_url: String,
	pub chain_id: u64,
	pub explorer_url: String,
	pub currency_symbol: String,
	pub gas_limit: u64,
	pub receipt_timeout_seconds: u64,
}

impl Default for NetworkProfile {
	fn default() -> Self {
		Self {
			name: network::NAME.to_string(),
			rpc_url: network::RPC_URL.to_string(),
			chain_id: network::CHAIN_ID,
			explorer_url: network::EXPLORER_URL.to_string(),
			currency_symbol: network::CURRENCY_SYMBOL.to_string(),
			gas_limit: network::GAS_LIMIT,
			receipt_timeout_seconds: network::RECEIPT_TIMEOUT_SECONDS,
		}
	}
}

impl NetworkProfile {
	/// Load a profile from a TOML file
	///
	/// # Errors
	/// Returns Error if the file cannot be read or is not valid TOML
	pub fn from_file(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
		let profile: Self = toml::from_str(&content)?;
		Ok(profile)
	}

	/// Maximum time to wait for each transaction receipt
	pub fn receipt_timeout(&self) -> Duration {
		Duration::from_secs(self.receipt_timeout_seconds)
	}

	/// Block explorer page for an address
	pub fn explorer_address_url(&self, address: Address) -> String {
		format!(
			"{}/address/{}",
			self.explorer_url.trim_end_matches('/'),
			address.to_checksum(None)
		)
	}

	fn validate(&self) -> Result<()> {
		if self.rpc_url.trim().is_empty() {
			return Err(Error::InvalidConfig("rpc_url cannot be empty".to_string()));
		}
		if self.chain_id == 0 {
			return Err(Error::InvalidConfig("chain_id must be non-zero".to_string()));
		}
		if self.gas_limit == 0 {
			return Err(Error::InvalidConfig("gas_limit must be non-zero".to_string()));
		}
		if self.receipt_timeout_seconds == 0 {
			return Err(Error::InvalidConfig(
				"receipt_timeout_seconds must be non-zero".to_string(),
			));
		}
		Ok(())
	}
}

/// Values supplied on the command line or through the environment
///
/// `None` means "not given"; the profile or default value is used instead.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
	pub private_key: Option<String>,
	pub rpc_url: Option<String>,
	pub chain_id: Option<u64>,
	pub network_config: Option<PathBuf>,
	pub artifacts_dir: Option<PathBuf>,
	pub env_file: Option<PathBuf>,
	pub report_file: Option<PathBuf>,
	pub register_verifier: bool,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Config {
	pub network: NetworkProfile,
	pub private_key: SecretString,
	pub artifacts_dir: PathBuf,
	pub env_file: PathBuf,
	pub report_file: PathBuf,
	/// Call `addVerifier(marketplace)` on the NFT contract after deploying
	pub register_verifier: bool,
}

impl Config {
	/// Resolve configuration from defaults, an optional profile and overrides
	///
	/// The signing key is checked first so a missing key is reported before
	/// anything else is read.
	///
	/// # Errors
	/// Returns Error if the key is absent or blank, the profile cannot be
	/// loaded, or the resulting network settings are invalid
	pub fn load(overrides: ConfigOverrides) -> Result<Self> {
		let private_key = overrides
			.private_key
			.map(SecretString::from)
			.filter(|key| !key.is_empty())
			.ok_or(Error::MissingConfig(env_vars::PRIVATE_KEY))?;

		let mut network = match &overrides.network_config {
			Some(path) => NetworkProfile::from_file(path)?,
			None => NetworkProfile::default(),
		};

		if let Some(rpc_url) = overrides.rpc_url {
			network.rpc_url = rpc_url;
		}
		if let Some(chain_id) = overrides.chain_id {
			network.chain_id = chain_id;
		}
		network.validate()?;

		Ok(Self {
			network,
			private_key,
			artifacts_dir: overrides
				.artifacts_dir
				.unwrap_or_else(|| PathBuf::from(paths::ARTIFACTS_DIR)),
			env_file: overrides
				.env_file
				.unwrap_or_else(|| PathBuf::from(paths::ENV_FILE)),
			report_file: overrides
				.report_file
				.unwrap_or_else(|| PathBuf::from(paths::REPORT_FILE)),
			register_verifier: overrides.register_verifier,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	const TEST_PRIVATE_KEY: &str =
		"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	fn overrides_with_key() -> ConfigOverrides {
		ConfigOverrides {
			private_key: Some(TEST_PRIVATE_KEY.to_string()),
			..Default::default()
		}
	}

	#[test]
	fn test_missing_private_key() {
		let result = Config::load(ConfigOverrides::default());
		assert!(matches!(result, Err(Error::MissingConfig("MOCA_PRIVATE_KEY"))));
	}

	#[test]
	fn test_blank_private_key_is_missing() {
		let overrides = ConfigOverrides {
			private_key: Some("   ".to_string()),
			..Default::default()
		};
		assert!(matches!(
			Config::load(overrides),
			Err(Error::MissingConfig(_))
		));
	}

	#[test]
	fn test_missing_key_reported_before_profile_is_read() {
		let overrides = ConfigOverrides {
			network_config: Some(PathBuf::from("/nonexistent/network.toml")),
			..Default::default()
		};
		assert!(matches!(
			Config::load(overrides),
			Err(Error::MissingConfig(_))
		));
	}

	#[test]
	fn test_defaults() {
		let config = Config::load(overrides_with_key()).unwrap();

		assert_eq!(config.network, NetworkProfile::default());
		assert_eq!(config.network.chain_id, 222888);
		assert_eq!(config.network.gas_limit, 3_000_000);
		assert_eq!(config.network.receipt_timeout(), Duration::from_secs(300));
		assert_eq!(config.artifacts_dir, PathBuf::from("out"));
		assert_eq!(config.env_file, PathBuf::from(".env"));
		assert_eq!(config.report_file, PathBuf::from("DEPLOYMENT_REPORT.json"));
		assert!(!config.register_verifier);
	}

	#[test]
	fn test_profile_and_overrides() {
		let temp_dir = TempDir::new().unwrap();
		let profile_path = temp_dir.path().join("network.toml");
		std::fs::write(
			&profile_path,
			r#"
name = "Local Anvil"
rpc_url = "http://localhost:8545"
chain_id = 31337
gas_limit = 5000000
"#,
		)
		.unwrap();

		let overrides = ConfigOverrides {
			network_config: Some(profile_path),
			chain_id: Some(31338),
			..overrides_with_key()
		};
		let config = Config::load(overrides).unwrap();

		assert_eq!(config.network.name, "Local Anvil");
		assert_eq!(config.network.rpc_url, "http://localhost:8545");
		assert_eq!(config.network.chain_id, 31338);
		assert_eq!(config.network.gas_limit, 5_000_000);
		// Untouched keys keep their defaults
		assert_eq!(config.network.currency_symbol, "MOCA");
		assert_eq!(config.network.receipt_timeout_seconds, 300);
	}

	#[test]
	fn test_invalid_profile_values() {
		let overrides = ConfigOverrides {
			chain_id: Some(0),
			..overrides_with_key()
		};
		assert!(matches!(
			Config::load(overrides),
			Err(Error::InvalidConfig(_))
		));

		let overrides = ConfigOverrides {
			rpc_url: Some(String::new()),
			..overrides_with_key()
		};
		assert!(matches!(
			Config::load(overrides),
			Err(Error::InvalidConfig(_))
		));
	}

	#[test]
	fn test_explorer_address_url() {
		let profile = NetworkProfile {
			explorer_url: "https://testnet-scan.mocachain.org/".to_string(),
			..Default::default()
		};
		let address: Address = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
			.parse()
			.unwrap();

		assert_eq!(
			profile.explorer_address_url(address),
			"https://testnet-scan.mocachain.org/address/0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
		);
	}

	#[test]
	fn test_private_key_is_redacted_in_debug() {
		let config = Config::load(overrides_with_key()).unwrap();
		let debug = format!("{:?}", config);
		assert!(!debug.contains("ac0974bec39a17e3"));
	}
}
