//! Compiled contract artifacts
//!
//! Loads build-output JSON files and turns them into deployable payloads.
//! Foundry (`out/<Name>.sol/<Name>.json`, bytecode under `bytecode.object`)
//! and Hardhat (`bytecode` as a plain string) layouts are both accepted.

use crate::types::error::{Error, Result};
use alloy_dyn_abi::{DynSolValue, JsonAbiExt};
use alloy_json_abi::JsonAbi;
use alloy_primitives::{hex, Bytes};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// ABI and creation bytecode of one contract
#[derive(Debug, Clone)]
pub struct ContractArtifact {
	pub name: String,
	pub abi: JsonAbi,
	pub bytecode: Bytes,
}

impl ContractArtifact {
	/// Parse an artifact from its JSON document
	///
	/// A missing `abi` field is treated as an empty ABI. Missing or empty
	/// bytecode is an error.
	pub fn from_json(name: &str, json: &Value) -> Result<Self> {
		let abi = match json.get("abi") {
			Some(abi) => serde_json::from_value::<JsonAbi>(abi.clone()).map_err(|e| {
				Error::InvalidArtifact {
					name: name.to_string(),
					reason: format!("invalid ABI: {}", e),
				}
			})?,
			None => JsonAbi::default(),
		};

		let bytecode_hex = json
			.get("bytecode")
			.and_then(|b| b.get("object").or(Some(b)))
			.and_then(Value::as_str)
			.unwrap_or_default();

		// Remove 0x prefix if present
		let hex_str = bytecode_hex.strip_prefix("0x").unwrap_or(bytecode_hex);
		if hex_str.is_empty() {
			return Err(Error::EmptyBytecode(name.to_string()));
		}

		let bytecode = hex::decode(hex_str).map_err(|e| Error::InvalidArtifact {
			name: name.to_string(),
			reason: format!("invalid bytecode hex: {}", e),
		})?;

		Ok(Self {
			name: name.to_string(),
			abi,
			bytecode: Bytes::from(bytecode),
		})
	}

	/// Creation payload: bytecode followed by the ABI-encoded constructor arguments
	///
	/// Arguments are type-checked against the constructor inputs in the ABI.
	pub fn deploy_data(&self, args: &[DynSolValue]) -> Result<Bytes> {
		let encoded_args = match self.abi.constructor() {
			Some(constructor) => {
				constructor
					.abi_encode_input(args)
					.map_err(|e| Error::InvalidArtifact {
						name: self.name.clone(),
						reason: format!("constructor arguments do not match ABI: {}", e),
					})?
			},
			None if args.is_empty() => Vec::new(),
			None => {
				return Err(Error::InvalidArtifact {
					name: self.name.clone(),
					reason: format!(
						"ABI has no constructor but {} argument(s) were given",
						args.len()
					),
				});
			},
		};

		let mut data = self.bytecode.to_vec();
		data.extend_from_slice(&encoded_args);
		Ok(Bytes::from(data))
	}

	/// Calldata for `function(args)`, selector included
	pub fn call_data(&self, function: &str, args: &[DynSolValue]) -> Result<Bytes> {
		let function_abi = self
			.abi
			.function(function)
			.and_then(|overloads| overloads.first())
			.ok_or_else(|| Error::InvalidArtifact {
				name: self.name.clone(),
				reason: format!("ABI has no function {}", function),
			})?;

		let data = function_abi
			.abi_encode_input(args)
			.map_err(|e| Error::InvalidArtifact {
				name: self.name.clone(),
				reason: format!("arguments for {} do not match ABI: {}", function, e),
			})?;

		Ok(Bytes::from(data))
	}
}

/// Directory of compiled artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
	root: PathBuf,
}

impl ArtifactStore {
	/// Open the artifact directory
	///
	/// # Errors
	/// Returns Error if the directory does not exist
	pub fn open(root: &Path) -> Result<Self> {
		if !root.is_dir() {
			return Err(Error::ArtifactsNotFound(root.to_path_buf()));
		}

		Ok(Self {
			root: root.to_path_buf(),
		})
	}

	/// Load the artifact of a contract by name
	pub fn load(&self, name: &str) -> Result<ContractArtifact> {
		let path = self.find(name).ok_or_else(|| Error::ArtifactMissing {
			name: name.to_string(),
			dir: self.root.clone(),
		})?;
		debug!(contract = name, path = %path.display(), "Loading artifact");

		let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
		let json: Value = serde_json::from_str(&content).map_err(|e| Error::InvalidArtifact {
			name: name.to_string(),
			reason: format!("invalid JSON in {}: {}", path.display(), e),
		})?;

		ContractArtifact::from_json(name, &json)
	}

	fn find(&self, name: &str) -> Option<PathBuf> {
		[
			self.root
				.join(format!("{}.sol", name))
				.join(format!("{}.json", name)),
			self.root.join(format!("{}.json", name)),
		]
		.into_iter()
		.find(|path| path.is_file())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::Address;
	use serde_json::json;
	use tempfile::TempDir;

	fn marketplace_json() -> Value {
		json!({
			"abi": [
				{
					"type": "constructor",
					"inputs": [{ "name": "nftAddress", "type": "address", "internalType": "address" }],
					"stateMutability": "nonpayable"
				}
			],
			"bytecode": { "object": "0x6080604052" }
		})
	}

	fn nft_json() -> Value {
		json!({
			"abi": [
				{
					"type": "function",
					"name": "addVerifier",
					"inputs": [{ "name": "verifier", "type": "address", "internalType": "address" }],
					"outputs": [],
					"stateMutability": "nonpayable"
				}
			],
			"bytecode": { "object": "0x60806040" }
		})
	}

	#[test]
	fn test_from_json_foundry_layout() {
		let artifact =
			ContractArtifact::from_json("TicketMarketplace", &marketplace_json()).unwrap();
		assert_eq!(artifact.bytecode.as_ref(), &[0x60, 0x80, 0x60, 0x40, 0x52]);
		assert!(artifact.abi.constructor().is_some());
	}

	#[test]
	fn test_from_json_hardhat_layout() {
		let json = json!({ "abi": [], "bytecode": "0x6001" });
		let artifact = ContractArtifact::from_json("TicketNFT", &json).unwrap();
		assert_eq!(artifact.bytecode.as_ref(), &[0x60, 0x01]);
	}

	#[test]
	fn test_from_json_empty_bytecode() {
		for json in [
			json!({ "abi": [], "bytecode": { "object": "" } }),
			json!({ "abi": [], "bytecode": { "object": "0x" } }),
			json!({ "abi": [] }),
		] {
			let result = ContractArtifact::from_json("TicketNFT", &json);
			assert!(matches!(result, Err(Error::EmptyBytecode(name)) if name == "TicketNFT"));
		}
	}

	#[test]
	fn test_from_json_invalid_hex() {
		let json = json!({ "bytecode": { "object": "0xzz" } });
		let result = ContractArtifact::from_json("TicketNFT", &json);
		assert!(matches!(result, Err(Error::InvalidArtifact { .. })));
	}

	#[test]
	fn test_deploy_data_without_constructor() {
		let artifact = ContractArtifact::from_json("TicketNFT", &nft_json()).unwrap();
		let data = artifact.deploy_data(&[]).unwrap();
		assert_eq!(data, artifact.bytecode);

		let address = DynSolValue::Address(Address::repeat_byte(0xaa));
		assert!(artifact.deploy_data(&[address]).is_err());
	}

	#[test]
	fn test_deploy_data_appends_encoded_address() {
		let artifact =
			ContractArtifact::from_json("TicketMarketplace", &marketplace_json()).unwrap();
		let nft = Address::repeat_byte(0xaa);

		let data = artifact.deploy_data(&[DynSolValue::Address(nft)]).unwrap();

		assert_eq!(data.len(), artifact.bytecode.len() + 32);
		assert_eq!(&data[..artifact.bytecode.len()], artifact.bytecode.as_ref());
		assert_eq!(&data[artifact.bytecode.len()..][..12], &[0u8; 12]);
		assert_eq!(&data[artifact.bytecode.len() + 12..], nft.as_slice());
	}

	#[test]
	fn test_deploy_data_rejects_wrong_arguments() {
		let artifact =
			ContractArtifact::from_json("TicketMarketplace", &marketplace_json()).unwrap();

		assert!(artifact.deploy_data(&[]).is_err());
		assert!(artifact
			.deploy_data(&[DynSolValue::Bool(true)])
			.is_err());
	}

	#[test]
	fn test_call_data_add_verifier() {
		let artifact = ContractArtifact::from_json("TicketNFT", &nft_json()).unwrap();
		let verifier = Address::repeat_byte(0xbb);

		let data = artifact
			.call_data("addVerifier", &[DynSolValue::Address(verifier)])
			.unwrap();

		assert_eq!(data.len(), 4 + 32);
		assert_eq!(&data[16..], verifier.as_slice());
		assert!(artifact.call_data("removeVerifier", &[]).is_err());
	}

	#[test]
	fn test_store_missing_directory() {
		let temp_dir = TempDir::new().unwrap();
		let result = ArtifactStore::open(&temp_dir.path().join("out"));
		assert!(matches!(result, Err(Error::ArtifactsNotFound(_))));
	}

	#[test]
	fn test_store_load_both_layouts() {
		let temp_dir = TempDir::new().unwrap();
		let nested = temp_dir.path().join("TicketNFT.sol");
		std::fs::create_dir_all(&nested).unwrap();
		std::fs::write(nested.join("TicketNFT.json"), nft_json().to_string()).unwrap();
		std::fs::write(
			temp_dir.path().join("TicketMarketplace.json"),
			marketplace_json().to_string(),
		)
		.unwrap();

		let store = ArtifactStore::open(temp_dir.path()).unwrap();
		assert_eq!(store.load("TicketNFT").unwrap().name, "TicketNFT");
		assert_eq!(
			store.load("TicketMarketplace").unwrap().name,
			"TicketMarketplace"
		);

		let missing = store.load("Unknown");
		assert!(matches!(missing, Err(Error::ArtifactMissing { .. })));
	}
}
