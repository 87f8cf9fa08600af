//! `KEY=VALUE` environment file editing
//!
//! Updates keys in place while leaving every other line, including comments
//! and blank lines, untouched and in its original position.

use crate::types::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Set `key` to `value` in the text of an environment file.
///
/// Every line starting with `KEY=` is replaced by `KEY=VALUE` and keeps its
/// own line ending. If no line matched, `KEY=VALUE` is appended as the last
/// line, terminated like the rest of the file (`\r\n` if the file uses it
/// anywhere, `\n` otherwise). A file without a final newline stays without
/// one.
///
/// # Arguments
/// * `content` - Current text of the file
/// * `key` - Variable name, matched exactly up to the `=`
/// * `value` - New value, written verbatim
pub fn update_env_var(content: &str, key: &str, value: &str) -> String {
	let prefix = format!("{}=", key);
	let entry = format!("{}={}", key, value);
	let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };

	let mut updated = String::with_capacity(content.len() + entry.len() + newline.len());
	let mut found = false;
	for line in content.split_inclusive('\n') {
		if line.starts_with(&prefix) {
			found = true;
			let body_len = line.trim_end_matches(|c: char| c == '\r' || c == '\n').len();
			updated.push_str(&entry);
			updated.push_str(&line[body_len..]);
		} else {
			updated.push_str(line);
		}
	}

	if !found {
		if updated.is_empty() || updated.ends_with('\n') {
			updated.push_str(&entry);
			updated.push_str(newline);
		} else {
			updated.push_str(newline);
			updated.push_str(&entry);
		}
	}
	updated
}

/// An environment file loaded into memory
#[derive(Debug, Clone)]
pub struct EnvFile {
	path: PathBuf,
	content: String,
}

impl EnvFile {
	/// Read the file at `path`; a missing file starts out empty.
	///
	/// # Errors
	/// Returns Error if the file exists but cannot be read
	pub fn load(path: &Path) -> Result<Self> {
		let content = match std::fs::read_to_string(path) {
			Ok(content) => content,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
			Err(e) => return Err(Error::io(path, e)),
		};

		Ok(Self {
			path: path.to_path_buf(),
			content,
		})
	}

	/// Set `key` to `value`, in memory only until [`EnvFile::save`]
	pub fn set(&mut self, key: &str, value: &str) {
		self.content = update_env_var(&self.content, key, value);
	}

	#[cfg(test)]
	fn content(&self) -> &str {
		&self.content
	}

	/// Write the content back, replacing the file
	///
	/// # Errors
	/// Returns Error if the file cannot be written
	pub fn save(&self) -> Result<()> {
		std::fs::write(&self.path, &self.content).map_err(|e| Error::io(&self.path, e))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	const SAMPLE: &str = "# frontend config\nNEXT_PUBLIC_APP_NAME=ProofPass\nNEXT_PUBLIC_CHAIN_ID=1\n\nNEXT_PUBLIC_RPC_URL=http://localhost:8545\n";

	#[test]
	fn test_replace_existing_key() {
		let updated = update_env_var(SAMPLE, "NEXT_PUBLIC_CHAIN_ID", "222888");

		let before: Vec<&str> = SAMPLE.lines().collect();
		let after: Vec<&str> = updated.lines().collect();
		assert_eq!(before.len(), after.len());
		for (i, (old, new)) in before.iter().zip(&after).enumerate() {
			if i == 2 {
				assert_eq!(*new, "NEXT_PUBLIC_CHAIN_ID=222888");
			} else {
				assert_eq!(old, new);
			}
		}
		assert!(updated.ends_with('\n'));
	}

	#[test]
	fn test_append_missing_key() {
		let updated = update_env_var(SAMPLE, "NEXT_PUBLIC_TICKET_NFT_ADDRESS", "0xabc");

		let before: Vec<&str> = SAMPLE.lines().collect();
		let after: Vec<&str> = updated.lines().collect();
		assert_eq!(after.len(), before.len() + 1);
		assert_eq!(&after[..before.len()], &before[..]);
		assert_eq!(after[before.len()], "NEXT_PUBLIC_TICKET_NFT_ADDRESS=0xabc");
		assert!(updated.ends_with("0xabc\n"));
	}

	#[test]
	fn test_update_is_idempotent() {
		for key in ["NEXT_PUBLIC_CHAIN_ID", "NEXT_PUBLIC_TICKET_NFT_ADDRESS"] {
			let once = update_env_var(SAMPLE, key, "42");
			let twice = update_env_var(&once, key, "42");
			assert_eq!(once, twice);
		}
	}

	#[test]
	fn test_key_prefix_must_match_exactly() {
		let content = "NEXT_PUBLIC_CHAIN_ID_OLD=5\n";
		let updated = update_env_var(content, "NEXT_PUBLIC_CHAIN_ID", "1");
		assert_eq!(updated, "NEXT_PUBLIC_CHAIN_ID_OLD=5\nNEXT_PUBLIC_CHAIN_ID=1\n");
	}

	#[test]
	fn test_content_without_trailing_newline() {
		let updated = update_env_var("A=1", "B", "2");
		assert_eq!(updated, "A=1\nB=2");

		let updated = update_env_var("A=1", "A", "3");
		assert_eq!(updated, "A=3");
	}

	#[test]
	fn test_crlf_line_endings_are_kept() {
		let content = "A=1\r\nB=2\r\n";

		assert_eq!(update_env_var(content, "A", "3"), "A=3\r\nB=2\r\n");
		assert_eq!(update_env_var(content, "C", "3"), "A=1\r\nB=2\r\nC=3\r\n");
		assert_eq!(update_env_var("A=1\r\nB=2", "C", "3"), "A=1\r\nB=2\r\nC=3");

		let twice = update_env_var(&update_env_var(content, "C", "3"), "C", "3");
		assert_eq!(twice, "A=1\r\nB=2\r\nC=3\r\n");
	}

	#[test]
	fn test_empty_content() {
		assert_eq!(update_env_var("", "A", "1"), "A=1\n");
	}

	#[test]
	fn test_env_file_load_missing_and_save() {
		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join(".env");

		let mut env = EnvFile::load(&path).unwrap();
		assert_eq!(env.content(), "");

		env.set("NEXT_PUBLIC_CHAIN_ID", "222888");
		env.set("NEXT_PUBLIC_RPC_URL", "https://testnet-rpc.mocachain.org/");
		env.save().unwrap();

		let saved = std::fs::read_to_string(&path).unwrap();
		assert_eq!(
			saved,
			"NEXT_PUBLIC_CHAIN_ID=222888\nNEXT_PUBLIC_RPC_URL=https://testnet-rpc.mocachain.org/\n"
		);
	}

	#[test]
	fn test_env_file_preserves_existing_lines() {
		let temp_dir = TempDir::new().unwrap();
		let path = temp_dir.path().join(".env");
		std::fs::write(&path, SAMPLE).unwrap();

		let mut env = EnvFile::load(&path).unwrap();
		env.set("NEXT_PUBLIC_RPC_URL", "https://testnet-rpc.mocachain.org/");
		env.save().unwrap();

		let saved = std::fs::read_to_string(&path).unwrap();
		assert!(saved.starts_with("# frontend config\nNEXT_PUBLIC_APP_NAME=ProofPass\n"));
		assert!(saved.contains("\n\nNEXT_PUBLIC_RPC_URL=https://testnet-rpc.mocachain.org/\n"));
	}
}
