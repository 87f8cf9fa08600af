//! Terminal output
//!
//! Colored status lines for the deployer CLI. Progress, balances and the final
//! summary go to stdout; failures go to stderr so they survive redirecting the
//! progress log to a file.

use colored::Colorize;

/// Terminal display helpers
///
/// Stateless; every method prints one line (or a short block) immediately.
pub struct Display;

impl Display {
	/// Prints a cyan title underlined to its own width
	///
	/// # Arguments
	/// * `text` - Title, e.g. the subcommand being run
	pub fn header(text: &str) {
		println!("\n{}", text.bold().cyan());
		println!("{}", "─".repeat(text.chars().count()).cyan());
	}

	/// Prints a step that finished, prefixed with a green check mark
	///
	/// # Arguments
	/// * `message` - What was completed, e.g. the deployed address
	pub fn success(message: &str) {
		println!("{} {}", "✓".green().bold(), message);
	}

	/// Prints a failure to stderr, prefixed with a red cross
	///
	/// # Arguments
	/// * `message` - Diagnostic shown to the operator before the process exits
	pub fn error(message: &str) {
		eprintln!("{} {}", "✗".red().bold(), message.red());
	}

	/// Prints something the operator has to act on
	///
	/// # Arguments
	/// * `message` - Remediation hint, e.g. which address to fund
	pub fn warning(message: &str) {
		println!("{} {}", "⚠".yellow().bold(), message.yellow());
	}

	/// Prints a neutral note
	pub fn info(message: &str) {
		println!("{} {}", "ℹ".blue().bold(), message);
	}

	/// Prints an indented `key: value` line
	///
	/// # Arguments
	/// * `key` - Label, printed in bold
	/// * `value` - Value, printed as is
	pub fn kv(key: &str, value: &str) {
		println!("  {} {}", format!("{}:", key).bold(), value);
	}

	/// Prints a section title with an arrow prefix
	pub fn section(title: &str) {
		println!("\n{}", format!("▸ {}", title).bold());
	}

	/// Prints a numbered list of follow-up actions under a "Next Steps" title
	///
	/// # Arguments
	/// * `steps` - Actions in the order they should be done
	pub fn next_steps(steps: &[&str]) {
		Self::section("Next Steps");
		for (i, step) in steps.iter().enumerate() {
			println!("  {}. {}", i + 1, step);
		}
	}
}
