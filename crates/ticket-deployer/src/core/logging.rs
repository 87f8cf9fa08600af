//! Logging helpers for deployment steps
//!
//! Each helper writes the user-facing line through `Display` and records the
//! same event as a structured tracing event.

use crate::cli::output::Display;
use tracing::{error, info};

/// Record the start of a step
pub fn operation_start(operation: &str, context: &str) {
	info!(
		operation = operation,
		context = context,
		"Operation started"
	);
}

/// Report a finished step to the user and the log
pub fn operation_success(operation: &str, details: &str) {
	Display::success(&format!("{} completed successfully", operation));
	info!(
		operation = operation,
		details = details,
		"Operation completed successfully"
	);
}

/// Report a failed step on stderr and in the log
pub fn operation_error(operation: &str, error: &anyhow::Error) {
	Display::error(&format!("{} failed: {}", operation, error));
	error!(
		operation = operation,
		error = %error,
		"Operation failed"
	);
}

/// Record the wall-clock duration of a finished step
pub fn operation_complete(operation: &str, duration_ms: u64) {
	info!(
		operation = operation,
		duration_ms = duration_ms,
		"Operation completed"
	);
}
