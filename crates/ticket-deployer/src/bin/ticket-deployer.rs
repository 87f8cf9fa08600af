//! Command-line entry point for the ticket contract deployer
//!
//! Loads `.env`, parses arguments, sets up logging and dispatches to the
//! deployment operations. Any failure is reported on stderr and ends the
//! process with exit status 1.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use ticket_deployer::{
	cli::{output::Display, Cli, Commands, DeployArgs},
	core::{config::Config, logging},
	operations::DeployOps,
	Context,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
	// Load environment variables from .env file if it exists
	let _ = dotenvy::dotenv();

	let cli = Cli::parse();
	init_logging(cli.debug);

	let (operation, result) = match cli.command {
		Commands::Deploy { args, add_verifier } => {
			("Deployment", handle_deploy(args, add_verifier).await)
		},
		Commands::Check { args } => ("Preflight check", handle_check(args).await),
	};

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(error) => {
			logging::operation_error(operation, &error);
			ExitCode::FAILURE
		},
	}
}

/// Initialize structured logging
///
/// `RUST_LOG` wins when set; otherwise the deployer logs at info, or debug
/// with `--debug`, and other crates at warn.
fn init_logging(debug: bool) {
	use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

	let default_filter = if debug {
		"ticket_deployer=debug,deploy_delivery=debug,warn"
	} else {
		"ticket_deployer=info,warn"
	};
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

	tracing_subscriber::registry()
		.with(
			fmt::layer()
				.with_target(true)
				.with_thread_ids(false)
				.with_file(false)
				.with_line_number(false)
				.compact(),
		)
		.with(env_filter)
		.init();
}

fn connect(args: DeployArgs, register_verifier: bool) -> Result<Arc<Context>> {
	let config = Config::load(args.into_overrides(register_verifier))?;
	Ok(Arc::new(Context::connect(config)?))
}

async fn handle_deploy(args: DeployArgs, add_verifier: bool) -> Result<()> {
	Display::header("Deploying Ticket Contracts");

	let ctx = connect(args, add_verifier)?;
	let outcome = DeployOps::new(ctx).run().await?;

	logging::operation_success(
		"Deployment",
		&format!(
			"TicketNFT={} TicketMarketplace={}",
			outcome.ticket_nft.address, outcome.marketplace.address
		),
	);
	Ok(())
}

async fn handle_check(args: DeployArgs) -> Result<()> {
	Display::header("Deployment Preflight");

	let ctx = connect(args, false)?;
	let preflight = DeployOps::new(ctx).check().await?;

	logging::operation_success("Preflight check", &format!("deployer={}", preflight.deployer));
	Ok(())
}
