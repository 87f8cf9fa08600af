//! Deployer for the ticketing contracts on Moca Chain
//!
//! Deploys `TicketNFT`, then `TicketMarketplace` pointing at it, and records
//! the resulting addresses in the frontend environment file and a JSON
//! deployment report. Chain access and signing live in the `deploy-delivery`
//! and `deploy-account` crates.

pub mod cli;
pub mod constants;
pub mod context;
pub mod core;
pub mod operations;
pub mod types;

pub use context::Context;
pub use types::error::{Error, Result};
