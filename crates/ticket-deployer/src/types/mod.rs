//! Shared types for the deployer
//!
//! Error definitions and the records produced by a deployment run.

pub mod deployment;
pub mod error;

pub use deployment::{DeployedContract, DeploymentOutcome, VerifierRegistration};
pub use error::{Error, Result};
