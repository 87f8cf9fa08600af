//! Operations behind the CLI subcommands

pub mod deploy;

pub use deploy::{DeployOps, DeploymentArtifacts, Preflight};
