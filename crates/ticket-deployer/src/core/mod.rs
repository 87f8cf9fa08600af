//! Core building blocks: configuration, artifacts, persisted outputs and logging

pub mod artifacts;
pub mod config;
pub mod env_file;
pub mod logging;
pub mod report;
pub mod transaction;

pub use artifacts::{ArtifactStore, ContractArtifact};
pub use config::{Config, ConfigOverrides, NetworkProfile};
pub use env_file::EnvFile;
pub use report::DeploymentReport;
pub use transaction::TxSender;
