//! # Deploy Core - Chain-Agnostic Deployment Runner
//!
//! This crate provides the deployment workflow shared by the chain binaries:
//! resolve a compiled blueprint, broadcast its deployment transaction, wait
//! for confirmation, report the result, and conditionally submit explorer
//! verification. Chain SDK bindings live in the chain crates; everything
//! here is expressed against the collaborator traits.
//!
//! ## Modules
//!
//! - [`config`] - Run context assembled at the process boundary
//! - [`error`] - Typed error handling with thiserror
//! - [`runner`] - The sequential deployment flow
//! - [`traits`] - Collaborator trait definitions
//! - [`utils`] - Utility modules (logging, gas configuration)

// Module declarations - internal modules marked pub(crate)
pub mod config;
pub mod error;
pub mod runner;
pub mod traits;
pub(crate) mod utils;

// Selective exports - only public API types
pub use config::DeployConfig;
pub use error::{ConfigError, DeployError};
pub use runner::{
    DeployRunner, DeploymentOutcome, VerificationStatus, DEFAULT_CONFIRMATIONS,
    VERIFY_CONFIRMATIONS,
};
pub use traits::{
    BlueprintRegistry, ContractFactory, DeploymentRecord, PendingDeployment, VerificationClient,
};

// Utils are pub(crate) - only export specific public utilities
pub use utils::{setup_logger, GasConfig, GasConfigToml};
