//! # Deployment Error Types
//!
//! Centralized error definitions for the deploy-core crate.
//! All errors implement `std::error::Error` and `std::fmt::Display`.

use thiserror::Error;

/// Unified error type for a deployment run.
///
/// Each variant corresponds to one phase of the deployment flow, so
/// callers can branch on the failure kind. Confirmation failures may be
/// retried by a caller; submission failures must never be retried blindly,
/// since resubmission risks a duplicate deployment.
#[derive(Error, Debug, Clone)]
pub enum DeployError {
    #[error("Blueprint '{name}' not found among compiled artifacts")]
    BlueprintNotFound { name: String },

    #[error("Deployment submission failed: {reason}")]
    Submission { reason: String },

    #[error("Confirmation failed at depth {depth}: {reason}")]
    Confirmation { depth: u64, reason: String },

    #[error("Verification failed for {address}: {reason}")]
    Verification { address: String, reason: String },
}

impl DeployError {
    /// The deployment transaction may already be on-chain for every kind
    /// except a failed blueprint lookup.
    pub fn is_pre_submission(&self) -> bool {
        matches!(self, DeployError::BlueprintNotFound { .. })
    }
}

/// Configuration-related errors, raised while assembling the run context
/// at the process boundary.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid RPC URL format: '{url}'")]
    InvalidRpcUrl { url: String },

    #[error("Missing required configuration field: '{field}'")]
    MissingField { field: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
