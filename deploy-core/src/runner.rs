//! One-shot deployment runner.
//!
//! Resolves a blueprint, broadcasts its deployment transaction, waits for
//! confirmation, reports the address and deployer, and conditionally submits
//! explorer verification. Strictly sequential; a run either completes or
//! fails with the first error.

use crate::config::DeployConfig;
use crate::error::DeployError;
use crate::traits::{BlueprintRegistry, DeploymentRecord, PendingDeployment, VerificationClient};
use tracing::{debug, info, warn};

/// Depth waited before reporting the deployment.
pub const DEFAULT_CONFIRMATIONS: u64 = 1;

/// Depth waited before explorer verification, so a reorg cannot drop the
/// contract while the explorer indexes it.
pub const VERIFY_CONFIRMATIONS: u64 = 6;

/// Terminal state of the verification step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    /// Explorer accepted the source submission.
    Verified,
    /// The gate did not open (wrong chain or no key).
    Skipped,
    /// The contract is live but the explorer step failed.
    Failed { reason: String },
}

/// Result of a completed run. Exists only when the deployment itself
/// succeeded; a verification failure is carried here instead of aborting.
#[derive(Debug, Clone)]
pub struct DeploymentOutcome {
    pub blueprint: String,
    pub address: String,
    pub deployer: String,
    pub tx_hash: String,
    pub verification: VerificationStatus,
}

pub struct DeployRunner<'a> {
    registry: &'a dyn BlueprintRegistry,
    verifier: &'a dyn VerificationClient,
    config: DeployConfig,
}

impl<'a> DeployRunner<'a> {
    pub fn new(
        registry: &'a dyn BlueprintRegistry,
        verifier: &'a dyn VerificationClient,
        config: DeployConfig,
    ) -> Self {
        Self {
            registry,
            verifier,
            config,
        }
    }

    /// Deploy the named blueprint with no constructor arguments.
    pub async fn run(&self, blueprint: &str) -> Result<DeploymentOutcome, DeployError> {
        let factory = self.registry.resolve(blueprint)?;

        info!("Deploying contract ...");
        let pending = factory.deploy(&[]).await?;

        let record = pending.confirmed(DEFAULT_CONFIRMATIONS).await?;
        info!("Contract deployed at {}", record.address);
        info!("Contract deployer is: {}", record.deployer);

        let verification = if self.config.verification_enabled() {
            self.verify(pending.as_ref(), &record).await
        } else {
            debug!(
                "Verification skipped (chain {}, target {})",
                self.config.chain_id, self.config.target_chain_id
            );
            VerificationStatus::Skipped
        };

        Ok(DeploymentOutcome {
            blueprint: blueprint.to_string(),
            address: record.address,
            deployer: record.deployer,
            tx_hash: record.tx_hash,
            verification,
        })
    }

    /// The contract is already live here, so nothing in this step is allowed
    /// to abort the run.
    async fn verify(
        &self,
        pending: &dyn PendingDeployment,
        record: &DeploymentRecord,
    ) -> VerificationStatus {
        if let Err(e) = pending.confirmed(VERIFY_CONFIRMATIONS).await {
            warn!("Contract deployed but not verified: {}", e);
            return VerificationStatus::Failed {
                reason: e.to_string(),
            };
        }

        match self.verifier.verify(&record.address, &[]).await {
            Ok(()) => {
                info!("Contract verified at {}", record.address);
                VerificationStatus::Verified
            }
            Err(e) => {
                warn!("Contract deployed but not verified: {}", e);
                VerificationStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
